use std::fs;
use std::path::{Path, PathBuf};

use scrolly_charts::render::SvgRenderer;
use scrolly_charts::{Scrollytelling, StoryConfig, telemetry};

const USAGE: &str = "usage: render_story [--config <path>] --output <dir> [--midpoints]";

#[derive(Debug)]
struct CliArgs {
    config: Option<PathBuf>,
    output: PathBuf,
    midpoints: bool,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => StoryConfig::from_path(path).map_err(|err| err.to_string())?,
        None => StoryConfig::default(),
    };
    fs::create_dir_all(&args.output)
        .map_err(|err| format!("failed to create `{}`: {err}", args.output.display()))?;

    let mut story =
        Scrollytelling::load(SvgRenderer::new(), config).map_err(|err| err.to_string())?;

    story.render_stacked_bar().map_err(|err| err.to_string())?;
    write_svg(&args.output.join("bar.svg"), story.renderer().output())?;

    let layout = story.layout();
    let offset = story.config().trigger_offset * layout.graphic_height;
    let extents = layout.step_extents(story.storyboard().len());
    for (index, extent) in extents.iter().enumerate() {
        // Put the trigger line just inside the step.
        let scroll_top = extent.top - offset + 1.0;
        let updates = story.on_scroll(scroll_top).map_err(|err| err.to_string())?;

        if args.midpoints {
            for update in &updates {
                let midpoint = update.plan.total_duration_ms() as f64 / 2.0;
                story
                    .render_dot_strip_at(&update.plan, midpoint)
                    .map_err(|err| err.to_string())?;
                let name = format!("step_{:02}_mid.svg", update.event.index);
                write_svg(&args.output.join(name), story.renderer().output())?;
            }
        }

        story.render_dot_strip().map_err(|err| err.to_string())?;
        write_svg(
            &args.output.join(format!("step_{index:02}.svg")),
            story.renderer().output(),
        )?;
    }

    println!(
        "wrote {} step frames and bar.svg to {}",
        extents.len(),
        args.output.display()
    );
    Ok(())
}

fn write_svg(path: &Path, svg: &str) -> Result<(), String> {
    fs::write(path, svg).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut config = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut midpoints = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--midpoints" => midpoints = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let output = output.ok_or_else(|| format!("missing --output\n{USAGE}"))?;
    Ok(CliArgs {
        config,
        output,
        midpoints,
    })
}
