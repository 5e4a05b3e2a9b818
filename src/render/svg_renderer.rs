use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FontWeight, LineStrokeStyle, RenderFrame, Renderer, TextHAlign,
};

const FONT_FAMILY: &str = "PT Sans";

/// Renders frames into standalone SVG documents.
///
/// The last document is kept in `output`; each render replaces it.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn paint(attribute: &str, color: Color) -> String {
    format!(
        r#"{attribute}="{}" {attribute}-opacity="{}""#,
        color.to_hex(),
        color.alpha
    )
}

fn fmt_err(_: std::fmt::Error) -> ChartError {
    ChartError::InvalidData("failed to format svg output".to_owned())
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" font-family="{FONT_FAMILY}">"#,
            frame.viewport.width, frame.viewport.height
        )
        .map_err(fmt_err)?;

        for rect in &frame.rects {
            writeln!(
                svg,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                paint("fill", rect.fill)
            )
            .map_err(fmt_err)?;
        }

        for line in &frame.lines {
            let dash = match line.stroke_style {
                LineStrokeStyle::Solid => String::new(),
                LineStrokeStyle::Dashed(dash) => {
                    format!(r#" stroke-dasharray="{dash}" shape-rendering="crispEdges""#)
                }
            };
            writeln!(
                svg,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}" {}{dash}/>"#,
                line.x1,
                line.y1,
                line.x2,
                line.y2,
                line.stroke_width,
                paint("stroke", line.color)
            )
            .map_err(fmt_err)?;
        }

        for circle in &frame.circles {
            writeln!(
                svg,
                r#"  <circle cx="{}" cy="{}" r="{}" {}/>"#,
                circle.cx,
                circle.cy,
                circle.radius,
                paint("fill", circle.fill)
            )
            .map_err(fmt_err)?;
        }

        for image in &frame.images {
            writeln!(
                svg,
                r#"  <image xlink:href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
                escape(&image.href),
                image.x,
                image.y,
                image.width,
                image.height
            )
            .map_err(fmt_err)?;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            let weight = match text.weight {
                FontWeight::Normal => "",
                FontWeight::Bold => r#" font-weight="700""#,
            };
            writeln!(
                svg,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{weight} {}>{}</text>"#,
                text.x,
                text.y,
                text.font_size_px,
                paint("fill", text.color),
                escape(&text.text)
            )
            .map_err(fmt_err)?;
        }

        svg.push_str("</svg>\n");
        self.output = svg;
        Ok(())
    }
}
