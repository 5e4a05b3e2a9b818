use scrolly_charts::core::Viewport;
use scrolly_charts::render::{
    CirclePrimitive, Color, ImagePrimitive, LinePrimitive, NullRenderer, RectPrimitive,
    RenderFrame, Renderer, SvgRenderer, TextHAlign, TextPrimitive,
};

fn frame() -> RenderFrame {
    let mut frame = RenderFrame::new(Viewport::new(400, 200))
        .with_rect(RectPrimitive::new(10.0, 10.0, 50.0, 20.0, Color::from_rgb8(0x44, 0x76, 0x95)))
        .with_line(LinePrimitive::new(0.0, 0.0, 0.0, 100.0, 2.0, Color::BLACK).dashed(6.0))
        .with_circle(CirclePrimitive::new(30.0, 40.0, 5.0, Color::BLACK.with_alpha(0.5)))
        .with_text(
            TextPrimitive::new("Puppey & <co>", 5.0, 5.0, 15.0, Color::BLACK, TextHAlign::Right)
                .bold(),
        );
    frame
        .images
        .push(ImagePrimitive::new("./img/ti7_icon.png", 0.0, 20.0, 25.0, 25.0));
    frame
}

#[test]
fn svg_contains_every_primitive() {
    let mut renderer = SvgRenderer::new();
    renderer.render(&frame()).expect("render");
    let svg = renderer.output();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="400" height="200""#));
    assert!(svg.contains(r##"<rect x="10" y="10" width="50" height="20" fill="#447695""##));
    assert!(svg.contains(r#"stroke-dasharray="6""#));
    assert!(svg.contains(r#"fill-opacity="0.5""#));
    assert!(svg.contains(r#"text-anchor="end" font-weight="700""#));
    assert!(svg.contains("Puppey &amp; &lt;co&gt;"));
    assert!(svg.contains(r#"xlink:href="./img/ti7_icon.png""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn each_render_replaces_previous_output() {
    let mut renderer = SvgRenderer::new();
    renderer.render(&frame()).expect("render");
    renderer
        .render(&RenderFrame::new(Viewport::new(10, 10)))
        .expect("render empty");
    assert!(!renderer.output().contains("<rect"));
}

#[test]
fn invalid_frames_are_rejected() {
    let bad = RenderFrame::new(Viewport::new(100, 100)).with_circle(CirclePrimitive::new(
        f64::NAN,
        0.0,
        1.0,
        Color::BLACK,
    ));
    assert!(SvgRenderer::new().render(&bad).is_err());

    let mut null = NullRenderer::default();
    assert!(null.render(&bad).is_err());
    assert_eq!(null.frames_rendered, 0);
}

#[test]
fn empty_text_is_invalid() {
    let frame = RenderFrame::new(Viewport::new(100, 100)).with_text(TextPrimitive::new(
        "",
        0.0,
        0.0,
        12.0,
        Color::BLACK,
        TextHAlign::Left,
    ));
    assert!(frame.validate().is_err());
}
