use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer that only validates and counts.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_rect_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_rect_count = frame.rects.len();
        self.last_circle_count = frame.circles.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
