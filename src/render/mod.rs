mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, FontWeight, ImagePrimitive, LinePrimitive, LineStrokeStyle,
    RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code never
/// sees chart state, tournament data or scroll logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
