pub mod chart_renderer;
pub mod text_shaper;
