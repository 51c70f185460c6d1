pub mod glyph_text_shaper;
pub mod plotters_renderer;
pub mod rgba_backend;
