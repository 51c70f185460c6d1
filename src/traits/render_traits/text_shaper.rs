use crate::common::*;

use crate::model::chart::color::*;

#[doc = "Size of a single line of text: advance width and line height, in pixels."]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, new)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

pub trait TextShaper: Send + Sync {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent;

    #[doc = "SVG document holding `text` as glyph outlines, anchored top-left."]
    fn to_vector(&self, text: &str, font_size: f32, fill: RgbaColor) -> String;

    #[doc = "Transparent image the size of `measure(text, font_size)` with the text drawn on it."]
    fn rasterize(&self, text: &str, font_size: f32, fill: RgbaColor) -> RgbaImage;
}
