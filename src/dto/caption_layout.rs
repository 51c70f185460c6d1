use crate::common::*;

use crate::traits::render_traits::text_shaper::*;

#[doc = "Result of the caption search: the chosen size plus the text as vector and raster layers."]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct CaptionLayout {
    pub font_size: f32,
    pub extent: TextExtent,
    pub svg: String,
    pub raster: RgbaImage,
}
