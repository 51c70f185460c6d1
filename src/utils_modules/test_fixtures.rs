use crate::common::*;

use crate::errors::chart_error::*;
use crate::model::chart::{color::*, render_config::*};
use crate::traits::render_traits::{chart_renderer::*, text_shaper::*};

#[doc = r#"
    Shaper with fixed metrics: every char advances `font_size * 0.5`, lines are `font_size` high.
    Rasterized text is a solid block of the fill color.
"#]
#[derive(Debug, Clone, Default)]
pub struct FixedTextShaper;

impl TextShaper for FixedTextShaper {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent {
        TextExtent::new(text.chars().count() as f32 * font_size * 0.5, font_size)
    }

    fn to_vector(&self, text: &str, font_size: f32, fill: RgbaColor) -> String {
        let extent: TextExtent = self.measure(text, font_size);
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}"><rect width="{}" height="{}" fill="{}"/></svg>"#,
            extent.width,
            extent.height,
            extent.width,
            extent.height,
            fill.to_rgb_hex()
        )
    }

    fn rasterize(&self, text: &str, font_size: f32, fill: RgbaColor) -> RgbaImage {
        let extent: TextExtent = self.measure(text, font_size);
        RgbaImage::from_pixel(
            extent.width.ceil().max(1.0) as u32,
            extent.height.ceil().max(1.0) as u32,
            fill.to_pixel(),
        )
    }
}

#[doc = "Renderer that paints the whole canvas with one color, ignoring the config."]
#[derive(Debug, Clone, new)]
pub struct SolidChartRenderer {
    pub color: RgbaColor,
}

impl ChartRenderer for SolidChartRenderer {
    fn render(&self, _config: &ChartConfig, width: u32, height: u32) -> Result<RgbaImage, ChartError> {
        Ok(RgbaImage::from_pixel(width, height, self.color.to_pixel()))
    }
}

#[doc = "Renderer that always fails, for error-path tests."]
#[derive(Debug, Clone, Default)]
pub struct FailingChartRenderer;

impl ChartRenderer for FailingChartRenderer {
    fn render(&self, _config: &ChartConfig, _width: u32, _height: u32) -> Result<RgbaImage, ChartError> {
        Err(ChartError::RenderFailure("engine unavailable".to_string()))
    }
}

const SYSTEM_FONT_CANDIDATES: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/opentype/ipaexfont-gothic/ipaexg.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[doc = "Bytes of the first installed system font found, if any. Font-dependent tests skip without one."]
pub fn system_font_bytes() -> Option<Vec<u8>> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .find_map(|path| fs::read(path).ok())
}
