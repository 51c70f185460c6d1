use crate::common::*;

use crate::dto::caption_layout::*;
use crate::errors::chart_error::*;
use crate::model::chart::color::*;

use image::imageops::overlay;

#[doc = r#"
    Stacks background, chart and caption into the final PNG.

    * background given: solid `width` x `height` base, chart at the origin on top of it
    * no background: the chart raster itself is the base
    * caption given: its raster is centered over everything else

    Blending is source-over throughout. With neither caption nor background the chart
    raster is encoded untouched.
"#]
pub fn composite(
    width: u32,
    height: u32,
    chart: RgbaImage,
    caption: Option<&CaptionLayout>,
    background: Option<RgbaColor>,
) -> Result<Vec<u8>, ChartError> {
    let mut base: RgbaImage = match background {
        Some(color) => {
            let mut base: RgbaImage = RgbaImage::from_pixel(width, height, color.to_pixel());
            overlay(&mut base, &chart, 0, 0);
            base
        }
        None => chart,
    };

    if let Some(caption) = caption {
        let layer: &RgbaImage = caption.raster();
        let (base_width, base_height) = base.dimensions();
        let x: i64 = (base_width as i64 - layer.width() as i64) / 2;
        let y: i64 = (base_height as i64 - layer.height() as i64) / 2;

        overlay(&mut base, layer, x, y);
    }

    encode_png(&base)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ChartError> {
    let mut bytes: Vec<u8> = Vec::new();

    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ChartError::RenderFailure(format!("[compositor->encode_png] {}", e)))?;

    Ok(bytes)
}
