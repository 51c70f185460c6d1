use crate::common::*;

use crate::dto::caption_layout::*;
use crate::errors::chart_error::*;
use crate::model::chart::style::*;
use crate::traits::render_traits::text_shaper::*;

#[doc = r#"
    Finds the largest font size, at most `caption_max_font_size`, at which `caption` fits inside
    the canvas minus `caption_padding_fraction` on each axis.

    The search starts at `min(max, width / chars)` and only ever steps down by
    `caption_font_step`. Reaching zero means the caption cannot fit at all.

    # Errors
    * `CaptionTooLarge` - no positive font size fits
"#]
pub fn layout_caption(
    shaper: &dyn TextShaper,
    style: &ChartStyle,
    width: u32,
    height: u32,
    caption: &str,
) -> Result<CaptionLayout, ChartError> {
    let too_large = || ChartError::CaptionTooLarge {
        caption: caption.to_string(),
        width,
        height,
    };

    let char_count: usize = caption.chars().count();
    if char_count == 0 {
        return Err(too_large());
    }

    let usable: f32 = 1.0 - style.caption_padding_fraction.clamp(0.0, 1.0);
    let max_width: f32 = width as f32 * usable;
    let max_height: f32 = height as f32 * usable;
    let step: f32 = style.caption_font_step.max(f32::EPSILON);

    let mut font_size: f32 = style
        .caption_max_font_size
        .min(width as f32 / char_count as f32);

    while font_size > 0.0 {
        let extent: TextExtent = shaper.measure(caption, font_size);

        if extent.width <= max_width && extent.height <= max_height {
            debug!(
                "[caption_layout->layout_caption] '{}' fits at {}px ({}x{})",
                caption, font_size, extent.width, extent.height
            );

            return Ok(CaptionLayout::new(
                font_size,
                extent,
                shaper.to_vector(caption, font_size, style.font_color),
                shaper.rasterize(caption, font_size, style.font_color),
            ));
        }

        font_size -= step;
    }

    Err(too_large())
}
