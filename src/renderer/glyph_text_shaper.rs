use crate::common::*;

use crate::model::chart::color::*;
use crate::traits::render_traits::text_shaper::*;

use ab_glyph::{Point, PxScaleFont};

#[doc = r#"
    Single-font text shaper: left-to-right layout on one line, with kerning.
    The baseline sits at the font's ascent, so every layout starts at the top-left corner.
"#]
#[derive(Clone)]
pub struct GlyphTextShaper {
    font: FontArc,
}

impl std::fmt::Debug for GlyphTextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphTextShaper").finish_non_exhaustive()
    }
}

impl GlyphTextShaper {
    pub fn new(font_bytes: Vec<u8>) -> anyhow::Result<Self> {
        let font: FontArc = FontArc::try_from_vec(font_bytes)
            .map_err(|e| anyhow!("[GlyphTextShaper->new] font could not be parsed: {:?}", e))?;

        Ok(Self { font })
    }

    fn scaled(&self, font_size: f32) -> PxScaleFont<&FontArc> {
        self.font.as_scaled(PxScale::from(font_size.max(0.0)))
    }

    /* glyphs positioned on the baseline, plus the final caret position */
    fn layout(&self, text: &str, font_size: f32) -> (Vec<Glyph>, f32) {
        let scaled: PxScaleFont<&FontArc> = self.scaled(font_size);
        let baseline: f32 = scaled.ascent();

        let mut glyphs: Vec<Glyph> = Vec::with_capacity(text.len());
        let mut caret: f32 = 0.0;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id: GlyphId = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scaled.scale, point(caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret)
    }
}

impl TextShaper for GlyphTextShaper {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent {
        let scaled: PxScaleFont<&FontArc> = self.scaled(font_size);
        let (_, width) = self.layout(text, font_size);

        TextExtent::new(width, scaled.ascent() - scaled.descent())
    }

    fn to_vector(&self, text: &str, font_size: f32, fill: RgbaColor) -> String {
        let scaled: PxScaleFont<&FontArc> = self.scaled(font_size);
        let extent: TextExtent = self.measure(text, font_size);
        let (glyphs, _) = self.layout(text, font_size);
        let (sx, sy) = (scaled.h_scale_factor(), scaled.v_scale_factor());

        let mut path: String = String::new();

        for glyph in &glyphs {
            let Some(outline) = self.font.outline(glyph.id) else {
                continue;
            };

            /* font units are y-up, the document is y-down from the top-left */
            let to_doc = |p: Point| -> (f32, f32) {
                (glyph.position.x + p.x * sx, glyph.position.y - p.y * sy)
            };

            let mut pen: Option<Point> = None;

            for curve in &outline.curves {
                let (start, end) = match curve {
                    OutlineCurve::Line(a, b) => (*a, *b),
                    OutlineCurve::Quad(a, _, b) => (*a, *b),
                    OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
                };

                if pen != Some(start) {
                    if pen.is_some() {
                        path.push_str("Z");
                    }
                    let (x, y) = to_doc(start);
                    path.push_str(&format!("M{:.2} {:.2}", x, y));
                }

                let command: String = match curve {
                    OutlineCurve::Line(_, b) => {
                        let (x, y) = to_doc(*b);
                        format!("L{:.2} {:.2}", x, y)
                    }
                    OutlineCurve::Quad(_, c, b) => {
                        let ((cx, cy), (x, y)) = (to_doc(*c), to_doc(*b));
                        format!("Q{:.2} {:.2} {:.2} {:.2}", cx, cy, x, y)
                    }
                    OutlineCurve::Cubic(_, c1, c2, b) => {
                        let ((c1x, c1y), (c2x, c2y), (x, y)) = (to_doc(*c1), to_doc(*c2), to_doc(*b));
                        format!("C{:.2} {:.2} {:.2} {:.2} {:.2} {:.2}", c1x, c1y, c2x, c2y, x, y)
                    }
                };
                path.push_str(&command);

                pen = Some(end);
            }

            if pen.is_some() {
                path.push_str("Z");
            }
        }

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}"><path d="{path}" fill="{fill}" fill-opacity="{opacity:.3}"/></svg>"#,
            w = extent.width,
            h = extent.height,
            path = path,
            fill = fill.to_rgb_hex(),
            opacity = fill.opacity(),
        )
    }

    fn rasterize(&self, text: &str, font_size: f32, fill: RgbaColor) -> RgbaImage {
        let extent: TextExtent = self.measure(text, font_size);
        let width: u32 = extent.width.ceil().max(1.0) as u32;
        let height: u32 = extent.height.ceil().max(1.0) as u32;

        let mut layer: RgbaImage = RgbaImage::new(width, height);
        let (glyphs, _) = self.layout(text, font_size);

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();

            outlined.draw(|x, y, coverage| {
                let px: i64 = bounds.min.x as i64 + x as i64;
                let py: i64 = bounds.min.y as i64 + y as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }

                let alpha: u8 = (fill.a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
                layer
                    .get_pixel_mut(px as u32, py as u32)
                    .blend(&Rgba([fill.r, fill.g, fill.b, alpha]));
            });
        }

        layer
    }
}
