use crate::common::*;

use plotters_backend::{BackendColor, BackendCoord, DrawingBackend, DrawingErrorKind};
use std::convert::Infallible;

#[doc = r#"
    Plotters backend that draws straight into an `RgbaImage`, alpha-blending every pixel.

    Unlike the bitmap backend it keeps an alpha channel, so untouched areas stay fully
    transparent and the chart can later be laid over any background.
"#]
pub struct RgbaBackend<'a> {
    canvas: &'a mut RgbaImage,
}

impl<'a> RgbaBackend<'a> {
    pub fn new(canvas: &'a mut RgbaImage) -> Self {
        Self { canvas }
    }
}

impl DrawingBackend for RgbaBackend<'_> {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let (x, y) = point;
        let (width, height) = self.canvas.dimensions();

        /* out-of-canvas and invisible pixels are dropped */
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height || color.alpha <= 0.0 {
            return Ok(());
        }

        let (r, g, b) = color.rgb;
        let alpha: u8 = (color.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;

        self.canvas
            .get_pixel_mut(x as u32, y as u32)
            .blend(&Rgba([r, g, b, alpha]));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;

    #[test]
    fn untouched_pixels_stay_transparent() {
        let mut canvas: RgbaImage = RgbaImage::new(20, 20);
        {
            let root = RgbaBackend::new(&mut canvas).into_drawing_area();
            root.draw(&Rectangle::new([(2, 2), (8, 8)], RED.filled())).unwrap();
            root.present().unwrap();
        }

        assert_eq!(canvas.get_pixel(5, 5).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(15, 15).0, [0, 0, 0, 0]);
    }

    #[test]
    fn translucent_colors_blend() {
        let mut canvas: RgbaImage = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        {
            let root = RgbaBackend::new(&mut canvas).into_drawing_area();
            root.fill(&RED.mix(0.5)).unwrap();
        }

        let pixel: [u8; 4] = canvas.get_pixel(1, 1).0;
        assert!(pixel[0] > 100 && pixel[0] < 160);
        assert!(pixel[2] > 100 && pixel[2] < 160);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn drawing_outside_the_canvas_is_ignored() {
        let mut canvas: RgbaImage = RgbaImage::new(4, 4);
        let mut backend = RgbaBackend::new(&mut canvas);
        backend
            .draw_pixel((-1, 10), BackendColor { alpha: 1.0, rgb: (1, 2, 3) })
            .unwrap();
        assert!(canvas.pixels().all(|p| p.0[3] == 0));
    }
}
