use crate::common::*;

use crate::errors::chart_error::*;
use crate::model::chart::render_config::*;

pub trait ChartRenderer: Send + Sync {
    #[doc = r#"
        Draws `config` on a transparent `width` x `height` RGBA canvas.
        # Errors
        * `RenderFailure` - the drawing engine could not complete the chart
    "#]
    fn render(&self, config: &ChartConfig, width: u32, height: u32) -> Result<RgbaImage, ChartError>;
}
