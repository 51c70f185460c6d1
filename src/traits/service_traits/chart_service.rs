use crate::common::*;

use crate::errors::chart_error::*;
use crate::model::chart::chart_request::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = r#"
        Builds the PNG for one chart request: synthesize, render, lay out the caption, composite.
        # Errors
        * `UnsupportedChartKind` / `InvalidParams` / `InvalidColor` / `InvalidDimensions` - bad request
        * `CaptionTooLarge` - the caption fits at no font size
        * `RenderFailure` - drawing or encoding failed
    "#]
    async fn generate_chart_image(&self, request: ChartRequest) -> Result<Vec<u8>, ChartError>;
}
