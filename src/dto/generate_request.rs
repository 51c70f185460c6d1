use crate::common::*;

use crate::errors::chart_error::*;
use crate::model::chart::chart_request::*;

#[doc = "JSON body of `/makechart-generate`."]
#[derive(Debug, Clone, Deserialize, Serialize, new)]
pub struct GenerateRequestBody {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub chart_params: Value,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub bgcolor: Option<String>,
}

impl GenerateRequestBody {
    pub fn into_chart_request(self) -> Result<ChartRequest, ChartError> {
        ChartRequest::from_parts(
            self.width,
            self.height,
            &self.kind,
            self.chart_params,
            self.caption,
            self.bgcolor.as_deref(),
        )
    }
}
