use crate::common::*;

use crate::enums::chart_kind::*;
use crate::errors::chart_error::*;
use crate::model::chart::{chart_params::*, color::*};

#[doc = "Largest accepted canvas edge, in pixels."]
pub const MAX_CANVAS_EDGE: u32 = 4096;

#[doc = "Rejects an empty canvas or one with an edge above `MAX_CANVAS_EDGE`."]
pub fn validate_canvas(width: u32, height: u32) -> Result<(), ChartError> {
    if width == 0 || height == 0 || width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
        return Err(ChartError::InvalidDimensions { width, height });
    }

    Ok(())
}

#[doc = "One fully-typed chart image request, independent of where it came from."]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct ChartRequest {
    pub width: u32,
    pub height: u32,
    pub params: ChartParams,
    pub caption: Option<String>,
    pub background_color: Option<RgbaColor>,
}

impl ChartRequest {
    #[doc = r#"
        Builds a request from the loosely-typed pieces of a generate call.

        The kind is resolved first, so an unknown kind fails with `UnsupportedChartKind`
        before the params are even looked at. An empty caption counts as no caption.
    "#]
    pub fn from_parts(
        width: u32,
        height: u32,
        kind: &str,
        raw_params: Value,
        caption: Option<String>,
        background_color: Option<&str>,
    ) -> Result<Self, ChartError> {
        let kind: ChartKind = kind.parse()?;
        let params: ChartParams = ChartParams::from_value(kind, raw_params)?;
        let background_color: Option<RgbaColor> = background_color
            .filter(|c| !c.trim().is_empty())
            .map(RgbaColor::parse)
            .transpose()?;

        let request: ChartRequest = ChartRequest::new(
            width,
            height,
            params,
            caption.filter(|c| !c.is_empty()),
            background_color,
        );
        request.validate()?;

        Ok(request)
    }

    pub fn kind(&self) -> ChartKind {
        self.params.kind()
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        validate_canvas(self.width, self.height)?;
        self.params.validate()
    }
}
