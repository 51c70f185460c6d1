use crate::enums::chart_kind::*;

#[doc = "Failures of the chart pipeline. None of them ever comes with a partial image."]
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("unsupported chart kind: {0:?}")]
    UnsupportedChartKind(String),

    #[error("invalid parameters for {kind} chart: {reason}")]
    InvalidParams { kind: ChartKind, reason: String },

    #[error(
        "invalid color: {0:?} (expected #rgb, #rgba, #rrggbb, #rrggbbaa, rgb(r, g, b), rgba(r, g, b, a) or a basic color name)"
    )]
    InvalidColor(String),

    #[error("invalid canvas size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("caption {caption:?} cannot fit in a {width}x{height} canvas at any font size")]
    CaptionTooLarge {
        caption: String,
        width: u32,
        height: u32,
    },

    #[error("render failure: {0}")]
    RenderFailure(String),
}

impl ChartError {
    pub fn invalid_params(kind: ChartKind, reason: impl Into<String>) -> Self {
        ChartError::InvalidParams {
            kind,
            reason: reason.into(),
        }
    }

    #[doc = "Whether the failure was caused by the caller's input rather than the rendering engine."]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ChartError::RenderFailure(_))
    }
}
