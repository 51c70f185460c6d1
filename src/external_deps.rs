pub use ab_glyph::{Font, FontArc, Glyph, GlyphId, OutlineCurve, PxScale, ScaleFont, point};
pub use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
pub use chrono::{DateTime, Local, TimeZone, Utc};
pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming, Record,
};
pub use image::{ExtendedColorType, ImageEncoder, Pixel, Rgba, RgbaImage, codecs::png::PngEncoder};
pub use once_cell::sync::Lazy as once_lazy;
pub use reqwest::Client;
pub use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
