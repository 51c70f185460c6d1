pub mod chart_params;
pub mod chart_request;
pub mod color;
pub mod render_config;
pub mod style;
