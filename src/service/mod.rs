pub mod caption_layout;
pub mod chart_service_impl;
pub mod chart_synthesizer;
pub mod compositor;
pub mod inspect_service_impl;
