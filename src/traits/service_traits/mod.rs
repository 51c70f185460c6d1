pub mod chart_service;
pub mod inspect_service;
