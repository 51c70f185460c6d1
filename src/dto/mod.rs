pub mod bin_response;
pub mod caption_layout;
pub mod generate_request;
pub mod http_event;
pub mod inspect_query;
pub mod memory_usage;
pub mod netdata_series;
pub mod ping_tally;
