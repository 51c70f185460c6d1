pub mod font_config;
pub mod netdata_config;
pub mod ping_config;
pub mod system_config;
pub mod total_config;
