use crate::common::*;

#[doc = r#"
    Where and how the metrics source is queried.

    `after_secs` is relative to now and therefore negative; `points` rows are requested and the
    source aggregates each one with `group`.
"#]
#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct NetdataConfig {
    pub base_url: String,
    #[serde(default = "NetdataConfig::fallback_points")]
    pub points: u32,
    #[serde(default = "NetdataConfig::fallback_after_secs")]
    pub after_secs: i64,
    #[serde(default = "NetdataConfig::fallback_group")]
    pub group: String,
    #[serde(default = "NetdataConfig::fallback_chart")]
    pub default_chart: String,
    #[serde(default = "NetdataConfig::fallback_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl NetdataConfig {
    fn fallback_points() -> u32 {
        20
    }

    fn fallback_after_secs() -> i64 {
        -600
    }

    fn fallback_group() -> String {
        String::from("max")
    }

    fn fallback_chart() -> String {
        String::from("system.cpu")
    }

    fn fallback_request_timeout_secs() -> u64 {
        10
    }
}
