use crate::common::*;

#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
#[serde(default)]
pub struct PingConfig {
    pub timeout_secs: u64,
    pub default_try_count: u32,
    pub max_try_count: u32,
    pub max_hosts: usize,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            default_try_count: 3,
            max_try_count: 10,
            max_hosts: 16,
        }
    }
}
