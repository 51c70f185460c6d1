use crate::common::*;

#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
#[serde(default)]
pub struct SystemConfig {
    pub default_width: u32,
    pub default_height: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_width: 640,
            default_height: 480,
        }
    }
}
