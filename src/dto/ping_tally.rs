use crate::common::*;

#[doc = "Outcome of all probe attempts against one host."]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct PingTally {
    pub host: String,
    pub success: u32,
    pub error: u32,
}
