use crate::common::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct MemoryUsage {
    pub total_mb: f64,
    pub used_mb: f64,
}

impl MemoryUsage {
    pub fn used_percent(&self) -> f64 {
        if self.total_mb <= 0.0 {
            0.0
        } else {
            self.used_mb / self.total_mb * 100.0
        }
    }
}
