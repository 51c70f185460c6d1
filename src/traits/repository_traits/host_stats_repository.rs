use crate::common::*;

use crate::dto::memory_usage::*;

#[async_trait]
pub trait HostStatsRepository: Send + Sync {
    async fn memory_usage(&self) -> anyhow::Result<MemoryUsage>;
}
