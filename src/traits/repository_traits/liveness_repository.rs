use crate::common::*;

#[async_trait]
pub trait LivenessRepository: Send + Sync {
    #[doc = "One probe attempt. `Ok(false)` means no answer, `Err` means the probe itself failed."]
    async fn probe(&self, host: &str) -> anyhow::Result<bool>;
}
