use crate::common::*;

use crate::traits::repository_traits::liveness_repository::*;

use tokio::process::Command;

#[doc = "Liveness probe backed by the system `ping` binary, one echo request per attempt."]
#[derive(Debug, Clone, new)]
pub struct PingRepositoryImpl {
    timeout_secs: u64,
}

impl PingRepositoryImpl {
    fn validate_host(host: &str) -> anyhow::Result<()> {
        /* anything that could be read as a ping option is refused */
        let valid: bool = !host.is_empty()
            && !host.starts_with('-')
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '_'));

        if valid {
            Ok(())
        } else {
            Err(anyhow!("[PingRepositoryImpl->probe] invalid host: {:?}", host))
        }
    }
}

#[async_trait]
impl LivenessRepository for PingRepositoryImpl {
    async fn probe(&self, host: &str) -> anyhow::Result<bool> {
        Self::validate_host(host)?;

        let timeout: String = self.timeout_secs.max(1).to_string();
        let output = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs.max(1) + 1),
            Command::new("ping")
                .args(["-c", "1", "-W", &timeout])
                .arg(host)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| anyhow!("[PingRepositoryImpl->probe] '{}' timed out", host))?
        .with_context(|| format!("[PingRepositoryImpl->probe] cannot run ping for '{host}'"))?;

        Ok(output.status.success())
    }
}
