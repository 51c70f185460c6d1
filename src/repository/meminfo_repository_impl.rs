use crate::common::*;

use crate::dto::memory_usage::*;
use crate::traits::repository_traits::host_stats_repository::*;

const KB_PER_MB: f64 = 1024.0;

#[doc = "Host memory figures read from a `/proc/meminfo` style file."]
#[derive(Debug, Clone, new)]
pub struct MemInfoRepositoryImpl {
    path: String,
}

impl Default for MemInfoRepositoryImpl {
    fn default() -> Self {
        Self::new(String::from("/proc/meminfo"))
    }
}

#[doc = r#"
    Parses meminfo text into total/used megabytes. Used memory is `MemTotal - MemAvailable`;
    kernels without `MemAvailable` fall back to `MemFree + Buffers + Cached`.
"#]
pub fn parse_meminfo(content: &str) -> anyhow::Result<MemoryUsage> {
    let fields: HashMap<&str, f64> = content
        .lines()
        .filter_map(|line| {
            let (key, rest) = line.split_once(':')?;
            let value: f64 = rest.split_whitespace().next()?.parse().ok()?;
            Some((key.trim(), value))
        })
        .collect();

    let total_kb: f64 = *fields
        .get("MemTotal")
        .ok_or_else(|| anyhow!("[parse_meminfo] MemTotal is missing"))?;

    let available_kb: f64 = match fields.get("MemAvailable") {
        Some(available) => *available,
        None => ["MemFree", "Buffers", "Cached"]
            .iter()
            .map(|key| {
                fields
                    .get(key)
                    .copied()
                    .ok_or_else(|| anyhow!("[parse_meminfo] {} is missing", key))
            })
            .sum::<anyhow::Result<f64>>()?,
    };

    let used_kb: f64 = (total_kb - available_kb).max(0.0);

    Ok(MemoryUsage::new(total_kb / KB_PER_MB, used_kb / KB_PER_MB))
}

#[async_trait]
impl HostStatsRepository for MemInfoRepositoryImpl {
    async fn memory_usage(&self) -> anyhow::Result<MemoryUsage> {
        let content: String = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("[MemInfoRepositoryImpl->memory_usage] cannot read {}", self.path))?;

        parse_meminfo(&content)
    }
}
