use crate::common::*;

use crate::dto::netdata_series::*;

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    #[doc = "Recent rows of one metrics chart (e.g. `system.cpu`), newest first."]
    async fn fetch_chart_data(&self, chart: &str) -> anyhow::Result<NetdataSeries>;
}
