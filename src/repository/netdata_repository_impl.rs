use crate::common::*;

use crate::dto::netdata_series::*;
use crate::model::configs::netdata_config::*;
use crate::traits::repository_traits::metrics_repository::*;

#[derive(Debug, Clone)]
pub struct NetdataRepositoryImpl {
    client: Client,
    config: NetdataConfig,
}

impl NetdataRepositoryImpl {
    pub fn new(config: &NetdataConfig) -> Result<Self, anyhow::Error> {
        let client: Client = Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .context("[NetdataRepositoryImpl->new] failed to build http client")?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn data_url(&self) -> String {
        format!("{}/api/v1/data", self.config.base_url().trim_end_matches('/'))
    }

    fn query_pairs(&self, chart: &str) -> Vec<(&'static str, String)> {
        vec![
            ("chart", chart.to_string()),
            ("points", self.config.points().to_string()),
            ("format", "json".to_string()),
            ("after", self.config.after_secs().to_string()),
            ("group", self.config.group().clone()),
            ("options", "jsonwrap".to_string()),
        ]
    }
}

#[async_trait]
impl MetricsRepository for NetdataRepositoryImpl {
    async fn fetch_chart_data(&self, chart: &str) -> anyhow::Result<NetdataSeries> {
        let response: reqwest::Response = self
            .client
            .get(self.data_url())
            .query(&self.query_pairs(chart))
            .send()
            .await
            .with_context(|| {
                format!("[NetdataRepositoryImpl->fetch_chart_data] request for '{chart}' failed")
            })?;

        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "[NetdataRepositoryImpl->fetch_chart_data] '{}' answered with status {}",
                chart,
                status
            ));
        }

        let series: NetdataSeries = response.json::<NetdataSeries>().await.with_context(|| {
            format!("[NetdataRepositoryImpl->fetch_chart_data] unexpected payload for '{chart}'")
        })?;

        debug!(
            "[NetdataRepositoryImpl->fetch_chart_data] {} -> {} rows",
            chart,
            series.result().data().len()
        );

        Ok(series)
    }
}
