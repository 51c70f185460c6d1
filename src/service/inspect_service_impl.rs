use crate::common::*;

use crate::dto::{inspect_query::*, memory_usage::*, netdata_series::*, ping_tally::*};
use crate::model::chart::{chart_params::*, chart_request::*};
use crate::traits::repository_traits::{
    host_stats_repository::*, liveness_repository::*, metrics_repository::*,
};
use crate::traits::service_traits::inspect_service::*;
use crate::utils_modules::time_utils::*;

const PING_LEGENDS: [&str; 2] = ["OK", "NG"];
const PING_TITLE: &str = "Ping liveness check";
const MEMORY_TITLE: &str = "Memory used (%)";

#[doc = r#"
    Line chart of a metrics series. Rows arrive newest first and are reversed, so labels
    (clock time of each row) run oldest to newest. Every non-time column becomes one series
    named after its column.
"#]
pub fn netdata_line_request(
    series: &NetdataSeries,
    chart: &str,
    width: u32,
    height: u32,
    max: Option<f64>,
    clock_label: impl Fn(i64) -> anyhow::Result<String>,
) -> anyhow::Result<ChartRequest> {
    let row_count: usize = (*series.points()).min(series.result().data().len());
    let rows: Vec<&Vec<Option<f64>>> = series.result().data()[..row_count].iter().rev().collect();

    let labels: Vec<String> = rows
        .iter()
        .map(|row| {
            let time: f64 = row
                .first()
                .copied()
                .flatten()
                .ok_or_else(|| anyhow!("[netdata_line_request] row without a timestamp"))?;
            clock_label(time as i64)
        })
        .collect::<anyhow::Result<Vec<String>>>()?;

    let legends: Vec<String> = series.result().labels().iter().skip(1).cloned().collect();

    let datum: Vec<Vec<Option<f64>>> = (1..=legends.len())
        .map(|column| {
            rows.iter()
                .map(|row| row.get(column).copied().flatten())
                .collect()
        })
        .collect();

    let params: ChartParams = ChartParams::Line(LineParams::new(
        datum,
        labels,
        Some(legends),
        Some(format!("netdata: {}", chart)),
        max.map(|max| AxisRange::new(None, Some(max))),
    ));

    let request: ChartRequest = ChartRequest::new(width, height, params, None, None);
    request.validate()?;

    Ok(request)
}

#[doc = "Stacked OK/NG bars, one per host, in query order."]
pub fn ping_stackbar_request(tallies: &[PingTally], width: u32, height: u32) -> anyhow::Result<ChartRequest> {
    let params: ChartParams = ChartParams::Stackbar(StackbarParams::new(
        tallies
            .iter()
            .map(|t| vec![*t.success() as f64, *t.error() as f64])
            .collect(),
        tallies.iter().map(|t| t.host().clone()).collect(),
        PING_LEGENDS.iter().map(|s| s.to_string()).collect(),
        Some(PING_TITLE.to_string()),
        None,
    ));

    let request: ChartRequest = ChartRequest::new(width, height, params, None, None);
    request.validate()?;

    Ok(request)
}

#[doc = "Gauge of used memory on a fixed 0..100 axis, captioned with the percentage."]
pub fn memory_gauge_request(usage: &MemoryUsage, width: u32, height: u32) -> anyhow::Result<ChartRequest> {
    let used: f64 = usage.used_percent();

    let params: ChartParams = ChartParams::Gauge(GaugeParams::new(
        used,
        Some(MEMORY_TITLE.to_string()),
        None,
        Some(AxisRange::new(Some(0.0), Some(100.0))),
    ));

    let request: ChartRequest =
        ChartRequest::new(width, height, params, Some(format!("{:.1}%", used)), None);
    request.validate()?;

    Ok(request)
}

#[derive(Debug, new)]
pub struct InspectServiceImpl<M: MetricsRepository, L: LivenessRepository, H: HostStatsRepository> {
    metrics: Arc<M>,
    liveness: Arc<L>,
    host_stats: Arc<H>,
}

impl<M, L, H> InspectServiceImpl<M, L, H>
where
    M: MetricsRepository,
    L: LivenessRepository,
    H: HostStatsRepository,
{
    #[doc = "Runs `try_count` attempts against `host`. A failed probe is a miss, never an error."]
    async fn tally_host(&self, host: &str, try_count: u32) -> PingTally {
        let mut success: u32 = 0;
        let mut error: u32 = 0;

        for _ in 0..try_count {
            match self.liveness.probe(host).await {
                Ok(true) => success += 1,
                Ok(false) => error += 1,
                Err(e) => {
                    warn!("[InspectServiceImpl->tally_host] {:?}", e);
                    error += 1;
                }
            }
        }

        PingTally::new(host.to_string(), success, error)
    }
}

#[async_trait]
impl<M, L, H> InspectService for InspectServiceImpl<M, L, H>
where
    M: MetricsRepository,
    L: LivenessRepository,
    H: HostStatsRepository,
{
    async fn inspect_request(&self, query: &InspectQuery) -> anyhow::Result<ChartRequest> {
        match query {
            InspectQuery::Netdata {
                width,
                height,
                chart,
                max,
            } => {
                let series: NetdataSeries = self.metrics.fetch_chart_data(chart).await?;
                netdata_line_request(&series, chart, *width, *height, *max, format_clock)
            }
            InspectQuery::Ping {
                width,
                height,
                hosts,
                try_count,
            } => {
                let tallies: Vec<PingTally> = join_all(
                    hosts
                        .iter()
                        .map(|host| self.tally_host(host, *try_count)),
                )
                .await;

                info!("[InspectServiceImpl->inspect_request] ping tallies: {:?}", tallies);
                ping_stackbar_request(&tallies, *width, *height)
            }
            InspectQuery::Memory { width, height } => {
                let usage: MemoryUsage = self.host_stats.memory_usage().await?;
                memory_gauge_request(&usage, *width, *height)
            }
        }
    }
}
