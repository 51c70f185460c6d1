use crate::common::*;

use crate::dto::inspect_query::*;
use crate::model::chart::chart_request::*;

#[async_trait]
pub trait InspectService: Send + Sync {
    #[doc = r#"
        Collects the data behind an inspect query and turns it into a chart request:
        netdata -> line, ping -> stackbar, memory -> gauge.
        # Errors
        Fails when the metrics source or host stats cannot be read. Ping misses never fail.
    "#]
    async fn inspect_request(&self, query: &InspectQuery) -> anyhow::Result<ChartRequest>;
}
