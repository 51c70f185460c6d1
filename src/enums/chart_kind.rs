use crate::common::*;

use crate::errors::chart_error::*;

#[doc = "Closed set of chart visual types a request can ask for."]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Gauge,
    Line,
    Pie,
    Stackbar,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Doughnut,
        ChartKind::Gauge,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Stackbar,
        ChartKind::Bar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Doughnut => "doughnut",
            ChartKind::Gauge => "gauge",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Stackbar => "stackbar",
            ChartKind::Bar => "bar",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartError::UnsupportedChartKind(s.to_string()))
    }
}
