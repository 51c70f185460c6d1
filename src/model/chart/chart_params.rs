use crate::common::*;

use crate::enums::chart_kind::*;
use crate::errors::chart_error::*;

#[doc = "Optional axis bounds. For doughnut charts `max` is the denominator of the single value."]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, new)]
pub struct AxisRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl AxisRange {
    fn validate(&self, kind: ChartKind) -> Result<(), ChartError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ChartError::invalid_params(kind, "range bounds must be finite"));
            }
        }

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min >= max {
                return Err(ChartError::invalid_params(
                    kind,
                    format!("range.min ({min}) must be lower than range.max ({max})"),
                ));
            }

            if !(max - min).is_finite() {
                return Err(ChartError::invalid_params(
                    kind,
                    "range span (range.max - range.min) is too large",
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, new)]
pub struct DoughnutParams {
    pub value: f64,
    pub range: AxisRange,
    #[serde(default)]
    pub legend: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, new)]
pub struct GaugeParams {
    pub value: f64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub legend: Option<String>,
    #[serde(default)]
    pub range: Option<AxisRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, new)]
pub struct LineParams {
    pub datum: Vec<Vec<Option<f64>>>,
    pub labels: Vec<String>,
    #[serde(default)]
    pub legends: Option<Vec<String>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub range: Option<AxisRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, new)]
pub struct PieParams {
    pub datum: Vec<f64>,
    pub legends: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, new)]
pub struct StackbarParams {
    pub datum: Vec<Vec<f64>>,
    pub labels: Vec<String>,
    pub legends: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub range: Option<AxisRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, new)]
pub struct BarParams {
    pub datum: Vec<f64>,
    pub labels: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub range: Option<AxisRange>,
}

#[doc = "Kind-specific chart payload; the variant decides which synthesizer runs."]
#[derive(Debug, Clone, PartialEq)]
pub enum ChartParams {
    Doughnut(DoughnutParams),
    Gauge(GaugeParams),
    Line(LineParams),
    Pie(PieParams),
    Stackbar(StackbarParams),
    Bar(BarParams),
}

fn decode<T: DeserializeOwned>(kind: ChartKind, raw: Value) -> Result<T, ChartError> {
    serde_json::from_value::<T>(raw).map_err(|e| ChartError::invalid_params(kind, e.to_string()))
}

fn ensure_finite<'a>(
    kind: ChartKind,
    field: &str,
    values: impl IntoIterator<Item = &'a f64>,
) -> Result<(), ChartError> {
    if values.into_iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::invalid_params(
            kind,
            format!("{field} must only contain finite numbers"),
        ))
    }
}

fn ensure_len(kind: ChartKind, field: &str, actual: usize, expected: usize) -> Result<(), ChartError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ChartError::invalid_params(
            kind,
            format!("{field} has {actual} entries, expected {expected}"),
        ))
    }
}

fn ensure_non_empty(kind: ChartKind, field: &str, len: usize) -> Result<(), ChartError> {
    if len == 0 {
        Err(ChartError::invalid_params(kind, format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

impl ChartParams {
    #[doc = "Decodes the untyped `chart_params` object of a request into the payload of `kind`."]
    pub fn from_value(kind: ChartKind, raw: Value) -> Result<Self, ChartError> {
        let params: ChartParams = match kind {
            ChartKind::Doughnut => ChartParams::Doughnut(decode(kind, raw)?),
            ChartKind::Gauge => ChartParams::Gauge(decode(kind, raw)?),
            ChartKind::Line => ChartParams::Line(decode(kind, raw)?),
            ChartKind::Pie => ChartParams::Pie(decode(kind, raw)?),
            ChartKind::Stackbar => ChartParams::Stackbar(decode(kind, raw)?),
            ChartKind::Bar => ChartParams::Bar(decode(kind, raw)?),
        };

        Ok(params)
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartParams::Doughnut(_) => ChartKind::Doughnut,
            ChartParams::Gauge(_) => ChartKind::Gauge,
            ChartParams::Line(_) => ChartKind::Line,
            ChartParams::Pie(_) => ChartKind::Pie,
            ChartParams::Stackbar(_) => ChartKind::Stackbar,
            ChartParams::Bar(_) => ChartKind::Bar,
        }
    }

    #[doc = r#"
        Checks the preconditions each synthesizer relies on, so shape problems surface as
        `InvalidParams` before any rendering starts.
    "#]
    pub fn validate(&self) -> Result<(), ChartError> {
        let kind: ChartKind = self.kind();

        match self {
            ChartParams::Doughnut(p) => {
                ensure_finite(kind, "value", [&p.value])?;
                p.range.validate(kind)?;
                if p.range.max.is_none() {
                    return Err(ChartError::invalid_params(kind, "range.max is required"));
                }
            }
            ChartParams::Gauge(p) => {
                ensure_finite(kind, "value", [&p.value])?;
                if let Some(range) = &p.range {
                    range.validate(kind)?;
                }
            }
            ChartParams::Line(p) => {
                ensure_non_empty(kind, "datum", p.datum.len())?;
                ensure_non_empty(kind, "labels", p.labels.len())?;
                for (idx, row) in p.datum.iter().enumerate() {
                    ensure_len(kind, &format!("datum[{idx}]"), row.len(), p.labels.len())?;
                    ensure_finite(kind, &format!("datum[{idx}]"), row.iter().flatten())?;
                }
                if let Some(legends) = &p.legends {
                    ensure_len(kind, "legends", legends.len(), p.datum.len())?;
                }
                if let Some(range) = &p.range {
                    range.validate(kind)?;
                }
            }
            ChartParams::Pie(p) => {
                ensure_non_empty(kind, "datum", p.datum.len())?;
                ensure_len(kind, "legends", p.legends.len(), p.datum.len())?;
                ensure_finite(kind, "datum", &p.datum)?;
                if p.datum.iter().any(|v| *v < 0.0) {
                    return Err(ChartError::invalid_params(kind, "datum must not be negative"));
                }
            }
            ChartParams::Stackbar(p) => {
                ensure_non_empty(kind, "legends", p.legends.len())?;
                ensure_non_empty(kind, "datum", p.datum.len())?;
                ensure_len(kind, "labels", p.labels.len(), p.datum.len())?;
                for (idx, row) in p.datum.iter().enumerate() {
                    ensure_len(kind, &format!("datum[{idx}]"), row.len(), p.legends.len())?;
                    ensure_finite(kind, &format!("datum[{idx}]"), row)?;
                }
                if let Some(range) = &p.range {
                    range.validate(kind)?;
                }
            }
            ChartParams::Bar(p) => {
                ensure_non_empty(kind, "datum", p.datum.len())?;
                ensure_len(kind, "labels", p.labels.len(), p.datum.len())?;
                ensure_finite(kind, "datum", &p.datum)?;
                if let Some(range) = &p.range {
                    range.validate(kind)?;
                }
            }
        }

        Ok(())
    }
}
