use crate::common::*;

use crate::model::chart::color::*;

#[doc = "How the renderer should draw a config; gauges render as horizontal bars."]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderType {
    Doughnut,
    HorizontalBar,
    Line,
    Pie,
    Bar,
}

#[doc = "Either one color for the whole dataset or one color per data point."]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Uniform(RgbaColor),
    PerPoint(Vec<RgbaColor>),
}

impl ColorSpec {
    pub fn at(&self, index: usize) -> RgbaColor {
        match self {
            ColorSpec::Uniform(color) => *color,
            ColorSpec::PerPoint(colors) => colors.get(index).copied().unwrap_or(RgbaColor::TRANSPARENT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<Option<f64>>,
    pub background_color: ColorSpec,
    pub border_color: ColorSpec,
    pub border_width: u32,
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_tension: Option<f64>,
}

impl Dataset {
    #[doc = "Finite values only, with missing points skipped."]
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flatten().copied().filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptions {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub font_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendAlign {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub display: bool,
    pub align: LegendAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AxisTicks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stacked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<AxisTicks>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x_axes: Vec<AxisOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y_axes: Vec<AxisOptions>,
}

impl Scales {
    pub fn x_axis(&self) -> Option<&AxisOptions> {
        self.x_axes.first()
    }

    pub fn y_axis(&self) -> Option<&AxisOptions> {
        self.y_axes.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub animation: bool,
    pub responsive: bool,
    pub padding: u32,
    pub title: TitleOptions,
    pub legend: LegendOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout_percentage: Option<u32>,
}

#[doc = r#"
    Fully-resolved description of one chart, consumed by the renderer.

    Serializes to a Chart.js-shaped document, which is also what gets logged at debug level.
    Built per request and never modified after synthesis.
"#]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub render_type: RenderType,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn x_ticks(&self) -> Option<AxisTicks> {
        self.options.scales.as_ref()?.x_axis()?.ticks
    }

    pub fn y_ticks(&self) -> Option<AxisTicks> {
        self.options.scales.as_ref()?.y_axis()?.ticks
    }

    pub fn is_stacked(&self) -> bool {
        self.options
            .scales
            .as_ref()
            .and_then(|s| s.y_axis())
            .is_some_and(|axis| axis.stacked)
    }
}
