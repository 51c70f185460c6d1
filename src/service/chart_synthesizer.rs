use crate::errors::chart_error::*;

use crate::model::chart::{
    chart_params::*, color::*, render_config::*, style::*,
};

const DOUGHNUT_CUTOUT_PERCENTAGE: u32 = 50;
const LINE_TENSION: f64 = 0.1;

#[doc = r#"
    Translates a typed chart payload into the fully-resolved config the renderer draws.

    Params are validated first so that shape problems are reported as `InvalidParams`
    instead of surfacing as odd drawings. Colors come from `style.color_for(index)` only.
"#]
pub fn synthesize(params: &ChartParams, style: &ChartStyle) -> Result<ChartConfig, ChartError> {
    params.validate()?;

    let config: ChartConfig = match params {
        ChartParams::Doughnut(p) => doughnut_config(p, style),
        ChartParams::Gauge(p) => gauge_config(p, style),
        ChartParams::Line(p) => line_config(p, style),
        ChartParams::Pie(p) => pie_config(p, style),
        ChartParams::Stackbar(p) => stackbar_config(p, style),
        ChartParams::Bar(p) => bar_config(p, style),
    };

    Ok(config)
}

fn base_options(style: &ChartStyle, title: Option<&str>, show_legend: bool) -> ChartOptions {
    ChartOptions {
        animation: false,
        responsive: false,
        padding: style.chart_padding,
        title: TitleOptions {
            display: title.is_some(),
            text: title.map(str::to_string),
            font_size: style.title_font_size,
        },
        legend: LegendOptions {
            display: show_legend,
            align: LegendAlign::End,
        },
        scales: None,
        cutout_percentage: None,
    }
}

fn ticks_from(range: &AxisRange) -> AxisTicks {
    AxisTicks {
        min: range.min,
        max: range.max,
    }
}

fn value_axis(range: Option<&AxisRange>) -> Option<Scales> {
    range.map(|range| Scales {
        x_axes: vec![],
        y_axes: vec![AxisOptions {
            stacked: false,
            ticks: Some(ticks_from(range)),
        }],
    })
}

fn per_point_colors(style: &ChartStyle, count: usize) -> (ColorSpec, ColorSpec) {
    let colors: Vec<SeriesColor> = (0..count).map(|i| style.color_for(i)).collect();
    (
        ColorSpec::PerPoint(colors.iter().map(|c| c.fill).collect()),
        ColorSpec::PerPoint(colors.iter().map(|c| c.line).collect()),
    )
}

fn some_values(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/* single ring: the value against the remainder up to range.max, remainder invisible */
fn doughnut_config(params: &DoughnutParams, style: &ChartStyle) -> ChartConfig {
    let max: f64 = params.range.max.unwrap_or(params.value);
    let value_color: SeriesColor = style.color_for(0);
    let clean: SeriesColor = style.clean_color();

    let mut options: ChartOptions =
        base_options(style, params.title.as_deref(), params.legend.is_some());
    options.cutout_percentage = Some(DOUGHNUT_CUTOUT_PERCENTAGE);

    ChartConfig {
        render_type: RenderType::Doughnut,
        data: ChartData {
            labels: params.legend.iter().cloned().collect(),
            datasets: vec![Dataset {
                label: None,
                data: vec![Some(params.value), Some(max - params.value)],
                background_color: ColorSpec::PerPoint(vec![value_color.fill, clean.fill]),
                border_color: ColorSpec::PerPoint(vec![value_color.line, clean.line]),
                border_width: style.border_width,
                fill: true,
                line_tension: None,
            }],
        },
        options,
    }
}

/* range only bounds the axis, the value is drawn as-is */
fn gauge_config(params: &GaugeParams, style: &ChartStyle) -> ChartConfig {
    let color: SeriesColor = style.color_for(0);

    let mut options: ChartOptions =
        base_options(style, params.title.as_deref(), params.legend.is_some());
    options.scales = params.range.as_ref().map(|range| Scales {
        x_axes: vec![AxisOptions {
            stacked: false,
            ticks: Some(ticks_from(range)),
        }],
        y_axes: vec![],
    });

    ChartConfig {
        render_type: RenderType::HorizontalBar,
        data: ChartData {
            labels: vec![],
            datasets: vec![Dataset {
                label: params.legend.clone(),
                data: vec![Some(params.value)],
                background_color: ColorSpec::PerPoint(vec![color.fill]),
                border_color: ColorSpec::PerPoint(vec![color.line]),
                border_width: style.border_width,
                fill: true,
                line_tension: None,
            }],
        },
        options,
    }
}

fn line_config(params: &LineParams, style: &ChartStyle) -> ChartConfig {
    let datasets: Vec<Dataset> = params
        .datum
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let color: SeriesColor = style.color_for(idx);
            Dataset {
                label: params
                    .legends
                    .as_ref()
                    .and_then(|legends| legends.get(idx).cloned()),
                data: row.clone(),
                background_color: ColorSpec::Uniform(color.fill),
                border_color: ColorSpec::Uniform(color.line),
                border_width: style.border_width,
                fill: false,
                line_tension: Some(LINE_TENSION),
            }
        })
        .collect();

    let mut options: ChartOptions =
        base_options(style, params.title.as_deref(), params.legends.is_some());
    options.scales = value_axis(params.range.as_ref());

    ChartConfig {
        render_type: RenderType::Line,
        data: ChartData {
            labels: params.labels.clone(),
            datasets,
        },
        options,
    }
}

fn pie_config(params: &PieParams, style: &ChartStyle) -> ChartConfig {
    let (background_color, border_color) = per_point_colors(style, params.datum.len());

    ChartConfig {
        render_type: RenderType::Pie,
        data: ChartData {
            labels: params.legends.clone(),
            datasets: vec![Dataset {
                label: None,
                data: some_values(&params.datum),
                background_color,
                border_color,
                border_width: style.border_width,
                fill: true,
                line_tension: None,
            }],
        },
        options: base_options(style, params.title.as_deref(), true),
    }
}

#[doc = r#"
    Rows of `datum` are categories and columns are legend series, so the matrix is
    transposed: `series[j] = [datum[0][j], datum[1][j], ...]`.
"#]
pub fn transpose_series(datum: &[Vec<f64>], series_count: usize) -> Vec<Vec<f64>> {
    (0..series_count)
        .map(|col| {
            datum
                .iter()
                .map(|row| row.get(col).copied().unwrap_or(0.0))
                .collect()
        })
        .collect()
}

fn stackbar_config(params: &StackbarParams, style: &ChartStyle) -> ChartConfig {
    let series: Vec<Vec<f64>> = transpose_series(&params.datum, params.legends.len());

    let datasets: Vec<Dataset> = params
        .legends
        .iter()
        .zip(series)
        .enumerate()
        .map(|(idx, (legend, values))| {
            let color: SeriesColor = style.color_for(idx);
            Dataset {
                label: Some(legend.clone()),
                data: some_values(&values),
                background_color: ColorSpec::Uniform(color.fill),
                border_color: ColorSpec::Uniform(color.line),
                border_width: style.border_width,
                fill: true,
                line_tension: None,
            }
        })
        .collect();

    let mut options: ChartOptions = base_options(style, params.title.as_deref(), true);
    options.scales = Some(Scales {
        x_axes: vec![AxisOptions {
            stacked: true,
            ticks: None,
        }],
        y_axes: vec![AxisOptions {
            stacked: true,
            ticks: params.range.as_ref().map(ticks_from),
        }],
    });

    ChartConfig {
        render_type: RenderType::Bar,
        data: ChartData {
            labels: params.labels.clone(),
            datasets,
        },
        options,
    }
}

fn bar_config(params: &BarParams, style: &ChartStyle) -> ChartConfig {
    let (background_color, border_color) = per_point_colors(style, params.datum.len());

    let mut options: ChartOptions = base_options(style, params.title.as_deref(), false);
    options.scales = value_axis(params.range.as_ref());

    ChartConfig {
        render_type: RenderType::Bar,
        data: ChartData {
            labels: params.labels.clone(),
            datasets: vec![Dataset {
                label: None,
                data: some_values(&params.datum),
                background_color,
                border_color,
                border_width: style.border_width,
                fill: true,
                line_tension: None,
            }],
        },
        options,
    }
}
