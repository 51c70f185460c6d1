use crate::common::*;

use crate::errors::chart_error::*;
use crate::model::chart::{color::*, render_config::*, style::*};
use crate::renderer::rgba_backend::*;
use crate::traits::render_traits::chart_renderer::*;

use plotters::{
    chart::ChartBuilder,
    coord::Shift,
    drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea},
    element::{Circle, PathElement, Polygon, Rectangle},
    series::LineSeries,
    style::{
        FontDesc, FontFamily, FontStyle, RGBAColor, ShapeStyle, TextStyle, register_font,
        text_anchor::{HPos, Pos, VPos},
    },
};
use std::{convert::Infallible, f64::consts::PI};

type Area<'a> = DrawingArea<RgbaBackend<'a>, Shift>;

const BAR_SLOT_MARGIN: f64 = 0.1;
const GAUGE_BAND: (f64, f64) = (0.2, 0.8);
const AUTO_RANGE_PADDING: f64 = 0.05;
const LEGEND_BOX: i32 = 12;
const LEGEND_GAP: i32 = 4;
const LEGEND_ENTRY_GAP: i32 = 10;
const MARKER_RADIUS: i32 = 3;
const Y_LABEL_AREA: u32 = 48;
const X_LABEL_AREA: u32 = 24;
const VALUE_TICKS: usize = 6;
/* smallest plot area still worth drawing into */
const MIN_PLOT_EDGE: i32 = 4;
/* axis bounds stay within this magnitude so the span and tick steps remain finite */
const MAX_AXIS_MAGNITUDE: f64 = f64::MAX / 4.0;

impl From<DrawingAreaErrorKind<Infallible>> for ChartError {
    fn from(err: DrawingAreaErrorKind<Infallible>) -> Self {
        ChartError::RenderFailure(err.to_string())
    }
}

#[derive(Debug, Clone)]
struct LegendEntry {
    label: String,
    fill: RgbaColor,
    line: RgbaColor,
}

#[doc = r#"
    Draws a `ChartConfig` with plotters on a transparent canvas.

    Layout, top to bottom: padding, title band, legend band (right-aligned rows), plot.
    Pie and doughnut segments start at 12 o'clock and run clockwise.
"#]
#[derive(Debug, Clone)]
pub struct PlottersChartRenderer {
    style: Arc<ChartStyle>,
}

impl PlottersChartRenderer {
    #[doc = r#"
        Registers `font_bytes` with plotters under `style.font_family` and returns the renderer.

        The plotters font registry is process-wide and keeps the bytes for the life of the
        process, so this is meant to run once at startup.
    "#]
    pub fn new(style: Arc<ChartStyle>, font_bytes: &[u8]) -> Result<Self, ChartError> {
        let font_data: &'static [u8] = Box::leak(font_bytes.to_vec().into_boxed_slice());

        register_font(style.font_family(), FontStyle::Normal, font_data).map_err(|_| {
            ChartError::RenderFailure(format!(
                "[PlottersChartRenderer->new] font '{}' could not be parsed",
                style.font_family()
            ))
        })?;

        info!(
            "[PlottersChartRenderer->new] chart font registered as '{}'",
            style.font_family()
        );

        Ok(Self { style })
    }

    fn text_style(&self, size: f64) -> TextStyle<'_> {
        FontDesc::new(
            FontFamily::Name(self.style.font_family()),
            size,
            FontStyle::Normal,
        )
        .color(&plot_color(*self.style.font_color()))
    }

    fn tick_style(&self) -> TextStyle<'_> {
        self.text_style(*self.style.tick_font_size())
    }

    #[doc = r#"
        Padding, title and legend are each skipped when they would leave the plot narrower or
        shorter than `MIN_PLOT_EDGE`. A plot below that size is left blank.
    "#]
    fn draw_chart(&self, root: &Area<'_>, config: &ChartConfig) -> Result<(), ChartError> {
        let (root_width, root_height) = pixel_size(root);
        let padding: i32 = i32::try_from(config.options.padding).unwrap_or(i32::MAX);
        let padded: Area<'_> =
            if padding.saturating_mul(2).saturating_add(MIN_PLOT_EDGE) <= root_width.min(root_height) {
                root.margin(padding, padding, padding, padding)
            } else {
                root.clone()
            };

        let title: &TitleOptions = &config.options.title;
        let body: Area<'_> = match (&title.text, title.display) {
            (Some(text), true) => {
                let title_style: TextStyle<'_> = self.text_style(title.font_size);
                let (_, text_height) = padded.estimate_text_size(text, &title_style)?;
                let text_height: i32 = i32::try_from(text_height).unwrap_or(i32::MAX);
                /* same band height `titled` reserves */
                let band: i32 = text_height.saturating_add((text_height / 2).min(5) * 2);

                if band.saturating_add(MIN_PLOT_EDGE) <= pixel_size(&padded).1 {
                    padded.titled(text, title_style)?
                } else {
                    padded
                }
            }
            _ => padded,
        };

        let entries: Vec<LegendEntry> = if config.options.legend.display {
            legend_entries(config)
        } else {
            vec![]
        };

        let plot: Area<'_> = if entries.is_empty() {
            body
        } else {
            let rows: Vec<Vec<(LegendEntry, i32)>> = self.legend_rows(&body, entries)?;
            let band: i32 = self
                .legend_row_height()
                .saturating_mul(i32::try_from(rows.len()).unwrap_or(i32::MAX))
                .saturating_add(LEGEND_GAP);

            if band.saturating_add(MIN_PLOT_EDGE) <= pixel_size(&body).1 {
                let (legend_area, plot_area) = body.split_vertically(band);
                self.draw_legend(&legend_area, &rows)?;
                plot_area
            } else {
                body
            }
        };

        let (plot_width, plot_height) = pixel_size(&plot);
        if plot_width < MIN_PLOT_EDGE || plot_height < MIN_PLOT_EDGE {
            return Ok(());
        }

        match config.render_type {
            RenderType::Pie => self.draw_pie(&plot, config, None),
            RenderType::Doughnut => self.draw_pie(
                &plot,
                config,
                Some(config.options.cutout_percentage.unwrap_or(50)),
            ),
            RenderType::Line => self.draw_line(&plot, config),
            RenderType::Bar => self.draw_bar(&plot, config),
            RenderType::HorizontalBar => self.draw_horizontal_bar(&plot, config),
        }
    }

    fn legend_row_height(&self) -> i32 {
        (*self.style.tick_font_size() as i32 + 6).max(LEGEND_BOX + 2)
    }

    /* greedy wrap; each entry keeps its measured width */
    fn legend_rows(
        &self,
        area: &Area<'_>,
        entries: Vec<LegendEntry>,
    ) -> Result<Vec<Vec<(LegendEntry, i32)>>, ChartError> {
        let max_width: i32 = pixel_size(area).0;
        let text_style: TextStyle<'_> = self.tick_style();

        let mut rows: Vec<Vec<(LegendEntry, i32)>> = vec![];
        let mut current: Vec<(LegendEntry, i32)> = vec![];
        let mut current_width: i32 = 0;

        for entry in entries {
            let (text_width, _) = area.estimate_text_size(&entry.label, &text_style)?;
            let entry_width: i32 = LEGEND_BOX + LEGEND_GAP + text_width as i32 + LEGEND_ENTRY_GAP;

            if !current.is_empty() && current_width + entry_width > max_width {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }

            current_width += entry_width;
            current.push((entry, entry_width));
        }

        if !current.is_empty() {
            rows.push(current);
        }

        Ok(rows)
    }

    fn draw_legend(&self, area: &Area<'_>, rows: &[Vec<(LegendEntry, i32)>]) -> Result<(), ChartError> {
        let area_width: i32 = pixel_size(area).0;
        let row_height: i32 = self.legend_row_height();
        let text_style: TextStyle<'_> = self.tick_style().pos(Pos::new(HPos::Left, VPos::Center));
        let border_width: u32 = *self.style.border_width();

        for (row_idx, row) in rows.iter().enumerate() {
            let row_width: i32 = row.iter().map(|(_, w)| *w).sum();
            let center_y: i32 = row_idx as i32 * row_height + row_height / 2;
            let mut x: i32 = (area_width - row_width).max(0);

            for (entry, entry_width) in row {
                let top_left: (i32, i32) = (x, center_y - LEGEND_BOX / 2);
                let bottom_right: (i32, i32) = (x + LEGEND_BOX, center_y + LEGEND_BOX / 2);

                area.draw(&Rectangle::new([top_left, bottom_right], fill_style(entry.fill)))?;
                area.draw(&Rectangle::new(
                    [top_left, bottom_right],
                    line_style(entry.line, border_width),
                ))?;
                area.draw_text(
                    &entry.label,
                    &text_style,
                    (x + LEGEND_BOX + LEGEND_GAP, center_y),
                )?;

                x += entry_width;
            }
        }

        Ok(())
    }

    fn draw_pie(
        &self,
        area: &Area<'_>,
        config: &ChartConfig,
        cutout_percentage: Option<u32>,
    ) -> Result<(), ChartError> {
        let Some(dataset) = config.data.datasets.first() else {
            return Ok(());
        };

        let values: Vec<f64> = dataset
            .data
            .iter()
            .map(|v| v.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0))
            .collect();
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Ok(());
        }

        let (width, height) = pixel_size(area);
        let center: (f64, f64) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let outer: f64 =
            (f64::from(width.min(height)) / 2.0 - f64::from(dataset.border_width)).max(1.0);
        let inner: f64 = cutout_percentage
            .map(|pct| outer * pct.min(100) as f64 / 100.0)
            .unwrap_or(0.0);

        let mut start: f64 = -PI / 2.0;

        for (idx, value) in values.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }

            let end: f64 = start + value / total * 2.0 * PI;
            let outline: Vec<(i32, i32)> = segment_outline(center, outer, inner, start, end);

            area.draw(&Polygon::new(
                outline.clone(),
                fill_style(dataset.background_color.at(idx)),
            ))?;

            let mut border: Vec<(i32, i32)> = outline;
            if let Some(first) = border.first().copied() {
                border.push(first);
            }
            area.draw(&PathElement::new(
                border,
                line_style(dataset.border_color.at(idx), dataset.border_width),
            ))?;

            start = end;
        }

        Ok(())
    }

    fn draw_line(&self, area: &Area<'_>, config: &ChartConfig) -> Result<(), ChartError> {
        let labels: &[String] = &config.data.labels;
        let point_count: usize = config
            .data
            .datasets
            .iter()
            .map(|d| d.data.len())
            .max()
            .unwrap_or(0)
            .max(labels.len());

        let (y_min, y_max) = resolve_range(
            config.data.datasets.iter().flat_map(|d| d.values()),
            false,
            config.y_ticks(),
        );

        let (x_label_area, y_label_area) = label_areas(area, Y_LABEL_AREA);
        let mut chart = ChartBuilder::on(area)
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(0usize..point_count.saturating_sub(1).max(1), y_min..y_max)?;

        let tick_style: TextStyle<'_> = self.tick_style();
        let grid: RgbaColor = *self.style.clean_line();

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(point_count.clamp(1, 10))
            .y_labels(VALUE_TICKS)
            .label_style(tick_style)
            .axis_style(line_style(*self.style.font_color(), 1))
            .bold_line_style(line_style(grid, 1))
            .light_line_style(line_style(RgbaColor::TRANSPARENT, 1))
            .x_label_formatter(&|x| labels.get(*x).cloned().unwrap_or_default())
            .y_label_formatter(&|y| format_tick(*y))
            .draw()?;

        for dataset in &config.data.datasets {
            let line: RgbaColor = dataset.border_color.at(0);
            let points: Vec<Option<(usize, f64)>> = dataset
                .data
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    value
                        .filter(|v| v.is_finite())
                        .map(|v| (idx, v.clamp(y_min, y_max)))
                })
                .collect();

            for segment in split_segments(&points) {
                chart.draw_series(LineSeries::new(
                    segment.iter().copied(),
                    line_style(line, dataset.border_width),
                ))?;
                chart.draw_series(
                    segment
                        .iter()
                        .map(|point| Circle::new(*point, MARKER_RADIUS, fill_style(line))),
                )?;
            }
        }

        Ok(())
    }

    fn draw_bar(&self, area: &Area<'_>, config: &ChartConfig) -> Result<(), ChartError> {
        let datasets: &[Dataset] = &config.data.datasets;
        let slot_count: usize = datasets
            .iter()
            .map(|d| d.data.len())
            .max()
            .unwrap_or(0)
            .max(config.data.labels.len())
            .max(1);
        let stacked: bool = config.is_stacked();

        let (y_min, y_max) = if stacked {
            resolve_range(stacked_extremes(datasets, slot_count), true, config.y_ticks())
        } else {
            resolve_range(datasets.iter().flat_map(|d| d.values()), true, config.y_ticks())
        };

        let (x_label_area, y_label_area) = label_areas(area, Y_LABEL_AREA);
        let mut chart = ChartBuilder::on(area)
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(0f64..slot_count as f64, y_min..y_max)?;

        let grid: RgbaColor = *self.style.clean_line();

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_labels(VALUE_TICKS)
            .label_style(self.tick_style())
            .axis_style(line_style(*self.style.font_color(), 1))
            .bold_line_style(line_style(grid, 1))
            .light_line_style(line_style(RgbaColor::TRANSPARENT, 1))
            .y_label_formatter(&|y| format_tick(*y))
            .draw()?;

        let bars: Vec<BarRect> = bar_layout(datasets, slot_count, stacked, (y_min, y_max));

        for bar in &bars {
            let corners: [(f64, f64); 2] = [(bar.x0, bar.y0), (bar.x1, bar.y1)];
            chart.draw_series(std::iter::once(Rectangle::new(corners, fill_style(bar.fill))))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                corners,
                line_style(bar.line, bar.border_width),
            )))?;
        }

        /* category labels centered under each slot */
        let label_style: TextStyle<'_> = self.tick_style().pos(Pos::new(HPos::Center, VPos::Top));
        let (base_x, base_y) = area.get_base_pixel();

        for (idx, label) in config.data.labels.iter().enumerate() {
            let (px, py) = chart.backend_coord(&(idx as f64 + 0.5, y_min));
            area.draw_text(label, &label_style, (px - base_x, py - base_y + 4))?;
        }

        Ok(())
    }

    fn draw_horizontal_bar(&self, area: &Area<'_>, config: &ChartConfig) -> Result<(), ChartError> {
        let Some(dataset) = config.data.datasets.first() else {
            return Ok(());
        };

        let (x_min, x_max) = resolve_range(dataset.values(), true, config.x_ticks());

        let (x_label_area, y_label_area) = label_areas(area, LEGEND_BOX as u32);
        let mut chart = ChartBuilder::on(area)
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(x_min..x_max, 0f64..1f64)?;

        let grid: RgbaColor = *self.style.clean_line();

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_labels(VALUE_TICKS)
            .y_labels(0)
            .label_style(self.tick_style())
            .axis_style(line_style(*self.style.font_color(), 1))
            .bold_line_style(line_style(grid, 1))
            .light_line_style(line_style(RgbaColor::TRANSPARENT, 1))
            .x_label_formatter(&|x| format_tick(*x))
            .draw()?;

        if let Some(value) = dataset.values().next() {
            /* the drawn bar is clipped to the axis, the value itself is untouched */
            let start: f64 = 0f64.clamp(x_min, x_max);
            let end: f64 = value.clamp(x_min, x_max);
            let corners: [(f64, f64); 2] = [(start, GAUGE_BAND.0), (end, GAUGE_BAND.1)];

            chart.draw_series(std::iter::once(Rectangle::new(
                corners,
                fill_style(dataset.background_color.at(0)),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                corners,
                line_style(dataset.border_color.at(0), dataset.border_width),
            )))?;
        }

        Ok(())
    }
}

impl ChartRenderer for PlottersChartRenderer {
    fn render(&self, config: &ChartConfig, width: u32, height: u32) -> Result<RgbaImage, ChartError> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidDimensions { width, height });
        }

        let mut canvas: RgbaImage = RgbaImage::new(width, height);
        {
            let root: Area<'_> = RgbaBackend::new(&mut canvas).into_drawing_area();
            self.draw_chart(&root, config)?;
            root.present()?;
        }

        Ok(canvas)
    }
}

fn pixel_size(area: &Area<'_>) -> (i32, i32) {
    let (x, y) = area.get_pixel_range();
    ((x.end - x.start).max(0), (y.end - y.start).max(0))
}

#[doc = "Axis label bands `(x, y)`, dropped when they would leave no room for the plot."]
fn label_areas(area: &Area<'_>, y_label_area: u32) -> (u32, u32) {
    let (width, height) = pixel_size(area);
    let fits = |band: u32, edge: i32| -> u32 {
        if i64::from(band) + i64::from(MIN_PLOT_EDGE) <= i64::from(edge) {
            band
        } else {
            0
        }
    };
    (fits(X_LABEL_AREA, height), fits(y_label_area, width))
}

fn plot_color(color: RgbaColor) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.opacity())
}

fn fill_style(color: RgbaColor) -> ShapeStyle {
    ShapeStyle {
        color: plot_color(color),
        filled: true,
        stroke_width: 1,
    }
}

fn line_style(color: RgbaColor, stroke_width: u32) -> ShapeStyle {
    ShapeStyle {
        color: plot_color(color),
        filled: false,
        stroke_width,
    }
}

fn legend_entries(config: &ChartConfig) -> Vec<LegendEntry> {
    match config.render_type {
        RenderType::Pie | RenderType::Doughnut => {
            let Some(dataset) = config.data.datasets.first() else {
                return vec![];
            };
            config
                .data
                .labels
                .iter()
                .enumerate()
                .map(|(idx, label)| LegendEntry {
                    label: label.clone(),
                    fill: dataset.background_color.at(idx),
                    line: dataset.border_color.at(idx),
                })
                .collect()
        }
        RenderType::Line | RenderType::Bar | RenderType::HorizontalBar => config
            .data
            .datasets
            .iter()
            .filter_map(|dataset| {
                dataset.label.as_ref().map(|label| LegendEntry {
                    label: label.clone(),
                    fill: dataset.background_color.at(0),
                    line: dataset.border_color.at(0),
                })
            })
            .collect(),
    }
}

#[doc = r#"
    Pixel outline of one pie segment from angle `start` to `end` (radians, clockwise on screen).
    With `inner > 0` the outline is a ring slice, otherwise it closes at the center.
"#]
fn segment_outline(center: (f64, f64), outer: f64, inner: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let sweep: f64 = end - start;
    let steps: usize = ((sweep / (2.0 * PI) * 180.0).ceil() as usize).max(2);
    let arc_point = |radius: f64, angle: f64| -> (i32, i32) {
        (
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 + radius * angle.sin()).round() as i32,
        )
    };

    let mut outline: Vec<(i32, i32)> = (0..=steps)
        .map(|step| arc_point(outer, start + sweep * step as f64 / steps as f64))
        .collect();

    if inner > 0.0 {
        outline.extend(
            (0..=steps)
                .rev()
                .map(|step| arc_point(inner, start + sweep * step as f64 / steps as f64)),
        );
    } else {
        outline.push((center.0.round() as i32, center.1.round() as i32));
    }

    outline
}

#[doc = "Splits a series at missing points into continuous runs."]
fn split_segments<X: Copy>(points: &[Option<(X, f64)>]) -> Vec<Vec<(X, f64)>> {
    let mut segments: Vec<Vec<(X, f64)>> = vec![];
    let mut current: Vec<(X, f64)> = vec![];

    for point in points {
        match point {
            Some(p) => current.push(*p),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

#[doc = r#"
    Axis bounds: explicit ticks win, missing ones come from the data with 5% padding.
    Empty data gives `0..1`, a single distinct value is widened by one on each side.
    Every bound is kept within `MAX_AXIS_MAGNITUDE`, so the returned span is always finite and positive.
"#]
fn resolve_range(
    values: impl Iterator<Item = f64>,
    include_zero: bool,
    ticks: Option<AxisTicks>,
) -> (f64, f64) {
    let bounded = |v: f64| v.clamp(-MAX_AXIS_MAGNITUDE, MAX_AXIS_MAGNITUDE);

    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .map(bounded)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if include_zero && lo.is_finite() {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }

    let auto: (f64, f64) = if !lo.is_finite() {
        (0.0, 1.0)
    } else if lo == hi {
        let step: f64 = unit_step(lo);
        (lo - step, hi + step)
    } else {
        let pad: f64 = (hi - lo) * AUTO_RANGE_PADDING;
        (
            if lo == 0.0 { lo } else { lo - pad },
            if hi == 0.0 { hi } else { hi + pad },
        )
    };

    let ticks: AxisTicks = ticks.unwrap_or_default();
    let pick = |tick: Option<f64>, fallback: f64| match tick {
        Some(v) if v.is_finite() => bounded(v),
        _ => fallback,
    };
    let min: f64 = pick(ticks.min, auto.0);
    let mut max: f64 = pick(ticks.max, auto.1);

    if min >= max {
        max = min + unit_step(min);
    }

    (min, max)
}

#[doc = "One, or 5% of the magnitude once adding one no longer changes `value`."]
fn unit_step(value: f64) -> f64 {
    if value + 1.0 > value {
        1.0
    } else {
        value.abs() * AUTO_RANGE_PADDING
    }
}

#[doc = "Per-slot positive and negative stack totals, which bound a stacked axis."]
fn stacked_extremes(datasets: &[Dataset], slot_count: usize) -> impl Iterator<Item = f64> + '_ {
    (0..slot_count).flat_map(move |slot| {
        let (positive, negative) = datasets
            .iter()
            .filter_map(|d| d.data.get(slot).copied().flatten())
            .filter(|v| v.is_finite())
            .fold((0.0, 0.0), |(pos, neg), v| {
                if v >= 0.0 { (pos + v, neg) } else { (pos, neg + v) }
            });
        [positive, negative]
    })
}

#[derive(Debug, Clone, PartialEq)]
struct BarRect {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    fill: RgbaColor,
    line: RgbaColor,
    border_width: u32,
}

#[doc = r#"
    Bar rectangles in chart coordinates. Slot `i` spans `[i, i + 1)`, bars keep a margin on
    both sides and are either stacked (positive and negative totals apart) or grouped side by side.
"#]
fn bar_layout(datasets: &[Dataset], slot_count: usize, stacked: bool, range: (f64, f64)) -> Vec<BarRect> {
    let (y_min, y_max) = range;
    let group_width: f64 = 1.0 - 2.0 * BAR_SLOT_MARGIN;
    let bar_width: f64 = if stacked || datasets.is_empty() {
        group_width
    } else {
        group_width / datasets.len() as f64
    };

    let mut bars: Vec<BarRect> = vec![];

    for slot in 0..slot_count {
        let mut positive_base: f64 = 0.0;
        let mut negative_base: f64 = 0.0;

        for (ds_idx, dataset) in datasets.iter().enumerate() {
            let Some(value) = dataset.data.get(slot).copied().flatten().filter(|v| v.is_finite())
            else {
                continue;
            };

            let (x0, bottom, top) = if stacked {
                let x0: f64 = slot as f64 + BAR_SLOT_MARGIN;
                if value >= 0.0 {
                    positive_base += value;
                    (x0, positive_base - value, positive_base)
                } else {
                    negative_base += value;
                    (x0, negative_base, negative_base - value)
                }
            } else {
                let x0: f64 = slot as f64 + BAR_SLOT_MARGIN + bar_width * ds_idx as f64;
                (x0, value.min(0.0), value.max(0.0))
            };

            bars.push(BarRect {
                x0,
                x1: x0 + bar_width,
                y0: bottom.clamp(y_min, y_max),
                y1: top.clamp(y_min, y_max),
                fill: dataset.background_color.at(slot),
                line: dataset.border_color.at(slot),
                border_width: dataset.border_width,
            });
        }
    }

    bars
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text: String = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::chart_params::*;
    use crate::service::chart_synthesizer::*;
    use crate::utils_modules::test_fixtures::*;

    fn renderer_without_font() -> PlottersChartRenderer {
        PlottersChartRenderer {
            style: Arc::new(ChartStyle::default()),
        }
    }

    fn renderer_with_system_font() -> Option<PlottersChartRenderer> {
        let bytes: Vec<u8> = system_font_bytes()?;
        let style = ChartStyle {
            font_family: String::from("makechart-test"),
            ..ChartStyle::default()
        };
        PlottersChartRenderer::new(Arc::new(style), &bytes).ok()
    }

    fn textless(mut config: ChartConfig) -> ChartConfig {
        config.options.legend.display = false;
        config.options.title.display = false;
        config
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pie_fills_the_center() {
        let params = ChartParams::Pie(PieParams::new(vec![1.0, 2.0, 3.0], labels(&["a", "b", "c"]), None));
        let config: ChartConfig = textless(synthesize(&params, &ChartStyle::default()).unwrap());

        let image: RgbaImage = renderer_without_font().render(&config, 200, 200).unwrap();

        assert_eq!(image.dimensions(), (200, 200));
        assert!(image.get_pixel(100, 100).0[3] > 0);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn doughnut_leaves_the_center_transparent() {
        let params = ChartParams::Doughnut(DoughnutParams::new(
            10.0,
            AxisRange::new(None, Some(50.0)),
            None,
            None,
        ));
        let config: ChartConfig = synthesize(&params, &ChartStyle::default()).unwrap();

        let image: RgbaImage = renderer_without_font().render(&config, 200, 200).unwrap();

        assert_eq!(image.get_pixel(100, 100).0[3], 0);
        /* the value segment starts at 12 o'clock and runs clockwise */
        assert!(image.get_pixel(110, 12).0[3] > 0);
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let params = ChartParams::Pie(PieParams::new(vec![1.0], labels(&["a"]), None));
        let config: ChartConfig = synthesize(&params, &ChartStyle::default()).unwrap();
        assert!(matches!(
            renderer_without_font().render(&config, 0, 10),
            Err(ChartError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn every_kind_renders_with_a_real_font() {
        let Some(renderer) = renderer_with_system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let style: ChartStyle = ChartStyle::default();

        let all_params: Vec<ChartParams> = vec![
            ChartParams::Doughnut(DoughnutParams::new(
                10.0,
                AxisRange::new(None, Some(50.0)),
                Some("score".to_string()),
                Some("Doughnut".to_string()),
            )),
            ChartParams::Gauge(GaugeParams::new(
                130.0,
                Some("Memory".to_string()),
                Some("used".to_string()),
                Some(AxisRange::new(Some(0.0), Some(100.0))),
            )),
            ChartParams::Line(LineParams::new(
                vec![vec![Some(1.0), None, Some(3.0)], vec![Some(2.0), Some(2.5), Some(-1.0)]],
                labels(&["a", "b", "c"]),
                Some(labels(&["x", "y"])),
                Some("Line".to_string()),
                None,
            )),
            ChartParams::Pie(PieParams::new(vec![3.0, 1.0], labels(&["OK", "NG"]), None)),
            ChartParams::Stackbar(StackbarParams::new(
                vec![vec![1.0, 4.0], vec![5.0, 0.0]],
                labels(&["pc1", "pc2"]),
                labels(&["OK", "NG"]),
                None,
                None,
            )),
            ChartParams::Bar(BarParams::new(
                vec![1.0, 2.0, 3.0, 5.0, 2.0],
                labels(&["1", "2", "3", "4", "5"]),
                None,
                Some(AxisRange::new(Some(0.0), None)),
            )),
        ];

        for params in all_params {
            let config: ChartConfig = synthesize(&params, &style).unwrap();
            let image: RgbaImage = renderer.render(&config, 320, 240).unwrap();
            assert_eq!(image.dimensions(), (320, 240));
            assert!(image.pixels().any(|p| p.0[3] > 0), "{:?} drew nothing", params.kind());
        }
    }

    fn titled_params() -> Vec<ChartParams> {
        vec![
            ChartParams::Doughnut(DoughnutParams::new(
                10.0,
                AxisRange::new(None, Some(50.0)),
                Some("l".to_string()),
                Some("D".to_string()),
            )),
            ChartParams::Gauge(GaugeParams::new(
                42.0,
                Some("Gauge".to_string()),
                Some("used".to_string()),
                Some(AxisRange::new(Some(0.0), Some(100.0))),
            )),
            ChartParams::Line(LineParams::new(
                vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0), None]],
                labels(&["a", "b"]),
                Some(labels(&["x", "y"])),
                Some("Line".to_string()),
                None,
            )),
            ChartParams::Pie(PieParams::new(
                vec![1.0, 2.0],
                labels(&["a", "b"]),
                Some("Pie".to_string()),
            )),
            ChartParams::Stackbar(StackbarParams::new(
                vec![vec![1.0, 4.0], vec![5.0, 0.0]],
                labels(&["pc1", "pc2"]),
                labels(&["OK", "NG"]),
                Some("Stack".to_string()),
                None,
            )),
            ChartParams::Bar(BarParams::new(
                vec![1.0, 2.0],
                labels(&["a", "b"]),
                Some("Bar".to_string()),
                None,
            )),
        ]
    }

    #[test]
    fn titled_charts_render_on_small_canvases() {
        let Some(renderer) = renderer_with_system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let style: ChartStyle = ChartStyle::default();

        for params in titled_params() {
            let config: ChartConfig = synthesize(&params, &style).unwrap();
            for (width, height) in [(1, 1), (8, 8), (30, 30), (60, 40), (100, 60), (120, 90)] {
                let image: RgbaImage = renderer
                    .render(&config, width, height)
                    .unwrap_or_else(|e| panic!("{:?} at {width}x{height}: {e}", params.kind()));
                assert_eq!(image.dimensions(), (width, height));
            }
        }
    }

    #[test]
    fn small_pie_keeps_its_plot_when_bands_are_skipped() {
        let Some(renderer) = renderer_with_system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let params = ChartParams::Pie(PieParams::new(
            vec![1.0, 2.0],
            labels(&["a", "b"]),
            Some("Pie".to_string()),
        ));
        let config: ChartConfig = synthesize(&params, &ChartStyle::default()).unwrap();

        let image: RgbaImage = renderer.render(&config, 8, 8).unwrap();

        assert!(image.get_pixel(4, 4).0[3] > 0);
    }

    #[test]
    fn every_kind_draws_its_title_and_plot_at_full_size() {
        let Some(renderer) = renderer_with_system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let style: ChartStyle = ChartStyle::default();

        for params in titled_params() {
            let config: ChartConfig = synthesize(&params, &style).unwrap();
            let image: RgbaImage = renderer.render(&config, 320, 240).unwrap();

            let opaque_rows = |rows: std::ops::Range<u32>| {
                rows.filter(|y| (0..320).any(|x| image.get_pixel(x, *y).0[3] > 0)).count()
            };
            assert!(opaque_rows(0..40) > 0, "{:?} has no title band", params.kind());
            assert!(opaque_rows(120..230) > 10, "{:?} has no plot", params.kind());
        }
    }

    #[test]
    fn huge_values_render_without_hanging() {
        let Some(renderer) = renderer_with_system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let style: ChartStyle = ChartStyle::default();
        let line = ChartParams::Line(LineParams::new(
            vec![vec![Some(1e308), Some(-1e308)]],
            labels(&["a", "b"]),
            None,
            None,
            None,
        ));
        let flat = ChartParams::Bar(BarParams::new(
            vec![1e308, 1e308],
            labels(&["a", "b"]),
            None,
            Some(AxisRange::new(Some(1e308), None)),
        ));

        for params in [line, flat] {
            let config: ChartConfig = synthesize(&params, &style).unwrap();
            let image: RgbaImage = renderer.render(&config, 320, 240).unwrap();
            assert_eq!(image.dimensions(), (320, 240));
        }
    }

    #[test]
    fn resolved_ranges_stay_finite() {
        let finite = |(min, max): (f64, f64)| {
            min.is_finite() && max.is_finite() && (max - min).is_finite() && min < max
        };

        assert!(finite(resolve_range([1e308, -1e308].into_iter(), false, None)));
        assert!(finite(resolve_range([f64::MAX].into_iter(), true, None)));
        assert!(finite(resolve_range([1e308].into_iter(), false, None)));
        let wide = AxisTicks { min: Some(-1e308), max: Some(1e308) };
        assert!(finite(resolve_range(std::iter::empty(), false, Some(wide))));
        let high_min = AxisTicks { min: Some(1e308), max: None };
        assert!(finite(resolve_range([1.0].into_iter(), false, Some(high_min))));
    }

    #[test]
    fn auto_range_pads_and_includes_zero_for_bars() {
        let close = |(a, b): (f64, f64), (c, d): (f64, f64)| (a - c).abs() < 1e-9 && (b - d).abs() < 1e-9;
        assert!(close(resolve_range([2.0, 4.0].into_iter(), false, None), (1.9, 4.1)));
        assert!(close(resolve_range([2.0, 4.0].into_iter(), true, None), (0.0, 4.2)));
        assert_eq!(resolve_range(std::iter::empty(), true, None), (0.0, 1.0));
        assert_eq!(resolve_range([3.0].into_iter(), false, None), (2.0, 4.0));
    }

    #[test]
    fn explicit_ticks_override_auto_range() {
        let ticks = AxisTicks { min: Some(0.0), max: Some(100.0) };
        assert_eq!(resolve_range([130.0].into_iter(), true, Some(ticks)), (0.0, 100.0));

        let only_min = AxisTicks { min: Some(500.0), max: None };
        assert_eq!(resolve_range([1.0, 2.0].into_iter(), false, Some(only_min)), (500.0, 501.0));
    }

    #[test]
    fn split_segments_breaks_at_gaps() {
        let points: Vec<Option<(usize, f64)>> =
            vec![Some((0, 1.0)), Some((1, 2.0)), None, Some((3, 4.0))];
        assert_eq!(
            split_segments(&points),
            vec![vec![(0, 1.0), (1, 2.0)], vec![(3, 4.0)]]
        );
        assert!(split_segments::<usize>(&[None, None]).is_empty());
    }

    #[test]
    fn stacked_bars_sit_on_each_other() {
        let style: ChartStyle = ChartStyle::default();
        let params = ChartParams::Stackbar(StackbarParams::new(
            vec![vec![1.0, 4.0], vec![5.0, 0.0]],
            labels(&["pc1", "pc2"]),
            labels(&["OK", "NG"]),
            None,
            None,
        ));
        let config: ChartConfig = synthesize(&params, &style).unwrap();

        let bars: Vec<BarRect> = bar_layout(&config.data.datasets, 2, true, (0.0, 10.0));

        assert_eq!(bars.len(), 4);
        assert_eq!((bars[0].y0, bars[0].y1), (0.0, 1.0));
        assert_eq!((bars[1].y0, bars[1].y1), (1.0, 5.0));
        assert_eq!(bars[0].x0, bars[1].x0);
        assert_eq!(bars[1].fill, style.color_for(1).fill);
    }

    #[test]
    fn grouped_bars_share_the_slot() {
        let style: ChartStyle = ChartStyle::default();
        let color: SeriesColor = style.color_for(0);
        let dataset = |value: f64| Dataset {
            label: None,
            data: vec![Some(value)],
            background_color: ColorSpec::Uniform(color.fill),
            border_color: ColorSpec::Uniform(color.line),
            border_width: 2,
            fill: true,
            line_tension: None,
        };

        let bars: Vec<BarRect> = bar_layout(&[dataset(2.0), dataset(-1.0)], 1, false, (-5.0, 5.0));

        assert_eq!(bars.len(), 2);
        assert!(bars[0].x1 <= bars[1].x0 + 1e-9);
        assert_eq!((bars[1].y0, bars[1].y1), (-1.0, 0.0));
    }

    #[test]
    fn segment_outline_starts_at_twelve_oclock() {
        let outline: Vec<(i32, i32)> = segment_outline((50.0, 50.0), 40.0, 0.0, -PI / 2.0, 0.0);
        assert_eq!(outline.first(), Some(&(50, 10)));
        assert_eq!(outline[outline.len() - 2], (90, 50));
        assert_eq!(outline.last(), Some(&(50, 50)));
    }

    #[test]
    fn ticks_are_formatted_compactly() {
        assert_eq!(format_tick(100.0), "100");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(0.126), "0.13");
    }
}
