//! Draws an [`HourlySeries`] as a line chart into an in-memory PNG or SVG.

use std::ops::Range;

use chrono::{DateTime, TimeZone, Utc};
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::{
    Coordinates, HourlySeries,
    config::{ChartConfig, ImageFormat, TickPolicy},
    error::{ForecastError, Result},
    ticks::{self, TickSet},
};

/// 8x4 inches at 100 dpi.
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 400;

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 18;
const DESC_SIZE: u32 = 14;
const LABEL_SIZE: u32 = 12;
const LINE_HEIGHT: i32 = 14;
const TICK_LENGTH: i32 = 5;
const GAP: i32 = 3;

const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);

pub const X_DESC: &str = "Time (UTC)";
pub const Y_DESC: &str = "Temperature (°C)";

pub fn chart_title(coords: Coordinates) -> String {
    format!("Hourly Temperature @ {coords}")
}

/// Renders the chart in `config.format` and returns the encoded image.
pub fn render(
    series: &HourlySeries,
    coords: Coordinates,
    config: &ChartConfig,
) -> Result<Vec<u8>> {
    let plot = PlotData::prepare(series, config.ticks)?;
    let title = chart_title(coords);

    debug!(
        points = plot.points.len(),
        ticks = plot.ticks.ticks.len(),
        format = %config.format,
        "rendering chart"
    );

    match config.format {
        ImageFormat::Png => render_png(&plot, &title),
        ImageFormat::Svg => render_svg(&plot, &title),
    }
}

fn render_png(plot: &PlotData, title: &str) -> Result<Vec<u8>> {
    let mut pixels = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (WIDTH, HEIGHT)).into_drawing_area();
        draw(&root, plot, title)?;
        root.present().map_err(render_error)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&pixels, WIDTH, HEIGHT, ExtendedColorType::Rgb8)?;
    Ok(png)
}

fn render_svg(plot: &PlotData, title: &str) -> Result<Vec<u8>> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw(&root, plot, title)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg.into_bytes())
}

fn render_error(err: impl std::fmt::Display) -> ForecastError {
    ForecastError::Render(err.to_string())
}

/// Everything the backend-independent drawing code needs, in axis units.
#[derive(Debug)]
struct PlotData {
    points: Vec<(f64, Option<f64>)>,
    x_range: Range<f64>,
    y_range: Range<f64>,
    ticks: TickSet,
    rotate_labels: bool,
    /// Horizontal labels end at their tick instead of centering on it.
    right_align_labels: bool,
}

impl PlotData {
    fn prepare(series: &HourlySeries, policy: TickPolicy) -> Result<Self> {
        let xs: Vec<f64> = match policy {
            TickPolicy::Default => (0..series.len()).map(|i| i as f64).collect(),
            TickPolicy::Concise | TickPolicy::FixedInterval { .. } => series
                .times()
                .ok_or_else(|| {
                    ForecastError::Render("date ticks need parsed timestamps".to_string())
                })?
                .iter()
                .map(|t| t.timestamp() as f64)
                .collect(),
        };

        let (x_min, x_max) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let x_unit = if policy.needs_datetimes() { 3600.0 } else { 1.0 };
        let x_range = padded(x_min, x_max, x_unit);

        let (y_min, y_max) = series.temperature_range().unwrap_or((0.0, 0.0));
        let y_range = padded(y_min, y_max, 1.0);

        if !is_finite(&x_range) || !is_finite(&y_range) {
            return Err(ForecastError::Render(format!(
                "axis range {x_range:?} x {y_range:?} is not finite"
            )));
        }

        let ticks = match policy {
            TickPolicy::Default => ticks::categorical(series.labels()),
            TickPolicy::Concise => {
                let (start, end) = datetime_bounds(&x_range)?;
                ticks::concise(start, end)
            }
            TickPolicy::FixedInterval { hours } => {
                let (start, end) = datetime_bounds(&x_range)?;
                ticks::fixed_interval(start, end, hours)
            }
        };

        let points = xs
            .into_iter()
            .zip(series.temperatures().iter().copied())
            .collect();

        Ok(Self {
            points,
            x_range,
            y_range,
            ticks,
            rotate_labels: policy == TickPolicy::Default,
            right_align_labels: policy == TickPolicy::Concise,
        })
    }

    fn label_lines(&self) -> i32 {
        let lines = self
            .ticks
            .ticks
            .iter()
            .map(|t| t.label.lines().count())
            .max()
            .unwrap_or(0);
        let offset = usize::from(self.ticks.offset.is_some());
        (lines + offset) as i32
    }

    /// Height of the bottom label area, sized so no label gets clipped.
    fn x_label_area(&self) -> i32 {
        let labels = if self.rotate_labels {
            self.ticks
                .ticks
                .iter()
                .map(|t| approx_text_width(&t.label, LABEL_SIZE))
                .max()
                .unwrap_or(0)
        } else {
            self.label_lines() * LINE_HEIGHT
        };
        TICK_LENGTH + GAP + labels + GAP * 2 + DESC_SIZE as i32 + GAP
    }
}

/// 5% margins on both sides; a zero-width span gets `unit` instead.
fn padded(min: f64, max: f64, unit: f64) -> Range<f64> {
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { unit };
    (min - pad)..(max + pad)
}

fn is_finite(range: &Range<f64>) -> bool {
    range.start.is_finite() && range.end.is_finite()
}

fn datetime_bounds(range: &Range<f64>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let to_utc = |secs: f64| {
        Utc.timestamp_opt(secs as i64, 0)
            .single()
            .ok_or_else(|| ForecastError::Render(format!("timestamp {secs} out of range")))
    };
    Ok((to_utc(range.start.ceil())?, to_utc(range.end.floor())?))
}

fn approx_text_width(text: &str, size: u32) -> i32 {
    let chars = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    (chars as f64 * f64::from(size) * 0.6).ceil() as i32
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &PlotData,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE))
        .margin(10)
        .x_label_area_size(plot.x_label_area())
        .y_label_area_size(60)
        .build_cartesian_2d(plot.x_range.clone(), plot.y_range.clone())
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
        .x_label_formatter(&|_: &f64| String::new())
        .y_label_formatter(&|y: &f64| format!("{y:.1}"))
        .label_style((FONT, LABEL_SIZE))
        .axis_desc_style((FONT, DESC_SIZE))
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .draw()
        .map_err(render_error)?;

    for segment in plot.points.split(|(_, y)| y.is_none()) {
        if segment.is_empty() {
            continue;
        }
        let line = LineSeries::new(
            segment.iter().filter_map(|&(x, y)| y.map(|y| (x, y))),
            SERIES_COLOR.stroke_width(2),
        );
        chart.draw_series(line).map_err(render_error)?;
    }

    chart
        .draw_series(
            plot.points
                .iter()
                .filter_map(|&(x, y)| y.map(|y| Circle::new((x, y), 3, SERIES_COLOR.filled()))),
        )
        .map_err(render_error)?;

    // Tick labels are drawn by hand: the mesh cannot place ticks at arbitrary
    // positions or break a label over two lines.
    let label_font = (FONT, LABEL_SIZE).into_font();
    let label_style = if plot.rotate_labels {
        TextStyle::from(label_font.transform(FontTransform::Rotate90))
    } else if plot.right_align_labels {
        TextStyle::from(label_font).pos(Pos::new(HPos::Right, VPos::Top))
    } else {
        TextStyle::from(label_font).pos(Pos::new(HPos::Center, VPos::Top))
    };

    let bottom = plot.y_range.start;
    for tick in &plot.ticks.ticks {
        if !plot.x_range.contains(&tick.position) {
            continue;
        }
        let (px, py) = chart.backend_coord(&(tick.position, bottom));

        root.draw(&PathElement::new(
            vec![(px, py), (px, py + TICK_LENGTH)],
            BLACK,
        ))
        .map_err(render_error)?;

        let top = py + TICK_LENGTH + GAP;
        if plot.rotate_labels {
            root.draw(&Text::new(
                tick.label.clone(),
                (px + LABEL_SIZE as i32 / 2, top),
                label_style.clone(),
            ))
            .map_err(render_error)?;
        } else {
            for (i, line) in tick.label.lines().enumerate() {
                root.draw(&Text::new(
                    line.to_string(),
                    (px, top + i as i32 * LINE_HEIGHT),
                    label_style.clone(),
                ))
                .map_err(render_error)?;
            }
        }
    }

    if let Some(offset) = &plot.ticks.offset {
        let (right, py) = chart.backend_coord(&(plot.x_range.end, bottom));
        let lines = plot.label_lines() - 1;
        let style =
            TextStyle::from((FONT, LABEL_SIZE).into_font()).pos(Pos::new(HPos::Right, VPos::Top));
        root.draw(&Text::new(
            offset.clone(),
            (right, py + TICK_LENGTH + GAP + lines * LINE_HEIGHT),
            style,
        ))
        .map_err(render_error)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ForecastResponse, Hourly};

    fn series_with(temperatures: Vec<Option<f64>>, parse: bool) -> HourlySeries {
        let response = ForecastResponse {
            hourly: Hourly {
                time: (0..temperatures.len())
                    .map(|h| format!("2025-06-{:02}T{:02}:00", 5 + h / 24, h % 24))
                    .collect(),
                temperature_2m: temperatures,
            },
        };
        HourlySeries::from_response(response, parse).unwrap()
    }

    fn series(n: usize, parse: bool) -> HourlySeries {
        series_with((0..n).map(|h| Some(15.0 + (h % 12) as f64)).collect(), parse)
    }

    #[test]
    fn padded_handles_flat_and_sloped_ranges() {
        assert_eq!(padded(10.0, 10.0, 1.0), 9.0..11.0);
        assert_eq!(padded(0.0, 20.0, 1.0), -1.0..21.0);
    }

    #[test]
    fn prepare_uses_indices_for_default_policy() {
        let plot = PlotData::prepare(&series(24, false), TickPolicy::Default).unwrap();

        assert_eq!(plot.points.len(), 24);
        assert_eq!(plot.points[3].0, 3.0);
        assert!(plot.rotate_labels);
        assert_eq!(plot.ticks.ticks[0].label, "2025-06-05T00:00");
    }

    #[test]
    fn prepare_uses_timestamps_for_date_policies() {
        let s = series(24, true);
        let plot = PlotData::prepare(&s, TickPolicy::FixedInterval { hours: 6 }).unwrap();

        let first = s.times().unwrap()[0].timestamp() as f64;
        assert_eq!(plot.points[0].0, first);
        assert!(!plot.rotate_labels);
        assert_eq!(plot.label_lines(), 2);
        assert!(plot.ticks.ticks.iter().all(|t| plot.x_range.contains(&t.position)));
    }

    #[test]
    fn every_preset_plots_all_points_inside_the_axis() {
        let s = series(24, true);

        for config in ChartConfig::presets() {
            let plot = PlotData::prepare(&s, config.ticks).unwrap();

            assert_eq!(plot.points.len(), 24, "{config:?}");
            assert!(plot.points.iter().all(|(_, y)| y.is_some()), "{config:?}");
            assert!(plot.points.iter().all(|(x, _)| plot.x_range.contains(x)), "{config:?}");
            assert!(!plot.ticks.ticks.is_empty(), "{config:?}");
        }
    }

    #[test]
    fn overflowing_temperature_span_fails_instead_of_drawing() {
        let s = series_with(vec![Some(-1e308), Some(1e308)], true);

        for config in ChartConfig::presets() {
            let err = render(&s, Coordinates::new(52.52, 13.41), config).unwrap_err();
            assert!(matches!(err, ForecastError::Render(_)), "{config:?}");
        }
    }

    #[test]
    fn only_concise_labels_are_right_aligned() {
        let s = series(24, true);
        let aligned = |policy| PlotData::prepare(&s, policy).unwrap().right_align_labels;

        assert!(aligned(TickPolicy::Concise));
        assert!(!aligned(TickPolicy::Default));
        assert!(!aligned(TickPolicy::FixedInterval { hours: 6 }));
    }

    #[test]
    fn date_policy_without_parsed_times_fails() {
        let err = PlotData::prepare(&series(3, false), TickPolicy::Concise).unwrap_err();
        assert!(matches!(err, ForecastError::Render(_)));
    }

    #[test]
    fn rotated_labels_reserve_more_room() {
        let default = PlotData::prepare(&series(24, true), TickPolicy::Default).unwrap();
        let concise = PlotData::prepare(&series(24, true), TickPolicy::Concise).unwrap();
        assert!(default.x_label_area() > concise.x_label_area());
    }

    #[test]
    fn title_embeds_literal_coordinates() {
        assert_eq!(
            chart_title(Coordinates::new(52.52, 13.41)),
            "Hourly Temperature @ (52.52, 13.41)"
        );
    }
}
