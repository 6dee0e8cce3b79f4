//! Plot geometry for the forecast and historical charts.
//!
//! Both mappers place samples in a 100x100 viewport with `y` growing
//! downwards, so the largest value sits nearest the top. Samples are spread
//! evenly along `x` from 0 to 100 by their position in the series, so a
//! missing sample leaves a gap instead of shifting its neighbours.

use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;

use crate::model::{ClimatePoint, DayForecast};

pub const VIEWPORT: f64 = 100.0;

/// Vertical span the series is stretched over.
const PLOT_HEIGHT: f64 = 70.0;

const LINE_TOP: f64 = 15.0;
const AREA_TOP: f64 = 10.0;

/// Baseline the area chart is closed against.
pub const AREA_BASELINE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("no data to plot")]
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dynamic range of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    max: f64,
    min: f64,
}

impl Extent {
    fn of(values: impl IntoIterator<Item = f64>) -> Result<Self, ChartError> {
        values
            .into_iter()
            .fold(None, |acc: Option<Self>, v| {
                Some(match acc {
                    None => Self { max: v, min: v },
                    Some(e) => Self { max: e.max.max(v), min: e.min.min(v) },
                })
            })
            .ok_or(ChartError::NoData)
    }

    /// Never zero, so a flat series still maps.
    fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 { 1.0 } else { range }
    }

    /// Map `(index, value)` samples out of a series `slots` long. Indexes
    /// keep their column even when neighbouring samples are absent.
    fn project(
        &self,
        samples: impl IntoIterator<Item = (usize, f64)>,
        slots: usize,
        top: f64,
    ) -> Vec<Point> {
        let range = self.range();
        let last = slots.saturating_sub(1).max(1) as f64;

        samples
            .into_iter()
            .map(|(i, v)| {
                let x = if slots == 1 { 0.0 } else { i as f64 / last * VIEWPORT };
                let y = (self.max - v) / range * PLOT_HEIGHT + top;
                Point::new(x, y)
            })
            .collect()
    }
}

/// Polyline for the forecast highs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub points: Vec<Point>,
    pub max: f64,
    pub min: f64,
}

impl LineChart {
    /// One marker per sample, at the same coordinates as the line vertices.
    pub fn markers(&self) -> &[Point] {
        &self.points
    }

    /// `x,y` pairs separated by spaces, as an SVG `points` attribute expects.
    pub fn polyline(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{},{}", p.x, p.y);
        }
        out
    }
}

/// Filled area for historical temperatures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaChart {
    /// The upper edge, one point per sample.
    pub outline: Vec<Point>,
    pub max: f64,
    pub min: f64,
}

impl AreaChart {
    /// The outline closed against the baseline, bottom-right then bottom-left.
    pub fn polygon(&self) -> Vec<Point> {
        let mut points = self.outline.clone();
        points.push(Point::new(VIEWPORT, AREA_BASELINE));
        points.push(Point::new(0.0, AREA_BASELINE));
        points
    }

    /// SVG path data for the outline alone.
    pub fn outline_path(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.outline.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(out, "{cmd}{},{}", p.x, p.y);
        }
        out
    }

    /// SVG path data for the filled region.
    pub fn area_path(&self) -> String {
        format!(
            "{} L{VIEWPORT},{AREA_BASELINE} L0,{AREA_BASELINE} Z",
            self.outline_path()
        )
    }
}

/// Map a series to line chart coordinates, reserving 15 units top and bottom.
pub fn line_chart(values: &[f64]) -> Result<LineChart, ChartError> {
    let extent = Extent::of(values.iter().copied())?;
    Ok(LineChart {
        points: extent.project(values.iter().copied().enumerate(), values.len(), LINE_TOP),
        max: extent.max,
        min: extent.min,
    })
}

/// Map a series to area chart coordinates, reserving 10 units at the top.
pub fn area_chart(values: &[f64]) -> Result<AreaChart, ChartError> {
    let extent = Extent::of(values.iter().copied())?;
    Ok(AreaChart {
        outline: extent.project(values.iter().copied().enumerate(), values.len(), AREA_TOP),
        max: extent.max,
        min: extent.min,
    })
}

/// Like [`area_chart`], for a series with missing samples.
///
/// Missing samples get no outline point, but the present ones stay in the
/// column their position in the full series gives them, so the chart lines
/// up with a table of the same series. The extent covers present values only.
pub fn area_chart_with_gaps(values: &[Option<f64>]) -> Result<AreaChart, ChartError> {
    let present = || values.iter().enumerate().filter_map(|(i, v)| v.map(|v| (i, v)));
    let extent = Extent::of(present().map(|(_, v)| v))?;
    Ok(AreaChart {
        outline: extent.project(present(), values.len(), AREA_TOP),
        max: extent.max,
        min: extent.min,
    })
}

pub fn forecast_highs(forecast: &[DayForecast]) -> Vec<f64> {
    forecast.iter().map(|d| d.high).collect()
}

/// Temperatures in series order, `None` where a point has none.
pub fn climate_temps(points: &[ClimatePoint]) -> Vec<Option<f64>> {
    points.iter().map(|p| p.temp).collect()
}
