//! Plain-text rendering of a dashboard session.

use std::fmt::Write as _;

use dashboard_core::{
    Dashboard,
    chart::{AREA_BASELINE, Point, VIEWPORT},
    codes,
    format::{PLACEHOLDER, clock_time, reading},
};

const CHART_COLS: usize = 48;
const CHART_ROWS: usize = 12;

pub fn dashboard(dash: &Dashboard) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, dash);
    out
}

fn write_dashboard(out: &mut String, dash: &Dashboard) -> std::fmt::Result {
    let snap = dash.active();
    let current = &snap.current;

    let status = if dash.is_live() { "Live weather" } else { "Intelligence preview" };
    writeln!(out, "AI Weather Forecast · {}, {} · {status}", snap.location.city, snap.location.country)?;
    if let Some(err) = dash.error() {
        writeln!(out, "! {err}")?;
    }
    writeln!(out)?;

    section(out, &format!("Current outlook [{}]", dash.tone()))?;
    writeln!(out, "  {}°C  {}", reading(current.temperature, 0), current.condition)?;
    writeln!(
        out,
        "  Feels like {}°   Humidity {}%   Wind {} km/h   UV index {}",
        reading(current.feels_like, 0),
        reading(current.humidity, 0),
        reading(current.wind_speed, 0),
        reading(current.uv_index, 0),
    )?;
    writeln!(
        out,
        "  Sunrise {}   Sunset {}",
        clock_time(current.sunrise.as_deref()),
        clock_time(current.sunset.as_deref()),
    )?;
    writeln!(out)?;

    section(out, "7-Day Forecast")?;
    match dash.forecast_chart() {
        Ok(chart) => {
            writeln!(out, "  {}°", chart.max)?;
            for line in raster(&chart.points, None) {
                writeln!(out, "  {line}")?;
            }
            writeln!(out, "  {}°", chart.min)?;
        }
        Err(_) => writeln!(out, "  No forecast available")?,
    }
    for day in &snap.forecast {
        writeln!(
            out,
            "  {:<4} {:>3}° / {:>3}°  {:<18} {} mm rain",
            day.label,
            day.high,
            day.low,
            codes::label(day.code),
            day.rain,
        )?;
    }
    writeln!(out)?;

    section(out, "Hourly glide")?;
    let hours: Vec<String> = snap
        .hourly_trend
        .iter()
        .map(|h| format!("{} {}°", h.label, reading(h.value, 0)))
        .collect();
    writeln!(out, "  {}", if hours.is_empty() { PLACEHOLDER.to_string() } else { hours.join("  ") })?;
    writeln!(out)?;

    section(out, "Smart recommendations")?;
    for tip in dash.recommendations() {
        writeln!(out, "  * {}: {}", tip.label, tip.detail)?;
    }
    writeln!(out)?;

    section(out, &format!("Historical trends ({})", dash.view()))?;
    if let Ok(chart) = dash.historical_chart() {
        for line in raster(&chart.outline, Some(AREA_BASELINE)) {
            writeln!(out, "  {line}")?;
        }
    }
    for point in dash.historical_series() {
        writeln!(
            out,
            "  {:<8} {:>4}°C  {:>5} mm rain",
            point.label,
            reading(point.temp, 0),
            reading(point.rain, 0),
        )?;
    }
    writeln!(out)?;

    let inputs = dash.predictor();
    section(out, "Custom predictor")?;
    writeln!(
        out,
        "  Humidity {}%   Wind {} km/h   Cloud cover {}%",
        inputs.humidity(),
        inputs.wind(),
        inputs.cloud(),
    )?;
    writeln!(out, "  AI-predicted comfort temperature: {}°C", dash.predicted_temperature())?;
    writeln!(out)?;

    let metrics = dash.metrics();
    section(out, "Metrics")?;
    writeln!(out, "  Precipitation   {} mm", metrics.precipitation_mm)?;
    writeln!(out, "  Wind            {} km/h", metrics.wind_kmh)?;
    writeln!(out, "  Rain probability {}", metrics.rain_outlook.as_str())?;
    writeln!(out, "  Air clarity     {:.1} km", metrics.visibility_km)?;
    writeln!(out, "  Pressure        {:.0} hPa", metrics.pressure_hpa)?;
    writeln!(out, "  UV safety       {}", metrics.uv_index)?;

    if !snap.model_forecast.is_empty() {
        writeln!(out)?;
        section(out, "Model outlook")?;
        for point in &snap.model_forecast {
            writeln!(out, "  {}  {:.1}°C", point.date, point.predicted_max_temp_c)?;
        }
        if let Some(days) = snap.dataset_size {
            writeln!(out, "  trained on {days} days of history")?;
        }
    }

    Ok(())
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "── {title}")
}

/// Draw viewport coordinates onto a character grid. With a baseline, the
/// region between the curve and the baseline is filled.
pub fn raster(points: &[Point], baseline: Option<f64>) -> Vec<String> {
    let mut grid = vec![vec![' '; CHART_COLS]; CHART_ROWS];

    for col in 0..CHART_COLS {
        let x = col as f64 / (CHART_COLS - 1) as f64 * VIEWPORT;
        let Some(y) = y_at(points, x) else { continue };
        let top = row_of(y);

        match baseline {
            Some(base) => {
                for row in grid.iter_mut().take(row_of(base) + 1).skip(top) {
                    row[col] = '░';
                }
                grid[top][col] = '▀';
            }
            None => grid[top][col] = '·',
        }
    }

    for p in points {
        grid[row_of(p.y)][col_of(p.x)] = '●';
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

/// Linear interpolation along the polyline; `None` outside its x span.
fn y_at(points: &[Point], x: f64) -> Option<f64> {
    match points {
        [] => None,
        [only] => (col_of(only.x) == col_of(x)).then_some(only.y),
        _ => points.windows(2).find_map(|w| {
            let (a, b) = (w[0], w[1]);
            if x < a.x || x > b.x {
                return None;
            }
            let t = if b.x == a.x { 0.0 } else { (x - a.x) / (b.x - a.x) };
            Some(a.y + (b.y - a.y) * t)
        }),
    }
}

fn row_of(y: f64) -> usize {
    scale(y, CHART_ROWS)
}

fn col_of(x: f64) -> usize {
    scale(x, CHART_COLS)
}

fn scale(v: f64, cells: usize) -> usize {
    let last = (cells - 1) as f64;
    ((v / VIEWPORT * last).round().clamp(0.0, last)) as usize
}
