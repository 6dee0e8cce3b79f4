//! Bundled reference snapshot shown while no live data is available.

use std::f64::consts::PI;

use crate::model::{
    ClimatePoint, CurrentConditions, DayForecast, Historical, HourPoint, Location,
    WeatherSnapshot,
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn fallback_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        location: Location {
            city: "New Delhi".to_string(),
            country: "India".to_string(),
            timezone: "Asia/Kolkata".to_string(),
        },
        current: CurrentConditions {
            temperature: Some(32.0),
            humidity: Some(58.0),
            wind_speed: Some(9.0),
            precipitation: Some(0.2),
            weathercode: Some(1),
            uv_index: Some(8.0),
            feels_like: Some(34.0),
            pressure: Some(1006.0),
            visibility: Some(9.0),
            sunrise: Some("2025-11-20T06:41".to_string()),
            sunset: Some("2025-11-20T17:24".to_string()),
            condition: "Mainly clear".to_string(),
        },
        forecast: vec![
            day("Thu", "2025-11-20", 33.0, 24.0, 1, 0.2),
            day("Fri", "2025-11-21", 32.0, 23.0, 2, 0.6),
            day("Sat", "2025-11-22", 31.0, 22.0, 3, 0.8),
            day("Sun", "2025-11-23", 30.0, 21.0, 61, 1.4),
            day("Mon", "2025-11-24", 29.0, 21.0, 63, 2.1),
            day("Tue", "2025-11-25", 28.0, 20.0, 2, 0.4),
            day("Wed", "2025-11-26", 29.0, 19.0, 1, 0.0),
        ],
        hourly_trend: [
            ("10 AM", 31.0),
            ("12 PM", 32.0),
            ("2 PM", 33.0),
            ("4 PM", 32.0),
            ("6 PM", 30.0),
            ("8 PM", 28.0),
            ("10 PM", 26.0),
        ]
        .into_iter()
        .map(|(label, value)| HourPoint { label: label.to_string(), value: Some(value) })
        .collect(),
        historical: Historical {
            monthly: monthly_climate(),
            seasonal: vec![
                climate("Cool", 18.0, 62.0),
                climate("Warm", 31.0, 45.0),
                climate("Humid", 34.0, 110.0),
                climate("Monsoon", 27.0, 220.0),
            ],
        },
        model_forecast: Vec::new(),
        dataset_size: None,
    }
}

fn day(label: &str, date: &str, high: f64, low: f64, code: i64, rain: f64) -> DayForecast {
    DayForecast {
        label: label.to_string(),
        date: date.to_string(),
        high,
        low,
        code,
        rain,
    }
}

fn climate(label: &str, temp: f64, rain: f64) -> ClimatePoint {
    ClimatePoint { label: label.to_string(), temp: Some(temp), rain: Some(rain) }
}

/// A smooth yearly cycle: temperature peaks in spring, rain in summer.
fn monthly_climate() -> Vec<ClimatePoint> {
    MONTHS
        .iter()
        .enumerate()
        .map(|(idx, month)| {
            let phase = idx as f64 / 12.0 * PI * 2.0;
            climate(month, 18.0 + phase.sin() * 10.0, 90.0 - phase.cos() * 40.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chart, codes, insights};

    #[test]
    fn fallback_is_internally_consistent() {
        let snapshot = fallback_snapshot();

        assert_eq!(snapshot.forecast.len(), 7);
        assert_eq!(snapshot.hourly_trend.len(), 7);
        assert_eq!(snapshot.historical.monthly.len(), 12);
        assert_eq!(snapshot.historical.seasonal.len(), 4);

        let dates: Vec<&str> = snapshot.forecast.iter().map(|d| d.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(dates, sorted, "forecast dates must be unique and chronological");

        for day in &snapshot.forecast {
            assert!(day.high >= day.low);
        }
        let code = snapshot.current.weathercode.unwrap();
        assert_eq!(codes::label(code), snapshot.current.condition);
    }

    #[test]
    fn fallback_flows_through_every_derivation() {
        let snapshot = fallback_snapshot();

        assert_eq!(codes::tone_or_default(snapshot.current.weathercode), codes::Tone::Sunny);

        let tips = insights::recommend(&snapshot.current);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].label, "Great day outside");

        let predicted = insights::PredictorInputs::default().predict_for(&snapshot.current);
        assert_eq!(predicted, 31);

        let metrics = insights::PanelMetrics::from_snapshot(&snapshot.current, &snapshot.forecast);
        assert_eq!(metrics.rain_outlook, insights::RainOutlook::High);

        let line = chart::line_chart(&chart::forecast_highs(&snapshot.forecast)).unwrap();
        assert!(line.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(line.max, 33.0);
        assert_eq!(line.min, 28.0);

        for series in [&snapshot.historical.monthly, &snapshot.historical.seasonal] {
            let area = chart::area_chart_with_gaps(&chart::climate_temps(series)).unwrap();
            assert!(area.polygon().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn monthly_cycle_matches_formula() {
        let monthly = monthly_climate();
        assert_eq!(monthly[0].label, "Jan");
        assert_eq!(monthly[0].temp, Some(18.0));
        assert_eq!(monthly[0].rain, Some(50.0));
        assert!((monthly[3].temp.unwrap() - 28.0).abs() < 1e-9);
        assert!((monthly[6].rain.unwrap() - 130.0).abs() < 1e-9);
    }
}
