//! Values derived from the active snapshot: advisory tips, the comfort
//! temperature predictor and the metric panel readings.
//!
//! Everything here is a pure function of its inputs and is recomputed on
//! each render.

use serde::{Deserialize, Serialize};

use crate::model::{CurrentConditions, DayForecast};

pub const MAX_RECOMMENDATIONS: usize = 3;

/// Used when the snapshot has no current temperature.
pub const DEFAULT_BASE_TEMPERATURE: f64 = 28.0;

const DEFAULT_HUMIDITY: f64 = 50.0;
const DEFAULT_PRECIPITATION: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub label: &'static str,
    pub detail: &'static str,
}

const UMBRELLA: Recommendation = Recommendation {
    label: "Carry an umbrella",
    detail: "Rain probability elevated through the afternoon.",
};

const HYDRATE: Recommendation = Recommendation {
    label: "Hydrate often",
    detail: "Warm and humid air may feel heavier during commutes.",
};

const SECURE_ITEMS: Recommendation = Recommendation {
    label: "Secure outdoor items",
    detail: "Wind gusts can reach advisory levels later today.",
};

const GREAT_DAY: Recommendation = Recommendation {
    label: "Great day outside",
    detail: "Conditions are optimal for walks and light workouts.",
};

/// Advisory tips for the current conditions, 1 to 3 entries in fixed order.
///
/// Missing humidity and precipitation count as 50% and 0 mm. A missing wind
/// speed never triggers the wind rule.
pub fn recommend(current: &CurrentConditions) -> Vec<Recommendation> {
    let humidity = current.humidity.unwrap_or(DEFAULT_HUMIDITY);
    let rain = current.precipitation.unwrap_or(DEFAULT_PRECIPITATION);

    let mut tips = Vec::with_capacity(MAX_RECOMMENDATIONS);

    if rain > 1.0 {
        tips.push(UMBRELLA);
    }
    if humidity > 70.0 {
        tips.push(HYDRATE);
    }
    if current.wind_speed.is_some_and(|wind| wind > 20.0) {
        tips.push(SECURE_ITEMS);
    }
    if tips.is_empty() {
        tips.push(GREAT_DAY);
    }

    tips.truncate(MAX_RECOMMENDATIONS);
    tips
}

/// Slider positions for the comfort temperature predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictorInputs {
    humidity: f64,
    wind: f64,
    cloud: f64,
}

impl PredictorInputs {
    pub const HUMIDITY_RANGE: (f64, f64) = (20.0, 100.0);
    pub const WIND_RANGE: (f64, f64) = (0.0, 50.0);
    pub const CLOUD_RANGE: (f64, f64) = (0.0, 100.0);

    /// Build inputs, clamping each value into its slider range.
    pub fn new(humidity: f64, wind: f64, cloud: f64) -> Self {
        Self {
            humidity: clamp(humidity, Self::HUMIDITY_RANGE),
            wind: clamp(wind, Self::WIND_RANGE),
            cloud: clamp(cloud, Self::CLOUD_RANGE),
        }
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn wind(&self) -> f64 {
        self.wind
    }

    pub fn cloud(&self) -> f64 {
        self.cloud
    }

    pub fn with_humidity(self, humidity: f64) -> Self {
        Self::new(humidity, self.wind, self.cloud)
    }

    pub fn with_wind(self, wind: f64) -> Self {
        Self::new(self.humidity, wind, self.cloud)
    }

    pub fn with_cloud(self, cloud: f64) -> Self {
        Self::new(self.humidity, self.wind, cloud)
    }

    /// Comfort temperature for these sliders against a snapshot's conditions.
    pub fn predict_for(&self, current: &CurrentConditions) -> i64 {
        let base = current.temperature.unwrap_or(DEFAULT_BASE_TEMPERATURE);
        predict(base, self.humidity, self.wind, self.cloud)
    }
}

impl Default for PredictorInputs {
    fn default() -> Self {
        Self { humidity: 60.0, wind: 8.0, cloud: 25.0 }
    }
}

fn clamp(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

/// Linear comfort temperature model.
///
/// Humidity above 60% and cloud cover above 25% push the estimate up, wind
/// pulls it down. Rounds half away from zero.
pub fn predict(base: f64, humidity: f64, wind: f64, cloud: f64) -> i64 {
    let humidity_adj = (humidity - 60.0) * 0.05;
    let cloud_adj = (cloud - 25.0) * 0.08;
    let wind_adj = wind * 0.12;

    (base + humidity_adj + cloud_adj - wind_adj).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RainOutlook {
    High,
    Low,
}

impl RainOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainOutlook::High => "High",
            RainOutlook::Low => "Low",
        }
    }
}

/// `High` when any forecast day expects rain.
pub fn rain_outlook(forecast: &[DayForecast]) -> RainOutlook {
    let highest = forecast.iter().map(|d| d.rain).fold(0.0_f64, f64::max);
    if highest > 0.0 { RainOutlook::High } else { RainOutlook::Low }
}

/// Readings for the metric panel, with the panel's own defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelMetrics {
    pub precipitation_mm: f64,
    pub wind_kmh: f64,
    pub rain_outlook: RainOutlook,
    pub visibility_km: f64,
    pub pressure_hpa: f64,
    pub uv_index: f64,
}

impl PanelMetrics {
    pub fn from_snapshot(current: &CurrentConditions, forecast: &[DayForecast]) -> Self {
        Self {
            precipitation_mm: current.precipitation.unwrap_or(0.0),
            wind_kmh: current.wind_speed.unwrap_or(0.0),
            rain_outlook: rain_outlook(forecast),
            visibility_km: current.visibility.unwrap_or(10.0),
            pressure_hpa: current.pressure.unwrap_or(1005.0),
            uv_index: current.uv_index.unwrap_or(7.0),
        }
    }
}
