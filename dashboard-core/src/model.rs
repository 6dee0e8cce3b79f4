use serde::{Deserialize, Serialize};

/// One weather payload for a single city, as served by `/api/weather`.
///
/// A snapshot is never patched in place: a successful fetch replaces it whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    #[serde(default)]
    pub forecast: Vec<DayForecast>,
    #[serde(default)]
    pub hourly_trend: Vec<HourPoint>,
    #[serde(default)]
    pub historical: Historical,

    /// Model-only outlook for the next few days. Older backends omit it.
    #[serde(default)]
    pub model_forecast: Vec<ModelOutlookPoint>,

    /// Number of historical days the backend trained its outlook on.
    #[serde(default)]
    pub dataset_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub timezone: String,
}

/// Live conditions. Every numeric field may be missing (or `null`); callers
/// render a placeholder for absent values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Relative humidity, percent.
    #[serde(default)]
    pub humidity: Option<f64>,
    /// km/h
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// mm
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub weathercode: Option<i64>,
    #[serde(default)]
    pub uv_index: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    /// hPa
    #[serde(default)]
    pub pressure: Option<f64>,
    /// km
    #[serde(default)]
    pub visibility: Option<f64>,
    /// Local time without offset, e.g. `2025-11-20T06:41`.
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub label: String,
    /// ISO date, unique within a forecast.
    pub date: String,
    pub high: f64,
    pub low: f64,
    #[serde(default = "default_day_code")]
    pub code: i64,
    #[serde(default)]
    pub rain: f64,
}

fn default_day_code() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPoint {
    pub label: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Monthly or seasonal climate average. The backend sends `null` for
/// periods it has no archive data for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimatePoint {
    pub label: String,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub rain: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Historical {
    #[serde(default)]
    pub monthly: Vec<ClimatePoint>,
    #[serde(default)]
    pub seasonal: Vec<ClimatePoint>,
}

impl Historical {
    pub fn series(&self, view: HistoricalView) -> &[ClimatePoint] {
        match view {
            HistoricalView::Monthly => &self.monthly,
            HistoricalView::Seasonal => &self.seasonal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoricalView {
    #[default]
    Monthly,
    Seasonal,
}

impl HistoricalView {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoricalView::Monthly => "monthly",
            HistoricalView::Seasonal => "seasonal",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HistoricalView::Monthly => HistoricalView::Seasonal,
            HistoricalView::Seasonal => HistoricalView::Monthly,
        }
    }
}

impl std::fmt::Display for HistoricalView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for HistoricalView {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "monthly" => Ok(HistoricalView::Monthly),
            "seasonal" => Ok(HistoricalView::Seasonal),
            _ => Err(anyhow::anyhow!(
                "Unknown historical view '{value}'. Supported views: monthly, seasonal."
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutlookPoint {
    pub date: String,
    pub predicted_max_temp_c: f64,
}
