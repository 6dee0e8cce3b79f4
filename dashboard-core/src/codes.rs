//! WMO weather code lookup.
//!
//! The table is closed: every integer resolves to a tone and a label, with
//! unknown codes falling through to [`Tone::Sunny`] and [`GENERIC_LABEL`].

use serde::{Deserialize, Serialize};

/// Label shown for codes outside the table.
pub const GENERIC_LABEL: &str = "Outlook";

/// Coarse visual category used to pick styling for a condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Sunny,
    Mild,
    Cloudy,
    Foggy,
    Rainy,
    Icy,
    Snowy,
    Stormy,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Sunny => "sunny",
            Tone::Mild => "mild",
            Tone::Cloudy => "cloudy",
            Tone::Foggy => "foggy",
            Tone::Rainy => "rainy",
            Tone::Icy => "icy",
            Tone::Snowy => "snowy",
            Tone::Stormy => "stormy",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeEntry {
    pub label: &'static str,
    pub tone: Tone,
}

const fn entry(label: &'static str, tone: Tone) -> Option<WeatherCodeEntry> {
    Some(WeatherCodeEntry { label, tone })
}

/// Look up a code in the table. `None` means the code is unknown.
pub const fn lookup(code: i64) -> Option<WeatherCodeEntry> {
    match code {
        0 => entry("Clear sky", Tone::Sunny),
        1 => entry("Mainly clear", Tone::Sunny),
        2 => entry("Partly cloudy", Tone::Mild),
        3 => entry("Cloudy", Tone::Cloudy),
        45 => entry("Foggy", Tone::Foggy),
        48 => entry("Rime fog", Tone::Foggy),
        51 => entry("Light drizzle", Tone::Rainy),
        53 => entry("Drizzle", Tone::Rainy),
        55 => entry("Heavy drizzle", Tone::Rainy),
        56 | 57 => entry("Freezing drizzle", Tone::Icy),
        61 => entry("Light rain", Tone::Rainy),
        63 => entry("Moderate rain", Tone::Rainy),
        65 => entry("Heavy rain", Tone::Rainy),
        66 | 67 => entry("Freezing rain", Tone::Icy),
        71 => entry("Light snow", Tone::Snowy),
        73 => entry("Snow", Tone::Snowy),
        75 => entry("Heavy snow", Tone::Snowy),
        77 => entry("Snow grains", Tone::Snowy),
        80 => entry("Rain showers", Tone::Rainy),
        81 => entry("Heavy showers", Tone::Rainy),
        82 => entry("Violent showers", Tone::Stormy),
        85 | 86 => entry("Snow showers", Tone::Snowy),
        95 => entry("Thunderstorms", Tone::Stormy),
        96 => entry("Thunder w/ hail", Tone::Stormy),
        99 => entry("Severe hail", Tone::Stormy),
        _ => None,
    }
}

pub fn tone(code: i64) -> Tone {
    lookup(code).map_or(Tone::Sunny, |e| e.tone)
}

pub fn label(code: i64) -> &'static str {
    lookup(code).map_or(GENERIC_LABEL, |e| e.label)
}

/// Tone for an optional code, as carried by [`crate::CurrentConditions`].
pub fn tone_or_default(code: Option<i64>) -> Tone {
    code.map_or(Tone::Sunny, tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(tone(0), Tone::Sunny);
        assert_eq!(tone(2), Tone::Mild);
        assert_eq!(tone(48), Tone::Foggy);
        assert_eq!(tone(57), Tone::Icy);
        assert_eq!(tone(82), Tone::Stormy);
        assert_eq!(tone(86), Tone::Snowy);
        assert_eq!(label(96), "Thunder w/ hail");
        assert_eq!(label(63), "Moderate rain");
    }

    #[test]
    fn unknown_codes_default_to_sunny() {
        for code in [9999, -1, 4, 100, i64::MIN, i64::MAX] {
            assert_eq!(tone(code), Tone::Sunny, "code {code}");
            assert_eq!(label(code), GENERIC_LABEL, "code {code}");
            assert!(lookup(code).is_none());
        }
    }

    #[test]
    fn missing_code_is_sunny() {
        assert_eq!(tone_or_default(None), Tone::Sunny);
        assert_eq!(tone_or_default(Some(95)), Tone::Stormy);
    }

    #[test]
    fn tone_serializes_lowercase() {
        let json = serde_json::to_string(&Tone::Stormy).unwrap();
        assert_eq!(json, "\"stormy\"");
        assert_eq!(Tone::Icy.to_string(), "icy");
    }
}
