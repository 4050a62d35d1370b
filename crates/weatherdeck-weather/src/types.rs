use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement unit sent to the weather service (`units=` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

impl UnitPreference {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// Temperature scale name
    pub fn scale_name(&self) -> &'static str {
        match self {
            Self::Metric => "Celsius",
            Self::Imperial => "Fahrenheit",
        }
    }

    /// Label for the control that flips to the other unit
    pub fn toggle_label(&self) -> String {
        format!("Switch to {}", self.toggled().scale_name())
    }
}

impl fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit: {0:?} (expected \"metric\" or \"imperial\")")]
pub struct ParseUnitError(pub String);

impl FromStr for UnitPreference {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(ParseUnitError(other.to_string())),
        }
    }
}

/// One fetched weather result for a place.
///
/// `temp` was converted by the service into `unit` at fetch time and is never
/// reconverted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub name: String,
    pub country: String,
    pub temp: f64,
    pub unit: UnitPreference,
}

impl WeatherSnapshot {
    /// e.g. `15°C`
    pub fn formatted_temperature(&self) -> String {
        format!("{}{}", self.temp, self.unit.symbol())
    }

    /// e.g. `London (GB)`
    pub fn heading(&self) -> String {
        format!("{} ({})", self.name, self.country)
    }
}

/// Detailed reasons a lookup went wrong. Logged, then collapsed into `LookupFailed`.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Service returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// The only failure a caller of `WeatherLookup` sees.
///
/// Unknown places and service failures are deliberately indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not found or service error")]
pub struct LookupFailed;

impl From<WeatherError> for LookupFailed {
    fn from(_: WeatherError) -> Self {
        LookupFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_toggle_round_trips() {
        assert_eq!(UnitPreference::Metric.toggled(), UnitPreference::Imperial);
        assert_eq!(UnitPreference::Metric.toggled().toggled(), UnitPreference::Metric);
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("metric".parse::<UnitPreference>(), Ok(UnitPreference::Metric));
        assert_eq!(" imperial\n".parse::<UnitPreference>(), Ok(UnitPreference::Imperial));
        assert!("kelvin".parse::<UnitPreference>().is_err());
        assert!("Metric".parse::<UnitPreference>().is_err());
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(UnitPreference::Metric.symbol(), "°C");
        assert_eq!(UnitPreference::Imperial.symbol(), "°F");
        assert_eq!(UnitPreference::Metric.toggle_label(), "Switch to Fahrenheit");
        assert_eq!(UnitPreference::Imperial.toggle_label(), "Switch to Celsius");
    }

    #[test]
    fn test_unit_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UnitPreference::Imperial).unwrap(), "\"imperial\"");
    }

    #[test]
    fn test_snapshot_formatting() {
        let snapshot = WeatherSnapshot {
            name: "London".to_string(),
            country: "GB".to_string(),
            temp: 15.0,
            unit: UnitPreference::Metric,
        };
        assert_eq!(snapshot.formatted_temperature(), "15°C");
        assert_eq!(snapshot.heading(), "London (GB)");

        let snapshot = WeatherSnapshot {
            temp: 59.27,
            unit: UnitPreference::Imperial,
            ..snapshot
        };
        assert_eq!(snapshot.formatted_temperature(), "59.27°F");
    }

    #[test]
    fn test_weather_error_collapses() {
        let failed: LookupFailed = WeatherError::Status(404).into();
        assert_eq!(failed.to_string(), "not found or service error");
    }
}
