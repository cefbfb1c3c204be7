use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three forecast variables that make up a forecast day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastVariable {
    Temperature,
    Humidity,
    Precipitation,
}

impl ForecastVariable {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastVariable::Temperature => "temperature",
            ForecastVariable::Humidity => "humidity",
            ForecastVariable::Precipitation => "precipitation",
        }
    }
}

impl std::fmt::Display for ForecastVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A date absent from one of the per-variable series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MissingDate {
    pub variable: ForecastVariable,
    pub date: NaiveDate,
}

/// Temperature point forecast with its uncertainty interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub date: NaiveDate,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Point forecast for a variable without an interval (humidity, precipitation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Independently produced per-variable forecast series, as emitted by the
/// forecasting models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub temperature: Vec<TemperaturePoint>,
    pub humidity: Vec<SeriesPoint>,
    pub precipitation: Vec<SeriesPoint>,
}

/// Merged forecast for one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// °C
    pub temperature: f64,
    pub temperature_lower: f64,
    pub temperature_upper: f64,
    /// Relative humidity, %
    pub humidity: f64,
    /// mm, never negative
    pub precipitation: f64,
}

impl ForecastDay {
    /// Numeric fields in declaration order, paired with their names
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("temperature", self.temperature),
            ("temperature_lower", self.temperature_lower),
            ("temperature_upper", self.temperature_upper),
            ("humidity", self.humidity),
            ("precipitation", self.precipitation),
        ]
    }
}

/// Observed daily conditions used to check alerts after the fact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedDay {
    pub date: NaiveDate,
    pub temperature_mean: f64,
    pub humidity_mean: f64,
    pub precipitation_sum: f64,
}
