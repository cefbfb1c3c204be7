use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{ForecastVariable, MissingDate};

#[derive(Error, Debug)]
pub enum CropWatchError {
    #[error("Misaligned forecast series: {}", format_missing(.missing))]
    MisalignedForecast { missing: Vec<MissingDate> },

    #[error("Malformed forecast for {date}: field '{field}' {reason}")]
    MalformedForecastDay {
        date: NaiveDate,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid lead time for {date}: {days} days relative to reference {reference}")]
    InvalidLeadTime {
        date: NaiveDate,
        reference: NaiveDate,
        days: i64,
    },

    #[error("Duplicate {variable} forecast for {date}")]
    DuplicateDate {
        variable: ForecastVariable,
        date: NaiveDate,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

fn format_missing(missing: &[MissingDate]) -> String {
    missing
        .iter()
        .map(|m| format!("{} missing {}", m.variable, m.date))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, CropWatchError>;
