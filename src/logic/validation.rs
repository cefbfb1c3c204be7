//! Compare generated alerts with what was actually observed.

use super::rules::AlertThresholds;
use crate::error::{CropWatchError, Result};
use crate::models::{AlertCategory, AlertEvent, ObservedDay};
use serde::Serialize;

/// Observed event days next to the alerts raised for the same kinds of event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub observed_days: usize,
    pub actual_frost_days: usize,
    pub actual_heat_days: usize,
    pub actual_high_humidity_days: usize,
    pub frost_alerts: usize,
    pub heat_alerts: usize,
    pub disease_alerts: usize,
}

/// Count observed frost, heat and high-humidity days using the same
/// thresholds the alerts were generated with.
pub fn validate_against_observed(
    alerts: &[AlertEvent],
    observed: &[ObservedDay],
    thresholds: &AlertThresholds,
) -> Result<ValidationReport> {
    for day in observed {
        for (field, value) in [
            ("temperature_mean", day.temperature_mean),
            ("humidity_mean", day.humidity_mean),
            ("precipitation_sum", day.precipitation_sum),
        ] {
            if !value.is_finite() {
                return Err(CropWatchError::InvalidData(format!(
                    "observation for {} has non-finite {}",
                    day.date, field
                )));
            }
        }
    }

    let report = ValidationReport {
        observed_days: observed.len(),
        actual_frost_days: observed
            .iter()
            .filter(|d| d.temperature_mean < thresholds.frost_temp_c)
            .count(),
        actual_heat_days: observed
            .iter()
            .filter(|d| d.temperature_mean > thresholds.heat_temp_c)
            .count(),
        actual_high_humidity_days: observed
            .iter()
            .filter(|d| d.humidity_mean > thresholds.disease_high.min_humidity)
            .count(),
        frost_alerts: count_category(alerts, |c| c == AlertCategory::FrostWarning),
        heat_alerts: count_category(alerts, |c| c == AlertCategory::HeatStress),
        disease_alerts: count_category(alerts, |c| c.is_disease()),
    };

    tracing::debug!(?report, "validated alerts against observations");
    Ok(report)
}

fn count_category(alerts: &[AlertEvent], pred: impl Fn(AlertCategory) -> bool) -> usize {
    alerts.iter().filter(|a| pred(a.category)).count()
}
