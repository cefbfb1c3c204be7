use super::{Rule, Trigger};
use crate::models::{AlertCategory, ForecastDay};

/// Frost warning rule - forecast temperature below freezing
///
/// Conditions:
/// - Temperature strictly below the frost threshold (0°C by default)
///
/// A forecast of exactly the threshold does not fire.
pub struct FrostRule {
    pub threshold_c: f64,
}

impl Rule for FrostRule {
    fn id(&self) -> &'static str {
        "frost_warning"
    }

    fn name(&self) -> &'static str {
        "Frost Warning"
    }

    fn categories(&self) -> &'static [AlertCategory] {
        &[AlertCategory::FrostWarning]
    }

    fn condition(&self, _category: AlertCategory) -> String {
        format!("Temperature < {}°C", self.threshold_c)
    }

    fn evaluate(&self, day: &ForecastDay) -> Option<Trigger> {
        if day.temperature >= self.threshold_c {
            return None;
        }

        Some(Trigger {
            category: AlertCategory::FrostWarning,
            value: day.temperature,
            message: format!(
                "FROST WARNING: Temperature forecast {:.1}°C (below {}°C)",
                day.temperature, self.threshold_c
            ),
        })
    }
}
