use super::{Rule, Trigger};
use crate::models::{AlertCategory, ForecastDay};

/// Heat stress rule - warns about forecast heat that reduces crop yield
///
/// Conditions:
/// - Temperature strictly above the heat threshold (30°C by default)
pub struct HeatStressRule {
    pub threshold_c: f64,
}

impl Rule for HeatStressRule {
    fn id(&self) -> &'static str {
        "heat_stress"
    }

    fn name(&self) -> &'static str {
        "Heat Stress"
    }

    fn categories(&self) -> &'static [AlertCategory] {
        &[AlertCategory::HeatStress]
    }

    fn condition(&self, _category: AlertCategory) -> String {
        format!("Temperature > {}°C", self.threshold_c)
    }

    fn evaluate(&self, day: &ForecastDay) -> Option<Trigger> {
        if day.temperature <= self.threshold_c {
            return None;
        }

        Some(Trigger {
            category: AlertCategory::HeatStress,
            value: day.temperature,
            message: format!(
                "HEAT STRESS: Temperature forecast {:.1}°C (above {}°C)",
                day.temperature, self.threshold_c
            ),
        })
    }
}
