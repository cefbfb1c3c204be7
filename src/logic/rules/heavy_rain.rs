use super::{Rule, Trigger};
use crate::models::{AlertCategory, ForecastDay};

/// Heavy rain rule - flooding and erosion risk
///
/// Conditions:
/// - Daily precipitation strictly above 25mm (default)
pub struct HeavyRainRule {
    pub threshold_mm: f64,
}

impl Rule for HeavyRainRule {
    fn id(&self) -> &'static str {
        "heavy_rain"
    }

    fn name(&self) -> &'static str {
        "Heavy Rain"
    }

    fn categories(&self) -> &'static [AlertCategory] {
        &[AlertCategory::HeavyRain]
    }

    fn condition(&self, _category: AlertCategory) -> String {
        format!("Precipitation > {}mm", self.threshold_mm)
    }

    fn evaluate(&self, day: &ForecastDay) -> Option<Trigger> {
        if day.precipitation <= self.threshold_mm {
            return None;
        }

        Some(Trigger {
            category: AlertCategory::HeavyRain,
            value: day.precipitation,
            message: format!(
                "HEAVY RAIN: Precipitation forecast {:.1}mm (above {}mm)",
                day.precipitation, self.threshold_mm
            ),
        })
    }
}
