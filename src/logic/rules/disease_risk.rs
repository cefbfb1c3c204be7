use super::{DiseaseBand, Rule, Trigger};
use crate::models::{AlertCategory, ForecastDay};

/// Disease risk rule - fungal/bacterial pressure from humid, mild weather
///
/// Two tiers, checked in order, first match wins:
/// - High: humidity >90% with temperature 15-25°C
/// - Moderate: humidity >85% with temperature 10-30°C
///
/// The moderate window contains the high window, so a day in the high window
/// always satisfies both. Only the high alert is emitted for such a day.
pub struct DiseaseRiskRule {
    pub high: DiseaseBand,
    pub moderate: DiseaseBand,
}

impl Rule for DiseaseRiskRule {
    fn id(&self) -> &'static str {
        "disease_risk"
    }

    fn name(&self) -> &'static str {
        "Disease Risk"
    }

    fn categories(&self) -> &'static [AlertCategory] {
        &[
            AlertCategory::DiseaseRiskHigh,
            AlertCategory::DiseaseRiskModerate,
        ]
    }

    fn condition(&self, category: AlertCategory) -> String {
        let band = match category {
            AlertCategory::DiseaseRiskModerate => &self.moderate,
            _ => &self.high,
        };
        format!(
            "Humidity > {}% AND Temp {}-{}°C",
            band.min_humidity, band.temp_min_c, band.temp_max_c
        )
    }

    fn evaluate(&self, day: &ForecastDay) -> Option<Trigger> {
        let (category, label) = if self.high.matches(day) {
            (AlertCategory::DiseaseRiskHigh, "HIGH")
        } else if self.moderate.matches(day) {
            (AlertCategory::DiseaseRiskModerate, "MODERATE")
        } else {
            return None;
        };

        Some(Trigger {
            category,
            value: day.humidity,
            message: format!(
                "{} DISEASE RISK: Humidity {:.1}%, Temp {:.1}°C",
                label, day.humidity, day.temperature
            ),
        })
    }
}
