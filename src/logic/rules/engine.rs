use super::{
    disease_risk::DiseaseRiskRule, frost::FrostRule, heat_stress::HeatStressRule,
    heavy_rain::HeavyRainRule, AlertThresholds, Rule, Trigger,
};
use crate::error::{CropWatchError, Result};
use crate::models::{AlertCategory, AlertEvent, ForecastDay, Severity};
use chrono::NaiveDate;
use serde::Serialize;

/// Catalogue entry describing one alert category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleInfo {
    pub rule_id: &'static str,
    pub name: &'static str,
    pub category: AlertCategory,
    pub severity: Severity,
    pub description: &'static str,
    pub condition: String,
    pub action: &'static str,
}

/// Turns a batch of forecast days into an ordered list of alert events.
///
/// Rules run in declaration order for every day, so events for the same date
/// come out as frost, heat, disease, heavy rain. The engine holds no state
/// between calls.
pub struct AlertEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl AlertEngine {
    pub fn new(thresholds: &AlertThresholds) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(FrostRule {
                threshold_c: thresholds.frost_temp_c,
            }),
            Box::new(HeatStressRule {
                threshold_c: thresholds.heat_temp_c,
            }),
            Box::new(DiseaseRiskRule {
                high: thresholds.disease_high,
                moderate: thresholds.disease_moderate,
            }),
            Box::new(HeavyRainRule {
                threshold_mm: thresholds.heavy_rain_mm,
            }),
        ];

        Self { rules }
    }

    /// Build an engine from an explicit rule list, evaluated in the given order
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Evaluate a batch using its earliest date as the lead-time reference.
    pub fn evaluate(&self, days: &[ForecastDay]) -> Result<Vec<AlertEvent>> {
        match days.iter().map(|d| d.date).min() {
            Some(reference) => self.evaluate_from(days, reference),
            None => Ok(Vec::new()),
        }
    }

    /// Evaluate a batch against a caller-supplied reference date.
    ///
    /// The whole batch is validated before any rule runs. A non-finite value,
    /// a temperature interval that excludes the point forecast,
    /// a repeated date, or an alert dated before `reference` fails the batch.
    pub fn evaluate_from(
        &self,
        days: &[ForecastDay],
        reference: NaiveDate,
    ) -> Result<Vec<AlertEvent>> {
        let ordered = Self::prepare(days)?;

        let mut events = Vec::new();
        for day in ordered {
            let triggers: Vec<Trigger> = self
                .rules
                .iter()
                .filter_map(|rule| rule.evaluate(day))
                .collect();

            if triggers.is_empty() {
                continue;
            }

            let lead_time_days = lead_time(day.date, reference)?;
            events.extend(triggers.into_iter().map(|t| AlertEvent {
                date: day.date,
                severity: t.category.severity(),
                category: t.category,
                message: t.message,
                value: t.value,
                lead_time_days,
            }));
        }

        tracing::info!(
            days = days.len(),
            alerts = events.len(),
            %reference,
            "alert evaluation complete"
        );

        Ok(events)
    }

    pub fn evaluate_rule(&self, rule_id: &str, day: &ForecastDay) -> Option<Trigger> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(day))
    }

    /// Run a single rule over a validated batch, returning each day it fires on
    pub fn check_rule(
        &self,
        rule_id: &str,
        days: &[ForecastDay],
    ) -> Result<Vec<(NaiveDate, Trigger)>> {
        if !self.rules.iter().any(|r| r.id() == rule_id) {
            return Err(CropWatchError::InvalidData(format!(
                "unknown rule id: {}",
                rule_id
            )));
        }

        let hits = Self::prepare(days)?
            .into_iter()
            .filter_map(|day| self.evaluate_rule(rule_id, day).map(|t| (day.date, t)))
            .collect();
        Ok(hits)
    }

    pub fn list_rules(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.categories().iter().map(move |&category| RuleInfo {
                    rule_id: rule.id(),
                    name: rule.name(),
                    category,
                    severity: category.severity(),
                    description: category.description(),
                    condition: rule.condition(category),
                    action: category.action(),
                })
            })
            .collect()
    }

    /// Validate every day and return them sorted by date
    fn prepare(days: &[ForecastDay]) -> Result<Vec<&ForecastDay>> {
        for day in days {
            check_day(day)?;
            if !(0.0..=100.0).contains(&day.humidity) {
                tracing::warn!(
                    date = %day.date,
                    humidity = day.humidity,
                    "humidity outside 0-100%"
                );
            }
        }

        let mut ordered: Vec<&ForecastDay> = days.iter().collect();
        ordered.sort_by_key(|d| d.date);

        if let Some(pair) = ordered.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(CropWatchError::InvalidData(format!(
                "duplicate forecast day for {}",
                pair[0].date
            )));
        }

        tracing::debug!(days = ordered.len(), "forecast batch validated");
        Ok(ordered)
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(&AlertThresholds::default())
    }
}

/// Every field finite and `temperature_lower <= temperature <= temperature_upper`
fn check_day(day: &ForecastDay) -> Result<()> {
    for (field, value) in day.fields() {
        if !value.is_finite() {
            return Err(CropWatchError::MalformedForecastDay {
                date: day.date,
                field,
                reason: format!("is not a finite number ({})", value),
            });
        }
    }

    if day.temperature_lower > day.temperature {
        return Err(CropWatchError::MalformedForecastDay {
            date: day.date,
            field: "temperature_lower",
            reason: format!(
                "{} is above the point forecast {}",
                day.temperature_lower, day.temperature
            ),
        });
    }
    if day.temperature_upper < day.temperature {
        return Err(CropWatchError::MalformedForecastDay {
            date: day.date,
            field: "temperature_upper",
            reason: format!(
                "{} is below the point forecast {}",
                day.temperature_upper, day.temperature
            ),
        });
    }
    Ok(())
}

fn lead_time(date: NaiveDate, reference: NaiveDate) -> Result<u32> {
    let days = (date - reference).num_days();
    u32::try_from(days).map_err(|_| CropWatchError::InvalidLeadTime {
        date,
        reference,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(date: NaiveDate, temperature: f64, humidity: f64, precipitation: f64) -> ForecastDay {
        ForecastDay {
            date,
            temperature,
            temperature_lower: temperature - 2.0,
            temperature_upper: temperature + 2.0,
            humidity,
            precipitation,
        }
    }

    fn categories(events: &[AlertEvent]) -> Vec<AlertCategory> {
        events.iter().map(|e| e.category).collect()
    }

    #[test]
    fn three_day_scenario() {
        let d1 = date(2025, 1, 1);
        let days = vec![
            day(d1, -2.0, 50.0, 0.0),
            day(date(2025, 1, 2), 20.0, 95.0, 30.0),
            day(date(2025, 1, 3), 32.0, 40.0, 5.0),
        ];

        let events = AlertEngine::default().evaluate_from(&days, d1).unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(
            categories(&events),
            vec![
                AlertCategory::FrostWarning,
                AlertCategory::DiseaseRiskHigh,
                AlertCategory::HeavyRain,
                AlertCategory::HeatStress,
            ]
        );
        let leads: Vec<u32> = events.iter().map(|e| e.lead_time_days).collect();
        assert_eq!(leads, vec![0, 1, 1, 2]);
        let severities: Vec<Severity> = events.iter().map(|e| e.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::High,
                Severity::High,
                Severity::High,
                Severity::Medium
            ]
        );
        assert_eq!(events[1].value, 95.0);
        assert_eq!(events[2].value, 30.0);
    }

    #[test]
    fn frost_fires_once_per_freezing_day() {
        let days = vec![
            day(date(2025, 1, 1), -0.5, 50.0, 0.0),
            day(date(2025, 1, 2), -10.0, 50.0, 0.0),
        ];
        let events = AlertEngine::default().evaluate(&days).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| e.category == AlertCategory::FrostWarning && e.severity == Severity::High));
    }

    #[test]
    fn zero_degrees_is_not_frost() {
        let days = vec![day(date(2025, 1, 1), 0.0, 50.0, 0.0)];
        assert!(AlertEngine::default().evaluate(&days).unwrap().is_empty());
    }

    #[test]
    fn high_and_moderate_disease_never_share_a_date() {
        let days: Vec<_> = (1..=11)
            .map(|i| day(date(2025, 6, i), 14.0 + i as f64, 91.0, 0.0))
            .collect();

        let events = AlertEngine::default().evaluate(&days).unwrap();
        for d in &days {
            let disease = events
                .iter()
                .filter(|e| e.date == d.date && e.category.is_disease())
                .count();
            assert_eq!(disease, 1, "expected one disease alert on {}", d.date);
        }
        let high: Vec<_> = events
            .iter()
            .filter(|e| e.category == AlertCategory::DiseaseRiskHigh)
            .collect();
        // 15..=25 °C
        assert_eq!(high.len(), 11);
    }

    #[test]
    fn moderate_disease_below_high_band() {
        let days = vec![
            day(date(2025, 5, 1), 10.0, 90.0, 0.0),
            day(date(2025, 5, 2), 14.9, 85.5, 0.0),
        ];
        let events = AlertEngine::default().evaluate(&days).unwrap();
        assert_eq!(
            categories(&events),
            vec![
                AlertCategory::DiseaseRiskModerate,
                AlertCategory::DiseaseRiskModerate
            ]
        );
        assert!(events.iter().all(|e| e.severity == Severity::Medium));
    }

    #[test]
    fn lead_time_counts_from_reference() {
        let d0 = date(2025, 3, 1);
        let days = vec![
            day(d0, 10.0, 50.0, 0.0),
            day(date(2025, 3, 8), -1.0, 50.0, 0.0),
        ];
        let events = AlertEngine::default().evaluate(&days).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].lead_time_days, 7);
    }

    #[test]
    fn reference_is_batch_minimum_not_first_element() {
        let days = vec![
            day(date(2025, 3, 5), -1.0, 50.0, 0.0),
            day(date(2025, 3, 2), 10.0, 50.0, 0.0),
        ];
        let events = AlertEngine::default().evaluate(&days).unwrap();
        assert_eq!(events[0].lead_time_days, 3);
    }

    #[test]
    fn events_sorted_by_date_then_rule_order() {
        let days = vec![
            day(date(2025, 8, 3), 35.0, 20.0, 40.0),
            day(date(2025, 8, 1), -3.0, 50.0, 26.0),
        ];
        let events = AlertEngine::default().evaluate(&days).unwrap();
        assert_eq!(
            categories(&events),
            vec![
                AlertCategory::FrostWarning,
                AlertCategory::HeavyRain,
                AlertCategory::HeatStress,
                AlertCategory::HeavyRain,
            ]
        );
        assert_eq!(events[0].date, date(2025, 8, 1));
        assert_eq!(events[3].date, date(2025, 8, 3));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let days = vec![
            day(date(2025, 1, 1), -2.0, 50.0, 0.0),
            day(date(2025, 1, 2), 20.0, 95.0, 30.0),
        ];
        let engine = AlertEngine::default();
        let first = serde_json::to_string(&engine.evaluate(&days).unwrap()).unwrap();
        let second = serde_json::to_string(&engine.evaluate(&days).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nan_humidity_fails_the_batch() {
        let days = vec![
            day(date(2025, 1, 1), -2.0, 50.0, 0.0),
            day(date(2025, 1, 2), 20.0, f64::NAN, 0.0),
        ];
        let err = AlertEngine::default().evaluate(&days).unwrap_err();
        match err {
            CropWatchError::MalformedForecastDay { date: d, field, .. } => {
                assert_eq!(d, date(2025, 1, 2));
                assert_eq!(field, "humidity");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn infinite_precipitation_fails_the_batch() {
        let days = vec![day(date(2025, 1, 1), 5.0, 50.0, f64::INFINITY)];
        assert!(matches!(
            AlertEngine::default().evaluate(&days),
            Err(CropWatchError::MalformedForecastDay {
                field: "precipitation",
                ..
            })
        ));
    }

    #[test]
    fn inverted_temperature_interval_fails_the_batch() {
        let mut bad = day(date(2025, 1, 2), 20.0, 50.0, 0.0);
        bad.temperature_lower = 25.0;
        bad.temperature_upper = 10.0;
        let days = vec![day(date(2025, 1, 1), -3.0, 50.0, 0.0), bad];

        let err = AlertEngine::default().evaluate(&days).unwrap_err();
        match err {
            CropWatchError::MalformedForecastDay { date: d, field, .. } => {
                assert_eq!(d, date(2025, 1, 2));
                assert_eq!(field, "temperature_lower");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn upper_bound_below_point_forecast_is_rejected() {
        let mut bad = day(date(2025, 1, 1), -2.0, 50.0, 0.0);
        bad.temperature_upper = -2.5;
        assert!(matches!(
            AlertEngine::default().evaluate(&[bad]),
            Err(CropWatchError::MalformedForecastDay {
                field: "temperature_upper",
                ..
            })
        ));
    }

    #[test]
    fn degenerate_interval_is_accepted() {
        let mut point = day(date(2025, 1, 1), -2.0, 50.0, 0.0);
        point.temperature_lower = -2.0;
        point.temperature_upper = -2.0;
        assert_eq!(AlertEngine::default().evaluate(&[point]).unwrap().len(), 1);
    }

    #[test]
    fn alert_before_reference_is_rejected() {
        let days = vec![day(date(2025, 1, 1), -5.0, 50.0, 0.0)];
        let err = AlertEngine::default()
            .evaluate_from(&days, date(2025, 1, 4))
            .unwrap_err();
        match err {
            CropWatchError::InvalidLeadTime { days, .. } => assert_eq!(days, -3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn quiet_day_before_reference_is_allowed() {
        let days = vec![
            day(date(2025, 1, 1), 12.0, 50.0, 0.0),
            day(date(2025, 1, 5), -1.0, 50.0, 0.0),
        ];
        let events = AlertEngine::default()
            .evaluate_from(&days, date(2025, 1, 3))
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].lead_time_days, 2);
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let days = vec![
            day(date(2025, 1, 1), 12.0, 50.0, 0.0),
            day(date(2025, 1, 1), 13.0, 50.0, 0.0),
        ];
        assert!(matches!(
            AlertEngine::default().evaluate(&days),
            Err(CropWatchError::InvalidData(_))
        ));
    }

    #[test]
    fn empty_batch_yields_no_events() {
        assert!(AlertEngine::default().evaluate(&[]).unwrap().is_empty());
    }

    #[test]
    fn custom_thresholds_change_triggers() {
        let thresholds = AlertThresholds {
            frost_temp_c: 2.0,
            heavy_rain_mm: 10.0,
            ..AlertThresholds::default()
        };
        let days = vec![day(date(2025, 2, 1), 1.0, 50.0, 12.0)];
        let events = AlertEngine::new(&thresholds).evaluate(&days).unwrap();
        assert_eq!(
            categories(&events),
            vec![AlertCategory::FrostWarning, AlertCategory::HeavyRain]
        );
        assert_eq!(
            events[0].message,
            "FROST WARNING: Temperature forecast 1.0°C (below 2°C)"
        );
    }

    #[test]
    fn with_rules_uses_only_given_rules() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(HeavyRainRule { threshold_mm: 25.0 })];
        let engine = AlertEngine::with_rules(rules);
        let days = vec![day(date(2025, 2, 1), -4.0, 50.0, 30.0)];
        let events = engine.evaluate(&days).unwrap();
        assert_eq!(categories(&events), vec![AlertCategory::HeavyRain]);
    }

    #[test]
    fn evaluate_rule_by_id() {
        let engine = AlertEngine::default();
        let d = day(date(2025, 2, 1), 33.0, 40.0, 0.0);
        assert!(engine.evaluate_rule("heat_stress", &d).is_some());
        assert!(engine.evaluate_rule("frost_warning", &d).is_none());
        assert!(engine.evaluate_rule("unknown", &d).is_none());
    }

    #[test]
    fn check_rule_reports_days_for_one_rule() {
        let engine = AlertEngine::default();
        let days = vec![
            day(date(2025, 7, 3), 20.0, 95.0, 0.0),
            day(date(2025, 7, 1), 12.0, 88.0, 0.0),
            day(date(2025, 7, 2), 31.0, 40.0, 0.0),
        ];

        let hits = engine.check_rule("disease_risk", &days).unwrap();
        let found: Vec<(NaiveDate, AlertCategory)> =
            hits.iter().map(|(d, t)| (*d, t.category)).collect();
        assert_eq!(
            found,
            vec![
                (date(2025, 7, 1), AlertCategory::DiseaseRiskModerate),
                (date(2025, 7, 3), AlertCategory::DiseaseRiskHigh),
            ]
        );
        assert!(engine.check_rule("frost_warning", &days).unwrap().is_empty());
    }

    #[test]
    fn check_rule_validates_batch_and_id() {
        let engine = AlertEngine::default();
        let mut bad = day(date(2025, 7, 1), 20.0, 50.0, 0.0);
        bad.temperature_lower = 21.0;
        assert!(matches!(
            engine.check_rule("heat_stress", &[bad]),
            Err(CropWatchError::MalformedForecastDay {
                field: "temperature_lower",
                ..
            })
        ));
        assert!(matches!(
            engine.check_rule("hail", &[]),
            Err(CropWatchError::InvalidData(_))
        ));
    }

    #[test]
    fn rule_catalogue_covers_every_category_in_order() {
        let rules = AlertEngine::default().list_rules();
        let listed: Vec<AlertCategory> = rules.iter().map(|r| r.category).collect();
        assert_eq!(listed, AlertCategory::ALL.to_vec());
        assert_eq!(rules[2].rule_id, "disease_risk");
        assert_eq!(rules[3].rule_id, "disease_risk");
        let names: Vec<&str> = rules.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "Frost Warning",
                "Heat Stress",
                "Disease Risk",
                "Disease Risk",
                "Heavy Rain"
            ]
        );
        assert_eq!(rules[4].condition, "Precipitation > 25mm");
        assert_eq!(rules[0].action, "Cover sensitive crops, delay planting");
    }
}
