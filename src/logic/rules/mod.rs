pub mod disease_risk;
pub mod engine;
pub mod frost;
pub mod heat_stress;
pub mod heavy_rain;
pub mod thresholds;

pub use engine::{AlertEngine, RuleInfo};
pub use thresholds::{AlertThresholds, DiseaseBand};

use crate::models::{AlertCategory, ForecastDay};

/// A rule that fired for a forecast day
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub category: AlertCategory,
    /// The metric that tripped the rule
    pub value: f64,
    pub message: String,
}

/// Trait for alert rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Categories this rule can emit, in the order they are checked
    fn categories(&self) -> &'static [AlertCategory];

    /// Trigger condition for one of this rule's categories, e.g. "Temperature < 0°C"
    fn condition(&self, category: AlertCategory) -> String;

    /// Evaluate a single forecast day. At most one category fires per call.
    fn evaluate(&self, day: &ForecastDay) -> Option<Trigger>;
}
