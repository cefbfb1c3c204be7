pub mod aggregate;
pub mod rules;
pub mod summary;
pub mod validation;

pub use aggregate::{aggregate, forecast_window};
pub use rules::{AlertEngine, AlertThresholds};
pub use summary::AlertSummary;
pub use validation::{validate_against_observed, ValidationReport};
