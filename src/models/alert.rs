use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Alert categories in rule-declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    FrostWarning,
    HeatStress,
    DiseaseRiskHigh,
    DiseaseRiskModerate,
    HeavyRain,
}

impl AlertCategory {
    pub const ALL: [AlertCategory; 5] = [
        AlertCategory::FrostWarning,
        AlertCategory::HeatStress,
        AlertCategory::DiseaseRiskHigh,
        AlertCategory::DiseaseRiskModerate,
        AlertCategory::HeavyRain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::FrostWarning => "frost_warning",
            AlertCategory::HeatStress => "heat_stress",
            AlertCategory::DiseaseRiskHigh => "disease_risk_high",
            AlertCategory::DiseaseRiskModerate => "disease_risk_moderate",
            AlertCategory::HeavyRain => "heavy_rain",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AlertCategory::FrostWarning => Severity::High,
            AlertCategory::HeatStress => Severity::Medium,
            AlertCategory::DiseaseRiskHigh => Severity::High,
            AlertCategory::DiseaseRiskModerate => Severity::Medium,
            AlertCategory::HeavyRain => Severity::High,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AlertCategory::FrostWarning => "Frost Risk - Potential crop damage",
            AlertCategory::HeatStress => "Heat Stress - Reduced crop yield",
            AlertCategory::DiseaseRiskHigh => "High Disease Risk - Fungal/bacterial",
            AlertCategory::DiseaseRiskModerate => "Moderate Disease Risk",
            AlertCategory::HeavyRain => "Heavy Precipitation - Flooding/erosion risk",
        }
    }

    /// Recommended operator response
    pub fn action(&self) -> &'static str {
        match self {
            AlertCategory::FrostWarning => "Cover sensitive crops, delay planting",
            AlertCategory::HeatStress => "Increase irrigation, monitor crop health",
            AlertCategory::DiseaseRiskHigh => "Apply preventive fungicides, monitor closely",
            AlertCategory::DiseaseRiskModerate => "Increase scouting frequency",
            AlertCategory::HeavyRain => "Check drainage, delay field operations",
        }
    }

    pub fn is_disease(&self) -> bool {
        matches!(
            self,
            AlertCategory::DiseaseRiskHigh | AlertCategory::DiseaseRiskModerate
        )
    }
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered so that `High` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    pub const ALL: [Severity; 2] = [Severity::High, Severity::Medium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::High => "!",
            Severity::Medium => "⚠",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One emitted alert. Serializes to the export columns
/// `date, type, severity, message, value, lead_time_days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub category: AlertCategory,
    pub severity: Severity,
    pub message: String,
    pub value: f64,
    pub lead_time_days: u32,
}
