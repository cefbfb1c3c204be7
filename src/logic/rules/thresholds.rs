//! Numeric thresholds behind every alert rule.
//!
//! Defaults reproduce the agronomic table the alert system ships with; a
//! config file may override any of them.

use crate::error::{CropWatchError, Result};
use crate::models::ForecastDay;
use serde::{Deserialize, Serialize};

/// Humidity/temperature window for one disease-risk tier.
///
/// Humidity must be strictly above `min_humidity`; temperature must fall in
/// the inclusive range `temp_min_c..=temp_max_c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiseaseBand {
    pub min_humidity: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
}

impl DiseaseBand {
    pub fn matches(&self, day: &ForecastDay) -> bool {
        day.humidity > self.min_humidity
            && (self.temp_min_c..=self.temp_max_c).contains(&day.temperature)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub frost_temp_c: f64,
    pub heat_temp_c: f64,
    pub disease_high: DiseaseBand,
    pub disease_moderate: DiseaseBand,
    pub heavy_rain_mm: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            frost_temp_c: 0.0,
            heat_temp_c: 30.0,
            disease_high: DiseaseBand {
                min_humidity: 90.0,
                temp_min_c: 15.0,
                temp_max_c: 25.0,
            },
            disease_moderate: DiseaseBand {
                min_humidity: 85.0,
                temp_min_c: 10.0,
                temp_max_c: 30.0,
            },
            heavy_rain_mm: 25.0,
        }
    }
}

impl AlertThresholds {
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("frost_temp_c", self.frost_temp_c),
            ("heat_temp_c", self.heat_temp_c),
            ("heavy_rain_mm", self.heavy_rain_mm),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(CropWatchError::Config(format!(
                    "threshold '{}' must be a finite number",
                    name
                )));
            }
        }

        for (name, band) in [
            ("disease_high", &self.disease_high),
            ("disease_moderate", &self.disease_moderate),
        ] {
            if !(band.min_humidity.is_finite()
                && band.temp_min_c.is_finite()
                && band.temp_max_c.is_finite())
            {
                return Err(CropWatchError::Config(format!(
                    "threshold '{}' must contain finite numbers",
                    name
                )));
            }
            if band.temp_min_c > band.temp_max_c {
                return Err(CropWatchError::Config(format!(
                    "threshold '{}' has temp_min_c {} above temp_max_c {}",
                    name, band.temp_min_c, band.temp_max_c
                )));
            }
        }

        Ok(())
    }
}
