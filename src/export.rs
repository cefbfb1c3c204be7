use crate::error::{CropWatchError, Result};
use crate::models::AlertEvent;

/// Render alerts as CSV with columns `date,type,severity,message,value,lead_time_days`.
pub fn alerts_to_csv(alerts: &[AlertEvent]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if alerts.is_empty() {
        wtr.write_record(["date", "type", "severity", "message", "value", "lead_time_days"])?;
    }
    for alert in alerts {
        wtr.serialize(alert)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| CropWatchError::InvalidData(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| CropWatchError::InvalidData(format!("UTF-8 conversion error: {}", e)))
}
