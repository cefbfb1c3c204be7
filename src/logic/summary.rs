use crate::models::{AlertCategory, AlertEvent, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeadTimeStats {
    pub mean: f64,
    pub min: u32,
    pub max: u32,
    pub count: usize,
}

impl LeadTimeStats {
    fn from_lead_times(lead_times: &[u32]) -> Option<Self> {
        let min = *lead_times.iter().min()?;
        let max = *lead_times.iter().max()?;
        let total: u64 = lead_times.iter().map(|&d| u64::from(d)).sum();
        Some(Self {
            mean: total as f64 / lead_times.len() as f64,
            min,
            max,
            count: lead_times.len(),
        })
    }
}

/// Derived counts over an alert list. Built on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub by_category: BTreeMap<AlertCategory, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    pub lead_times: BTreeMap<AlertCategory, LeadTimeStats>,
    pub mean_lead_time: Option<f64>,
}

impl AlertSummary {
    pub fn from_events(events: &[AlertEvent]) -> Self {
        let mut by_category = BTreeMap::new();
        let mut by_severity = BTreeMap::new();
        let mut grouped: BTreeMap<AlertCategory, Vec<u32>> = BTreeMap::new();

        for event in events {
            *by_category.entry(event.category).or_insert(0) += 1;
            *by_severity.entry(event.severity).or_insert(0) += 1;
            grouped
                .entry(event.category)
                .or_default()
                .push(event.lead_time_days);
        }

        let lead_times = grouped
            .iter()
            .filter_map(|(category, days)| {
                LeadTimeStats::from_lead_times(days).map(|stats| (*category, stats))
            })
            .collect();

        let all: Vec<u32> = events.iter().map(|e| e.lead_time_days).collect();
        let mean_lead_time = LeadTimeStats::from_lead_times(&all).map(|s| s.mean);

        Self {
            total: events.len(),
            by_category,
            by_severity,
            lead_times,
            mean_lead_time,
        }
    }

    pub fn count(&self, category: AlertCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn count_severity(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}
