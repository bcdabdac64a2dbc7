//! Severity Scorer
//!
//! Turns raw reports into a recency- and type-weighted score in [0, 1].
//! Recency is measured against the newest report in the working set,
//! not the wall clock.

use super::rules::SeverityRules;
use super::types::{Report, ScoredReport};

const MS_PER_MINUTE: f64 = 60_000.0;

/// Score every report of the working set.
/// Output order matches input order; an empty set yields an empty vector.
pub fn score_reports<'a>(reports: &'a [Report], rules: &SeverityRules) -> Vec<ScoredReport<'a>> {
    let Some(now) = reports.iter().map(|r| r.timestamp).max() else {
        return Vec::new();
    };

    reports
        .iter()
        .map(|report| {
            let age_minutes = (now - report.timestamp) as f64 / MS_PER_MINUTE;
            ScoredReport {
                report,
                severity: time_factor(age_minutes, rules) * type_weight(&report.report_type, rules),
            }
        })
        .collect()
}

/// Step function over report age
pub fn time_factor(age_minutes: f64, rules: &SeverityRules) -> f64 {
    rules
        .time_steps
        .iter()
        .find(|step| age_minutes < step.max_age_minutes)
        .map_or(rules.stale_time_factor, |step| step.factor)
}

/// Case-insensitive type lookup
pub fn type_weight(report_type: &str, rules: &SeverityRules) -> f64 {
    rules
        .type_weights
        .get(&report_type.trim().to_lowercase())
        .copied()
        .unwrap_or(rules.unknown_type_weight)
}
