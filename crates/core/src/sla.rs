//! Service Level Agreement targets and compliance reporting.
//!
//! Every ticket priority carries a resolution target. A finished ticket is
//! compliant when it was resolved within its target; an unfinished ticket is
//! "at risk" once 75% of its target has elapsed and "breached" after 100%.

use serde::Serialize;

use crate::ticket::{TicketPriority, TicketStatus};
use crate::types::Timestamp;

/// Share of finished tickets that must meet their target.
pub const COMPLIANCE_TARGET_PCT: f64 = 95.0;

/// Fraction of the target after which an open ticket is flagged at risk.
pub const AT_RISK_FRACTION: f64 = 0.75;

/// Resolution target in hours for a priority.
pub fn resolution_target_hours(priority: TicketPriority) -> f64 {
    match priority {
        TicketPriority::Critical => 4.0,
        TicketPriority::High => 8.0,
        TicketPriority::Medium => 24.0,
        TicketPriority::Low => 72.0,
    }
}

/// The ticket fields the SLA calculation needs.
#[derive(Debug, Clone)]
pub struct SlaSample {
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: Timestamp,
    /// When the ticket moved to resolved/closed, if it has.
    pub resolved_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityTarget {
    pub priority: TicketPriority,
    pub resolution_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlaReport {
    /// Percent of finished tickets resolved within target. `None` until
    /// something has been resolved.
    pub compliance_pct: Option<f64>,
    pub compliance_target_pct: f64,
    pub meets_target: bool,
    pub avg_resolution_hours: Option<f64>,
    pub resolved_count: usize,
    pub at_risk: usize,
    pub breached: usize,
    pub targets: Vec<PriorityTarget>,
}

pub fn sla_report(samples: &[SlaSample], now: Timestamp) -> SlaReport {
    let mut resolved_count = 0usize;
    let mut within_target = 0usize;
    let mut total_hours = 0.0;
    let mut at_risk = 0usize;
    let mut breached = 0usize;

    for s in samples {
        let target = resolution_target_hours(s.priority);

        if s.status.is_done() {
            let Some(resolved_at) = s.resolved_at else {
                continue;
            };
            let hours = hours_between(s.created_at, resolved_at);
            resolved_count += 1;
            total_hours += hours;
            if hours <= target {
                within_target += 1;
            }
        } else {
            let age = hours_between(s.created_at, now);
            if age > target {
                breached += 1;
            } else if age >= target * AT_RISK_FRACTION {
                at_risk += 1;
            }
        }
    }

    let compliance_pct =
        (resolved_count > 0).then(|| within_target as f64 / resolved_count as f64 * 100.0);
    let avg_resolution_hours = (resolved_count > 0).then(|| total_hours / resolved_count as f64);

    SlaReport {
        compliance_pct,
        compliance_target_pct: COMPLIANCE_TARGET_PCT,
        meets_target: compliance_pct.map_or(true, |pct| pct >= COMPLIANCE_TARGET_PCT),
        avg_resolution_hours,
        resolved_count,
        at_risk,
        breached,
        targets: [
            TicketPriority::Critical,
            TicketPriority::High,
            TicketPriority::Medium,
            TicketPriority::Low,
        ]
        .into_iter()
        .map(|priority| PriorityTarget {
            priority,
            resolution_hours: resolution_target_hours(priority),
        })
        .collect(),
    }
}

fn hours_between(from: Timestamp, to: Timestamp) -> f64 {
    (to - from).num_seconds().max(0) as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn base() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap()
    }

    fn resolved(priority: TicketPriority, hours: i64) -> SlaSample {
        SlaSample {
            priority,
            status: TicketStatus::Resolved,
            created_at: base(),
            resolved_at: Some(base() + Duration::hours(hours)),
        }
    }

    fn open(priority: TicketPriority, age_hours: i64, now: Timestamp) -> SlaSample {
        SlaSample {
            priority,
            status: TicketStatus::Open,
            created_at: now - Duration::hours(age_hours),
            resolved_at: None,
        }
    }

    #[test]
    fn compliance_counts_finished_tickets_only() {
        let now = base() + Duration::days(10);
        let samples = vec![
            resolved(TicketPriority::Critical, 3),
            resolved(TicketPriority::High, 12),
            open(TicketPriority::Low, 1, now),
        ];
        let report = sla_report(&samples, now);
        assert_eq!(report.resolved_count, 2);
        assert_eq!(report.compliance_pct, Some(50.0));
        assert!(!report.meets_target);
        assert_eq!(report.avg_resolution_hours, Some(7.5));
    }

    #[test]
    fn open_tickets_are_at_risk_then_breached() {
        let now = base();
        let samples = vec![
            open(TicketPriority::Critical, 3, now), // 75% of 4h
            open(TicketPriority::Critical, 5, now), // past 4h
            open(TicketPriority::Medium, 2, now),   // fine
        ];
        let report = sla_report(&samples, now);
        assert_eq!(report.at_risk, 1);
        assert_eq!(report.breached, 1);
    }

    #[test]
    fn nothing_resolved_has_no_compliance_figure() {
        let report = sla_report(&[], base());
        assert_eq!(report.compliance_pct, None);
        assert!(report.meets_target);
        assert_eq!(report.targets.len(), 4);
    }

    #[test]
    fn targets_grow_as_priority_drops() {
        assert!(
            resolution_target_hours(TicketPriority::Critical)
                < resolution_target_hours(TicketPriority::Low)
        );
    }
}
