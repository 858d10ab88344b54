//! Monthly ticket volume and satisfaction analytics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub month: String,
    pub tickets: u32,
    pub resolved: u32,
    /// Average customer rating for the month, 1.0 to 5.0.
    pub satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSummary {
    pub total_tickets: u32,
    pub total_resolved: u32,
    /// Whole percent, rounded half away from zero.
    pub resolution_rate_pct: u32,
    pub avg_satisfaction: f64,
}

pub fn summarize(points: &[GrowthPoint]) -> GrowthSummary {
    let total_tickets: u32 = points.iter().map(|p| p.tickets).sum();
    let total_resolved: u32 = points.iter().map(|p| p.resolved).sum();

    let resolution_rate_pct = if total_tickets == 0 {
        0
    } else {
        (f64::from(total_resolved) / f64::from(total_tickets) * 100.0).round() as u32
    };

    let avg_satisfaction = if points.is_empty() {
        0.0
    } else {
        points.iter().map(|p| p.satisfaction).sum::<f64>() / points.len() as f64
    };

    GrowthSummary {
        total_tickets,
        total_resolved,
        resolution_rate_pct,
        avg_satisfaction,
    }
}

/// The trailing `n` points, oldest first.
pub fn recent(points: &[GrowthPoint], n: usize) -> &[GrowthPoint] {
    &points[points.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: &str, tickets: u32, resolved: u32, satisfaction: f64) -> GrowthPoint {
        GrowthPoint {
            month: month.into(),
            tickets,
            resolved,
            satisfaction,
        }
    }

    #[test]
    fn summary_over_six_months() {
        let points = vec![
            point("Jan", 45, 42, 4.2),
            point("Feb", 52, 48, 4.1),
            point("Mar", 38, 36, 4.5),
            point("Apr", 61, 58, 4.3),
            point("May", 49, 47, 4.4),
            point("Jun", 55, 53, 4.6),
        ];
        let summary = summarize(&points);
        assert_eq!(summary.total_tickets, 300);
        assert_eq!(summary.total_resolved, 284);
        assert_eq!(summary.resolution_rate_pct, 95);
        assert!((summary.avg_satisfaction - 4.35).abs() < 1e-9);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_tickets, 0);
        assert_eq!(summary.resolution_rate_pct, 0);
        assert_eq!(summary.avg_satisfaction, 0.0);
    }

    #[test]
    fn recent_takes_the_tail() {
        let points: Vec<_> = ["Jan", "Feb", "Mar"]
            .iter()
            .map(|m| point(m, 1, 1, 4.0))
            .collect();
        let tail = recent(&points, 2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].month, "Feb");
        assert_eq!(recent(&points, 10).len(), 3);
    }
}
