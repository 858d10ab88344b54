//! Landing-page summary: ticket counts, recent tickets and the trend chart.

use serde::Serialize;

use crate::growth::{self, GrowthPoint};
use crate::ticket::{TicketStats, TicketView};

pub const RECENT_TICKETS: usize = 3;
pub const CHART_MONTHS: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary<T: Serialize> {
    pub stats: TicketStats,
    pub recent_tickets: Vec<T>,
    pub chart: Vec<GrowthPoint>,
}

pub fn build_summary<T>(tickets: &[T], growth_points: &[GrowthPoint]) -> DashboardSummary<T>
where
    T: TicketView + Serialize + Clone,
{
    DashboardSummary {
        stats: TicketStats::from_tickets(tickets),
        recent_tickets: tickets.iter().take(RECENT_TICKETS).cloned().collect(),
        chart: growth::recent(growth_points, CHART_MONTHS).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{TicketPriority, TicketStatus};

    #[derive(Clone, Serialize)]
    struct T(TicketStatus);

    impl TicketView for T {
        fn title(&self) -> &str {
            ""
        }
        fn description(&self) -> &str {
            ""
        }
        fn status(&self) -> TicketStatus {
            self.0
        }
        fn priority(&self) -> TicketPriority {
            TicketPriority::Low
        }
    }

    #[test]
    fn summary_limits_recent_and_chart() {
        let tickets = vec![T(TicketStatus::Open); 5];
        let points: Vec<GrowthPoint> = (0..6)
            .map(|i| GrowthPoint {
                month: format!("M{i}"),
                tickets: 10,
                resolved: 9,
                satisfaction: 4.0,
            })
            .collect();

        let summary = build_summary(&tickets, &points);
        assert_eq!(summary.stats.open, 5);
        assert_eq!(summary.recent_tickets.len(), RECENT_TICKETS);
        assert_eq!(summary.chart.len(), CHART_MONTHS);
        assert_eq!(summary.chart[0].month, "M2");
    }
}
