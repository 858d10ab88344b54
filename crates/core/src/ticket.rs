//! Ticket status, priority, filtering and summary counts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lifecycle state of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Resolved and closed tickets no longer count against an SLA.
    pub fn is_done(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = CoreError;

    /// Case-insensitive; accepts the display form "In Progress" as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(CoreError::Validation(format!(
                "Invalid ticket status '{other}'. Must be one of: open, in_progress, resolved, closed"
            ))),
        }
    }
}

/// Urgency of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(CoreError::Validation(format!(
                "Invalid ticket priority '{other}'. Must be one of: low, medium, high, critical"
            ))),
        }
    }
}

/// Human-facing ticket key, e.g. `TK-007`.
pub fn ticket_key(id: DbId) -> String {
    format!("TK-{id:03}")
}

/// The fields of a ticket that filtering and counting look at.
///
/// Implemented by the storage model so this module stays free of storage
/// types.
pub trait TicketView {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn status(&self) -> TicketStatus;
    fn priority(&self) -> TicketPriority;
}

/// Search and tab filters applied to the ticket list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    /// Case-insensitive substring matched against title or description.
    pub search: Option<String>,
    /// Status tab. Absent (or `all` at the HTTP layer) means every status.
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}

impl TicketFilter {
    pub fn matches<T: TicketView>(&self, ticket: &T) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                ticket.title().to_lowercase().contains(&term)
                    || ticket.description().to_lowercase().contains(&term)
            }
        };

        matches_search
            && self.status.map_or(true, |s| s == ticket.status())
            && self.priority.map_or(true, |p| p == ticket.priority())
    }
}

/// Per-status counts shown on the ticket triage and dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    /// Critical-priority tickets still being worked.
    pub critical: usize,
}

impl TicketStats {
    pub fn from_tickets<T: TicketView>(tickets: &[T]) -> Self {
        let mut stats = Self {
            total: tickets.len(),
            ..Self::default()
        };
        for t in tickets {
            match t.status() {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved => stats.resolved += 1,
                TicketStatus::Closed => stats.closed += 1,
            }
            if t.priority() == TicketPriority::Critical && !t.status().is_done() {
                stats.critical += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        title: &'static str,
        description: &'static str,
        status: TicketStatus,
        priority: TicketPriority,
    }

    impl TicketView for Fake {
        fn title(&self) -> &str {
            self.title
        }
        fn description(&self) -> &str {
            self.description
        }
        fn status(&self) -> TicketStatus {
            self.status
        }
        fn priority(&self) -> TicketPriority {
            self.priority
        }
    }

    fn sample() -> Vec<Fake> {
        vec![
            Fake {
                title: "Server downtime in production",
                description: "Main application server is not responding.",
                status: TicketStatus::Open,
                priority: TicketPriority::Critical,
            },
            Fake {
                title: "Email notifications not working",
                description: "Password reset mails are not delivered.",
                status: TicketStatus::InProgress,
                priority: TicketPriority::Medium,
            },
            Fake {
                title: "VPN problems",
                description: "Remote users cannot connect to the SERVER.",
                status: TicketStatus::Resolved,
                priority: TicketPriority::Critical,
            },
        ]
    }

    #[test]
    fn status_parses_display_forms() {
        assert_eq!("In Progress".parse::<TicketStatus>().unwrap(), TicketStatus::InProgress);
        assert_eq!("in_progress".parse::<TicketStatus>().unwrap(), TicketStatus::InProgress);
        assert_eq!("OPEN".parse::<TicketStatus>().unwrap(), TicketStatus::Open);
        assert!("critical".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn priority_rejects_unknown_values() {
        assert_eq!("High".parse::<TicketPriority>().unwrap(), TicketPriority::High);
        assert!("urgent".parse::<TicketPriority>().is_err());
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let tickets = sample();
        let filter = TicketFilter {
            search: Some("server".into()),
            ..Default::default()
        };
        let hits: Vec<_> = tickets.iter().filter(|t| filter.matches(*t)).collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn status_and_search_combine() {
        let tickets = sample();
        let filter = TicketFilter {
            search: Some("server".into()),
            status: Some(TicketStatus::Resolved),
            priority: None,
        };
        let hits: Vec<_> = tickets.iter().filter(|t| filter.matches(*t)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "VPN problems");
    }

    #[test]
    fn blank_search_matches_everything() {
        let filter = TicketFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(sample().iter().all(|t| filter.matches(t)));
    }

    #[test]
    fn stats_count_unfinished_critical_only() {
        let stats = TicketStats::from_tickets(&sample());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.critical, 1);
    }

    #[test]
    fn ticket_key_is_zero_padded() {
        assert_eq!(ticket_key(1), "TK-001");
        assert_eq!(ticket_key(1234), "TK-1234");
    }
}
