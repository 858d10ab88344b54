//! Sample records the in-memory store starts with.

use chrono::{TimeZone, Utc};
use opsconsole_core::growth::GrowthPoint;
use opsconsole_core::ticket::{ticket_key, TicketPriority, TicketStatus};
use opsconsole_core::types::{DbId, Timestamp};
use opsconsole_core::user::UserRole;

use crate::models::{Ticket, User};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid seed timestamp")
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe".into(),
            email: "john.doe@company.com".into(),
            role: UserRole::Admin,
            created_at: at(2024, 12, 1, 0, 0),
        },
        User {
            id: 2,
            name: "Sarah Wilson".into(),
            email: "sarah.wilson@company.com".into(),
            role: UserRole::Technician,
            created_at: at(2024, 12, 5, 0, 0),
        },
        User {
            id: 3,
            name: "Mike Johnson".into(),
            email: "mike.johnson@company.com".into(),
            role: UserRole::User,
            created_at: at(2024, 12, 10, 0, 0),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn ticket(
    id: DbId,
    title: &str,
    description: &str,
    status: TicketStatus,
    priority: TicketPriority,
    category: &str,
    assigned_to: &str,
    created_by: &str,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> Ticket {
    Ticket {
        id,
        key: ticket_key(id),
        title: title.into(),
        description: description.into(),
        status,
        priority,
        category: Some(category.into()),
        assigned_to: Some(assigned_to.into()),
        created_by: created_by.into(),
        created_at,
        updated_at,
        resolved_at: status.is_done().then_some(updated_at),
    }
}

pub fn tickets() -> Vec<Ticket> {
    vec![
        ticket(
            1,
            "Server downtime - Production environment",
            "Main production server is experiencing intermittent downtime affecting all users.",
            TicketStatus::InProgress,
            TicketPriority::Critical,
            "Infrastructure",
            "John Doe",
            "Sarah Wilson",
            at(2025, 1, 15, 10, 30),
            at(2025, 1, 15, 14, 20),
        ),
        ticket(
            2,
            "Email service intermittent issues",
            "Users reporting delayed email delivery and occasional connection timeouts.",
            TicketStatus::Open,
            TicketPriority::High,
            "Email",
            "Mike Johnson",
            "Alex Chen",
            at(2025, 1, 15, 8, 15),
            at(2025, 1, 15, 12, 45),
        ),
        ticket(
            3,
            "VPN connection problems for remote users",
            "Multiple remote users unable to establish VPN connections.",
            TicketStatus::Resolved,
            TicketPriority::Medium,
            "Network",
            "Mike Johnson",
            "Lisa Chen",
            at(2025, 1, 14, 16, 20),
            at(2025, 1, 15, 9, 30),
        ),
        ticket(
            4,
            "Software license renewal required",
            "Adobe Creative Suite licenses expiring next month, need renewal process.",
            TicketStatus::Open,
            TicketPriority::Low,
            "Software",
            "Emma Davis",
            "Tom Brown",
            at(2025, 1, 14, 11, 0),
            at(2025, 1, 14, 11, 0),
        ),
        ticket(
            5,
            "Database backup failed",
            "Automated database backup process failed last night.",
            TicketStatus::InProgress,
            TicketPriority::High,
            "Infrastructure",
            "Emma Davis",
            "Tom Brown",
            at(2025, 1, 13, 9, 15),
            at(2025, 1, 15, 8, 20),
        ),
    ]
}

pub fn growth() -> Vec<GrowthPoint> {
    [
        ("Jan", 45, 42, 4.2),
        ("Feb", 52, 48, 4.1),
        ("Mar", 38, 36, 4.5),
        ("Apr", 61, 58, 4.3),
        ("May", 49, 47, 4.4),
        ("Jun", 55, 53, 4.6),
    ]
    .into_iter()
    .map(|(month, tickets, resolved, satisfaction)| GrowthPoint {
        month: month.to_string(),
        tickets,
        resolved,
        satisfaction,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique_and_keyed() {
        let tickets = tickets();
        let mut ids: Vec<_> = tickets.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), tickets.len());
        assert!(tickets.iter().all(|t| t.key == ticket_key(t.id)));
    }

    #[test]
    fn only_finished_seed_tickets_have_resolution_time() {
        for t in tickets() {
            assert_eq!(t.resolved_at.is_some(), t.status.is_done());
        }
    }

    #[test]
    fn six_months_of_growth() {
        assert_eq!(growth().len(), 6);
        assert_eq!(users().len(), 3);
    }
}
