//! Support ticket model and DTOs.

use opsconsole_core::error::CoreError;
use opsconsole_core::sla::SlaSample;
use opsconsole_core::ticket::{ticket_key, TicketPriority, TicketStatus, TicketView};
use opsconsole_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: DbId,
    /// Display key such as `TK-001`, derived from `id`.
    pub key: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

impl TicketView for Ticket {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn status(&self) -> TicketStatus {
        self.status
    }

    fn priority(&self) -> TicketPriority {
        self.priority
    }
}

impl Ticket {
    /// Build a freshly opened ticket.
    pub fn open(id: DbId, input: &NewTicket, now: Timestamp) -> Self {
        Self {
            id,
            key: ticket_key(id),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            status: TicketStatus::Open,
            priority: input.priority,
            category: input.category.clone(),
            assigned_to: input.assigned_to.clone(),
            created_by: input.created_by.clone(),
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }

    /// Apply a partial update, stamping `updated_at`.
    ///
    /// Moving into resolved/closed records `resolved_at`; reopening clears it.
    pub fn apply(&mut self, update: &UpdateTicket, now: Timestamp) {
        if let Some(title) = &update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = &update.description {
            self.description = description.trim().to_string();
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = &update.category {
            self.category = Some(category.clone());
        }
        if let Some(assigned_to) = &update.assigned_to {
            self.assigned_to = Some(assigned_to.clone());
        }
        if let Some(status) = update.status {
            if status.is_done() && !self.status.is_done() {
                self.resolved_at = Some(now);
            } else if !status.is_done() {
                self.resolved_at = None;
            }
            self.status = status;
        }
        self.updated_at = now;
    }

    pub fn sla_sample(&self) -> SlaSample {
        SlaSample {
            priority: self.priority,
            status: self.status,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        }
    }
}

/// DTO for opening a ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTicket {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: TicketPriority,
    pub category: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: String,
}

fn default_priority() -> TicketPriority {
    TicketPriority::Medium
}

impl NewTicket {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        if self.created_by.trim().is_empty() {
            return Err(CoreError::Validation("created_by must not be empty".into()));
        }
        Ok(())
    }
}

/// DTO for a partial ticket update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<String>,
    pub assigned_to: Option<String>,
}

impl UpdateTicket {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        Ok(())
    }
}
