//! In-memory mock data store.
//!
//! Records live in plain vectors behind a single `RwLock`; every write is a
//! filter/map/replace over the vector. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use opsconsole_core::growth::GrowthPoint;
use opsconsole_core::profile::OperatorProfile;
use opsconsole_core::settings::ConsoleSettings;
use opsconsole_core::ticket::TicketFilter;
use opsconsole_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{
    ChatMessage, NewChatMessage, NewTicket, NewUser, Ticket, UpdateTicket, UpdateUser, User,
};
use crate::seed;
use crate::store::ConsoleStore;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tickets: Vec<Ticket>,
    chat_messages: Vec<ChatMessage>,
    growth: Vec<GrowthPoint>,
    settings: ConsoleSettings,
    profile: OperatorProfile,
}

impl Tables {
    fn next_id<T>(rows: &[T], id: impl Fn(&T) -> DbId) -> DbId {
        rows.iter().map(id).max().unwrap_or(0) + 1
    }

    fn email_taken(&self, email: &str, except: Option<DbId>) -> bool {
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email.trim()))
    }
}

/// Process-local [`ConsoleStore`] backed by vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// An empty store with default settings and profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the sample users, tickets and growth data.
    pub fn seeded() -> Self {
        Self {
            tables: RwLock::new(Tables {
                users: seed::users(),
                tickets: seed::tickets(),
                growth: seed::growth(),
                ..Tables::default()
            }),
        }
    }
}

#[async_trait]
impl ConsoleStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn get_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&input.email, None) {
            return Err(StoreError::Conflict(format!(
                "A user with email {} already exists",
                input.email
            )));
        }

        let user = User {
            id: Tables::next_id(&tables.users, |u| u.id),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            role: input.role,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &input.email {
            if tables.email_taken(email, Some(id)) {
                return Err(StoreError::Conflict(format!(
                    "A user with email {email} already exists"
                )));
            }
        }

        let Some(existing) = tables.users.iter().find(|u| u.id == id) else {
            return Ok(None);
        };
        let mut updated = existing.clone();
        updated.apply(input);

        tables.users = tables
            .users
            .iter()
            .map(|u| if u.id == id { updated.clone() } else { u.clone() })
            .collect();
        Ok(Some(updated))
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }

    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tickets
            .iter()
            .filter(|t| filter.matches(*t))
            .cloned()
            .collect())
    }

    async fn get_ticket(&self, id: DbId) -> Result<Option<Ticket>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn create_ticket(&self, input: &NewTicket) -> Result<Ticket, StoreError> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&tables.tickets, |t| t.id);
        let ticket = Ticket::open(id, input, Utc::now());
        tables.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket(
        &self,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.tickets.iter().find(|t| t.id == id) else {
            return Ok(None);
        };
        let mut updated = existing.clone();
        updated.apply(input, Utc::now());

        tables.tickets = tables
            .tickets
            .iter()
            .map(|t| if t.id == id { updated.clone() } else { t.clone() })
            .collect();
        Ok(Some(updated))
    }

    async fn delete_ticket(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.tickets.len();
        tables.tickets.retain(|t| t.id != id);
        Ok(tables.tickets.len() != before)
    }

    async fn save_chat_message(&self, input: &NewChatMessage) -> Result<ChatMessage, StoreError> {
        let mut tables = self.tables.write().await;
        let message = ChatMessage {
            id: Tables::next_id(&tables.chat_messages, |m| m.id),
            user_id: input.user_id,
            message: input.message.clone(),
            response: input.response.clone(),
            created_at: Utc::now(),
        };
        tables.chat_messages.push(message.clone());
        Ok(message)
    }

    async fn chat_history(&self, user_id: DbId) -> Result<Vec<ChatMessage>, StoreError> {
        let tables = self.tables.read().await;
        let mut history: Vec<ChatMessage> = tables
            .chat_messages
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by_key(|m| (m.created_at, m.id));
        Ok(history)
    }

    async fn growth_data(&self) -> Result<Vec<GrowthPoint>, StoreError> {
        Ok(self.tables.read().await.growth.clone())
    }

    async fn get_settings(&self) -> Result<ConsoleSettings, StoreError> {
        Ok(self.tables.read().await.settings.clone())
    }

    async fn save_settings(&self, settings: &ConsoleSettings) -> Result<ConsoleSettings, StoreError> {
        let mut tables = self.tables.write().await;
        tables.settings = settings.clone();
        Ok(tables.settings.clone())
    }

    async fn get_profile(&self) -> Result<OperatorProfile, StoreError> {
        Ok(self.tables.read().await.profile.clone())
    }

    async fn save_profile(&self, profile: &OperatorProfile) -> Result<OperatorProfile, StoreError> {
        let mut tables = self.tables.write().await;
        tables.profile = profile.clone();
        Ok(tables.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use opsconsole_core::ticket::{TicketPriority, TicketStatus};
    use opsconsole_core::user::UserRole;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Emma Davis".into(),
            email: email.into(),
            role: UserRole::Technician,
        }
    }

    #[tokio::test]
    async fn seeded_store_has_sample_data() {
        let store = MemoryStore::seeded();
        assert_eq!(store.list_users().await.unwrap().len(), 3);
        assert_eq!(store.list_tickets(&TicketFilter::default()).await.unwrap().len(), 5);
        assert_eq!(store.growth_data().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn search_treats_wildcard_characters_literally() {
        let store = MemoryStore::seeded();
        for term in ["%", "_", "VPN%"] {
            let filter = TicketFilter {
                search: Some(term.into()),
                ..Default::default()
            };
            assert!(store.list_tickets(&filter).await.unwrap().is_empty(), "{term}");
        }
    }

    #[tokio::test]
    async fn create_user_assigns_next_id_and_rejects_duplicate_email() {
        let store = MemoryStore::seeded();
        let user = store.create_user(&new_user("emma.davis@company.com")).await.unwrap();
        assert_eq!(user.id, 4);

        let dup = store.create_user(&new_user("EMMA.DAVIS@company.com")).await;
        assert_matches!(dup, Err(StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_user_replaces_in_place() {
        let store = MemoryStore::seeded();
        let update = UpdateUser {
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        let user = store.update_user(3, &update).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(store.get_user(3).await.unwrap().unwrap().role, UserRole::Admin);
        assert!(store.update_user(99, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_user_email_conflict_ignores_self() {
        let store = MemoryStore::seeded();
        let same = UpdateUser {
            email: Some("john.doe@company.com".into()),
            ..Default::default()
        };
        assert!(store.update_user(1, &same).await.is_ok());
        assert_matches!(store.update_user(2, &same).await, Err(StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::seeded();
        assert!(store.delete_user(2).await.unwrap());
        assert!(!store.delete_user(2).await.unwrap());
        assert!(store.delete_ticket(1).await.unwrap());
        assert!(store.get_ticket(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ticket_lifecycle() {
        let store = MemoryStore::new();
        let ticket = store
            .create_ticket(&NewTicket {
                title: "Laptop won't boot".into(),
                description: String::new(),
                priority: TicketPriority::High,
                category: None,
                assigned_to: None,
                created_by: "Alex Chen".into(),
            })
            .await
            .unwrap();
        assert_eq!(ticket.id, 1);

        let resolved = store
            .update_ticket(
                ticket.id,
                &UpdateTicket {
                    status: Some(TicketStatus::Resolved),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(resolved.resolved_at.is_some());
    }

    #[tokio::test]
    async fn list_tickets_applies_filter() {
        let store = MemoryStore::seeded();
        let filter = TicketFilter {
            status: Some(TicketStatus::Open),
            ..Default::default()
        };
        let open = store.list_tickets(&filter).await.unwrap();
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|t| t.status == TicketStatus::Open));
    }

    #[tokio::test]
    async fn chat_history_is_per_user_and_ordered() {
        let store = MemoryStore::new();
        for (user_id, text) in [(1, "first"), (2, "other"), (1, "second")] {
            store
                .save_chat_message(&NewChatMessage {
                    user_id,
                    message: text.into(),
                    response: "ok".into(),
                })
                .await
                .unwrap();
        }
        let history = store.chat_history(1).await.unwrap();
        let texts: Vec<_> = history.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let store = MemoryStore::new();
        let mut settings = store.get_settings().await.unwrap();
        settings.appearance.theme = "dark".into();
        store.save_settings(&settings).await.unwrap();
        assert_eq!(store.get_settings().await.unwrap().appearance.theme, "dark");
    }
}
