use async_trait::async_trait;
use opsconsole_core::growth::GrowthPoint;
use opsconsole_core::profile::OperatorProfile;
use opsconsole_core::settings::ConsoleSettings;
use opsconsole_core::ticket::TicketFilter;
use opsconsole_core::types::DbId;

use crate::error::StoreError;
use crate::models::{
    ChatMessage, NewChatMessage, NewTicket, NewUser, Ticket, UpdateTicket, UpdateUser, User,
};

/// Storage operations behind the console API.
///
/// Lookups by id return `Ok(None)` (or `Ok(false)` for deletes) when the
/// row does not exist; callers map that to a not-found error.
#[async_trait]
pub trait ConsoleStore: Send + Sync {
    /// Cheap round-trip used by the `/health` endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;

    // -- users --
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn get_user(&self, id: DbId) -> Result<Option<User>, StoreError>;
    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError>;
    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<Option<User>, StoreError>;
    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError>;

    // -- tickets --
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError>;
    async fn get_ticket(&self, id: DbId) -> Result<Option<Ticket>, StoreError>;
    async fn create_ticket(&self, input: &NewTicket) -> Result<Ticket, StoreError>;
    async fn update_ticket(
        &self,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, StoreError>;
    async fn delete_ticket(&self, id: DbId) -> Result<bool, StoreError>;

    // -- chat --
    async fn save_chat_message(&self, input: &NewChatMessage) -> Result<ChatMessage, StoreError>;
    /// A user's exchanges, oldest first.
    async fn chat_history(&self, user_id: DbId) -> Result<Vec<ChatMessage>, StoreError>;

    // -- analytics and preferences --
    /// Monthly growth points, oldest first.
    async fn growth_data(&self) -> Result<Vec<GrowthPoint>, StoreError>;
    async fn get_settings(&self) -> Result<ConsoleSettings, StoreError>;
    async fn save_settings(&self, settings: &ConsoleSettings) -> Result<ConsoleSettings, StoreError>;
    async fn get_profile(&self) -> Result<OperatorProfile, StoreError>;
    async fn save_profile(&self, profile: &OperatorProfile) -> Result<OperatorProfile, StoreError>;
}
