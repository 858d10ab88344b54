//! Persisted chat exchanges.

use opsconsole_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub user_id: DbId,
    pub message: String,
    pub response: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: DbId,
    pub message: String,
    pub response: String,
}
