//! Postgres-backed [`ConsoleStore`].

use async_trait::async_trait;
use opsconsole_core::growth::GrowthPoint;
use opsconsole_core::profile::OperatorProfile;
use opsconsole_core::settings::ConsoleSettings;
use opsconsole_core::ticket::{ticket_key, TicketFilter};
use opsconsole_core::types::{DbId, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use crate::error::StoreError;
use crate::models::{
    ChatMessage, NewChatMessage, NewTicket, NewUser, Ticket, UpdateTicket, UpdateUser, User,
};
use crate::store::ConsoleStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, name, email, role, created_at";

/// Column list for `tickets` queries.
const TICKET_COLUMNS: &str = "\
    id, title, description, status, priority, category, \
    assigned_to, created_by, created_at, updated_at, resolved_at";

/// Column list for `chat_messages` queries.
const CHAT_COLUMNS: &str = "id, user_id, message, response, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: DbId,
    name: String,
    email: String,
    role: String,
    created_at: Timestamp,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.parse().map_err(corrupt)?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: DbId,
    title: String,
    description: String,
    status: String,
    priority: String,
    category: Option<String>,
    assigned_to: Option<String>,
    created_by: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    resolved_at: Option<Timestamp>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = StoreError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: row.id,
            key: ticket_key(row.id),
            title: row.title,
            description: row.description,
            status: row.status.parse().map_err(corrupt)?,
            priority: row.priority.parse().map_err(corrupt)?,
            category: row.category,
            assigned_to: row.assigned_to,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            resolved_at: row.resolved_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ChatRow {
    id: DbId,
    user_id: DbId,
    message: String,
    response: String,
    created_at: Timestamp,
}

impl From<ChatRow> for ChatMessage {
    fn from(row: ChatRow) -> Self {
        ChatMessage {
            id: row.id,
            user_id: row.user_id,
            message: row.message,
            response: row.response,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GrowthRow {
    month: String,
    tickets: i32,
    resolved: i32,
    satisfaction: f64,
}

impl TryFrom<GrowthRow> for GrowthPoint {
    type Error = StoreError;

    fn try_from(row: GrowthRow) -> Result<Self, Self::Error> {
        Ok(GrowthPoint {
            tickets: u32::try_from(row.tickets).map_err(corrupt)?,
            resolved: u32::try_from(row.resolved).map_err(corrupt)?,
            month: row.month,
            satisfaction: row.satisfaction,
        })
    }
}

/// Escape `ILIKE` metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn corrupt(err: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(err.to_string())
}

/// Map a unique-constraint violation (SQLSTATE 23505) to a conflict.
fn map_unique(err: sqlx::Error, message: impl FnOnce() -> String) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            StoreError::Conflict(message())
        }
        _ => StoreError::Database(err),
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// [`ConsoleStore`] that issues one query per operation.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn load_document<T>(&self, table: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned + Send + Unpin + 'static,
    {
        let query = format!("SELECT data FROM {table} WHERE id = 1");
        let row: Option<(Json<T>,)> = sqlx::query_as(&query)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(doc),)| doc))
    }

    async fn store_document<T>(&self, table: &str, doc: &T) -> Result<(), StoreError>
    where
        T: Serialize + Sync,
    {
        let query = format!(
            "INSERT INTO {table} (id, data, updated_at) VALUES (1, $1, now()) \
             ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = now()"
        );
        sqlx::query(&query)
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ConsoleStore for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        health_check(&self.pool).await?;
        Ok(())
    }

    // -- users --

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn get_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (name, email, role) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_unique(e, || {
                    format!("A user with email {} already exists", input.email)
                })
            })?
            .try_into()
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<Option<User>, StoreError> {
        let query = format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                role = COALESCE($4, role) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.email.as_deref().map(str::trim))
            .bind(input.role.map(|r| r.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_unique(e, || {
                    format!(
                        "A user with email {} already exists",
                        input.email.as_deref().unwrap_or_default()
                    )
                })
            })?
            .map(User::try_from)
            .transpose()
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- tickets --

    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StoreError> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if search.is_some() {
            conditions.push(format!(
                "(title ILIKE ${bind_idx} ESCAPE '\\' \
                 OR description ILIKE ${bind_idx} ESCAPE '\\')"
            ));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.priority.is_some() {
            conditions.push(format!("priority = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {TICKET_COLUMNS} FROM tickets {where_clause} ORDER BY id");
        let mut q = sqlx::query_as::<_, TicketRow>(&query);

        // Bind dynamic parameters in order.
        if let Some(term) = search {
            q = q.bind(format!("%{}%", escape_like(term)));
        }
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            q = q.bind(priority.as_str());
        }

        q.fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Ticket::try_from)
            .collect()
    }

    async fn get_ticket(&self, id: DbId) -> Result<Option<Ticket>, StoreError> {
        let query = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Ticket::try_from)
            .transpose()
    }

    async fn create_ticket(&self, input: &NewTicket) -> Result<Ticket, StoreError> {
        let query = format!(
            "INSERT INTO tickets (\
                title, description, priority, category, assigned_to, created_by\
             ) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(input.title.trim())
            .bind(input.description.trim())
            .bind(input.priority.as_str())
            .bind(input.category.as_deref())
            .bind(input.assigned_to.as_deref())
            .bind(&input.created_by)
            .fetch_one(&self.pool)
            .await?
            .try_into()
    }

    async fn update_ticket(
        &self,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, StoreError> {
        // Resolution timestamp rules live on the model, so read-modify-write
        // inside one transaction.
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1 FOR UPDATE");
        let Some(row) = sqlx::query_as::<_, TicketRow>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut ticket = Ticket::try_from(row)?;
        ticket.apply(input, chrono::Utc::now());

        let update = format!(
            "UPDATE tickets SET \
                title = $2, description = $3, status = $4, priority = $5, \
                category = $6, assigned_to = $7, updated_at = $8, resolved_at = $9 \
             WHERE id = $1 \
             RETURNING {TICKET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TicketRow>(&update)
            .bind(id)
            .bind(&ticket.title)
            .bind(&ticket.description)
            .bind(ticket.status.as_str())
            .bind(ticket.priority.as_str())
            .bind(ticket.category.as_deref())
            .bind(ticket.assigned_to.as_deref())
            .bind(ticket.updated_at)
            .bind(ticket.resolved_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ticket::try_from(row).map(Some)
    }

    async fn delete_ticket(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- chat --

    async fn save_chat_message(&self, input: &NewChatMessage) -> Result<ChatMessage, StoreError> {
        let query = format!(
            "INSERT INTO chat_messages (user_id, message, response) VALUES ($1, $2, $3) \
             RETURNING {CHAT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ChatRow>(&query)
            .bind(input.user_id)
            .bind(&input.message)
            .bind(&input.response)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn chat_history(&self, user_id: DbId) -> Result<Vec<ChatMessage>, StoreError> {
        let query = format!(
            "SELECT {CHAT_COLUMNS} FROM chat_messages WHERE user_id = $1 \
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, ChatRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    // -- analytics and preferences --

    async fn growth_data(&self) -> Result<Vec<GrowthPoint>, StoreError> {
        sqlx::query_as::<_, GrowthRow>(
            "SELECT month, tickets, resolved, satisfaction FROM growth_metrics \
             ORDER BY month_start",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(GrowthPoint::try_from)
        .collect()
    }

    async fn get_settings(&self) -> Result<ConsoleSettings, StoreError> {
        Ok(self
            .load_document("console_settings")
            .await?
            .unwrap_or_default())
    }

    async fn save_settings(&self, settings: &ConsoleSettings) -> Result<ConsoleSettings, StoreError> {
        self.store_document("console_settings", settings).await?;
        Ok(settings.clone())
    }

    async fn get_profile(&self) -> Result<OperatorProfile, StoreError> {
        Ok(self
            .load_document("operator_profile")
            .await?
            .unwrap_or_default())
    }

    async fn save_profile(&self, profile: &OperatorProfile) -> Result<OperatorProfile, StoreError> {
        self.store_document("operator_profile", profile).await?;
        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    #[test]
    fn search_wildcards_are_escaped() {
        assert_eq!(escape_like("50%"), r"50\%");
        assert_eq!(escape_like("user_name"), r"user\_name");
        assert_eq!(escape_like(r"C:\temp"), r"C:\\temp");
        assert_eq!(escape_like("VPN"), "VPN");
    }

    #[test]
    fn corrupt_status_is_reported() {
        let row = TicketRow {
            id: 1,
            title: "t".into(),
            description: String::new(),
            status: "critical".into(),
            priority: "high".into(),
            category: None,
            assigned_to: None,
            created_by: "x".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            resolved_at: None,
        };
        assert_matches!(Ticket::try_from(row), Err(StoreError::Corrupt(_)));
    }

    #[test]
    fn ticket_row_gets_display_key() {
        let row = TicketRow {
            id: 12,
            title: "t".into(),
            description: String::new(),
            status: "in_progress".into(),
            priority: "low".into(),
            category: None,
            assigned_to: None,
            created_by: "x".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            resolved_at: None,
        };
        let ticket = Ticket::try_from(row).unwrap();
        assert_eq!(ticket.key, "TK-012");
    }

    #[test]
    fn negative_growth_count_is_corrupt() {
        let row = GrowthRow {
            month: "Jan".into(),
            tickets: -1,
            resolved: 0,
            satisfaction: 4.0,
        };
        assert_matches!(GrowthPoint::try_from(row), Err(StoreError::Corrupt(_)));
    }
}
