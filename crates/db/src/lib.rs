//! Storage layer for the console.
//!
//! [`ConsoleStore`] is implemented twice: [`MemoryStore`] holds the seeded
//! mock data in process memory, [`PgStore`] issues one query per operation
//! against the hosted Postgres database.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{create_pool, health_check, run_migrations, DbPool, PgStore};
pub use store::ConsoleStore;
