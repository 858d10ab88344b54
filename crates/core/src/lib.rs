//! Domain logic for the OpsConsole IT-operations console.
//!
//! Everything in this crate is pure: no network, no storage. Handlers and
//! monitoring jobs fetch data elsewhere and pass it in.

pub mod alert;
pub mod chat;
pub mod dashboard;
pub mod error;
pub mod growth;
pub mod health;
pub mod password;
pub mod performance;
pub mod profile;
pub mod security;
pub mod settings;
pub mod signature;
pub mod sla;
pub mod ticket;
pub mod types;
pub mod user;
