pub mod analytics;
pub mod auth;
pub mod chat;
pub mod monitoring;
pub mod preferences;
pub mod security;
pub mod tickets;
pub mod users;
