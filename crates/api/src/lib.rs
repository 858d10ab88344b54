//! HTTP API for the OpsConsole IT-operations console.
//!
//! The binary in `main.rs` wires a [`ConsoleStore`](opsconsole_db::ConsoleStore),
//! the chat [`TextGenerator`](opsconsole_genai::TextGenerator) and the event
//! bus into [`state::AppState`], then serves [`router::build_app_router`].

pub mod alerts;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notifications;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
