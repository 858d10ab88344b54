//! Stored entities and their create/update DTOs.

pub mod chat;
pub mod ticket;
pub mod user;

pub use chat::{ChatMessage, NewChatMessage};
pub use ticket::{NewTicket, Ticket, UpdateTicket};
pub use user::{NewUser, UpdateUser, User};
