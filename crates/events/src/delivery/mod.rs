//! Channels that push events outside the console.

pub mod email;
pub mod webhook;
