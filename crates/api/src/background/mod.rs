//! Background tasks and scheduled jobs.
//!
//! Each submodule provides long-running async work intended to be spawned
//! via `tokio::spawn`. All tasks accept a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! for graceful shutdown.

pub mod monitor;
