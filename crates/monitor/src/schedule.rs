//! Interval loop shared by the scheduled jobs.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run `job` immediately and then every `period` until `cancel` fires.
///
/// A run that overruns its slot delays the next one instead of bursting.
pub async fn run_every<F, Fut>(name: &'static str, period: Duration, cancel: CancellationToken, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(job = name, "Scheduled job cancelled");
                break;
            }
            _ = interval.tick() => {
                job().await;
            }
        }
    }
}
