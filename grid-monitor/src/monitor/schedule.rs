use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Run `job` immediately and then once per `period`, forever.
///
/// A job is always awaited before the next tick is taken, so two jobs never
/// run at the same time. Ticks missed while a job was running are skipped.
pub async fn run_every<F, Fut>(period: Duration, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        job().await;
    }
}
