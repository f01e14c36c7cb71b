//! Cancellable deadline shared between a timer task and an in-flight call.
//!
//! [`Deadline::arm`] spawns a timer that cancels a [`CancellationToken`]
//! once the duration elapses. Dropping the deadline aborts the timer, so it
//! can never fire after the guarded call has settled.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Outcome of racing a future against a [`Deadline`].
#[derive(Debug, PartialEq, Eq)]
pub enum Raced<T> {
    Completed(T),
    Expired,
}

pub struct Deadline {
    token: CancellationToken,
    timer: JoinHandle<()>,
    after: Duration,
}

impl Deadline {
    /// Start the timer. Must be called inside a tokio runtime.
    pub fn arm(after: Duration) -> Self {
        let token = CancellationToken::new();
        let fire = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            trace!(after_ms = after.as_millis() as u64, "Deadline fired");
            fire.cancel();
        });

        Self {
            token,
            timer,
            after,
        }
    }

    pub fn after(&self) -> Duration {
        self.after
    }

    #[cfg(test)]
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Race `fut` against the timer. The first to settle decides the result;
    /// the loser is dropped and the timer is disarmed either way.
    pub async fn race<F: Future>(self, fut: F) -> Raced<F::Output> {
        let raced = tokio::select! {
            output = fut => Raced::Completed(output),
            () = self.token.cancelled() => Raced::Expired,
        };
        drop(self);
        raced
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_duration() {
        let deadline = Deadline::arm(Duration::from_millis(10));
        let token = deadline.token().clone();
        token.cancelled().await;
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn fast_future_wins_and_disarms_timer() {
        let deadline = Deadline::arm(Duration::from_millis(50));
        let token = deadline.token().clone();

        let raced = deadline.race(async { 7 }).await;
        assert_eq!(raced, Raced::Completed(7));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_future_loses_to_timer() {
        let deadline = Deadline::arm(Duration::from_millis(10));
        let raced = deadline
            .race(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                "late"
            })
            .await;
        assert_eq!(raced, Raced::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_disarms_timer() {
        let deadline = Deadline::arm(Duration::from_millis(10));
        let token = deadline.token().clone();
        drop(deadline);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!token.is_cancelled());
    }
}
