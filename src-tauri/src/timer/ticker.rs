use std::future::Future;

use tokio::{
    task::JoinHandle,
    time::{self, Duration, Instant},
};
use tokio_util::sync::CancellationToken;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Owned periodic tick source. Cancelled by `stop()` or when dropped, so a
/// handle can never outlive the running state that armed it.
pub struct TickerHandle {
    cancel_token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Calls `on_tick` once per `period`, first after one full period.
    /// The loop ends when `on_tick` resolves to `false` or the handle is stopped.
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        log_debug!("ticker cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        if !on_tick().await {
                            log_debug!("ticker finished");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            cancel_token,
            task: Some(task),
        }
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.cancel_token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.release();
    }
}
