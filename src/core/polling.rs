use crate::core::traits::TradingAgency;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::warn;

/// Handle to a background ticker poll.
///
/// The task runs on the tokio runtime and delivers results over a bounded
/// channel, so a slow consumer applies backpressure instead of growing an
/// unbounded queue. Dropping the handle without calling
/// [`stop`](Self::stop) aborts the task on the next loop iteration (the
/// channel closes).
pub struct TickerPoll {
    receiver: mpsc::Receiver<Value>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TickerPoll {
    /// Receive the next polled ticker. `None` once the task has stopped.
    pub async fn recv(&mut self) -> Option<Value> {
        self.receiver.recv().await
    }

    /// Signal shutdown and wait for the task to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Poll `agency`'s ticker for `pair` on a fixed interval, publishing each
/// result on the returned handle's channel.
///
/// Network calls run entirely on the spawned task; a UI or CLI consumer
/// only ever touches the channel, never a blocking HTTP call.
pub fn spawn_ticker_poll(
    agency: Arc<dyn TradingAgency>,
    pair: String,
    interval: Duration,
) -> TickerPoll {
    let (tx, rx) = mpsc::channel(16);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match agency.get_ticker(&pair).await {
                        Ok(value) => {
                            if tx.send(value).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            // Polling is best-effort; a failed fetch is
                            // logged and the next tick tries again.
                            warn!(exchange = agency.exchange_name(), error = %e, "ticker poll failed");
                        }
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
    });

    TickerPoll {
        receiver: rx,
        shutdown: shutdown_tx,
        task,
    }
}
