//! Background expiry sweep for the session store
//!
//! The sweep task runs for the whole lifetime of the store, whether or not the
//! store was enabled when it was built. Each tick checks the current flag and
//! skips the scan while state management is off.

use crate::session::store::SessionStore;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

impl SessionStore {
    /// Starts the periodic sweep task.
    ///
    /// The first tick fires one full interval after the call. Returns a
    /// JoinHandle for graceful shutdown coordination and a shutdown sender
    /// to signal the task to stop.
    pub fn start_sweep_task(&self) -> (JoinHandle<()>, mpsc::Sender<()>) {
        let store = self.clone();
        let period = self.config().sweep_interval.max(Duration::from_millis(1));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = store.sweep_expired().await;
                        if removed > 0 {
                            info!(removed = removed, "Expired sessions swept");
                        } else {
                            debug!("Sweep tick found no expired sessions");
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!("Sweep task received shutdown signal, stopping");
                        break;
                    }
                }
            }
        });

        (handle, shutdown_tx)
    }
}
