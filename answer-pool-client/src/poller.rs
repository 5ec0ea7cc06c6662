use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::form::AllocationForm;

/// Background refresh of a shared form. Aborted on drop.
pub struct PollerHandle {
    handle: JoinHandle<()>,
    refreshed: watch::Receiver<u64>,
}

impl PollerHandle {
    /// Ticks once per applied fetch; the value counts fetches so far
    pub fn refreshed(&self) -> watch::Receiver<u64> {
        self.refreshed.clone()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Refreshes `form` right away and then every `period`.
///
/// The form is not locked while a fetch is in flight, so the user can keep
/// editing. Fetches are never cancelled: whichever resolves last overwrites
/// the list.
pub fn spawn_poller(form: Arc<Mutex<AllocationForm>>, period: Duration) -> PollerHandle {
    let (tx, rx) = watch::channel(0u64);

    let handle = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut count = 0u64;

        loop {
            ticker.tick().await;

            let source = form.lock().await.source();
            let result = source.fetch_answers().await;
            form.lock().await.apply_fetch(result);

            count += 1;
            debug!(refresh = count, "Polled answers");
            if tx.send(count).is_err() {
                debug!("No one is watching refreshes");
            }
        }
    });

    PollerHandle {
        handle,
        refreshed: rx,
    }
}
