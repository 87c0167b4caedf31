// SPDX-License-Identifier: GPL-3.0-only
//! Trailing-edge debounce for slider-driven VCP writes.
//!
//! Slider drags produce a value-changed event per pixel of movement; monitor
//! hardware over DDC/CI can absorb a couple of writes per second at best. The
//! [`Debouncer`] coalesces each burst of events for a (monitor, control) pair
//! into a single command carrying the last value of the burst: the first event
//! of a burst arms a timer, later events only overwrite the pending value, and
//! the command is dispatched when the timer fires.
//!
//! Dispatch happens outside any pending-state bookkeeping. A burst that starts
//! right after the timer fired opens a fresh cycle while the previous command
//! may still be in flight; ddcutil tolerates that, so the pairs are not
//! serialized here.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::monitor::Control;

/// Key of one debounced control: (monitor index, control).
pub type PairKey = (usize, Control);

/// Callback invoked with the final value of a settled burst.
pub type Dispatch = Arc<dyn Fn(PairKey, u16) + Send + Sync>;

/// Handle on a scheduled one-shot task. Dropping the handle does not cancel
/// the task; only [`TimerHandle::cancel`] does.
pub struct TimerHandle(JoinHandle<()>);

impl TimerHandle {
    pub fn cancel(&self) {
        self.0.abort();
    }
}

/// Run `task` after `delay` unless the returned handle is cancelled first.
pub fn schedule<F>(delay: Duration, task: F) -> TimerHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    TimerHandle(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task.await;
    }))
}

struct Pending {
    /// Latest desired value; overwritten by every event in the burst.
    value: u16,
    timer: TimerHandle,
}

pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<HashMap<PairKey, Pending>>>,
    dispatch: Dispatch,
}

impl Debouncer {
    pub fn new(delay: Duration, dispatch: Dispatch) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            dispatch,
        }
    }

    /// Record `value` as the latest desired value for `key` and arm the
    /// pair's timer if none is pending.
    pub fn request(&self, key: PairKey, value: u16) {
        let mut pending = self.pending.lock().unwrap();

        if let Some(entry) = pending.get_mut(&key) {
            entry.value = value;
            return;
        }

        let map = Arc::clone(&self.pending);
        let dispatch = Arc::clone(&self.dispatch);
        let timer = schedule(self.delay, async move {
            // Clear the pending entry before dispatching so events arriving
            // from here on start a new cycle.
            let settled = map.lock().unwrap().remove(&key);
            if let Some(entry) = settled {
                (dispatch)(key, entry.value);
            }
        });

        pending.insert(key, Pending { value, timer });
    }

    /// Number of pairs with an armed timer.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Cancel every armed timer and drop the recorded values. Nothing is
    /// dispatched for cancelled pairs.
    pub fn cancel_all(&self) {
        let mut pending = self.pending.lock().unwrap();
        for (_, entry) in pending.drain() {
            entry.timer.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
