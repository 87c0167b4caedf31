// SPDX-License-Identifier: GPL-3.0-only
//! Owned registry of discovered monitors and their debounced setters.
//!
//! The registry is constructed from one discovery scan and dropped on panel
//! disable; there is no process-global state and no incremental add/remove
//! while running. It owns the per-(monitor, control) pending-timer table, so
//! tearing it down cancels every outstanding timer before the monitor list is
//! discarded.

use std::sync::Arc;
use std::time::Duration;

use crate::debounce::{Debouncer, Dispatch};
use crate::error::{PanelError, Result};

use super::{Control, Monitor};

/// Callback that applies a settled slider value to a monitor.
pub type SetDispatch = Arc<dyn Fn(&Monitor, Control, u16) + Send + Sync>;

pub struct Registry {
    monitors: Arc<Vec<Monitor>>,
    debouncer: Debouncer,
}

impl Registry {
    /// Build a registry over `monitors`. `apply` receives the final value of
    /// each settled slider burst together with the monitor it targets.
    pub fn new(monitors: Vec<Monitor>, delay: Duration, apply: SetDispatch) -> Self {
        let monitors = Arc::new(monitors);

        let lookup = Arc::clone(&monitors);
        let dispatch: Dispatch = Arc::new(move |(index, control), value| {
            if let Some(monitor) = lookup.get(index) {
                apply(monitor, control, value);
            }
        });

        Self {
            debouncer: Debouncer::new(delay, dispatch),
            monitors,
        }
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn get(&self, index: usize) -> Option<&Monitor> {
        self.monitors.get(index)
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Feed one slider value-changed event into the debouncer. Values above
    /// the VCP range are clamped to 100. Events for monitors that did not
    /// answer DDC/CI probes are dropped; such monitors have no sliders to
    /// move in the first place.
    pub fn set(&self, index: usize, control: Control, value: u16) -> Result<()> {
        let monitor = self
            .get(index)
            .ok_or(PanelError::UnknownMonitor(index))?;

        if !monitor.ddc_capable {
            debug!("ignoring {control} change for non-DDC monitor {index}");
            return Ok(());
        }

        self.debouncer.request((index, control), value.min(100));
        Ok(())
    }

    /// Number of (monitor, control) pairs with an armed debounce timer.
    pub fn pending_count(&self) -> usize {
        self.debouncer.pending_count()
    }

    /// Cancel all pending timers. Runs on panel disable, before the monitor
    /// list is discarded.
    pub fn shutdown(&self) {
        self.debouncer.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::{advance, sleep};

    const DELAY: Duration = Duration::from_millis(400);

    fn monitors() -> Vec<Monitor> {
        vec![
            Monitor {
                index: 0,
                bus: 4,
                name: "S24E650".into(),
                ddc_capable: true,
            },
            Monitor {
                index: 1,
                bus: 5,
                name: "LG HDR 4K".into(),
                ddc_capable: false,
            },
        ]
    }

    fn recording() -> (SetDispatch, Arc<Mutex<Vec<(u8, Control, u16)>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let apply: SetDispatch = Arc::new(move |monitor: &Monitor, control, value| {
            sink.lock().unwrap().push((monitor.bus, control, value));
        });
        (apply, log)
    }

    #[tokio::test(start_paused = true)]
    async fn settled_value_reaches_dispatch_with_bus() {
        let (apply, log) = recording();
        let registry = Registry::new(monitors(), DELAY, apply);

        registry.set(0, Control::Brightness, 80).unwrap();
        registry.set(0, Control::Brightness, 62).unwrap();
        sleep(DELAY + Duration::from_millis(10)).await;

        assert_eq!(*log.lock().unwrap(), vec![(4, Control::Brightness, 62)]);
    }

    #[tokio::test(start_paused = true)]
    async fn non_ddc_monitor_is_ignored() {
        let (apply, log) = recording();
        let registry = Registry::new(monitors(), DELAY, apply);

        registry.set(1, Control::Contrast, 30).unwrap();
        assert_eq!(registry.pending_count(), 0);

        sleep(DELAY * 2).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_index_is_an_error() {
        let (apply, _) = recording();
        let registry = Registry::new(monitors(), DELAY, apply);
        assert!(matches!(
            registry.set(9, Control::Brightness, 50),
            Err(PanelError::UnknownMonitor(9))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn values_clamp_to_vcp_range() {
        let (apply, log) = recording();
        let registry = Registry::new(monitors(), DELAY, apply);

        registry.set(0, Control::Contrast, 40_000).unwrap();
        sleep(DELAY + Duration::from_millis(10)).await;

        assert_eq!(*log.lock().unwrap(), vec![(4, Control::Contrast, 100)]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_in_flight_windows() {
        let (apply, log) = recording();
        let registry = Registry::new(monitors(), DELAY, apply);

        registry.set(0, Control::Brightness, 10).unwrap();
        registry.set(0, Control::Contrast, 20).unwrap();
        assert_eq!(registry.pending_count(), 2);

        registry.shutdown();
        assert_eq!(registry.pending_count(), 0);

        advance(DELAY * 4).await;
        tokio::task::yield_now().await;
        assert!(log.lock().unwrap().is_empty());
    }
}
