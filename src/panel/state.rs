// SPDX-License-Identifier: GPL-3.0-only
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::ddcutil::DdcutilClient;
use crate::monitor::{Control, Monitor, Registry, SetDispatch};
use crate::overlay::{Compositor, OverlayState};

/// Panel state: the monitor registry, per-monitor overlay states, and the
/// last slider values known to the UI.
///
/// Constructed on enable, dropped on disable. The host shell renders one
/// labeled slider per (monitor, control) plus one dim slider per monitor and
/// forwards value-changed events through [`PanelState::update`].
pub struct PanelState {
    pub(super) config: Config,
    client: DdcutilClient,
    pub(super) registry: Registry,
    pub(super) overlays: Vec<OverlayState>,
    pub(super) compositor: Box<dyn Compositor>,
    /// Last value per slider, seeded from hardware reads.
    pub(super) sliders: HashMap<(usize, Control), u16>,
}

impl PanelState {
    /// Discover monitors, build the registry, and seed slider values from the
    /// hardware. Discovery failure yields a panel with zero monitors.
    pub async fn enable(config: Config, compositor: Box<dyn Compositor>) -> Self {
        let client = DdcutilClient::new(config.ddcutil_path.clone());
        let monitors = crate::monitor::discover(&client).await;

        let dispatch_client = client.clone();
        let apply: SetDispatch = Arc::new(move |monitor: &Monitor, control, value| {
            let client = dispatch_client.clone();
            let bus = monitor.bus;
            tokio::spawn(async move {
                if let Err(err) = client.set_vcp(control, value, bus).await {
                    error!("can't set {control} on bus {bus}: {err}");
                }
            });
        });

        let mut state = Self::assemble(config, client, monitors, apply, compositor);
        state.reseed().await;
        state
    }

    pub(super) fn assemble(
        config: Config,
        client: DdcutilClient,
        monitors: Vec<Monitor>,
        apply: SetDispatch,
        compositor: Box<dyn Compositor>,
    ) -> Self {
        let overlays = vec![OverlayState::default(); monitors.len()];
        let registry = Registry::new(monitors, config.debounce(), apply);

        Self {
            config,
            client,
            registry,
            overlays,
            compositor,
            sliders: HashMap::new(),
        }
    }

    pub fn monitors(&self) -> &[Monitor] {
        self.registry.monitors()
    }

    /// Last known slider value for a control, if the monitor answered the
    /// seeding read.
    pub fn slider_value(&self, monitor: usize, control: Control) -> Option<u16> {
        self.sliders.get(&(monitor, control)).copied()
    }

    pub fn dim_percent(&self, monitor: usize) -> Option<u16> {
        self.overlays.get(monitor).map(|overlay| overlay.percent())
    }

    /// Number of slider bursts still waiting out their debounce window.
    pub fn pending_count(&self) -> usize {
        self.registry.pending_count()
    }

    /// Re-read brightness and contrast for every DDC-capable monitor.
    pub async fn reseed(&mut self) {
        let monitors: Vec<(usize, u8)> = self
            .registry
            .monitors()
            .iter()
            .filter(|monitor| monitor.ddc_capable)
            .map(|monitor| (monitor.index, monitor.bus))
            .collect();

        for (index, bus) in monitors {
            for control in Control::ALL {
                match self.client.get_vcp(control, bus).await {
                    Ok(value) => {
                        self.sliders.insert((index, control), value);
                    }
                    Err(err) => {
                        warn!("can't read {control} of monitor {index} on bus {bus}: {err}");
                    }
                }
            }
        }
    }

    /// Tear the panel down: cancel every pending debounce timer, then drop
    /// the overlays and the registry. No command is dispatched past this
    /// point, even for windows that were in progress.
    pub fn disable(mut self) {
        self.registry.shutdown();

        for (index, overlay) in self.overlays.iter_mut().enumerate() {
            overlay.set_percent(0);
            overlay.apply(self.compositor.as_ref(), index, self.config.dim_alpha_scale);
        }
        self.overlays.clear();
        self.sliders.clear();
    }
}
