use crate::panel::messages::PanelMsg;
use crate::panel::state::PanelState;

impl PanelState {
    /// Handle one host-shell event. Runs synchronously on the event loop;
    /// anything slow (the actual ddcutil write) happens later, after the
    /// debounce window.
    pub fn update(&mut self, message: PanelMsg) {
        debug!("{message:?}");

        match message {
            PanelMsg::SliderChanged {
                monitor,
                control,
                value,
            } => {
                let value = value.min(100);
                match self.registry.set(monitor, control, value) {
                    Ok(()) => {
                        self.sliders.insert((monitor, control), value);
                    }
                    Err(err) => warn!("dropping slider change: {err}"),
                }
            }
            PanelMsg::DimChanged { monitor, percent } => {
                let Some(overlay) = self.overlays.get_mut(monitor) else {
                    warn!("dropping dim change for unknown monitor {monitor}");
                    return;
                };
                overlay.set_percent(percent);
                overlay.apply(
                    self.compositor.as_ref(),
                    monitor,
                    self.config.dim_alpha_scale,
                );
            }
            PanelMsg::OverviewShown => self.set_overview(true),
            PanelMsg::OverviewHidden => self.set_overview(false),
        }
    }

    fn set_overview(&mut self, showing: bool) {
        for (index, overlay) in self.overlays.iter_mut().enumerate() {
            overlay.set_blocked(showing);
            overlay.apply(
                self.compositor.as_ref(),
                index,
                self.config.dim_alpha_scale,
            );
        }
    }
}
