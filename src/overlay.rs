//! Per-monitor screen-dimming overlay state.
//!
//! The dim slider does not touch monitor hardware at all: it drives a black
//! layer the host shell composites over the monitor. This module only tracks
//! whether that layer should currently be composited and at which opacity;
//! the actual actor is behind the [`Compositor`] trait.
//!
//! The layer is composited exactly when the slider is above zero and no
//! full-screen overview UI is covering the screen.

/// Host-side hook that realizes the overlay. Implementations draw a black
/// layer over the monitor at the given alpha, or remove it.
pub trait Compositor {
    fn show(&self, monitor: usize, alpha: u8);
    fn hide(&self, monitor: usize);
}

/// Dimming state of a single monitor.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayState {
    /// Dim slider position, 0..=100.
    percent: u16,
    /// Slider is above zero.
    active: bool,
    /// An overview UI is showing; the overlay stays out of the way.
    blocked: bool,
}

impl OverlayState {
    pub fn set_percent(&mut self, percent: u16) {
        self.percent = percent.min(100);
        self.active = self.percent > 0;
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn percent(&self) -> u16 {
        self.percent
    }

    /// Whether the layer should currently be drawn.
    pub fn composited(&self) -> bool {
        self.active && !self.blocked
    }

    /// Overlay alpha for the current slider position. `scale` maps percent to
    /// the 0..=255 alpha range, saturating at fully opaque.
    pub fn alpha(&self, scale: f32) -> u8 {
        (self.percent as f32 * scale).min(255.0) as u8
    }

    /// Push the current state to the compositor.
    pub fn apply(&self, compositor: &dyn Compositor, monitor: usize, scale: f32) {
        if self.composited() {
            compositor.show(monitor, self.alpha(scale));
        } else {
            compositor.hide(monitor);
        }
    }
}
