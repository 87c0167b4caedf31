// SPDX-License-Identifier: GPL-3.0-only
//! Panel core for DDC/CI monitor control.
//!
//! Discovers DDC/CI-capable monitors through the `ddcutil` command-line
//! utility, exposes debounced per-monitor brightness/contrast setters meant to
//! sit behind UI sliders, and tracks a per-monitor screen-dimming overlay.
//! The host shell only has to render labeled sliders and feed the resulting
//! value-changed events into [`panel::PanelState::update`].

#[macro_use]
extern crate tracing;

pub mod config;
pub mod ddcutil;
pub mod debounce;
pub mod error;
pub mod monitor;
pub mod overlay;
pub mod panel;
