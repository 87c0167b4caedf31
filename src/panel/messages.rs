use crate::monitor::Control;

/// Events the host shell feeds into the panel.
#[derive(Clone, Debug)]
pub enum PanelMsg {
    /// A brightness or contrast slider moved.
    SliderChanged {
        monitor: usize,
        control: Control,
        value: u16,
    },
    /// The dimming slider moved.
    DimChanged { monitor: usize, percent: u16 },
    /// A full-screen overview UI came up; overlays get out of the way.
    OverviewShown,
    OverviewHidden,
}
