mod messages;
mod state;
mod update;

pub use messages::PanelMsg;
pub use state::PanelState;
