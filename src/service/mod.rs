//! Service layer: the UI bridge that ties console state to transport
//! events.

pub mod ui_bridge;

pub use ui_bridge::UiBridge;
