//! TUI widgets

pub mod input;
pub mod narrative;
pub mod status_bar;

pub use input::InputWidget;
pub use narrative::NarrativeWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
