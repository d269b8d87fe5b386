//! Board and panel widgets

pub mod info_panel;
pub mod stroke_pad;

pub use info_panel::InfoPanel;
pub use stroke_pad::{StrokePad, StrokePadView, TerminalWidget, TerminalWidgetFactory};
