//! Hanzi TUI - Terminal practice board for Chinese stroke order
//!
//! This crate is a thin terminal surface over the `hanzi-conductor` core.
//!
//! # Architecture
//!
//! - **App**: event loop, key bindings, layout
//! - **ConductorClient**: the embedded Conductor
//! - **Display**: state rebuilt from `ConductorMessage`s
//! - **Widgets**: the terminal stroke pad and the character info panel

pub mod app;
pub mod conductor_client;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use conductor_client::ConductorClient;
pub use display::DisplayState;
