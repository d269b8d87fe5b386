//! Practice Board
//!
//! The board shows one character at a time through an injected stroke widget
//! and runs the demonstration and quiz flows on it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               BoardController                │
//! │   state + StatusText + CallbackTicket gen    │
//! │        │ commands            ▲ WidgetEvent   │
//! │        ▼                     │ (via sink)    │
//! │   Box<dyn StrokeWidget> ─────┘               │
//! │        ▲                                     │
//! │   Box<dyn WidgetFactory> (one widget/char)   │
//! └──────────────────────────────────────────────┘
//! ```

mod controller;
mod widget;

pub use controller::{BoardController, BoardOutcome, BoardState, StatusText};
pub use widget::{
    parse_hex_color, CallbackTicket, StrokeWidget, WidgetError, WidgetEvent, WidgetFactory,
    WidgetOptions, WidgetSink,
};
