//! Board Controller
//!
//! Owns the stroke widget for the active character and mediates between the
//! demonstration and quiz flows.
//!
//! # State Machine
//!
//! ```text
//!                 set_character (widget created)
//!   Uninitialized ─────────────┬──────────────────────┐
//!        │                     ▼                      ▼
//!        │              Demonstrating ◄──────────► Quizzing
//!        │                     ▲   set_mode          │
//!        │                     └─────────────────────┘
//!        │                          QuizComplete
//!        │  set_character (creation failed)
//!        └──────────────────────► Degraded
//! ```
//!
//! Any character change tears the widget down and builds a new one, from
//! every state including `Degraded`.

use serde::{Deserialize, Serialize};

use super::widget::{
    CallbackTicket, StrokeWidget, WidgetEvent, WidgetFactory, WidgetOptions, WidgetSink,
};
use crate::character::Character;
use crate::messages::Mode;

/// Board lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardState {
    /// No character has been set yet
    Uninitialized,
    /// Showing the glyph or playing the animation
    Demonstrating,
    /// Interactive quiz running
    Quizzing,
    /// Widget could not be built for the current character
    Degraded,
}

/// Status line shown under the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusText {
    /// Fresh board, waiting for a mode
    #[default]
    Ready,
    /// Animation playing
    Watching,
    /// Animation finished, nudging the user to try
    YourTurnAfterDemo,
    /// Quiz running
    Tracing,
    /// Quiz finished without mistakes
    QuizPerfect,
    /// Quiz finished with at least one mistake
    QuizGood,
    /// Widget construction failed
    LoadFailed,
}

impl StatusText {
    /// The user-facing sentence
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ready => "准备好了吗？选择一个模式开始吧！",
            Self::Watching => "仔细看哦，笔画是这样写的~",
            Self::YourTurnAfterDemo => "看清楚了吗？试试自己写写看！",
            Self::Tracing => "轮到你了！请在方格里跟着写。",
            Self::QuizPerfect => "太棒了！写得完美哦！",
            Self::QuizGood => "太棒了！写得不错哦！",
            Self::LoadFailed => "哎呀，无法加载这个字的笔画数据。",
        }
    }

    /// Result line for a finished quiz
    #[must_use]
    pub fn for_quiz_result(total_mistakes: u32) -> Self {
        if total_mistakes == 0 {
            Self::QuizPerfect
        } else {
            Self::QuizGood
        }
    }
}

/// What the board asks of its owner after handling a widget event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardOutcome {
    /// The owner should switch its mode
    RequestMode(Mode),
}

/// Drives one stroke widget per character
pub struct BoardController {
    /// Creates a widget per character
    factory: Box<dyn WidgetFactory>,
    /// Options handed to the factory
    options: WidgetOptions,
    /// Where widgets report completions
    sink: WidgetSink,
    /// Widget for the current character
    widget: Option<Box<dyn StrokeWidget>>,
    /// Current character
    character: Option<Character>,
    state: BoardState,
    status: StatusText,
    /// Last ticket handed out
    issued: u64,
    /// Ticket whose completion is still awaited
    pending: Option<CallbackTicket>,
}

impl BoardController {
    /// Create a board with no character
    pub fn new(factory: Box<dyn WidgetFactory>, options: WidgetOptions, sink: WidgetSink) -> Self {
        Self {
            factory,
            options,
            sink,
            widget: None,
            character: None,
            state: BoardState::Uninitialized,
            status: StatusText::Ready,
            issued: 0,
            pending: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Current status line
    pub fn status(&self) -> StatusText {
        self.status
    }

    /// Current character, if any
    pub fn character(&self) -> Option<Character> {
        self.character
    }

    /// Mode the board is currently showing (None before a widget exists)
    pub fn mode(&self) -> Option<Mode> {
        match self.state {
            BoardState::Demonstrating => Some(Mode::Demonstration),
            BoardState::Quizzing => Some(Mode::Quiz),
            BoardState::Uninitialized | BoardState::Degraded => None,
        }
    }

    /// Point the board at a character
    ///
    /// A different character tears down the old widget and builds a new one,
    /// then enters the flow for `mode`. The same character with a live widget
    /// only applies `mode`; a degraded board retries construction.
    pub fn set_character(&mut self, character: Character, mode: Mode) {
        if self.character == Some(character) && self.widget.is_some() {
            self.set_mode(mode);
            return;
        }

        self.teardown();
        self.character = Some(character);
        self.status = StatusText::Ready;

        match self.factory.create(&character, &self.options) {
            Ok(widget) => {
                tracing::debug!(character = %character, ?mode, "Stroke widget created");
                self.widget = Some(widget);
                match mode {
                    Mode::Demonstration => self.demonstrate(),
                    Mode::Quiz => self.start_quiz(),
                }
            }
            Err(e) => {
                tracing::warn!(character = %character, error = %e, "Stroke widget unavailable");
                self.state = BoardState::Degraded;
                self.status = StatusText::LoadFailed;
            }
        }
    }

    /// Switch between demonstration and quiz
    ///
    /// Selecting the mode the board is already in does nothing, and a board
    /// without a widget ignores mode changes until the character changes.
    pub fn set_mode(&mut self, mode: Mode) {
        match (self.state, mode) {
            (BoardState::Uninitialized | BoardState::Degraded, _) => {
                tracing::debug!(state = ?self.state, ?mode, "Ignoring mode change without a widget");
            }
            (BoardState::Demonstrating, Mode::Demonstration)
            | (BoardState::Quizzing, Mode::Quiz) => {}
            (_, Mode::Demonstration) => self.demonstrate(),
            (_, Mode::Quiz) => self.start_quiz(),
        }
    }

    /// Handle a completion callback from a widget
    ///
    /// Events for superseded tickets, or arriving in a state that no longer
    /// expects them, are dropped.
    pub fn handle_widget_event(&mut self, event: WidgetEvent) -> Option<BoardOutcome> {
        if self.pending != Some(event.ticket()) {
            tracing::debug!(?event, pending = ?self.pending, "Dropping stale widget event");
            return None;
        }

        match (event, self.state) {
            (WidgetEvent::AnimationComplete { .. }, BoardState::Demonstrating) => {
                self.pending = None;
                self.status = StatusText::YourTurnAfterDemo;
                None
            }
            (WidgetEvent::QuizComplete { total_mistakes, .. }, BoardState::Quizzing) => {
                self.pending = None;
                if let Some(widget) = self.widget.as_mut() {
                    widget.show_character();
                }
                self.status = StatusText::for_quiz_result(total_mistakes);
                self.state = BoardState::Demonstrating;
                tracing::debug!(total_mistakes, "Quiz complete");
                Some(BoardOutcome::RequestMode(Mode::Demonstration))
            }
            (event, state) => {
                tracing::debug!(?event, ?state, "Widget event does not apply in this state");
                None
            }
        }
    }

    /// Cancel any running quiz and drop the widget
    fn teardown(&mut self) {
        if let Some(mut widget) = self.widget.take() {
            widget.cancel_quiz();
        }
        self.pending = None;
    }

    fn next_ticket(&mut self) -> CallbackTicket {
        self.issued += 1;
        let ticket = CallbackTicket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    fn demonstrate(&mut self) {
        let ticket = self.next_ticket();
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        widget.cancel_quiz();
        widget.show_character();
        widget.animate_character(ticket, self.sink.clone());
        self.state = BoardState::Demonstrating;
        self.status = StatusText::Watching;
    }

    fn start_quiz(&mut self) {
        let ticket = self.next_ticket();
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        widget.quiz(ticket, self.sink.clone());
        self.state = BoardState::Quizzing;
        self.status = StatusText::Tracing;
    }
}

impl Drop for BoardController {
    fn drop(&mut self) {
        self.teardown();
    }
}
