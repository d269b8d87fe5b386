//! Terminal Stroke Pad
//!
//! The terminal's stroke widget. A terminal cannot draw individual strokes,
//! so the pad shows the glyph on a practice grid and models the two flows
//! with time and keys:
//!
//! - **Demonstration**: a timed reveal whose length follows
//!   `stroke_animation_speed` and `delay_between_strokes_ms`. Completion is
//!   reported from [`StrokePad::tick`].
//! - **Quiz**: keyboard tracing (Space = stroke traced, `x` = miss,
//!   Enter = finish). Completion reports the mistake count.
//!
//! The board owns the [`TerminalWidget`]s; the app keeps a [`StrokePad`]
//! handle to the same state for ticking, quiz keys, and drawing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

use hanzi_conductor::{
    CallbackTicket, Character, StrokeWidget, WidgetError, WidgetEvent, WidgetFactory,
    WidgetOptions, WidgetSink,
};

use crate::theme::{board_colors, DIM_GRAY, GRID, OUTLINE};

/// Steps in the demonstration reveal
pub const REVEAL_STEPS: u32 = 8;

/// Length of one reveal step at speed 1.0, before the inter-stroke delay
const BASE_STEP_MS: f64 = 250.0;

/// How long the demonstration reveal runs for these options
pub fn animation_duration(options: &WidgetOptions) -> Duration {
    let step_ms =
        BASE_STEP_MS / options.stroke_animation_speed + options.delay_between_strokes_ms as f64;
    Duration::from_millis((step_ms * f64::from(REVEAL_STEPS)).round() as u64)
}

/// What the pad is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadPhase {
    /// Nothing to draw
    Empty,
    /// Faint outline only
    Outline,
    /// Complete glyph
    Static,
    /// Demonstration reveal in progress
    Animating {
        /// When the reveal started
        started: Instant,
    },
    /// Tracing in progress
    Quizzing {
        /// Strokes traced so far
        traced: u32,
        /// Misses so far
        mistakes: u32,
    },
    /// Tracing finished
    Finished {
        /// Misses over the whole quiz
        mistakes: u32,
    },
}

/// Callback owed to the board for the running flow
struct Pending {
    ticket: CallbackTicket,
    sink: WidgetSink,
}

/// Shared pad state
struct PadState {
    /// Widget currently allowed to drive the pad
    instance: u64,
    character: Option<Character>,
    options: WidgetOptions,
    phase: PadPhase,
    pending: Option<Pending>,
}

impl Default for PadState {
    fn default() -> Self {
        Self {
            instance: 0,
            character: None,
            options: WidgetOptions::default(),
            phase: PadPhase::Empty,
            pending: None,
        }
    }
}

impl PadState {
    /// Phase to rest in when no flow is running
    fn resting_phase(&self) -> PadPhase {
        if self.options.show_character {
            PadPhase::Static
        } else if self.options.show_outline {
            PadPhase::Outline
        } else {
            PadPhase::Empty
        }
    }

    /// Hand the owed callback back to the board
    fn report(&mut self, event: impl FnOnce(CallbackTicket) -> WidgetEvent) {
        if let Some(pending) = self.pending.take() {
            if pending.sink.send(event(pending.ticket)).is_err() {
                tracing::debug!("Board dropped before widget callback");
            }
        }
    }
}

/// Read-only copy of the pad for drawing
#[derive(Clone, Debug)]
pub struct PadSnapshot {
    /// Character on the pad
    pub character: Option<Character>,
    /// Current phase
    pub phase: PadPhase,
    /// Options the widget was created with
    pub options: WidgetOptions,
}

impl PadSnapshot {
    /// Fraction of the reveal shown at `now` (1.0 outside a demonstration)
    pub fn reveal_progress(&self, now: Instant) -> f64 {
        match self.phase {
            PadPhase::Animating { started } => {
                let total = animation_duration(&self.options).as_secs_f64();
                if total <= 0.0 {
                    1.0
                } else {
                    (now.saturating_duration_since(started).as_secs_f64() / total).min(1.0)
                }
            }
            _ => 1.0,
        }
    }
}

/// Handle to the terminal board shared by the app and the widgets
#[derive(Clone, Default)]
pub struct StrokePad {
    state: Arc<Mutex<PadState>>,
}

impl StrokePad {
    /// Create an empty pad
    pub fn new() -> Self {
        Self::default()
    }

    /// Widget factory handed to the Conductor
    pub fn factory(&self) -> TerminalWidgetFactory {
        TerminalWidgetFactory { pad: self.clone() }
    }

    /// Advance the demonstration; reports completion once the reveal ends
    pub fn tick(&self, now: Instant) {
        let mut state = self.state.lock();
        if let PadPhase::Animating { started } = state.phase {
            if now.saturating_duration_since(started) >= animation_duration(&state.options) {
                state.phase = PadPhase::Static;
                state.report(|ticket| WidgetEvent::AnimationComplete { ticket });
            }
        }
    }

    /// Whether quiz keys should go to the pad
    pub fn is_quizzing(&self) -> bool {
        matches!(self.state.lock().phase, PadPhase::Quizzing { .. })
    }

    /// Record a traced stroke
    pub fn trace_stroke(&self) {
        if let PadPhase::Quizzing { traced, .. } = &mut self.state.lock().phase {
            *traced += 1;
        }
    }

    /// Record a missed stroke
    pub fn miss_stroke(&self) {
        if let PadPhase::Quizzing { mistakes, .. } = &mut self.state.lock().phase {
            *mistakes += 1;
        }
    }

    /// Finish tracing and report the score; false if no quiz was running
    pub fn finish_quiz(&self) -> bool {
        let mut state = self.state.lock();
        let PadPhase::Quizzing { mistakes, .. } = state.phase else {
            return false;
        };
        state.phase = PadPhase::Finished { mistakes };
        state.report(|ticket| WidgetEvent::QuizComplete {
            ticket,
            total_mistakes: mistakes,
        });
        true
    }

    /// Copy the pad for drawing
    pub fn snapshot(&self) -> PadSnapshot {
        let state = self.state.lock();
        PadSnapshot {
            character: state.character,
            phase: state.phase,
            options: state.options.clone(),
        }
    }
}

/// Creates [`TerminalWidget`]s bound to a [`StrokePad`]
#[derive(Clone)]
pub struct TerminalWidgetFactory {
    pad: StrokePad,
}

impl WidgetFactory for TerminalWidgetFactory {
    fn create(
        &self,
        character: &Character,
        options: &WidgetOptions,
    ) -> Result<Box<dyn StrokeWidget>, WidgetError> {
        if character.as_char().width() != Some(2) {
            return Err(WidgetError::NoStrokeData(*character));
        }

        let mut state = self.pad.state.lock();
        state.instance += 1;
        state.character = Some(*character);
        state.options = options.clone();
        state.pending = None;
        state.phase = state.resting_phase();

        Ok(Box::new(TerminalWidget {
            state: Arc::clone(&self.pad.state),
            instance: state.instance,
        }))
    }
}

/// A stroke widget drawing on the terminal pad
pub struct TerminalWidget {
    state: Arc<Mutex<PadState>>,
    instance: u64,
}

impl TerminalWidget {
    /// Run `f` if this widget still owns the pad
    fn with_pad(&self, f: impl FnOnce(&mut PadState)) {
        let mut state = self.state.lock();
        if state.instance == self.instance {
            f(&mut state);
        } else {
            tracing::debug!(instance = self.instance, "Ignoring command for replaced widget");
        }
    }
}

impl StrokeWidget for TerminalWidget {
    fn show_character(&mut self) {
        self.with_pad(|state| {
            if !matches!(state.phase, PadPhase::Finished { .. }) {
                state.phase = PadPhase::Static;
            }
        });
    }

    fn animate_character(&mut self, ticket: CallbackTicket, sink: WidgetSink) {
        self.with_pad(|state| {
            state.phase = PadPhase::Animating {
                started: Instant::now(),
            };
            state.pending = Some(Pending { ticket, sink });
        });
    }

    fn quiz(&mut self, ticket: CallbackTicket, sink: WidgetSink) {
        self.with_pad(|state| {
            state.phase = PadPhase::Quizzing {
                traced: 0,
                mistakes: 0,
            };
            state.pending = Some(Pending { ticket, sink });
        });
    }

    fn cancel_quiz(&mut self) {
        self.with_pad(|state| {
            if matches!(state.phase, PadPhase::Quizzing { .. }) {
                state.phase = state.resting_phase();
                state.pending = None;
            }
        });
    }
}

impl Drop for TerminalWidget {
    fn drop(&mut self) {
        self.with_pad(|state| *state = PadState {
            instance: state.instance,
            ..PadState::default()
        });
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Draws a pad snapshot onto a practice grid
pub struct StrokePadView<'a> {
    snapshot: &'a PadSnapshot,
    now: Instant,
}

impl<'a> StrokePadView<'a> {
    /// View of `snapshot` as of `now`
    pub fn new(snapshot: &'a PadSnapshot, now: Instant) -> Self {
        Self { snapshot, now }
    }

    /// Progress line under the glyph
    fn caption(&self) -> Option<String> {
        match self.snapshot.phase {
            PadPhase::Animating { .. } => {
                let shown = (self.snapshot.reveal_progress(self.now) * f64::from(REVEAL_STEPS))
                    .floor() as usize;
                let shown = shown.min(REVEAL_STEPS as usize);
                Some(format!(
                    "{}{}",
                    "▰".repeat(shown),
                    "▱".repeat(REVEAL_STEPS as usize - shown)
                ))
            }
            PadPhase::Quizzing { traced, mistakes } => {
                Some(format!("已描 {traced} 笔 · 错 {mistakes} 次"))
            }
            PadPhase::Finished { mistakes } => Some(format!("错 {mistakes} 次")),
            PadPhase::Empty | PadPhase::Outline | PadPhase::Static => None,
        }
    }
}

impl Widget for StrokePadView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        // Guide lines through the middle of the grid
        let mid_x = area.x + area.width / 2;
        let mid_y = area.y + area.height / 2;
        let grid = Style::default().fg(GRID);
        for x in area.x..area.x + area.width {
            buf.set_string(x, mid_y, "┄", grid);
        }
        for y in area.y..area.y + area.height {
            buf.set_string(mid_x, y, "┆", grid);
        }
        buf.set_string(mid_x, mid_y, "┼", grid);

        let Some(character) = self.snapshot.character else {
            return;
        };

        let (stroke, radical) = board_colors(&self.snapshot.options);
        let glyph_style = match self.snapshot.phase {
            PadPhase::Empty => None,
            PadPhase::Outline | PadPhase::Quizzing { .. } => {
                self.snapshot.options.show_outline.then(|| Style::default().fg(OUTLINE))
            }
            PadPhase::Static => Some(Style::default().fg(stroke)),
            PadPhase::Animating { .. } => {
                if self.snapshot.reveal_progress(self.now) >= 0.5 {
                    Some(Style::default().fg(stroke))
                } else {
                    Some(Style::default().fg(OUTLINE))
                }
            }
            PadPhase::Finished { .. } => {
                if self.snapshot.options.highlight_on_complete {
                    Some(Style::default().fg(radical).add_modifier(Modifier::BOLD))
                } else {
                    Some(Style::default().fg(stroke))
                }
            }
        };

        // Wide glyph sits left of the center column
        if let Some(style) = glyph_style {
            buf.set_string(
                mid_x.saturating_sub(1).max(area.x),
                mid_y,
                character.to_string(),
                style,
            );
        }

        if let Some(caption) = self.caption() {
            let y = (mid_y + 2).min(area.y + area.height - 1);
            let width = unicode_width::UnicodeWidthStr::width(caption.as_str()) as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            buf.set_string(x, y, &caption, Style::default().fg(DIM_GRAY));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    fn cat() -> Character {
        Character::new('猫').unwrap()
    }

    fn later() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    #[test]
    fn test_animation_duration() {
        let options = WidgetOptions::default();
        assert_eq!(animation_duration(&options), Duration::from_millis(3600));

        let fast = WidgetOptions {
            stroke_animation_speed: 2.0,
            delay_between_strokes_ms: 0,
            ..Default::default()
        };
        assert_eq!(animation_duration(&fast), Duration::from_millis(1000));
    }

    #[test]
    fn test_create_shows_character() {
        let pad = StrokePad::new();
        let _widget = pad.factory().create(&cat(), &WidgetOptions::default()).unwrap();

        let snapshot = pad.snapshot();
        assert_eq!(snapshot.character, Some(cat()));
        assert_eq!(snapshot.phase, PadPhase::Static);
    }

    #[test]
    fn test_create_outline_only() {
        let pad = StrokePad::new();
        let options = WidgetOptions {
            show_character: false,
            ..Default::default()
        };
        let _widget = pad.factory().create(&cat(), &options).unwrap();
        assert_eq!(pad.snapshot().phase, PadPhase::Outline);
    }

    #[test]
    fn test_animation_completes_on_tick() {
        let pad = StrokePad::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = pad.factory().create(&cat(), &WidgetOptions::default()).unwrap();

        widget.animate_character(CallbackTicket(7), tx);
        pad.tick(Instant::now());
        assert!(rx.try_recv().is_err(), "reveal still running");

        pad.tick(later());
        assert_eq!(
            rx.try_recv().unwrap(),
            WidgetEvent::AnimationComplete {
                ticket: CallbackTicket(7)
            }
        );
        assert_eq!(pad.snapshot().phase, PadPhase::Static);

        pad.tick(later());
        assert!(rx.try_recv().is_err(), "completion reported once");
    }

    #[test]
    fn test_quiz_reports_mistakes() {
        let pad = StrokePad::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = pad.factory().create(&cat(), &WidgetOptions::default()).unwrap();

        widget.quiz(CallbackTicket(3), tx);
        assert!(pad.is_quizzing());
        pad.trace_stroke();
        pad.miss_stroke();
        pad.trace_stroke();
        pad.miss_stroke();

        assert!(pad.finish_quiz());
        assert_eq!(
            rx.try_recv().unwrap(),
            WidgetEvent::QuizComplete {
                ticket: CallbackTicket(3),
                total_mistakes: 2
            }
        );
        assert!(!pad.is_quizzing());

        // Board shows the glyph after a quiz; the result stays highlighted
        widget.show_character();
        assert_eq!(pad.snapshot().phase, PadPhase::Finished { mistakes: 2 });
    }

    #[test]
    fn test_cancel_quiz_drops_callback() {
        let pad = StrokePad::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = pad.factory().create(&cat(), &WidgetOptions::default()).unwrap();

        widget.quiz(CallbackTicket(1), tx);
        widget.cancel_quiz();

        assert!(!pad.finish_quiz());
        assert!(rx.try_recv().is_err());
        assert_eq!(pad.snapshot().phase, PadPhase::Static);
    }

    #[test]
    fn test_keys_ignored_outside_quiz() {
        let pad = StrokePad::new();
        let _widget = pad.factory().create(&cat(), &WidgetOptions::default()).unwrap();
        pad.trace_stroke();
        pad.miss_stroke();
        assert!(!pad.finish_quiz());
        assert_eq!(pad.snapshot().phase, PadPhase::Static);
    }

    #[test]
    fn test_replaced_widget_is_inert() {
        let pad = StrokePad::new();
        let factory = pad.factory();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut old = factory.create(&cat(), &WidgetOptions::default()).unwrap();
        let _new = factory
            .create(&Character::new('狗').unwrap(), &WidgetOptions::default())
            .unwrap();

        old.animate_character(CallbackTicket(1), tx);
        pad.tick(later());
        assert!(rx.try_recv().is_err());

        drop(old);
        assert_eq!(pad.snapshot().character.map(Character::as_char), Some('狗'));
    }

    #[test]
    fn test_drop_clears_pad() {
        let pad = StrokePad::new();
        let widget = pad.factory().create(&cat(), &WidgetOptions::default()).unwrap();
        drop(widget);

        let snapshot = pad.snapshot();
        assert_eq!(snapshot.character, None);
        assert_eq!(snapshot.phase, PadPhase::Empty);
    }

    #[test]
    fn test_view_draws_glyph_and_caption() {
        let pad = StrokePad::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut widget = pad.factory().create(&cat(), &WidgetOptions::default()).unwrap();
        widget.quiz(CallbackTicket(1), tx);
        pad.trace_stroke();

        let area = Rect::new(0, 0, 20, 9);
        let mut buf = Buffer::empty(area);
        let snapshot = pad.snapshot();
        StrokePadView::new(&snapshot, Instant::now()).render(area, &mut buf);

        assert_eq!(buf[(9, 4)].symbol(), "猫");
        // Wide glyphs leave a blank trailing cell, so compare without spaces
        let caption: String = (0..20)
            .map(|x| buf[(x, 6)].symbol().to_string())
            .collect::<String>()
            .replace(' ', "");
        assert!(caption.contains("已描1笔"), "caption was {caption:?}");
    }
}
