//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, paste, resize)
//! - ConductorClient for application state
//! - DisplayState for rendering
//! - StrokePad, the terminal's stroke widget
//!
//! The App:
//! 1. Converts terminal events to SurfaceEvents
//! 2. Sends events to the embedded Conductor via ConductorClient
//! 3. Receives ConductorMessages and updates DisplayState
//! 4. Renders based on DisplayState and the pad

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use hanzi_conductor::{HanziConfig, Mode, SpeechKey};

use crate::conductor_client::ConductorClient;
use crate::display::DisplayState;
use crate::theme::{notify_color, ACCENT, DIM_GRAY, FRAME, INPUT};
use crate::widgets::{InfoPanel, StrokePad, StrokePadView};

/// Frame budget (~20 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Input line placeholder
pub const INPUT_PLACEHOLDER: &str = "想学哪个字？输入试试...";

/// Spinner shown on the input line while loading
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Width of the left column (input, modes, board)
const BOARD_COLUMN_WIDTH: u16 = 36;

/// Key hints for the footer
const KEY_HELP: &str =
    "Enter 查找 · F1 演示 · F2 描红 · F5/F6/F7 朗读 · Esc 退出";

/// Key hints while tracing
const QUIZ_HELP: &str = "Space 描一笔 · x 写错了 · Enter 完成";

/// Keep only the first non-blank character of typed or pasted text
pub fn single_character_input(text: &str) -> String {
    text.trim().chars().next().map(String::from).unwrap_or_default()
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Conductor Integration ===
    /// Client for communicating with the embedded Conductor
    conductor: ConductorClient,
    /// Display state derived from ConductorMessages
    display: DisplayState,
    /// The terminal stroke widget shared with the board
    pad: StrokePad,

    // === Input State ===
    /// Input line (at most one character)
    input: String,

    // === Misc State ===
    /// Last frame time (for timers)
    last_frame: Instant,
    /// Frames rendered (spinner phase)
    frame_count: usize,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &HanziConfig) -> Self {
        let pad = StrokePad::new();
        let conductor = ConductorClient::new(config, Box::new(pad.factory()));
        Self::with_client(conductor, pad)
    }

    /// Create an App around an existing client and pad
    pub fn with_client(conductor: ConductorClient, pad: StrokePad) -> Self {
        Self {
            running: true,
            conductor,
            display: DisplayState::new(),
            pad,
            input: String::new(),
            last_frame: Instant::now(),
            frame_count: 0,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.render(frame))?;

        self.start().await?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event).await,
                        Some(Err(e)) => tracing::error!("Terminal event error: {}", e),
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            self.step().await;
            terminal.draw(|frame| self.render(frame))?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                tokio::time::sleep(FRAME_DURATION - elapsed).await;
            }
        }

        Ok(())
    }

    /// Start the Conductor and connect as a TUI surface
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.conductor.start().await?;
        self.conductor.connect().await?;
        tracing::info!(backend = self.conductor.backend_name(), "TUI connected");
        Ok(())
    }

    /// One frame of work: widget timers, Conductor polling, display updates
    pub async fn step(&mut self) {
        let now = Instant::now();
        self.pad.tick(now);
        self.conductor.poll().await;
        self.process_conductor_messages();

        self.display.update(now - self.last_frame);
        self.last_frame = now;
        self.frame_count = self.frame_count.wrapping_add(1);

        if self.display.quit {
            self.running = false;
        }
    }

    /// Process all pending messages from the Conductor
    fn process_conductor_messages(&mut self) {
        for msg in self.conductor.recv_all() {
            self.display.apply_message(msg);
        }
    }

    /// Dispatch a terminal event
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Paste(text) => self.input = single_character_input(&text),
            _ => {}
        }
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: KeyEvent) {
        let result = match key.code {
            // Quit
            KeyCode::Esc => self.quit().await,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit().await
            }

            // Tracing keys go to the pad while a quiz runs
            KeyCode::Char(' ') if self.pad.is_quizzing() => {
                self.pad.trace_stroke();
                Ok(())
            }
            KeyCode::Char('x' | 'X') if self.pad.is_quizzing() => {
                self.pad.miss_stroke();
                Ok(())
            }
            KeyCode::Enter if self.pad.is_quizzing() && self.input.is_empty() => {
                self.pad.finish_quiz();
                Ok(())
            }

            // Nothing typed: nothing to submit
            KeyCode::Enter if self.input.is_empty() => Ok(()),

            // Submit (accepted while loading; the newest request wins)
            KeyCode::Enter => {
                self.display.clear_notification();
                let input = std::mem::take(&mut self.input);
                self.conductor.submit(input).await
            }

            // Mode toggles
            KeyCode::F(1) => self.conductor.select_mode(Mode::Demonstration).await,
            KeyCode::F(2) => self.conductor.select_mode(Mode::Quiz).await,

            // Speech controls
            KeyCode::F(5) => self.conductor.speak(SpeechKey::Character).await,
            KeyCode::F(6) => self.conductor.speak(SpeechKey::Sentence).await,
            KeyCode::F(7) => self.conductor.speak(SpeechKey::Translation).await,

            // Typing replaces the single character
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input = c.to_string();
                Ok(())
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.input.clear();
                Ok(())
            }

            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::error!("Failed to handle key {:?}: {}", key.code, e);
        }
    }

    /// Ask the Conductor to shut down and stop the loop
    async fn quit(&mut self) -> anyhow::Result<()> {
        self.conductor.request_quit().await?;
        self.process_conductor_messages();
        self.running = false;
        Ok(())
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header);

        let board_width = BOARD_COLUMN_WIDTH.min(body.width / 2).max(20);
        let [left, right] =
            Layout::horizontal([Constraint::Length(board_width), Constraint::Min(0)]).areas(body);

        let [input, modes, board, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .areas(left);

        self.render_input(frame, input);
        self.render_modes(frame, modes);
        self.render_board(frame, board);
        self.render_status(frame, status);

        let panel = Block::bordered().border_style(Style::default().fg(FRAME));
        let panel_inner = panel.inner(right);
        frame.render_widget(panel, right);
        frame.render_widget(InfoPanel::new(&self.display), panel_inner);

        self.render_footer(frame, footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " 汉字笔顺练习 · {} · {}",
            self.conductor.backend_name(),
            self.display.load_state.description()
        );
        frame.render_widget(
            Paragraph::new(title).style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            area,
        );
    }

    /// Input line with spinner while loading
    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" 输入汉字 ")
            .border_style(Style::default().fg(FRAME));

        let line = if self.input.is_empty() {
            Paragraph::new(INPUT_PLACEHOLDER).style(Style::default().fg(DIM_GRAY))
        } else {
            Paragraph::new(format!("{}_", self.input)).style(Style::default().fg(INPUT))
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(line, inner);

        if self.display.is_loading() && inner.width > 2 {
            let spinner = SPINNER[self.frame_count % SPINNER.len()];
            let x = inner.x + inner.width - 2;
            frame
                .buffer_mut()
                .set_string(x, inner.y, spinner.to_string(), Style::default().fg(ACCENT));
        }
    }

    /// The two mode toggles
    fn render_modes(&self, frame: &mut Frame, area: Rect) {
        let mut x = area.x + 1;
        for (key, mode) in [("F1", Mode::Demonstration), ("F2", Mode::Quiz)] {
            let style = if self.display.mode == mode {
                Style::default().fg(ACCENT).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(DIM_GRAY)
            };
            let label = format!(" {key} {} ", mode.action_label());
            let (next_x, _) = frame
                .buffer_mut()
                .set_stringn(x, area.y, &label, area.right().saturating_sub(x) as usize, style);
            x = next_x + 1;
        }
    }

    /// Board frame with the mode badge and the stroke pad
    fn render_board(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" {} ", self.display.mode.label()))
            .border_style(Style::default().fg(FRAME));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let snapshot = self.pad.snapshot();
        frame.render_widget(StrokePadView::new(&snapshot, Instant::now()), inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Paragraph::new(self.display.board_status.text())
                .style(Style::default().fg(ACCENT))
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    /// Notice bar, or key hints when there is no notice
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.display.notification {
            Some(notification) => (
                notification.line(),
                Style::default().fg(notify_color(notification.level)),
            ),
            None if self.pad.is_quizzing() => {
                (QUIZ_HELP.to_string(), Style::default().fg(DIM_GRAY))
            }
            None => (KEY_HELP.to_string(), Style::default().fg(DIM_GRAY)),
        };
        frame.render_widget(Paragraph::new(format!(" {text}")).style(style), area);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Display state (as last told by the Conductor)
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Current input line
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the goodbye message for display after TUI closes
    pub fn goodbye(&self) -> Option<&str> {
        self.display.goodbye.as_deref()
    }
}
