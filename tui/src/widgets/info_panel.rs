//! Character Info Panel
//!
//! The "汉字小档案" card: pinyin, definition, and the example sentence with its
//! translation. Each readable field carries its speech control, lit while that
//! field is playing.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use textwrap::wrap;

use hanzi_conductor::SpeechKey;

use crate::display::DisplayState;
use crate::theme::{ACCENT, DIM_GRAY, SPEAKING};

/// Panel heading
pub const PANEL_TITLE: &str = "汉字小档案";

/// Shown while metadata is loading
pub const LOADING_TEXT: &str = "正在查找这个字的故事...";

/// Shown when there is nothing to display
pub const EMPTY_TEXT: &str = "想学哪个字？在左边输入告诉我吧！";

/// Function key for a speech control
pub fn speech_hotkey(key: SpeechKey) -> &'static str {
    match key {
        SpeechKey::Character => "F5",
        SpeechKey::Sentence => "F6",
        SpeechKey::Translation => "F7",
    }
}

/// Metadata panel widget
pub struct InfoPanel<'a> {
    display: &'a DisplayState,
}

impl<'a> InfoPanel<'a> {
    /// Panel over the current display state
    pub fn new(display: &'a DisplayState) -> Self {
        Self { display }
    }

    /// Lines to draw, already wrapped to `width`
    fn lines(&self, width: usize) -> Vec<(String, Style)> {
        let mut lines = vec![(
            PANEL_TITLE.to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )];
        lines.push((String::new(), Style::default()));

        let push_wrapped = |lines: &mut Vec<(String, Style)>, text: &str, style: Style| {
            for line in wrap(text, width.max(1)) {
                lines.push((line.into_owned(), style));
            }
        };

        if self.display.is_loading() {
            push_wrapped(&mut lines, LOADING_TEXT, Style::default().fg(DIM_GRAY));
            return lines;
        }

        let Some(metadata) = self.display.metadata.as_ref() else {
            push_wrapped(&mut lines, EMPTY_TEXT, Style::default().fg(DIM_GRAY));
            return lines;
        };

        let plain = Style::default();
        let dim = Style::default().fg(DIM_GRAY);

        push_wrapped(
            &mut lines,
            &format!("{}  {}", metadata.character, metadata.pinyin),
            Style::default().add_modifier(Modifier::BOLD),
        );
        lines.push(self.control(SpeechKey::Character));
        lines.push((String::new(), plain));

        push_wrapped(&mut lines, "释义 Definition", dim);
        push_wrapped(&mut lines, &metadata.definition, plain);
        lines.push((String::new(), plain));

        push_wrapped(&mut lines, "例句 Example", dim);
        push_wrapped(&mut lines, &metadata.example_sentence, plain);
        lines.push(self.control(SpeechKey::Sentence));
        push_wrapped(&mut lines, &metadata.example_translation, dim);
        lines.push(self.control(SpeechKey::Translation));

        lines
    }

    /// Speech control line, highlighted while playing
    fn control(&self, key: SpeechKey) -> (String, Style) {
        let text = format!("[{}] {}", speech_hotkey(key), key.label());
        if self.display.is_speaking(key) {
            (
                format!("{text} ♪"),
                Style::default().fg(SPEAKING).add_modifier(Modifier::BOLD),
            )
        } else {
            (text, Style::default().fg(DIM_GRAY))
        }
    }
}

impl Widget for InfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 1 {
            return;
        }

        for (i, (line, style)) in self
            .lines(area.width as usize)
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_stringn(area.x, area.y + i as u16, line, area.width as usize, *style);
        }
    }
}
