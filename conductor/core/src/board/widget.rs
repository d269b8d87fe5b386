//! Stroke Widget Contract
//!
//! The board never draws strokes itself. It drives a stroke-rendering widget
//! through the [`StrokeWidget`] trait and receives completion callbacks as
//! [`WidgetEvent`]s on a channel it hands to the widget with every command.
//!
//! Every animation or quiz command carries a [`CallbackTicket`]. The widget
//! echoes the ticket back in its completion event so the board can tell a
//! callback for the current command from one issued for a superseded command
//! or a widget that has already been torn down.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::character::Character;

/// Channel end a widget reports completions on
pub type WidgetSink = mpsc::UnboundedSender<WidgetEvent>;

/// Generation number issued with each widget command
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CallbackTicket(pub u64);

/// Completion callbacks reported by a widget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// The full stroke animation finished playing
    AnimationComplete {
        /// Ticket of the `animate_character` command
        ticket: CallbackTicket,
    },
    /// The user finished tracing every stroke
    QuizComplete {
        /// Ticket of the `quiz` command
        ticket: CallbackTicket,
        /// Strokes the user missed along the way
        total_mistakes: u32,
    },
}

impl WidgetEvent {
    /// Ticket this event answers
    #[must_use]
    pub fn ticket(&self) -> CallbackTicket {
        match self {
            Self::AnimationComplete { ticket } | Self::QuizComplete { ticket, .. } => *ticket,
        }
    }
}

/// Widget construction failed (e.g. no stroke data for the character)
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The renderer has no data for this character
    #[error("no stroke data for '{0}'")]
    NoStrokeData(Character),

    /// The renderer could not be initialized
    #[error("stroke widget unavailable: {0}")]
    Unavailable(String),
}

/// Rendering options passed to the widget factory
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetOptions {
    /// Board width in widget units
    pub width: u32,
    /// Board height in widget units
    pub height: u32,
    /// Padding around the glyph
    pub padding: u32,
    /// Draw the faint character outline under the strokes
    pub show_outline: bool,
    /// Animation speed multiplier (1.0 = normal)
    pub stroke_animation_speed: f64,
    /// Pause between strokes during animation
    pub delay_between_strokes_ms: u64,
    /// Stroke color (`#RRGGBB`)
    pub stroke_color: String,
    /// Radical color (`#RRGGBB`)
    pub radical_color: String,
    /// Flash the glyph when a quiz completes
    pub highlight_on_complete: bool,
    /// Start with the character visible
    pub show_character: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            padding: 20,
            show_outline: true,
            stroke_animation_speed: 1.0,
            delay_between_strokes_ms: 200,
            stroke_color: "#166534".to_string(),
            radical_color: "#16a34a".to_string(),
            highlight_on_complete: true,
            show_character: true,
        }
    }
}

impl WidgetOptions {
    /// Check the options are drawable
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid option.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("board width and height must be non-zero".to_string());
        }
        if u64::from(self.padding) * 2 >= u64::from(self.width.min(self.height)) {
            return Err(format!(
                "padding {} leaves no room on a {}x{} board",
                self.padding, self.width, self.height
            ));
        }
        if !(self.stroke_animation_speed.is_finite() && self.stroke_animation_speed > 0.0) {
            return Err(format!(
                "stroke_animation_speed must be positive, got {}",
                self.stroke_animation_speed
            ));
        }
        for (name, value) in [
            ("stroke_color", &self.stroke_color),
            ("radical_color", &self.radical_color),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(format!("{name} must be #RRGGBB, got '{value}'"));
            }
        }
        Ok(())
    }
}

/// Parse a `#RRGGBB` color
#[must_use]
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// A stroke-rendering widget bound to one character
///
/// Widgets are created per character and dropped when the character changes;
/// they are never re-pointed at a different character.
pub trait StrokeWidget: Send {
    /// Show the complete static glyph
    fn show_character(&mut self);

    /// Play the full stroke-order animation, reporting
    /// [`WidgetEvent::AnimationComplete`] with `ticket` when done
    fn animate_character(&mut self, ticket: CallbackTicket, sink: WidgetSink);

    /// Start an interactive tracing quiz, reporting
    /// [`WidgetEvent::QuizComplete`] with `ticket` when the user finishes
    fn quiz(&mut self, ticket: CallbackTicket, sink: WidgetSink);

    /// Abandon any running quiz (no completion is reported)
    fn cancel_quiz(&mut self);
}

/// Creates stroke widgets
///
/// Injected into the board so surfaces provide their own renderer and tests
/// can provide recording doubles.
pub trait WidgetFactory: Send + Sync {
    /// Create a widget for `character`
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError`] when the widget cannot be built for this character.
    fn create(
        &self,
        character: &Character,
        options: &WidgetOptions,
    ) -> Result<Box<dyn StrokeWidget>, WidgetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = WidgetOptions::default();
        assert_eq!(options.width, 300);
        assert_eq!(options.delay_between_strokes_ms, 200);
        assert_eq!(options.stroke_color, "#166534");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#166534"), Some([0x16, 0x65, 0x34]));
        assert_eq!(parse_hex_color("#16A34A"), Some([0x16, 0xa3, 0x4a]));
        assert_eq!(parse_hex_color("166534"), None);
        assert_eq!(parse_hex_color("#1665"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        let options = WidgetOptions {
            stroke_animation_speed: 0.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = WidgetOptions {
            padding: 150,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = WidgetOptions {
            radical_color: "green".to_string(),
            ..Default::default()
        };
        assert!(options
            .validate()
            .unwrap_err()
            .contains("radical_color"));
    }

    #[test]
    fn test_validate_rejects_huge_padding() {
        let options = WidgetOptions {
            padding: 2_147_483_648,
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.contains("padding 2147483648"), "{err}");

        let options = WidgetOptions {
            padding: u32::MAX,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_event_ticket() {
        let event = WidgetEvent::QuizComplete {
            ticket: CallbackTicket(7),
            total_mistakes: 2,
        };
        assert_eq!(event.ticket(), CallbackTicket(7));
    }
}
