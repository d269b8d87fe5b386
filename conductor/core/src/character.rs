//! Character Selection
//!
//! A [`Character`] is the single CJK ideograph the user is practicing. It is
//! only ever constructed through validation, so holding one means the code
//! point is inside the CJK Unified Ideographs block the board supports.
//!
//! # Input Rules
//!
//! - Surrounding whitespace is trimmed
//! - Only the first character of the trimmed text is considered
//!   (pasting "猫咪" selects 猫)
//! - The character must be in U+4E00..=U+9FA5

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First code point accepted by the validator
pub const CJK_FIRST: char = '\u{4E00}';

/// Last code point accepted by the validator
pub const CJK_LAST: char = '\u{9FA5}';

/// Notice shown to the user when input is rejected
pub const INVALID_CHARACTER_NOTICE: &str =
    "哎呀，请输入一个汉字哦~ (Please enter a valid Chinese character)";

/// Why a piece of input could not be turned into a [`Character`]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CharacterError {
    /// Nothing left after trimming
    #[error("input is empty")]
    Empty,

    /// First character is outside the supported ideograph range
    #[error("'{0}' is not a Chinese character")]
    NotChinese(char),
}

/// A validated Chinese character
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Character(char);

impl Character {
    /// Extract the practice character from raw user input
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::Empty`] for blank input and
    /// [`CharacterError::NotChinese`] when the first character is not an ideograph.
    pub fn from_input(input: &str) -> Result<Self, CharacterError> {
        let first = input.trim().chars().next().ok_or(CharacterError::Empty)?;
        Self::new(first)
    }

    /// Validate a single code point
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::NotChinese`] when `c` is outside U+4E00..=U+9FA5.
    pub fn new(c: char) -> Result<Self, CharacterError> {
        if is_supported_ideograph(c) {
            Ok(Self(c))
        } else {
            Err(CharacterError::NotChinese(c))
        }
    }

    /// The underlying code point
    #[must_use]
    pub fn as_char(self) -> char {
        self.0
    }
}

/// Whether `c` is inside the ideograph range the board can draw
#[must_use]
pub fn is_supported_ideograph(c: char) -> bool {
    (CJK_FIRST..=CJK_LAST).contains(&c)
}

impl Default for Character {
    /// 猫, the character loaded on first connect
    fn default() -> Self {
        Self('猫')
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Character {
    type Err = CharacterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_input(s)
    }
}

impl TryFrom<String> for Character {
    type Error = CharacterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_input(&value)
    }
}

impl From<Character> for String {
    fn from(c: Character) -> Self {
        c.0.to_string()
    }
}
