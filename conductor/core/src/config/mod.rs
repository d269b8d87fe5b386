//! TOML Configuration File Support
//!
//! Centralized configuration loading, supporting a TOML configuration file at
//! `~/.config/hanzi-stroke/conductor.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! The metadata API key is only ever read from the environment (`API_KEY` or
//! `GEMINI_API_KEY`), never from the file.
//!
//! # Example Configuration
//!
//! ```toml
//! [metadata]
//! model = "gemini-2.5-flash"
//! fetch_timeout_secs = 15
//! offline = false
//!
//! [board]
//! stroke_animation_speed = 1.5
//! delay_between_strokes_ms = 150
//! stroke_color = "#166534"
//!
//! [speech]
//! enabled = true
//! program = "espeak-ng"
//! chinese_voice = "cmn"
//!
//! [app]
//! default_character = "猫"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{BackendConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::board::WidgetOptions;
use crate::character::Character;
use crate::conductor::ConductorConfig;
use crate::speech::SpeechConfig;

/// Default metadata fetch timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Metadata section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataToml {
    /// Hosted model identifier
    pub model: Option<String>,

    /// API base URL
    pub base_url: Option<String>,

    /// Fetch timeout in seconds
    pub fetch_timeout_secs: Option<u64>,

    /// Use built-in fallback data even when an API key is set
    pub offline: Option<bool>,
}

/// Board section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardToml {
    /// Board width
    pub width: Option<u32>,

    /// Board height
    pub height: Option<u32>,

    /// Padding around the glyph
    pub padding: Option<u32>,

    /// Draw the character outline
    pub show_outline: Option<bool>,

    /// Animation speed multiplier
    pub stroke_animation_speed: Option<f64>,

    /// Pause between strokes in milliseconds
    pub delay_between_strokes_ms: Option<u64>,

    /// Stroke color (`#RRGGBB`)
    pub stroke_color: Option<String>,

    /// Radical color (`#RRGGBB`)
    pub radical_color: Option<String>,

    /// Flash the glyph when a quiz completes
    pub highlight_on_complete: Option<bool>,

    /// Start with the character visible
    pub show_character: Option<bool>,
}

/// Speech section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechToml {
    /// Whether speech is enabled
    pub enabled: Option<bool>,

    /// Synthesizer program
    pub program: Option<String>,

    /// Speaking rate relative to normal
    pub rate: Option<f32>,

    /// Voice for Chinese text
    pub chinese_voice: Option<String>,

    /// Voice for English text
    pub english_voice: Option<String>,
}

/// App section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppToml {
    /// Character loaded when a surface connects
    pub default_character: Option<String>,

    /// Whether to load the default character on connect
    pub load_on_connect: Option<bool>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HanziToml {
    /// Metadata service section
    pub metadata: MetadataToml,

    /// Board rendering section
    pub board: BoardToml,

    /// Speech section
    pub speech: SpeechToml,

    /// App behavior section
    pub app: AppToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration from all sources
///
/// Use [`load_config`] to load configuration with proper priority handling.
#[derive(Clone, Debug)]
pub struct HanziConfig {
    /// Hosted model identifier
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Metadata fetch timeout
    pub fetch_timeout: Duration,

    /// Force the offline backend
    pub offline: bool,

    /// Metadata API key (environment only)
    pub api_key: Option<String>,

    /// Widget rendering options
    pub board: WidgetOptions,

    /// Speech settings
    pub speech: SpeechConfig,

    /// Character loaded on connect
    pub default_character: Character,

    /// Whether to load the default character on connect
    pub load_on_connect: bool,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for HanziConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            offline: false,
            api_key: None,
            board: WidgetOptions::default(),
            speech: SpeechConfig::default(),
            default_character: Character::default(),
            load_on_connect: true,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl HanziConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Metadata backend selection
    ///
    /// Offline unless an API key is present and offline mode is off.
    #[must_use]
    pub fn backend_config(&self) -> BackendConfig {
        match &self.api_key {
            Some(api_key) if !self.offline => BackendConfig::Gemini {
                api_key: api_key.clone(),
                model: self.model.clone(),
                base_url: self.base_url.clone(),
            },
            _ => BackendConfig::Offline,
        }
    }

    /// Conductor settings
    #[must_use]
    pub fn conductor_config(&self) -> ConductorConfig {
        ConductorConfig {
            default_character: self.default_character,
            load_on_connect: self.load_on_connect,
            fetch_timeout: self.fetch_timeout,
            widget_options: self.board.clone(),
            speech_rate: self.speech.rate,
        }
    }

    /// Check cross-field invariants
    fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate().map_err(ConfigError::ValidationError)?;
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "fetch timeout must be at least one second".to_string(),
            ));
        }
        if !(self.speech.rate.is_finite() && self.speech.rate > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "speech rate must be positive, got {}",
                self.speech.rate
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/hanzi-stroke/conductor.toml` or
/// `~/.config/hanzi-stroke/conductor.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hanzi-stroke").join("conductor.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if a
/// value fails validation. A missing config file is not an error.
pub fn load_config() -> Result<HanziConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed, or
/// if a value fails validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<HanziConfig, ConfigError> {
    load_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with a custom environment lookup
fn load_with_env(
    path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<HanziConfig, ConfigError> {
    let mut config = HanziConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: HanziToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env)?;
    config.validate()?;

    Ok(config)
}

/// Parse a configured default character
fn parse_character(value: &str, origin: &str) -> Result<Character, ConfigError> {
    Character::from_input(value).map_err(|e| {
        ConfigError::ValidationError(format!("{origin} default character '{value}': {e}"))
    })
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut HanziConfig, toml: &HanziToml) -> Result<(), ConfigError> {
    // Metadata settings
    if let Some(ref model) = toml.metadata.model {
        config.model = model.clone();
    }
    if let Some(ref url) = toml.metadata.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = toml.metadata.fetch_timeout_secs {
        config.fetch_timeout = Duration::from_secs(secs);
    }
    if let Some(offline) = toml.metadata.offline {
        config.offline = offline;
    }

    // Board settings
    let board = &mut config.board;
    if let Some(width) = toml.board.width {
        board.width = width;
    }
    if let Some(height) = toml.board.height {
        board.height = height;
    }
    if let Some(padding) = toml.board.padding {
        board.padding = padding;
    }
    if let Some(show) = toml.board.show_outline {
        board.show_outline = show;
    }
    if let Some(speed) = toml.board.stroke_animation_speed {
        board.stroke_animation_speed = speed;
    }
    if let Some(delay) = toml.board.delay_between_strokes_ms {
        board.delay_between_strokes_ms = delay;
    }
    if let Some(ref color) = toml.board.stroke_color {
        board.stroke_color = color.clone();
    }
    if let Some(ref color) = toml.board.radical_color {
        board.radical_color = color.clone();
    }
    if let Some(highlight) = toml.board.highlight_on_complete {
        board.highlight_on_complete = highlight;
    }
    if let Some(show) = toml.board.show_character {
        board.show_character = show;
    }

    // Speech settings
    if let Some(enabled) = toml.speech.enabled {
        config.speech.enabled = enabled;
    }
    if let Some(ref program) = toml.speech.program {
        config.speech.program = program.clone();
    }
    if let Some(rate) = toml.speech.rate {
        config.speech.rate = rate;
    }
    if let Some(ref voice) = toml.speech.chinese_voice {
        config.speech.chinese_voice = voice.clone();
    }
    if let Some(ref voice) = toml.speech.english_voice {
        config.speech.english_voice = voice.clone();
    }

    // App settings
    if let Some(ref value) = toml.app.default_character {
        config.default_character = parse_character(value, "config file")?;
    }
    if let Some(load) = toml.app.load_on_connect {
        config.load_on_connect = load;
    }

    Ok(())
}

/// Parse a boolean flag the way the environment variables are documented
fn env_flag(value: &str) -> bool {
    value != "0" && value.to_lowercase() != "false"
}

/// Apply environment variable overrides to the config
fn apply_env_config(
    config: &mut HanziConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(key) = api_key_from_lookup(&env) {
        config.api_key = Some(key);
    }
    if let Some(model) = env("HANZI_MODEL") {
        config.model = model;
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env("HANZI_FETCH_TIMEOUT") {
        if let Ok(secs) = timeout.parse::<u64>() {
            config.fetch_timeout = Duration::from_secs(secs);
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %timeout, "Ignoring non-numeric HANZI_FETCH_TIMEOUT");
        }
    }
    if let Some(offline) = env("HANZI_OFFLINE") {
        config.offline = env_flag(&offline);
        config.source = ConfigSource::Env;
    }
    if let Some(program) = env("HANZI_SPEECH_PROGRAM") {
        config.speech.program = program;
        config.source = ConfigSource::Env;
    }
    if let Some(enabled) = env("HANZI_SPEECH") {
        config.speech.enabled = env_flag(&enabled);
        config.source = ConfigSource::Env;
    }
    if let Some(value) = env("HANZI_DEFAULT_CHARACTER") {
        config.default_character = parse_character(&value, "HANZI_DEFAULT_CHARACTER")?;
        config.source = ConfigSource::Env;
    }
    Ok(())
}

/// First non-blank metadata API key in `env`
fn api_key_from_lookup(env: &impl Fn(&str) -> Option<String>) -> Option<String> {
    ["API_KEY", "GEMINI_API_KEY"]
        .into_iter()
        .filter_map(env)
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Default character override
    pub default_character: Option<Character>,

    /// Offline mode override
    pub offline: Option<bool>,

    /// Model override
    pub model: Option<String>,

    /// Speech enabled override
    pub speech_enabled: Option<bool>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set default character override
    #[must_use]
    pub fn with_default_character(mut self, character: Character) -> Self {
        self.default_character = Some(character);
        self
    }

    /// Set offline override
    #[must_use]
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = Some(offline);
        self
    }

    /// Set model override
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    /// Set speech enabled override
    #[must_use]
    pub fn with_speech_enabled(mut self, enabled: bool) -> Self {
        self.speech_enabled = Some(enabled);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut HanziConfig) {
        if self.default_character.is_some()
            || self.offline.is_some()
            || self.model.is_some()
            || self.speech_enabled.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(character) = self.default_character {
            config.default_character = character;
        }
        if let Some(offline) = self.offline {
            config.offline = offline;
        }
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(enabled) = self.speech_enabled {
            config.speech.enabled = enabled;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // Default Configuration Tests
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = HanziConfig::default();

        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert!(!config.offline);
        assert_eq!(config.default_character.as_char(), '猫');
        assert!(config.load_on_connect);
        assert_eq!(config.source(), ConfigSource::Default);
        assert_eq!(config.backend_config(), BackendConfig::Offline);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("hanzi-stroke/conductor.toml"));
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config =
            load_with_env(Some(PathBuf::from("/nonexistent/hanzi.toml")), no_env).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    // =========================================================================
    // TOML Loading Tests
    // =========================================================================

    #[test]
    fn test_load_toml_sections() {
        let file = write_config(
            r##"
            [metadata]
            model = "gemini-pro"
            fetch_timeout_secs = 30

            [board]
            stroke_animation_speed = 2.0
            stroke_color = "#000000"

            [speech]
            enabled = false
            chinese_voice = "zh"

            [app]
            default_character = "狗"
            load_on_connect = false
            "##,
        );

        let config = load_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert!((config.board.stroke_animation_speed - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.board.stroke_color, "#000000");
        assert_eq!(config.board.radical_color, "#16a34a");
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.chinese_voice, "zh");
        assert_eq!(config.default_character.as_char(), '狗');
        assert!(!config.load_on_connect);
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_partial_toml() {
        let file = write_config("[speech]\nprogram = \"say\"\n");
        let config = load_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.speech.program, "say");
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[metadata\nmodel = ");
        let result = load_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_default_character() {
        let file = write_config("[app]\ndefault_character = \"cat\"\n");
        let result = load_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_board_color() {
        let file = write_config("[board]\nstroke_color = \"green\"\n");
        let result = load_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_api_key_in_file_is_ignored() {
        let file = write_config("[metadata]\napi_key = \"from-file\"\n");
        let config = load_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.backend_config(), BackendConfig::Offline);
    }

    // =========================================================================
    // Environment Tests
    // =========================================================================

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("[metadata]\nmodel = \"from-file\"\n");
        let env = env_from(&[
            ("HANZI_MODEL", "from-env"),
            ("HANZI_FETCH_TIMEOUT", "5"),
            ("HANZI_SPEECH", "0"),
            ("HANZI_DEFAULT_CHARACTER", "学"),
        ]);

        let config = load_with_env(Some(file.path().to_path_buf()), env).unwrap();

        assert_eq!(config.model, "from-env");
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert!(!config.speech.enabled);
        assert_eq!(config.default_character.as_char(), '学');
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_env_api_key_selects_gemini() {
        let env = env_from(&[("GEMINI_API_KEY", "secret")]);
        let config = load_with_env(None, env).unwrap();
        assert_eq!(
            config.backend_config(),
            BackendConfig::Gemini {
                api_key: "secret".to_string(),
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            }
        );
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let env = env_from(&[("API_KEY", "  "), ("GEMINI_API_KEY", "second")]);
        let config = load_with_env(None, env).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("second"));
    }

    #[test]
    fn test_offline_env_wins_over_key() {
        let env = env_from(&[("API_KEY", "secret"), ("HANZI_OFFLINE", "true")]);
        let config = load_with_env(None, env).unwrap();
        assert_eq!(config.backend_config(), BackendConfig::Offline);
    }

    #[test]
    fn test_invalid_env_character() {
        let env = env_from(&[("HANZI_DEFAULT_CHARACTER", "9")]);
        assert!(matches!(
            load_with_env(None, env),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let env = env_from(&[("HANZI_FETCH_TIMEOUT", "0")]);
        assert!(load_with_env(None, env).is_err());
    }

    // =========================================================================
    // CLI Override Tests
    // =========================================================================

    #[test]
    fn test_overrides_apply() {
        let mut config = HanziConfig::default();
        ConfigOverrides::new()
            .with_default_character(Character::new('水').unwrap())
            .with_offline(true)
            .with_model("gemini-x".to_string())
            .with_speech_enabled(false)
            .apply(&mut config);

        assert_eq!(config.default_character.as_char(), '水');
        assert!(config.offline);
        assert_eq!(config.model, "gemini-x");
        assert!(!config.speech.enabled);
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_empty_overrides_keep_source() {
        let mut config = HanziConfig::default();
        ConfigOverrides::new().apply(&mut config);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_conductor_config() {
        let config = HanziConfig::default();
        let conductor = config.conductor_config();
        assert_eq!(conductor.default_character, config.default_character);
        assert_eq!(conductor.fetch_timeout, config.fetch_timeout);
        assert_eq!(conductor.widget_options, config.board);
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::File.to_string(), "config file");
    }
}
