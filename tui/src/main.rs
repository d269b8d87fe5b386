//! Hanzi TUI Entry Point
//!
//! Launches the terminal practice board for Chinese character stroke order.
//!
//! Usage:
//!   hanzi-tui [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>      Configuration file path
//!   --character <CHAR>       Character to load on start (default: 猫)
//!   --offline                Use the built-in fallback metadata
//!   --model <MODEL>          Hosted model for metadata lookups
//!   --no-speech              Disable text-to-speech
//!   --log-file <PATH>        Log file (used when RUST_LOG is set)

use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hanzi_conductor::{load_config, load_config_from_path, Character, ConfigOverrides};
use hanzi_tui::App;

/// Hanzi TUI - stroke-order practice board
#[derive(Parser, Debug)]
#[command(name = "hanzi-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "HANZI_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Character to load on start
    #[arg(long, value_name = "CHAR")]
    character: Option<String>,

    /// Use the built-in fallback metadata instead of the hosted model
    #[arg(long)]
    offline: bool,

    /// Hosted model for metadata lookups
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Disable text-to-speech
    #[arg(long)]
    no_speech: bool,

    /// Log file (only written when RUST_LOG is set)
    #[arg(long, env = "HANZI_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// CLI overrides for the loaded configuration
    fn overrides(&self) -> anyhow::Result<ConfigOverrides> {
        let mut overrides = ConfigOverrides::new();
        if let Some(input) = &self.character {
            let character = Character::from_input(input)
                .with_context(|| format!("--character {input:?} is not a Chinese character"))?;
            overrides = overrides.with_default_character(character);
        }
        if self.offline {
            overrides = overrides.with_offline(true);
        }
        if let Some(model) = &self.model {
            overrides = overrides.with_model(model.clone());
        }
        if self.no_speech {
            overrides = overrides.with_speech_enabled(false);
        }
        Ok(overrides)
    }
}

/// Default log location (`$XDG_STATE_HOME/hanzi-stroke/hanzi-tui.log`)
fn default_log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|p| p.join("hanzi-stroke").join("hanzi-tui.log"))
}

/// Log to a file so the alternate screen stays clean; off unless RUST_LOG is set
fn init_logging(path: Option<PathBuf>) -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let Some(path) = path.or_else(default_log_path) else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {parent:?}"))?;
    }
    let file =
        File::create(&path).with_context(|| format!("Failed to create log file: {path:?}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.clone())?;

    let mut config = match &args.config {
        Some(path) => load_config_from_path(Some(path.clone()))?,
        None => load_config()?,
    };
    args.overrides()?.apply(&mut config);
    tracing::info!(source = %config.source(), offline = config.offline, "Configuration loaded");

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: hanzi-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let mut app = App::new(&config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Show goodbye message after TUI closes
    if let Some(goodbye) = app.goodbye() {
        println!("\n\x1b[32m汉字:\x1b[0m {goodbye}\n");
    }

    // Propagate any errors
    result
}
