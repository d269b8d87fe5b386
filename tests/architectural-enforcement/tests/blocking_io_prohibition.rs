//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async code in the TUI and the Conductor must not block the
//! runtime. Metadata lookups go through the async HTTP client and speech
//! synthesizers run under `tokio::process`.
//!
//! Synchronous file reads in plain functions (configuration, log setup) are
//! fine: they run once before the event loop starts.

use architectural_enforcement::{production_lines, PRODUCTION_DIRS};

/// Patterns that block the calling thread
const FORBIDDEN: &[(&str, &str)] = &[
    ("reqwest::blocking", "Blocking HTTP client"),
    ("std::process::Command", "Blocking child process"),
    ("block_on(", "Nested runtime block_on"),
    ("std::io::stdin()", "Blocking stdin read"),
];

/// Test that production code uses async I/O
#[test]
fn test_no_blocking_io_in_production_code() {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for line in production_lines(dir) {
            for (pattern, reason) in FORBIDDEN {
                if line.code.contains(pattern) {
                    violations.push(line.violation(reason));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n❌ Blocking I/O found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ Use instead:");
        eprintln!("  - reqwest::Client (async)");
        eprintln!("  - tokio::process::Command");

        panic!("\nFound {} blocking I/O violation(s).", violations.len());
    }
}

/// The speech engine spawns synthesizers through tokio
#[test]
fn test_speech_uses_tokio_process() {
    let lines = production_lines("conductor/core/src/speech");
    assert!(
        lines
            .iter()
            .any(|l| l.code.contains("use tokio::process::Command")),
        "speech engines should spawn through tokio::process"
    );
}
