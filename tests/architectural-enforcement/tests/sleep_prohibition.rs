//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the TUI and the Conductor MUST NOT sleep.
//! Waiting happens on I/O, channels, and timeouts.
//! **Exception**: frame pacing in the TUI event loop (`tui/src/app.rs`).

use std::fs;

use architectural_enforcement::{is_frame_limiting_context, production_lines_of, rust_files};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - Frame pacing in tui/src/app.rs");
        eprintln!("  - Test code (#[cfg(test)] modules, tests/ directories)");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - Sleep in polling loops");
        eprintln!("  - Sleep to wait for a fetch or a speech event");

        panic!(
            "\nFound {} sleep violation(s) in production code.",
            violations.len()
        );
    }
}

/// Blocking thread sleeps are never acceptable, frame pacing included
#[test]
fn test_no_thread_sleep_anywhere_in_production() {
    let mut violations = Vec::new();
    for dir in ["conductor/core/src", "tui/src"] {
        for path in rust_files(dir) {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            for line in production_lines_of(&path, &content) {
                if line.code.contains("thread::sleep") {
                    violations.push(line.violation("Blocking thread sleep"));
                }
            }
        }
    }

    assert!(violations.is_empty(), "{violations:#?}");
}

fn find_sleep_violations() -> Vec<String> {
    let mut violations = Vec::new();

    for (dir, allow_frame_limiting) in [("tui/src", true), ("conductor/core/src", false)] {
        for path in rust_files(dir) {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            let is_app_loop = path.ends_with("tui/src/app.rs");

            for line in production_lines_of(&path, &content) {
                if !(line.code.contains("::sleep(") || line.code.contains(".sleep(")) {
                    continue;
                }
                if allow_frame_limiting
                    && is_app_loop
                    && is_frame_limiting_context(&content, line.number)
                {
                    continue;
                }
                violations.push(line.violation("Sleep"));
            }
        }
    }

    violations
}
