//! Integration Test: Core Layering
//!
//! **Policy**: `hanzi-conductor` is headless. It must not depend on terminal
//! or rendering crates, so any surface can embed it.

use std::fs;

use architectural_enforcement::{production_lines, workspace_root};

/// Crates that belong to surfaces, never to the core
const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm", "unicode-width", "textwrap"];

/// The core manifest does not list surface crates
#[test]
fn test_core_manifest_has_no_surface_dependencies() {
    let manifest = workspace_root().join("conductor/core/Cargo.toml");
    let content = fs::read_to_string(&manifest).expect("core manifest readable");

    let violations: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter(|line| {
            SURFACE_CRATES
                .iter()
                .any(|krate| line.trim_start().starts_with(krate))
        })
        .collect();

    assert!(
        violations.is_empty(),
        "hanzi-conductor must stay headless: {violations:#?}"
    );
}

/// The core sources do not import surface crates
#[test]
fn test_core_sources_have_no_surface_imports() {
    let violations: Vec<String> = production_lines("conductor/core/src")
        .into_iter()
        .filter(|line| {
            SURFACE_CRATES.iter().any(|krate| {
                let path = krate.replace('-', "_");
                line.code.contains(&format!("{path}::"))
            })
        })
        .map(|line| line.violation("Surface crate in core"))
        .collect();

    assert!(violations.is_empty(), "{violations:#?}");
}
