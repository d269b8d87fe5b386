//! Architectural Enforcement
//!
//! Source scanners shared by the integration tests in `tests/`. They keep the
//! production crates honest about a few rules:
//! - No sleeping except frame limiting in the TUI loop
//! - No blocking HTTP or blocking child processes in async code
//! - The core crate stays free of terminal and rendering crates
//!
//! Scanning is line based. Comment text is ignored, and everything from the
//! first `#[cfg(test)]` in a file onward is treated as test code.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["conductor/core/src", "tui/src"];

/// A line of production code
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Code with any trailing `//` comment removed
    pub code: String,
}

impl SourceLine {
    /// Format as a violation report entry
    pub fn violation(&self, reason: &str) -> String {
        format!(
            "{}:{} - {}: {}",
            self.path.display(),
            self.number,
            reason,
            self.code.trim()
        )
    }
}

/// Workspace root, resolved from this crate's manifest directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// All `.rs` files under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Strip a trailing `//` comment from a line of code
///
/// `//` inside string or char literals (URLs, mostly) is kept.
pub fn code_part(line: &str) -> &str {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        let next = chars.get(i + 1).map(|(_, c)| *c);

        if in_string {
            match c {
                '\\' => i += 1,
                '"' => in_string = false,
                _ => {}
            }
        } else {
            match (c, next) {
                ('/', Some('/')) => return &line[..chars[i].0],
                ('"', _) => in_string = true,
                // Char literals: 'x' and '\x'; anything else is a lifetime
                ('\'', Some('\\')) => {
                    i += 2;
                    while i + 1 < chars.len() {
                        i += 1;
                        if chars[i].1 == '\'' {
                            break;
                        }
                    }
                }
                ('\'', Some(_)) if chars.get(i + 2).map(|(_, c)| *c) == Some('\'') => i += 2,
                _ => {}
            }
        }
        i += 1;
    }

    line
}

/// Production lines of `content`: comments dropped, test module excluded
pub fn production_lines_of(path: &Path, content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter_map(|(idx, line)| {
            let code = code_part(line);
            if code.trim().is_empty() {
                return None;
            }
            Some(SourceLine {
                path: path.to_path_buf(),
                number: idx + 1,
                code: code.to_string(),
            })
        })
        .collect()
}

/// Production lines of every file in `dir`
pub fn production_lines(dir: &str) -> Vec<SourceLine> {
    rust_files(dir)
        .into_iter()
        .filter_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            Some(production_lines_of(&path, &content))
        })
        .flatten()
        .collect()
}

/// Whether the raw lines around line `number` mention frame pacing
pub fn is_frame_limiting_context(raw: &str, number: usize) -> bool {
    let source: Vec<&str> = raw.lines().collect();
    let start = number.saturating_sub(10);
    let end = std::cmp::min(number + 4, source.len());

    source[start..end].iter().any(|line| {
        let line = line.to_lowercase();
        line.contains("frame") || line.contains("fps")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_part_drops_comments() {
        assert_eq!(code_part("let x = 1; // sleep(1)"), "let x = 1; ");
        assert_eq!(code_part("// only a comment"), "");
    }

    #[test]
    fn test_code_part_keeps_urls_in_strings() {
        let line = r#"let url = "https://example.com"; reqwest::blocking::get(url); // fetch"#;
        let code = code_part(line);
        assert!(code.contains("reqwest::blocking"), "{code}");
        assert!(!code.contains("fetch"));

        let line = r#"let s = "a \" // b"; go(); // tail"#;
        assert_eq!(code_part(line), r#"let s = "a \" // b"; go(); "#);
    }

    #[test]
    fn test_code_part_char_literals() {
        assert_eq!(code_part("if c == '\"' { x() } // q"), "if c == '\"' { x() } ");
        assert_eq!(code_part("fn f<'a>(s: &'a str) {} // c"), "fn f<'a>(s: &'a str) {} ");
        assert_eq!(code_part("let q = '\\''; // c"), "let q = '\\''; ");
        assert_eq!(code_part("let b = '\\\\'; // c"), "let b = '\\\\'; ");
    }

    #[test]
    fn test_test_module_is_skipped() {
        let content = "fn run() {\n    go();\n}\n\n#[cfg(test)]\nmod tests {\n    fn t() { std::thread::sleep(d); }\n}\n";
        let lines = production_lines_of(Path::new("x.rs"), content);

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| !l.code.contains("sleep")));
        assert_eq!(lines[1].number, 2);
    }

    #[test]
    fn test_frame_limiting_detection() {
        let content = "async fn run() {\n    // Frame rate limiting\n    let elapsed = start.elapsed();\n    tokio::time::sleep(FRAME - elapsed).await;\n}\n";
        let lines = production_lines_of(Path::new("app.rs"), content);
        let sleep = lines
            .iter()
            .find(|l| l.code.contains("sleep"))
            .expect("sleep line");

        assert!(is_frame_limiting_context(content, sleep.number));
    }

    #[test]
    fn test_sleep_without_frame_context() {
        let content = "async fn fetch() {\n    tokio::time::sleep(d).await;\n}\n";
        assert!(!is_frame_limiting_context(content, 2));
    }

    #[test]
    fn test_production_dirs_exist() {
        for dir in PRODUCTION_DIRS {
            assert!(
                !rust_files(dir).is_empty(),
                "{dir} should contain Rust sources"
            );
        }
    }
}
