//! Terminal output formatting for the rsrc CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs. All status
//! output goes to stderr; stdout is reserved for `--json` reports.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Digits kept after the point in megabyte figures.
const MB_DECIMALS: usize = 3;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal. A quiet printer drops
/// everything except errors.
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// Printer that only reports errors, used while `--json` owns the
    /// terminal.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "   Compiling engine/menu/menu.rsrc (12 entries)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb. Never silenced.
    pub fn error(&self, verb: &str, message: &str) {
        self.write_line(RED, verb, message);
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a string as cyan (for paths).
    pub fn cyan(&self, text: &str) -> String {
        if self.color {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        if !self.quiet {
            self.write_line(color, verb, message);
        }
    }

    fn write_line(&self, color: &str, verb: &str, message: &str) {
        // stderr may already be closed; status output is best effort
        let _ = writeln!(io::stderr().lock(), "{}", self.render_line(color, verb, message));
    }

    fn render_line(&self, color: &str, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}")
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(1, "entry", "entries")` → "1 entry".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

/// Kilobytes as megabytes with three truncated decimals: `1536` →
/// "1.500 MB".
pub fn megabytes(kb: u64) -> String {
    let whole = kb / 1024;
    let scale = 10u64.pow(MB_DECIMALS as u32);
    let fraction = (kb % 1024) * scale / 1024;
    format!("{whole}.{fraction:0MB_DECIMALS$} MB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "entry", "entries"), "1 entry");
    }

    #[test]
    fn test_plural_zero() {
        assert_eq!(plural(0, "file", "files"), "0 files");
    }

    #[test]
    fn test_display_path_absolute() {
        // An absolute path outside cwd should stay absolute
        let p = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(p), "/nonexistent/path/to/file");
    }

    fn plain() -> Printer {
        Printer {
            color: false,
            quiet: true,
        }
    }

    #[test]
    fn test_render_line_right_aligns_verb() {
        assert_eq!(
            plain().render_line(RED, "Failed", "project 'engine'"),
            "      Failed project 'engine'"
        );
    }

    #[test]
    fn test_render_line_colored() {
        let printer = Printer {
            color: true,
            quiet: false,
        };
        let line = printer.render_line(RED, "Failed", "x");
        assert!(line.starts_with(&format!("{BOLD}{RED}")));
        assert!(line.ends_with(&format!("{RESET} x")));
    }

    #[test]
    fn test_megabytes_truncates() {
        assert_eq!(megabytes(0), "0.000 MB");
        assert_eq!(megabytes(1536), "1.500 MB");
        // 1/1024 = 0.000976..., truncated not rounded
        assert_eq!(megabytes(1), "0.000 MB");
        assert_eq!(megabytes(1023), "0.999 MB");
        assert_eq!(megabytes(10 * 1024 + 100), "10.097 MB");
    }
}
