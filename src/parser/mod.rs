//! Parsing of `.rsrc` description files.
//!
//! The grammar is line based: `#` starts a comment, blank lines are
//! ignored, and every other line is a `key=value` pair checked against
//! the field order tracked by [`GrammarCursor`].
//!
//! # Usage
//!
//! ```ignore
//! use rsrc::parser::GrammarCursor;
//!
//! let mut cursor = GrammarCursor::new();
//! cursor.validate("tag=[BACKGROUND]")?;
//! let (value, field) = cursor.extract_value("tag=[BACKGROUND]")?;
//! cursor.advance();
//! ```

mod grammar;
pub mod values;

pub use grammar::{Field, GrammarCursor};
pub use values::{parse_ints, parse_tag, tokenize};

/// Comment marker for description files.
pub const COMMENT_MARKER: char = '#';

/// Lines the grammar never sees: blank lines and comments.
pub fn is_skipped_line(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(COMMENT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_skipped_line() {
        assert!(is_skipped_line(""));
        assert!(is_skipped_line("   "));
        assert!(is_skipped_line("# sprites for the menu"));
        assert!(!is_skipped_line("tag=[A]"));
        assert!(!is_skipped_line(" # indented comment is not a comment"));
    }
}
