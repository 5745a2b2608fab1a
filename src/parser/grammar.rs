//! Line grammar for `.rsrc` description files.
//!
//! Every entry is a fixed sequence of `key=value` lines:
//!
//! ```text
//! tag=[EXIT_BUTTON]
//! type=sprite
//! path=p/exit_button.png
//! description=200,100,3,0
//! position=10,1000
//! load=on_demand
//! ```
//!
//! Fonts and sounds stop after `description`. `sprite_manual` entries may
//! repeat `description` any number of times before `position`.

use std::fmt;

use crate::error::{Result, RsrcError};
use crate::types::EntryType;

/// A field of an entry, in grammar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field {
    #[default]
    Tag,
    Type,
    Path,
    Description,
    Position,
    Load,
    End,
}

impl Field {
    /// The key that must prefix a line for this field.
    pub fn keyword(self) -> &'static str {
        match self {
            Field::Tag => "tag",
            Field::Type => "type",
            Field::Path => "path",
            Field::Description => "description",
            Field::Position => "position",
            Field::Load => "load",
            Field::End => "end",
        }
    }

    fn next(self) -> Field {
        match self {
            Field::Tag => Field::Type,
            Field::Type => Field::Path,
            Field::Path => Field::Description,
            Field::Description => Field::Position,
            Field::Position => Field::Load,
            Field::Load | Field::End => Field::End,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Parse state for one description file.
#[derive(Debug, Clone, Default)]
pub struct GrammarCursor {
    expected: Field,
    entry_type: Option<EntryType>,
}

impl GrammarCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field the next line must carry.
    pub fn expected(&self) -> Field {
        self.expected
    }

    /// The type declared by the entry in progress.
    pub fn entry_type(&self) -> Option<EntryType> {
        self.entry_type
    }

    /// Check that `line` starts with the expected field's keyword.
    ///
    /// A `sprite_manual` entry expecting `position` accepts another
    /// `description` line instead and stays on `description`.
    pub fn validate(&mut self, line: &str) -> Result<()> {
        if self.entry_type == Some(EntryType::SpriteManual)
            && self.expected == Field::Position
            && line.starts_with(Field::Description.keyword())
        {
            self.expected = Field::Description;
        }

        if self.expected == Field::End {
            return Err(RsrcError::grammar(format!(
                "no field expected after a complete entry, received '{line}'"
            )));
        }

        let keyword = self.expected.keyword();
        if line.len() < keyword.len() || !line.starts_with(keyword) {
            let received = line.split('=').next().unwrap_or(line).trim();
            return Err(RsrcError::grammar(format!(
                "expected tag '{keyword}', received '{received}'"
            ))
            .with_help(self.order_hint()));
        }

        Ok(())
    }

    /// Split off the value after the first `=`.
    ///
    /// Leading and trailing blanks are dropped; an all-blank value is an
    /// error.
    pub fn extract_value<'a>(&self, line: &'a str) -> Result<(&'a str, Field)> {
        let (_, raw) = line.split_once('=').ok_or_else(|| {
            RsrcError::grammar(format!("'=' sign could not be found in '{line}'"))
                .with_help(format!("Write the line as {}=<value>", self.expected))
        })?;

        let value = raw.trim_matches(|c: char| c == ' ' || c == '\t' || c == '\r');
        if value.is_empty() {
            return Err(RsrcError::grammar(format!(
                "no data for tag '{}'",
                self.expected
            )));
        }

        Ok((value, self.expected))
    }

    /// Move to the next expected field.
    pub fn advance(&mut self) {
        self.expected = match (self.entry_type, self.expected) {
            (Some(EntryType::Font | EntryType::Sound), Field::Description) => Field::End,
            (_, field) => field.next(),
        };
    }

    /// True once the entry's last field was consumed; recycles the cursor
    /// to `tag` for the next entry.
    pub fn is_entry_complete(&mut self) -> bool {
        if self.expected == Field::End {
            self.expected = Field::Tag;
            true
        } else {
            false
        }
    }

    /// Record the entry type from its `type=` token.
    pub fn set_entry_type(&mut self, token: &str) -> Result<EntryType> {
        match EntryType::from_token(token) {
            Some(ty) => {
                self.entry_type = Some(ty);
                Ok(ty)
            }
            None => {
                self.entry_type = None;
                Err(RsrcError::grammar(format!("unknown entry type '{token}'"))
                    .with_help("Use one of: image, sprite, sprite_manual, font, sound"))
            }
        }
    }

    /// True when a partially read entry is pending.
    pub fn in_entry(&self) -> bool {
        self.expected != Field::Tag
    }

    pub fn reset(&mut self) {
        self.expected = Field::Tag;
        self.entry_type = None;
    }

    fn order_hint(&self) -> String {
        match self.entry_type {
            Some(EntryType::Font | EntryType::Sound) => {
                "Fields must appear in order: tag, type, path, description".to_string()
            }
            _ => "Fields must appear in order: tag, type, path, description, position, load"
                .to_string(),
        }
    }
}
