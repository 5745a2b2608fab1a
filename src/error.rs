use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rsrc operations
#[derive(Error, Diagnostic, Debug)]
pub enum RsrcError {
    #[error("IO error: {0}")]
    #[diagnostic(code(rsrc::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(rsrc::io))]
    Io { path: PathBuf, message: String },

    #[error("Grammar error: {message}")]
    #[diagnostic(code(rsrc::grammar))]
    Grammar {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Format error: {message}")]
    #[diagnostic(code(rsrc::format))]
    Format {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Layout error: {message}")]
    #[diagnostic(code(rsrc::layout))]
    Layout {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(rsrc::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{} produced no resource entries", .path.display())]
    #[diagnostic(
        code(rsrc::empty),
        help("Configuration not complete: every .rsrc file needs at least one full entry")
    )]
    EmptyResult { path: PathBuf },

    /// A failure inside a description file, annotated with its location.
    #[error("{}:{line}: invalid `{field}` line", .file.display())]
    #[diagnostic(code(rsrc::compile))]
    Compile {
        file: PathBuf,
        line: usize,
        field: &'static str,
        #[source]
        source: Box<RsrcError>,
    },
}

impl RsrcError {
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::Grammar {
            message: message.into(),
            help: None,
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
            help: None,
        }
    }

    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
            help: None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Attach help text to variants that carry it.
    pub fn with_help(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Grammar { help, .. }
            | Self::Format { help, .. }
            | Self::Layout { help, .. }
            | Self::Config { help, .. } => *help = Some(text.into()),
            _ => {}
        }
        self
    }

    /// Wrap an error with the description file location it came from.
    pub fn at(self, file: impl Into<PathBuf>, line: usize, field: &'static str) -> Self {
        Self::Compile {
            file: file.into(),
            line,
            field,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping location wrappers.
    pub fn root_cause(&self) -> &RsrcError {
        match self {
            Self::Compile { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, RsrcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_wrapper_display() {
        let err = RsrcError::grammar("expected tag `path`").at("menu.rsrc", 7, "path");
        assert_eq!(err.to_string(), "menu.rsrc:7: invalid `path` line");
        assert!(matches!(err.root_cause(), RsrcError::Grammar { .. }));
    }

    #[test]
    fn test_with_help_sets_help() {
        let err = RsrcError::config("unknown load timing 'later'")
            .with_help("Use 'on_init' or 'on_demand'");
        match err {
            RsrcError::Config { help, .. } => {
                assert_eq!(help.as_deref(), Some("Use 'on_init' or 'on_demand'"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
