use std::io;
use std::path::PathBuf;

use crate::cmark::Position;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no journal found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("a journal already exists at {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid status {0:?} (expected one of WIP, BETA, C, R)")]
    InvalidStatus(String),

    #[error("malformed journal entry at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid project configuration")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(position: Position, message: impl Into<String>) -> Self {
        Error::Malformed {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }
}
