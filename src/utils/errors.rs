use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scope error: {message}")]
    Scope {
        message: String,
        file_path: Option<PathBuf>,
    },

    #[error("Import scan error: {message}")]
    Scan {
        message: String,
        file_path: Option<PathBuf>,
    },

    #[error("{0}")]
    Other(String),
}

impl StyleError {
    /// Create a scoping error without a file
    pub fn scope(message: String) -> Self {
        Self::Scope {
            message,
            file_path: None,
        }
    }

    /// Create an import scan error tied to the importing file
    pub fn scan(message: String, file_path: PathBuf) -> Self {
        Self::Scan {
            message,
            file_path: Some(file_path),
        }
    }

    /// File the error was raised for, when one is known
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            StyleError::Scope { file_path, .. } | StyleError::Scan { file_path, .. } => {
                file_path.as_ref()
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;

impl From<anyhow::Error> for StyleError {
    fn from(err: anyhow::Error) -> Self {
        StyleError::Other(err.to_string())
    }
}
