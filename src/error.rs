use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextFinderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unable to compile regular expression '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unable to compile file set pattern '{selector}'")]
    InvalidSelector {
        selector: String,
        #[source]
        source: globset::Error,
    },

    #[error("File set '{selector}' is empty")]
    EmptySourceSet { selector: String },

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TextFinderError>;
