use thiserror::Error;

/// Syntax failure while reading SNBT text. Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input at index {0}")]
    UnexpectedEof(usize),

    #[error("unexpected character '{found}' at index {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unmatched delimiter at index {offset}: expected {expected}, found '{found}'")]
    UnmatchedDelimiter {
        expected: &'static str,
        found: char,
        offset: usize,
    },

    #[error("invalid key at index {0}")]
    InvalidKey(usize),

    #[error("unterminated string starting at index {0}")]
    UnterminatedString(usize),

    #[error("unterminated comment starting at index {0}")]
    UnterminatedComment(usize),

    #[error("invalid \\u escape at index {0}: expected 4 hex digits")]
    InvalidUnicodeEscape(usize),

    #[error("nesting exceeds {} levels at index {}", crate::parser::MAX_DEPTH, .0)]
    TooDeep(usize),

    #[error("Root of SNBT must be a compound")]
    RootNotCompound,

    #[error("Trailing content after root compound at index {0}")]
    TrailingContent(usize),
}

impl ParseError {
    /// Character offset of the failure, when the error is tied to one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEof(o)
            | ParseError::InvalidKey(o)
            | ParseError::UnterminatedString(o)
            | ParseError::UnterminatedComment(o)
            | ParseError::InvalidUnicodeEscape(o)
            | ParseError::TooDeep(o)
            | ParseError::TrailingContent(o) => Some(*o),
            ParseError::UnexpectedChar { offset, .. }
            | ParseError::UnmatchedDelimiter { offset, .. } => Some(*offset),
            ParseError::RootNotCompound => None,
        }
    }
}

/// Failure at the quest mapper boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("invalid SNBT quest content: {0}")]
    InvalidContent(#[from] ParseError),

    #[error("unexpected shape at {path}: expected {expected}")]
    UnexpectedShape { path: String, expected: String },
}

impl FormatError {
    pub(crate) fn shape(path: impl Into<String>, expected: impl Into<String>) -> Self {
        FormatError::UnexpectedShape {
            path: path.into(),
            expected: expected.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
