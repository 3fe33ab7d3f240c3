mod entity_path;
mod entity_path_part;

pub use self::{entity_path::EntityPath, entity_path_part::EntityPathPart};

/// The errors that can occur when parsing an entity path out of a string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("Double-slashes with no part between")]
    DoubleSlash,

    #[error("Missing escape character before special character: '{0}'")]
    MissingEscape(char),

    #[error("Unknown escape sequence: '\\{0}'")]
    UnknownEscapeSequence(char),

    #[error("Expected e.g. '\\u{{262E}}', found: '\\u{0}'")]
    InvalidUnicodeEscape(String),

    #[error("Trailing backslash")]
    TrailingBackslash,
}
