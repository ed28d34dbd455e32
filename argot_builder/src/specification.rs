mod argument;
mod lexer;
mod option;

pub use argument::*;
pub use option::*;

use thiserror::Error;

/// A malformed argument or option specification.
///
/// Every variant carries the offending specification string as `spec`.
/// Offsets are byte offsets into `spec`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SpecError {
    /// The specification has no identifier at all (ex: `""`).
    #[error("Specification '{spec}' is missing an identifier.")]
    MissingIdentifier { spec: String },

    /// The brackets of an optional argument enclose nothing (ex: `"[]"`).
    #[error("Specification '{spec}' has an empty identifier.")]
    EmptyIdentifier { spec: String },

    /// Whitespace where none is permitted (ex: `"A B"`).
    #[error("Specification '{spec}' has unexpected whitespace at offset {offset}.")]
    UnexpectedWhitespace { spec: String, offset: usize },

    /// A character which is not part of the grammar (ex: `"A$"`).
    #[error("Specification '{spec}' has an invalid character '{character}' at offset {offset}.")]
    InvalidCharacter {
        spec: String,
        character: char,
        offset: usize,
    },

    /// An opening bracket without its closing bracket (ex: `"[A"`).
    #[error("Specification '{spec}' has an unterminated bracket.")]
    UnterminatedBracket { spec: String },

    /// An option name that is neither a valid long nor short name (ex: `"--$$$"`).
    #[error("Specification '{spec}' has an invalid option name '{name}'.")]
    InvalidOptionName { spec: String, name: String },

    /// A single dash name with more than one character (ex: `"-abc"`).
    #[error("Specification '{spec}' has a short option name '{name}' longer than one character.")]
    ShortNameTooLong { spec: String, name: String },

    /// An option name without a leading dash (ex: `"abc"`).
    #[error("Specification '{spec}' must prefix option names with '-' or '--'.")]
    MissingDashPrefix { spec: String },

    /// A value part without a value name (ex: `"--foo="`).
    #[error("Specification '{spec}' is missing a value name.")]
    EmptyValueName { spec: String },

    /// A value name with characters outside `[A-Za-z0-9_-]` (ex: `"--foo=$"`).
    #[error("Specification '{spec}' has an invalid value name '{name}'.")]
    InvalidValueName { spec: String, name: String },

    /// An opening bracket not followed by `=` (ex: `"--foo[]"`).
    #[error("Specification '{spec}' expected '=' at offset {offset}.")]
    ExpectedEquals { spec: String, offset: usize },

    /// Input after an otherwise complete specification (ex: `"--foo=BAR]"`).
    #[error("Specification '{spec}' has unexpected trailing input at offset {offset}.")]
    UnexpectedTrailingInput { spec: String, offset: usize },
}

impl SpecError {
    /// The specification string that failed to parse.
    pub fn spec(&self) -> &str {
        match self {
            SpecError::MissingIdentifier { spec }
            | SpecError::EmptyIdentifier { spec }
            | SpecError::UnexpectedWhitespace { spec, .. }
            | SpecError::InvalidCharacter { spec, .. }
            | SpecError::UnterminatedBracket { spec }
            | SpecError::InvalidOptionName { spec, .. }
            | SpecError::ShortNameTooLong { spec, .. }
            | SpecError::MissingDashPrefix { spec }
            | SpecError::EmptyValueName { spec }
            | SpecError::InvalidValueName { spec, .. }
            | SpecError::ExpectedEquals { spec, .. }
            | SpecError::UnexpectedTrailingInput { spec, .. } => spec,
        }
    }
}

pub(crate) fn is_identifier_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

pub(crate) fn is_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_identifier_character)
}
