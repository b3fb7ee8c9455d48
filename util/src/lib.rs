use std::{error::Error, fmt};

/// Error returned when a textual name does not match any variant of the
/// target enum.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Failed to parse \"{}\" as {}.",
            &self.value, &self.enum_name
        )
    }
}

impl Error for ParseEnumError {}

/// Name-based parsing for field-less enums, derivable via `util-derive`.
///
/// Variant names are matched exactly; callers that accept case-insensitive
/// input normalize the string first (the program loader uppercases opcode
/// text before parsing).
pub trait EnumFromStr: Sized {
    fn from_str(s: &str) -> Result<Self, ParseEnumError>;
}
