use std::fmt;

use util::ParseEnumError;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors raised while loading a program from its XML source.
///
/// [`LoadError::code`] maps each variant to the interpreter exit code it
/// terminates the process with.
#[derive(Debug)]
pub enum LoadError {
    /// The document is not well-formed XML.
    Xml(quick_xml::Error),
    /// An element carries a malformed or duplicate attribute.
    Attr(quick_xml::events::attributes::AttrError),
    /// The document contains no root element.
    MissingRoot,
    /// The document ends in the middle of an element.
    Truncated,
    /// A structural rule of the program format is violated.
    Structure(String),
    /// Two instructions carry the same `order` value.
    DuplicateOrder(u32),
    /// The `opcode` attribute names no known instruction.
    UnknownOpcode(ParseEnumError),
    /// A literal body does not parse as its declared type.
    BadLiteral { ty: &'static str, text: String },
    /// A `var` body is not of the form `FRAME@name`.
    BadVariable(String),
    /// A `var` body names a frame other than GF, TF or LF.
    UnknownFrame(ParseEnumError),
    /// A string body contains a malformed `\ddd` escape.
    BadEscape(String),
}

impl LoadError {
    pub(crate) fn structure(message: impl Into<String>) -> LoadError {
        LoadError::Structure(message.into())
    }

    /// The process exit code this error terminates the interpreter with.
    pub fn code(&self) -> i32 {
        match self {
            LoadError::Xml(_)
            | LoadError::Attr(_)
            | LoadError::MissingRoot
            | LoadError::Truncated => 31,
            LoadError::UnknownFrame(_) => 52,
            _ => 32,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Xml(err) => write!(f, "malformed XML: {}", err),
            LoadError::Attr(err) => write!(f, "malformed XML attribute: {}", err),
            LoadError::MissingRoot => f.write_str("document contains no root element"),
            LoadError::Truncated => f.write_str("document ends inside an element"),
            LoadError::Structure(message) => f.write_str(message),
            LoadError::DuplicateOrder(order) => {
                write!(f, "duplicate instruction order {}", order)
            }
            LoadError::UnknownOpcode(err) => write!(f, "unknown opcode: {}", err),
            LoadError::BadLiteral { ty, text } => {
                write!(f, "\"{}\" is not a valid {} literal", text, ty)
            }
            LoadError::BadVariable(text) => {
                write!(f, "\"{}\" is not of the form FRAME@name", text)
            }
            LoadError::UnknownFrame(err) => write!(f, "unknown frame: {}", err),
            LoadError::BadEscape(text) => {
                write!(f, "malformed \\ddd escape in \"{}\"", text)
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<quick_xml::Error> for LoadError {
    fn from(err: quick_xml::Error) -> LoadError {
        LoadError::Xml(err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for LoadError {
    fn from(err: quick_xml::events::attributes::AttrError) -> LoadError {
        LoadError::Attr(err)
    }
}
