//! XML front end for the [`ippvm`](../ippvm/index.html) execution engine.
//!
//! IPPcode23 programs are delivered as an XML document:
//!
//! ```xml
//! <program language="IPPcode23">
//!   <instruction order="1" opcode="DEFVAR">
//!     <arg1 type="var">GF@greeting</arg1>
//!   </instruction>
//!   <instruction order="2" opcode="MOVE">
//!     <arg1 type="var">GF@greeting</arg1>
//!     <arg2 type="string">hello\032world</arg2>
//!   </instruction>
//! </program>
//! ```
//!
//! [`parse_program`] validates the document against the program format,
//! decodes operands (including the `\ddd` string escapes) and returns the
//! instruction list sorted by the `order` attribute. Label linking and
//! everything after it is the engine's business; feed the result to
//! `ippvm::Program::link`.
//!
//! The XML itself is handled by [quick-xml]; [`LoadError`] wraps its
//! errors and maps every failure to the interpreter exit code the
//! language defines (31 for malformed XML, 32 for format violations, 52
//! for an unknown frame tag).
//!
//! [quick-xml]: https://docs.rs/quick-xml/

mod error;
mod reader;
mod text;


pub use error::{LoadError, Result};
pub use reader::parse_program;
