pub mod error;
pub mod frame;
pub mod instructions;
pub mod io;
pub mod machine;
pub mod program;
pub mod value;

pub use error::Fault;
pub use frame::{Frame, FrameStore, FrameTag, Variable};
pub use instructions::{Arg, Instruction, Opcode, OperandKind};
pub use io::{LineBuffer, LineSource};
pub use machine::{Machine, TickResult};
pub use program::Program;
pub use value::{DataType, Value};

/// Host integer type backing IPPcode23 `int` values.
pub type Int = i64;
