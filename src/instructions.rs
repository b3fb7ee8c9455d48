use std::fmt;

use util::EnumFromStr;
use util_derive::EnumFromStr;

use crate::frame::Variable;
use crate::value::{DataType, Value};

/// IPPcode23 instruction set.
///
/// Opcodes are written in source as case-insensitive names; the loader
/// uppercases them before parsing. The `…S` family mirrors the scalar
/// instructions but takes its operands from the data stack instead of
/// explicit argument positions (for a binary `x OP y`, `y` is popped
/// first).
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
pub enum Opcode {
    /// Copies the resolved second operand into the target variable.
    MOVE,
    /// Installs a fresh temporary frame, discarding any existing one.
    CREATEFRAME,
    /// Moves the temporary frame onto the local frame stack.
    PUSHFRAME,
    /// Moves the top local frame back into the temporary slot.
    POPFRAME,
    /// Creates an unset variable slot in the addressed frame.
    DEFVAR,
    /// Pushes the current position onto the call stack and jumps to the
    /// label.
    CALL,
    /// Pops the call stack and resumes after the matching `CALL`.
    RETURN,
    /// Pushes the resolved operand onto the data stack.
    PUSHS,
    /// Pops the data stack into the target variable.
    POPS,
    /// Empties the data stack.
    CLEARS,
    /// Integer addition.
    ADD,
    /// Integer subtraction.
    SUB,
    /// Integer multiplication.
    MUL,
    /// Integer division, truncated toward zero. Zero divisor is a fault.
    IDIV,
    /// Stack variant of `ADD`.
    ADDS,
    /// Stack variant of `SUB`.
    SUBS,
    /// Stack variant of `MUL`.
    MULS,
    /// Stack variant of `IDIV`.
    IDIVS,
    /// Less-than over two operands of the same type (int, string or
    /// bool); writes a bool.
    LT,
    /// Greater-than, same typing rule as `LT`.
    GT,
    /// Equality; operands must have the same type unless either is nil.
    EQ,
    /// Stack variant of `LT`.
    LTS,
    /// Stack variant of `GT`.
    GTS,
    /// Stack variant of `EQ`.
    EQS,
    /// Boolean conjunction.
    AND,
    /// Boolean disjunction.
    OR,
    /// Boolean negation (unary).
    NOT,
    /// Stack variant of `AND`.
    ANDS,
    /// Stack variant of `OR`.
    ORS,
    /// Stack variant of `NOT`.
    NOTS,
    /// Converts a code point to a one-character string.
    INT2CHAR,
    /// Code point of the character at the given index of a string.
    STRI2INT,
    /// Stack variant of `INT2CHAR`.
    INT2CHARS,
    /// Stack variant of `STRI2INT`.
    STRI2INTS,
    /// Reads one input line and coerces it to the named type.
    READ,
    /// Prints the resolved operand to standard output, no newline.
    WRITE,
    /// String concatenation.
    CONCAT,
    /// String length in characters.
    STRLEN,
    /// One-character string at the given index.
    GETCHAR,
    /// Replaces one character of the target variable's string value.
    SETCHAR,
    /// Writes the operand's type name, or the empty string for an unset
    /// variable.
    TYPE,
    /// Declares a jump target; no effect at run time.
    LABEL,
    /// Unconditional jump.
    JUMP,
    /// Jumps when both operands are equal under the `EQ` rule.
    JUMPIFEQ,
    /// Jumps when the operands are not equal under the `EQ` rule.
    JUMPIFNEQ,
    /// Stack variant of `JUMPIFEQ`.
    JUMPIFEQS,
    /// Stack variant of `JUMPIFNEQ`.
    JUMPIFNEQS,
    /// Terminates the program with the given code in `[0, 49]`.
    EXIT,
    /// Prints the resolved operand to standard error.
    DPRINT,
    /// Dumps interpreter state to standard error.
    BREAK,
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl fmt::Display for $e {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(Opcode);

/// Operand shape an opcode expects at one argument position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperandKind {
    /// A variable reference.
    Variable,
    /// A variable reference or a literal of any value type.
    Symbol,
    /// A label name.
    Label,
    /// A type name.
    Type,
}

impl Opcode {
    /// Expected operands, in argument order.
    pub fn operands(self) -> &'static [OperandKind] {
        use OperandKind::{Label, Symbol, Type};
        use OperandKind::Variable as Var;

        match self {
            Opcode::CREATEFRAME
            | Opcode::PUSHFRAME
            | Opcode::POPFRAME
            | Opcode::RETURN
            | Opcode::CLEARS
            | Opcode::ADDS
            | Opcode::SUBS
            | Opcode::MULS
            | Opcode::IDIVS
            | Opcode::LTS
            | Opcode::GTS
            | Opcode::EQS
            | Opcode::ANDS
            | Opcode::ORS
            | Opcode::NOTS
            | Opcode::INT2CHARS
            | Opcode::STRI2INTS
            | Opcode::BREAK => &[],

            Opcode::DEFVAR | Opcode::POPS => &[Var],
            Opcode::CALL
            | Opcode::LABEL
            | Opcode::JUMP
            | Opcode::JUMPIFEQS
            | Opcode::JUMPIFNEQS => &[Label],
            Opcode::PUSHS | Opcode::WRITE | Opcode::EXIT | Opcode::DPRINT => &[Symbol],

            Opcode::MOVE
            | Opcode::NOT
            | Opcode::INT2CHAR
            | Opcode::STRLEN
            | Opcode::TYPE => &[Var, Symbol],
            Opcode::READ => &[Var, Type],

            Opcode::ADD
            | Opcode::SUB
            | Opcode::MUL
            | Opcode::IDIV
            | Opcode::LT
            | Opcode::GT
            | Opcode::EQ
            | Opcode::AND
            | Opcode::OR
            | Opcode::STRI2INT
            | Opcode::CONCAT
            | Opcode::GETCHAR
            | Opcode::SETCHAR => &[Var, Symbol, Symbol],
            Opcode::JUMPIFEQ | Opcode::JUMPIFNEQ => &[Label, Symbol, Symbol],
        }
    }
}

/// A decoded instruction operand.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// A variable reference, `FRAME@name` in source.
    Var(Variable),
    /// A literal value, decoded from its textual form at load time.
    Literal(Value),
    /// A label name.
    Label(String),
    /// A type name.
    Type(DataType),
}

impl Arg {
    /// Source-level name of the operand's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Arg::Var(_) => "var",
            Arg::Literal(value) => value.type_name(),
            Arg::Label(_) => "label",
            Arg::Type(_) => "type",
        }
    }
}

/// One instruction record of a source program.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    /// The source `order` attribute; execution order is the position in
    /// the loaded list.
    pub order: u32,
    pub opcode: Opcode,
    pub args: Vec<Arg>,
}

impl Instruction {
    pub fn new(order: u32, opcode: Opcode, args: Vec<Arg>) -> Instruction {
        Instruction {
            order,
            opcode,
            args,
        }
    }
}

/// Constructs an [`Arg`] from a short literal notation.
///
/// ```
/// use ippvm::{arg, Arg, Value};
///
/// assert_eq!(arg!(int 42), Arg::Literal(Value::Int(42)));
/// assert_eq!(arg!(bool true), Arg::Literal(Value::Bool(true)));
/// ```
#[macro_export]
macro_rules! arg {
    (var $frame:ident @ $name:ident) => {
        $crate::Arg::Var($crate::Variable::new(
            $crate::FrameTag::$frame,
            stringify!($name),
        ))
    };
    (int $value:expr) => {
        $crate::Arg::Literal($crate::Value::Int($value))
    };
    (string $value:expr) => {
        $crate::Arg::Literal($crate::Value::Str(String::from($value)))
    };
    (bool $value:expr) => {
        $crate::Arg::Literal($crate::Value::Bool($value))
    };
    (nil) => {
        $crate::Arg::Literal($crate::Value::Nil)
    };
    (label $name:ident) => {
        $crate::Arg::Label(String::from(stringify!($name)))
    };
    (type $ty:ident) => {
        $crate::Arg::Type($crate::DataType::$ty)
    };
}

/// Constructs an [`Instruction`] with its operands in [`arg!`] notation.
///
/// ```
/// use ippvm::instr;
///
/// let mov = instr!(MOVE, [var GF@counter], [int 0]);
/// assert_eq!(mov.args.len(), 2);
/// ```
#[macro_export]
macro_rules! instr {
    ($opcode:ident) => {
        $crate::Instruction::new(0, $crate::Opcode::$opcode, vec![])
    };
    ($opcode:ident $(, [$($arg:tt)+])+) => {
        $crate::Instruction::new(
            0,
            $crate::Opcode::$opcode,
            vec![$($crate::arg!($($arg)+)),+],
        )
    };
}
