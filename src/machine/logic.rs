use std::convert::TryFrom;
use std::io::Write;

use crate::error::Fault;
use crate::frame::Variable;
use crate::instructions::{Arg, Instruction, Opcode};
use crate::io::LineSource;
use crate::program::Program;
use crate::value::{DataType, Value};
use crate::Int;

use super::{Machine, TickResult};

fn variable(arg: &Arg) -> Result<&Variable, Fault> {
    match arg {
        Arg::Var(var) => Ok(var),
        arg => Err(Fault::bad_type("var", arg.kind_name())),
    }
}

fn label(arg: &Arg) -> Result<&str, Fault> {
    match arg {
        Arg::Label(name) => Ok(name),
        arg => Err(Fault::bad_type("label", arg.kind_name())),
    }
}

fn data_type(arg: &Arg) -> Result<DataType, Fault> {
    match arg {
        Arg::Type(ty) => Ok(*ty),
        arg => Err(Fault::bad_type("type", arg.kind_name())),
    }
}

/// Resolves a symbol operand to its value: variables are read from their
/// frame, literals are taken as-is.
fn resolve(machine: &Machine, arg: &Arg) -> Result<Value, Fault> {
    match arg {
        Arg::Var(var) => machine.frames.get(var).map(Clone::clone),
        Arg::Literal(value) => Ok(value.clone()),
        arg => Err(Fault::bad_type("symb", arg.kind_name())),
    }
}

fn int(value: &Value) -> Result<Int, Fault> {
    match value {
        Value::Int(value) => Ok(*value),
        value => Err(Fault::bad_type("int", value.type_name())),
    }
}

fn string(value: &Value) -> Result<&str, Fault> {
    match value {
        Value::Str(value) => Ok(value),
        value => Err(Fault::bad_type("string", value.type_name())),
    }
}

fn boolean(value: &Value) -> Result<bool, Fault> {
    match value {
        Value::Bool(value) => Ok(*value),
        value => Err(Fault::bad_type("bool", value.type_name())),
    }
}

/// Integer arithmetic shared by the scalar and stack variants. Wraps on
/// overflow; a zero divisor is a fault.
fn arith(opcode: Opcode, x: Int, y: Int) -> Result<Value, Fault> {
    let result = match opcode {
        Opcode::ADD | Opcode::ADDS => x.wrapping_add(y),
        Opcode::SUB | Opcode::SUBS => x.wrapping_sub(y),
        Opcode::MUL | Opcode::MULS => x.wrapping_mul(y),
        Opcode::IDIV | Opcode::IDIVS => {
            if y == 0 {
                return Err(Fault::DivisionByZero);
            }
            x.wrapping_div(y)
        }
        _ => unreachable!(),
    };
    Ok(Value::Int(result))
}

/// Ordering comparison over two operands of the same type. Ints compare
/// numerically, strings byte-wise, bools with `false < true`; nil is
/// never ordered.
fn compare(opcode: Opcode, x: &Value, y: &Value) -> Result<Value, Fault> {
    let less = match (x, y) {
        (Value::Int(a), Value::Int(b)) => a < b,
        (Value::Str(a), Value::Str(b)) => a < b,
        (Value::Bool(a), Value::Bool(b)) => a < b,
        _ => {
            return Err(Fault::bad_type(
                "two int, string or bool operands of the same type",
                format!("{} and {}", x.type_name(), y.type_name()),
            ))
        }
    };
    let result = match opcode {
        Opcode::LT | Opcode::LTS => less,
        Opcode::GT | Opcode::GTS => !less && x != y,
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}

/// Equality under the `EQ` rule: matching types compare by value, nil
/// equals only nil, any other mix of types is a fault.
fn equals(x: &Value, y: &Value) -> Result<bool, Fault> {
    match (x, y) {
        (Value::Nil, _) | (_, Value::Nil) => Ok(x == y),
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        _ => Err(Fault::bad_type(
            "operands of the same type",
            format!("{} and {}", x.type_name(), y.type_name()),
        )),
    }
}

fn logical(opcode: Opcode, x: bool, y: bool) -> Value {
    Value::Bool(match opcode {
        Opcode::AND | Opcode::ANDS => x && y,
        _ => x || y,
    })
}

fn int_to_char(code: Int) -> Result<Value, Fault> {
    u32::try_from(code)
        .ok()
        .and_then(std::char::from_u32)
        .map(|c| Value::Str(c.to_string()))
        .ok_or(Fault::BadCodePoint(code))
}

/// The character at `index`, counting Unicode scalar values.
fn char_at(text: &str, index: Int) -> Result<char, Fault> {
    let length = text.chars().count();
    usize::try_from(index)
        .ok()
        .filter(|&i| i < length)
        .and_then(|i| text.chars().nth(i))
        .ok_or(Fault::IndexOutOfRange { index, length })
}

/// Rebuilds `target` with the character at `index` replaced by the first
/// character of `replacement`.
fn set_char(target: &str, index: Int, replacement: &str) -> Result<Value, Fault> {
    let first = replacement.chars().next().ok_or(Fault::EmptyReplacement)?;
    let length = target.chars().count();
    let at = usize::try_from(index)
        .ok()
        .filter(|&i| i < length)
        .ok_or(Fault::IndexOutOfRange { index, length })?;

    let result = target
        .chars()
        .enumerate()
        .map(|(i, c)| if i == at { first } else { c })
        .collect();
    Ok(Value::Str(result))
}

/// `READ` coercion of one input line; `None` means end of input.
fn read_value(line: Option<String>, ty: DataType) -> Value {
    let line = match line {
        Some(line) => line,
        None => return Value::Nil,
    };
    let text = line.trim();

    match ty {
        DataType::Int => text.parse().map(Value::Int).unwrap_or(Value::Nil),
        DataType::Bool => Value::Bool(text.eq_ignore_ascii_case("true")),
        DataType::String => Value::Str(text.to_string()),
        DataType::Nil => Value::Nil,
    }
}

fn break_dump(
    machine: &Machine,
    instruction: &Instruction,
    log: &mut dyn Write,
) -> Result<(), Fault> {
    writeln!(
        log,
        "break at position {} (order {})",
        machine.program_counter, instruction.order
    )?;
    writeln!(log, "data stack depth: {}", machine.data_stack.len())?;
    writeln!(log, "call stack depth: {}", machine.call_stack.len())?;
    writeln!(log, "global frame: {}", machine.frames.global())?;
    match machine.frames.temporary() {
        Some(frame) => writeln!(log, "temporary frame: {}", frame)?,
        None => writeln!(log, "temporary frame: (absent)")?,
    }
    for (depth, frame) in machine.frames.locals().iter().rev().enumerate() {
        writeln!(log, "local frame {}: {}", depth, frame)?;
    }
    Ok(())
}

/// Executes one instruction against the machine state.
///
/// Handlers that transfer control return [`TickResult::Jump`] with the
/// position of the target instruction; everything else falls through
/// with [`TickResult::Next`].
pub fn tick(
    machine: &mut Machine,
    program: &Program,
    instruction: &Instruction,
    input: &mut dyn LineSource,
    output: &mut dyn Write,
    log: &mut dyn Write,
) -> Result<TickResult, Fault> {
    let args = &instruction.args;

    match instruction.opcode {
        Opcode::MOVE => {
            let value = resolve(machine, &args[1])?;
            machine.frames.set(variable(&args[0])?, value)?;
        }

        Opcode::CREATEFRAME => machine.frames.create_temporary(),
        Opcode::PUSHFRAME => machine.frames.push_temporary()?,
        Opcode::POPFRAME => machine.frames.pop_local()?,
        Opcode::DEFVAR => machine.frames.define(variable(&args[0])?)?,

        Opcode::CALL => {
            let target = program.label(label(&args[0])?)?;
            machine.call_stack.push(machine.program_counter);
            return Ok(TickResult::Jump(target));
        }

        Opcode::RETURN => {
            let target = machine
                .call_stack
                .pop()
                .ok_or(Fault::CallStackUnderflow)?;
            return Ok(TickResult::Jump(target));
        }

        Opcode::PUSHS => {
            let value = resolve(machine, &args[0])?;
            machine.data_stack.push(value);
        }

        Opcode::POPS => {
            let value = machine.pop()?;
            machine.frames.set(variable(&args[0])?, value)?;
        }

        Opcode::CLEARS => machine.data_stack.clear(),

        Opcode::ADD | Opcode::SUB | Opcode::MUL | Opcode::IDIV => {
            let x = int(&resolve(machine, &args[1])?)?;
            let y = int(&resolve(machine, &args[2])?)?;
            let result = arith(instruction.opcode, x, y)?;
            machine.frames.set(variable(&args[0])?, result)?;
        }

        Opcode::ADDS | Opcode::SUBS | Opcode::MULS | Opcode::IDIVS => {
            let y = int(&machine.pop()?)?;
            let x = int(&machine.pop()?)?;
            let result = arith(instruction.opcode, x, y)?;
            machine.data_stack.push(result);
        }

        Opcode::LT | Opcode::GT => {
            let x = resolve(machine, &args[1])?;
            let y = resolve(machine, &args[2])?;
            let result = compare(instruction.opcode, &x, &y)?;
            machine.frames.set(variable(&args[0])?, result)?;
        }

        Opcode::LTS | Opcode::GTS => {
            let y = machine.pop()?;
            let x = machine.pop()?;
            let result = compare(instruction.opcode, &x, &y)?;
            machine.data_stack.push(result);
        }

        Opcode::EQ => {
            let x = resolve(machine, &args[1])?;
            let y = resolve(machine, &args[2])?;
            let result = Value::Bool(equals(&x, &y)?);
            machine.frames.set(variable(&args[0])?, result)?;
        }

        Opcode::EQS => {
            let y = machine.pop()?;
            let x = machine.pop()?;
            let result = Value::Bool(equals(&x, &y)?);
            machine.data_stack.push(result);
        }

        Opcode::AND | Opcode::OR => {
            let x = boolean(&resolve(machine, &args[1])?)?;
            let y = boolean(&resolve(machine, &args[2])?)?;
            let result = logical(instruction.opcode, x, y);
            machine.frames.set(variable(&args[0])?, result)?;
        }

        Opcode::ANDS | Opcode::ORS => {
            let y = boolean(&machine.pop()?)?;
            let x = boolean(&machine.pop()?)?;
            let result = logical(instruction.opcode, x, y);
            machine.data_stack.push(result);
        }

        Opcode::NOT => {
            let x = boolean(&resolve(machine, &args[1])?)?;
            machine.frames.set(variable(&args[0])?, Value::Bool(!x))?;
        }

        Opcode::NOTS => {
            let x = boolean(&machine.pop()?)?;
            machine.data_stack.push(Value::Bool(!x));
        }

        Opcode::INT2CHAR => {
            let code = int(&resolve(machine, &args[1])?)?;
            machine.frames.set(variable(&args[0])?, int_to_char(code)?)?;
        }

        Opcode::INT2CHARS => {
            let code = int(&machine.pop()?)?;
            machine.data_stack.push(int_to_char(code)?);
        }

        Opcode::STRI2INT => {
            let text = resolve(machine, &args[1])?;
            let index = int(&resolve(machine, &args[2])?)?;
            let code = char_at(string(&text)?, index)? as u32;
            machine
                .frames
                .set(variable(&args[0])?, Value::Int(Int::from(code)))?;
        }

        Opcode::STRI2INTS => {
            let index = int(&machine.pop()?)?;
            let text = machine.pop()?;
            let code = char_at(string(&text)?, index)? as u32;
            machine.data_stack.push(Value::Int(Int::from(code)));
        }

        Opcode::READ => {
            let ty = data_type(&args[1])?;
            let value = read_value(input.read_line(), ty);
            machine.frames.set(variable(&args[0])?, value)?;
        }

        Opcode::WRITE => {
            let value = resolve(machine, &args[0])?;
            write!(output, "{}", value)?;
        }

        Opcode::CONCAT => {
            let left = resolve(machine, &args[1])?;
            let right = resolve(machine, &args[2])?;
            let mut result = String::from(string(&left)?);
            result.push_str(string(&right)?);
            machine.frames.set(variable(&args[0])?, Value::Str(result))?;
        }

        Opcode::STRLEN => {
            let text = resolve(machine, &args[1])?;
            let length = string(&text)?.chars().count();
            machine
                .frames
                .set(variable(&args[0])?, Value::Int(length as Int))?;
        }

        Opcode::GETCHAR => {
            let text = resolve(machine, &args[1])?;
            let index = int(&resolve(machine, &args[2])?)?;
            let result = char_at(string(&text)?, index)?.to_string();
            machine.frames.set(variable(&args[0])?, Value::Str(result))?;
        }

        Opcode::SETCHAR => {
            let var = variable(&args[0])?;
            let target = machine.frames.get(var)?.clone();
            let index = int(&resolve(machine, &args[1])?)?;
            let replacement = resolve(machine, &args[2])?;
            let result = set_char(string(&target)?, index, string(&replacement)?)?;
            machine.frames.set(var, result)?;
        }

        Opcode::TYPE => {
            let name = match &args[1] {
                Arg::Var(source) => match machine.frames.slot(source)? {
                    Some(value) => value.type_name(),
                    None => "",
                },
                Arg::Literal(value) => value.type_name(),
                arg => return Err(Fault::bad_type("symb", arg.kind_name())),
            };
            machine
                .frames
                .set(variable(&args[0])?, Value::Str(name.to_string()))?;
        }

        // Labels are linked in the pre-pass; at run time they fall
        // through.
        Opcode::LABEL => {}

        Opcode::JUMP => {
            return Ok(TickResult::Jump(program.label(label(&args[0])?)?));
        }

        Opcode::JUMPIFEQ | Opcode::JUMPIFNEQ => {
            // The target must exist even when the jump is not taken.
            let target = program.label(label(&args[0])?)?;
            let x = resolve(machine, &args[1])?;
            let y = resolve(machine, &args[2])?;
            let equal = equals(&x, &y)?;
            if equal == (instruction.opcode == Opcode::JUMPIFEQ) {
                return Ok(TickResult::Jump(target));
            }
        }

        Opcode::JUMPIFEQS | Opcode::JUMPIFNEQS => {
            let target = program.label(label(&args[0])?)?;
            let y = machine.pop()?;
            let x = machine.pop()?;
            let equal = equals(&x, &y)?;
            if equal == (instruction.opcode == Opcode::JUMPIFEQS) {
                return Ok(TickResult::Jump(target));
            }
        }

        Opcode::EXIT => {
            let code = int(&resolve(machine, &args[0])?)?;
            if !(0..=49).contains(&code) {
                return Err(Fault::BadExitCode(code));
            }
            return Ok(TickResult::Stop(code as i32));
        }

        Opcode::DPRINT => {
            let value = resolve(machine, &args[0])?;
            writeln!(log, "{}", value)?;
        }

        Opcode::BREAK => break_dump(machine, instruction, log)?,
    }

    Ok(TickResult::Next)
}
