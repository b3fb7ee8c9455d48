use std::collections::HashMap;

use crate::error::Fault;
use crate::instructions::{Arg, Instruction, Opcode};

/// A linked program: instructions in execution order plus the label
/// table built by the pre-pass.
///
/// Both are immutable once linked; the machine only walks them.
#[derive(Debug, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: HashMap<String, usize>,
}

impl Program {
    /// Links a list of instructions into an executable program.
    ///
    /// Verifies that every instruction carries the operand count its
    /// opcode expects, then records the position of every `LABEL`.
    /// Duplicate label names and `LABEL` instructions whose operand is
    /// not a label are faults.
    pub fn link(instructions: Vec<Instruction>) -> Result<Program, Fault> {
        let mut labels = HashMap::new();

        for (index, instruction) in instructions.iter().enumerate() {
            let expected = instruction.opcode.operands().len();
            if instruction.args.len() != expected {
                return Err(Fault::MalformedInstruction {
                    opcode: instruction.opcode,
                    expected,
                    found: instruction.args.len(),
                });
            }

            if instruction.opcode == Opcode::LABEL {
                let name = match &instruction.args[0] {
                    Arg::Label(name) => name.clone(),
                    arg => return Err(Fault::bad_type("label", arg.kind_name())),
                };
                if labels.insert(name.clone(), index).is_some() {
                    return Err(Fault::DuplicateLabel(name));
                }
            }
        }

        Ok(Program {
            instructions,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction at `index`, or `None` past the end of the
    /// program.
    pub fn instruction(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Position of the `LABEL` instruction declaring `name`.
    pub fn label(&self, name: &str) -> Result<usize, Fault> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| Fault::UnknownLabel(name.to_string()))
    }
}
