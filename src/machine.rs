mod logic;

use std::io::Write;

use crate::error::Fault;
use crate::frame::FrameStore;
use crate::io::LineSource;
use crate::program::Program;
use crate::value::Value;

use self::logic::tick;

/// Outcome of executing a single instruction.
pub enum TickResult {
    /// Fall through to the following instruction.
    Next,
    /// Continue at the instruction after the given position.
    Jump(usize),
    /// Terminate the program with the given exit code.
    Stop(i32),
}

/// The IPPcode23 execution engine.
///
/// All mutable interpreter state lives here: the frame store, the data
/// and call stacks and the program counter. The program itself and the
/// I/O channels are passed into [`Machine::run`].
#[derive(Debug, Default)]
pub struct Machine {
    frames: FrameStore,
    data_stack: Vec<Value>,
    call_stack: Vec<usize>,
    program_counter: usize,
}

impl Machine {
    pub fn new() -> Machine {
        Machine::default()
    }

    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    pub fn data_stack(&self) -> &[Value] {
        &self.data_stack
    }

    pub fn call_stack(&self) -> &[usize] {
        &self.call_stack
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    /// Runs `program` to completion.
    ///
    /// Returns the program's exit code: `0` when execution falls off the
    /// end of the instruction list, or the code given to `EXIT`. The
    /// first fault aborts the run.
    ///
    /// Jump handlers report the position of their target instruction;
    /// the post-increment here is what makes a jump to a `LABEL` resume
    /// at the instruction after it.
    pub fn run(
        &mut self,
        program: &Program,
        input: &mut dyn LineSource,
        output: &mut dyn Write,
        log: &mut dyn Write,
    ) -> Result<i32, Fault> {
        loop {
            let instruction = match program.instruction(self.program_counter) {
                Some(instruction) => instruction,
                None => return Ok(0),
            };

            match tick(self, program, instruction, input, output, log)? {
                TickResult::Next => self.program_counter += 1,
                TickResult::Jump(target) => self.program_counter = target + 1,
                TickResult::Stop(code) => return Ok(code),
            }
        }
    }

    fn pop(&mut self) -> Result<Value, Fault> {
        self.data_stack.pop().ok_or(Fault::StackUnderflow)
    }
}
