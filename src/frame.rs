use std::collections::HashMap;
use std::fmt;

use util::EnumFromStr;
use util_derive::EnumFromStr;

use crate::error::Fault;
use crate::value::Value;

/// Frame selector of a variable reference, the `FRAME` in `FRAME@name`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
pub enum FrameTag {
    /// The global frame, alive for the whole run.
    GF,
    /// The temporary frame, created by `CREATEFRAME`.
    TF,
    /// The topmost local frame.
    LF,
}

impl fmt::Display for FrameTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single variable reference.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Variable {
    pub frame: FrameTag,
    pub name: String,
}

impl Variable {
    pub fn new(frame: FrameTag, name: impl Into<String>) -> Variable {
        Variable {
            frame,
            name: name.into(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.frame, self.name)
    }
}

/// One scope mapping variable names to optional values.
///
/// A name mapped to `None` is defined but unset: `DEFVAR` ran for it,
/// no write did yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    slots: HashMap<String, Option<Value>>,
}

impl Frame {
    pub fn new() -> Frame {
        Frame::default()
    }

    /// Inserts an unset slot. Returns `false` when the name already
    /// exists in this frame.
    fn define(&mut self, name: &str) -> bool {
        if self.slots.contains_key(name) {
            return false;
        }
        self.slots.insert(name.to_string(), None);
        true
    }

    /// Overwrites an existing slot. Returns `false` when the name is not
    /// defined in this frame.
    fn set(&mut self, name: &str, value: Value) -> bool {
        match self.slots.get_mut(name) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    /// The slot for `name`: `None` if undefined, `Some(None)` if defined
    /// but unset.
    pub fn slot(&self, name: &str) -> Option<&Option<Value>> {
        self.slots.get(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Formats the frame contents for diagnostics (`BREAK`), sorted by name.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<&String> = self.slots.keys().collect();
        names.sort();

        f.write_str("{")?;
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match &self.slots[*name] {
                Some(value) => write!(f, "{}={:?}", name, value)?,
                None => write!(f, "{}=(unset)", name)?,
            }
        }
        f.write_str("}")
    }
}

/// The global frame, the optional temporary frame and the stack of local
/// frames.
///
/// The temporary frame has three states: never created, open, or moved
/// away by `PUSHFRAME`. Operations addressing it while absent fail with
/// [`Fault::FrameMissing`], as do local-frame operations on an empty
/// frame stack.
#[derive(Debug, Default)]
pub struct FrameStore {
    global: Frame,
    temporary: Option<Frame>,
    locals: Vec<Frame>,
}

impl FrameStore {
    pub fn new() -> FrameStore {
        FrameStore::default()
    }

    fn frame(&self, tag: FrameTag) -> Result<&Frame, Fault> {
        match tag {
            FrameTag::GF => Ok(&self.global),
            FrameTag::TF => self.temporary.as_ref().ok_or(Fault::FrameMissing(tag)),
            FrameTag::LF => self.locals.last().ok_or(Fault::FrameMissing(tag)),
        }
    }

    fn frame_mut(&mut self, tag: FrameTag) -> Result<&mut Frame, Fault> {
        match tag {
            FrameTag::GF => Ok(&mut self.global),
            FrameTag::TF => self.temporary.as_mut().ok_or(Fault::FrameMissing(tag)),
            FrameTag::LF => self.locals.last_mut().ok_or(Fault::FrameMissing(tag)),
        }
    }

    /// `DEFVAR`: creates an unset slot in the addressed frame.
    pub fn define(&mut self, var: &Variable) -> Result<(), Fault> {
        if self.frame_mut(var.frame)?.define(&var.name) {
            Ok(())
        } else {
            Err(Fault::Redefinition(var.clone()))
        }
    }

    /// Writes a value into an existing slot.
    pub fn set(&mut self, var: &Variable, value: Value) -> Result<(), Fault> {
        if self.frame_mut(var.frame)?.set(&var.name, value) {
            Ok(())
        } else {
            Err(Fault::UndefinedVariable(var.clone()))
        }
    }

    /// Reads the value of a defined, set variable.
    pub fn get(&self, var: &Variable) -> Result<&Value, Fault> {
        match self.slot(var)? {
            Some(value) => Ok(value),
            None => Err(Fault::UnsetVariable(var.clone())),
        }
    }

    /// Inspects a variable's slot without requiring it to be set.
    ///
    /// `TYPE` is the one instruction that reads through this instead of
    /// [`FrameStore::get`].
    pub fn slot(&self, var: &Variable) -> Result<Option<&Value>, Fault> {
        match self.frame(var.frame)?.slot(&var.name) {
            Some(slot) => Ok(slot.as_ref()),
            None => Err(Fault::UndefinedVariable(var.clone())),
        }
    }

    /// `CREATEFRAME`: installs a fresh temporary frame, discarding any
    /// previous one.
    pub fn create_temporary(&mut self) {
        self.temporary = Some(Frame::new());
    }

    /// `PUSHFRAME`: moves the temporary frame onto the local stack.
    pub fn push_temporary(&mut self) -> Result<(), Fault> {
        let frame = self
            .temporary
            .take()
            .ok_or(Fault::FrameMissing(FrameTag::TF))?;
        self.locals.push(frame);
        Ok(())
    }

    /// `POPFRAME`: moves the top local frame back into the temporary
    /// slot, replacing whatever was there.
    pub fn pop_local(&mut self) -> Result<(), Fault> {
        let frame = self.locals.pop().ok_or(Fault::FrameMissing(FrameTag::LF))?;
        self.temporary = Some(frame);
        Ok(())
    }

    pub fn global(&self) -> &Frame {
        &self.global
    }

    pub fn temporary(&self) -> Option<&Frame> {
        self.temporary.as_ref()
    }

    pub fn locals(&self) -> &[Frame] {
        &self.locals
    }
}
