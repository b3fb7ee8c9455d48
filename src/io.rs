use std::io::{self, BufRead};

/// Source of the input lines consumed by `READ`.
pub trait LineSource {
    /// The next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

/// Input lines materialized up front, consumed in order.
///
/// The interpreter reads its whole input before execution starts, so
/// `READ` never blocks mid-run.
#[derive(Clone, Debug, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    next: usize,
}

impl LineBuffer {
    pub fn new(lines: Vec<String>) -> LineBuffer {
        LineBuffer { lines, next: 0 }
    }

    /// Collects all lines from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<LineBuffer> {
        Ok(LineBuffer::new(reader.lines().collect::<io::Result<_>>()?))
    }
}

impl From<&str> for LineBuffer {
    fn from(text: &str) -> LineBuffer {
        LineBuffer::new(text.lines().map(String::from).collect())
    }
}

impl LineSource for LineBuffer {
    fn read_line(&mut self) -> Option<String> {
        let line = self.lines.get(self.next)?.clone();
        self.next += 1;
        Some(line)
    }
}
