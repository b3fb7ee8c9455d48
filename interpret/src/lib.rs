use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use ippvm::{Fault, LineBuffer, Machine, Program};


/// Top-level interpreter failure.
#[derive(Debug)]
pub enum Error {
    /// Neither `--source` nor `--input` was given.
    Usage,
    /// A named source or input file cannot be read.
    Io(io::Error, PathBuf),
    /// The XML program failed to load.
    Load(ippxml::LoadError),
    /// Linking or execution failed.
    Run(Fault),
}

impl Error {
    /// The process exit code for this failure.
    pub fn code(&self) -> i32 {
        match self {
            Error::Usage => 10,
            Error::Io(..) => 11,
            Error::Load(err) => err.code(),
            Error::Run(fault) => fault.code(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Usage => {
                f.write_str("expected at least one of --source=<file> and --input=<file>")
            }
            Error::Io(err, path) => {
                write!(f, "cannot read \"{}\": {}", path.display(), err)
            }
            Error::Load(err) => write!(f, "cannot load program: {}", err),
            Error::Run(fault) => write!(f, "cannot run program: {}", fault),
        }
    }
}

impl From<ippxml::LoadError> for Error {
    fn from(err: ippxml::LoadError) -> Error {
        Error::Load(err)
    }
}

impl From<Fault> for Error {
    fn from(fault: Fault) -> Error {
        Error::Run(fault)
    }
}

/// Loads, links and runs an XML program against the given input lines.
///
/// Program output goes to `output`, diagnostics (`DPRINT`, `BREAK`) to
/// `log`. Returns the program's exit code.
pub fn run(
    source: &str,
    input: LineBuffer,
    output: &mut dyn Write,
    log: &mut dyn Write,
) -> Result<i32, Error> {
    let instructions = ippxml::parse_program(source)?;
    let program = Program::link(instructions)?;

    let mut input = input;
    let code = Machine::new().run(&program, &mut input, output, log)?;
    Ok(code)
}

/// The whole driver behind the command line: resolves the source text
/// and input lines from files or stdin, then runs the program.
pub fn run_files(
    source: Option<&str>,
    input: Option<&str>,
    output: &mut dyn Write,
    log: &mut dyn Write,
) -> Result<i32, Error> {
    if source.is_none() && input.is_none() {
        return Err(Error::Usage);
    }

    let source = match source {
        Some(path) => read_source(Path::new(path))?,
        None => read_stdin_source()?,
    };
    let input = match input {
        Some(path) => read_lines(Path::new(path))?,
        None => read_stdin_lines()?,
    };

    run(&source, input, output, log)
}

fn read_source(path: &Path) -> Result<String, Error> {
    let mut source = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut source))
        .map_err(|err| Error::Io(err, path.to_owned()))?;
    Ok(source)
}

fn read_stdin_source() -> Result<String, Error> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .map_err(|err| Error::Io(err, PathBuf::from("<stdin>")))?;
    Ok(source)
}

fn read_lines(path: &Path) -> Result<LineBuffer, Error> {
    File::open(path)
        .and_then(|file| LineBuffer::from_reader(BufReader::new(file)))
        .map_err(|err| Error::Io(err, path.to_owned()))
}

fn read_stdin_lines() -> Result<LineBuffer, Error> {
    let stdin = io::stdin();
    LineBuffer::from_reader(stdin.lock()).map_err(|err| Error::Io(err, PathBuf::from("<stdin>")))
}
