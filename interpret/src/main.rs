#[macro_use]
extern crate clap;

use std::io;
use std::process;

use clap::Arg;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("source")
                .long("source")
                .takes_value(true)
                .value_name("FILE")
                .help("File with the XML source of the program (default: stdin)"),
        )
        .arg(
            Arg::with_name("input")
                .long("input")
                .takes_value(true)
                .value_name("FILE")
                .help("File with input lines for READ instructions (default: stdin)"),
        )
        .get_matches();

    let stdout = io::stdout();
    let stderr = io::stderr();

    let result = interpret::run_files(
        matches.value_of("source"),
        matches.value_of("input"),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    let code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            err.code()
        }
    };
    process::exit(code);
}
