mod cli;

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use chomsky::parser::{io_error, DEFAULT_SENTINEL};
use chomsky::session::{self, Options, SessionError};
use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let options = Options {
        prompts: cli.file.is_none() && !cli.quiet,
        file: cli.file,
        sentinel: cli.sentinel.unwrap_or(DEFAULT_SENTINEL),
        show_normalized: cli.show_normalized,
        samples: cli.sample.unwrap_or(0),
    };

    let mut output = std::io::stdout().lock();
    let result = match &options.file {
        Some(path) => File::open(path)
            .map_err(|e| SessionError::Parse(io_error(e, Some(path.as_path()))))
            .and_then(|file| session::run(BufReader::new(file), &mut output, &options)),
        None => session::run(std::io::stdin().lock(), &mut output, &options),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
