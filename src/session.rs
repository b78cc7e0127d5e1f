/*
    This module runs one session: read a grammar, then answer accept/reject
    for every word until the sentinel
*/

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use itertools::Itertools;
use rand::thread_rng;

use crate::cyk::Cyk;
use crate::error_handling::*;
use crate::generator::{GenerateErrorType, Generator};
use crate::grammar::{GrammarError, Word};
use crate::parser::{ParseError, Parser, Section, DEFAULT_SENTINEL, EMPTY_WORD};

// How deep sampled derivations may branch freely before they are closed off
const SAMPLE_DEPTH: usize = 8;

impl ErrorType for GrammarError {}

#[derive(Debug, Clone)]
pub struct Options {
    // Source of the input, `None` for standard input
    pub file: Option<PathBuf>,
    pub sentinel: char,
    // Ask for each section before reading it
    pub prompts: bool,
    pub show_normalized: bool,
    // Number of random words of the language to print before testing
    pub samples: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            file: None,
            sentinel: DEFAULT_SENTINEL,
            prompts: false,
            show_normalized: false,
            samples: 0,
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    Parse(ParseError),
    Grammar(Error<GrammarError>),
    Generate(Error<GenerateErrorType>),
    Output(std::io::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Parse(e) => e.fmt(f),
            SessionError::Grammar(e) => e.fmt(f),
            SessionError::Generate(e) => e.fmt(f),
            SessionError::Output(e) => write!(f, "Could not write output: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ParseError> for SessionError {
    fn from(error: ParseError) -> Self {
        SessionError::Parse(error)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(error: std::io::Error) -> Self {
        SessionError::Output(error)
    }
}

pub type SessionResult = Result<(), SessionError>;

fn format_word(word: &Word) -> String {
    if word.is_empty() {
        EMPTY_WORD.to_string()
    } else {
        word.iter().join("")
    }
}

struct Session<'a, R, W> {
    parser: Parser<R>,
    output: &'a mut W,
    options: &'a Options,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn prompt(&mut self, text: &str) -> std::io::Result<()> {
        if self.options.prompts {
            write!(self.output, "{}", text)?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn location(&self) -> Location {
        Location::new(self.options.file.clone(), 0)
    }

    fn build(&mut self) -> Result<Cyk, SessionError> {
        if self.options.prompts {
            writeln!(self.output, "(Use {} to end input)", self.options.sentinel)?;
        }

        self.prompt("Terminals: ")?;
        let terminals = self.parser.alphabet(Section::Terminals)?;
        self.prompt("Nonterminals: ")?;
        let nonterminals = self.parser.alphabet(Section::Nonterminals)?;
        self.prompt("Start symbol: ")?;
        let start_symbol = self.parser.start_symbol()?;
        self.prompt(&format!("Rules (lhs[space]rhs|{}): ", EMPTY_WORD))?;
        let rules = self.parser.rules()?;

        let definition = crate::parser::Definition { terminals, nonterminals, start_symbol, rules };
        let grammar = definition.into_grammar().map_err(|error| self.grammar_error(error))?;

        if self.options.samples > 0 {
            let generator = Generator::new(&grammar, SAMPLE_DEPTH);
            let mut rng = thread_rng();
            for _ in 0..self.options.samples {
                let word = generator.generate(&mut rng).map_err(|error| {
                    SessionError::Generate(Error { location: self.location(), error })
                })?;
                writeln!(self.output, "sample: {}", format_word(&word))?;
            }
        }

        Cyk::new(&grammar).map_err(|error| self.grammar_error(error))
    }

    fn grammar_error(&self, error: GrammarError) -> SessionError {
        SessionError::Grammar(Error { location: self.location(), error })
    }

    fn answer(&mut self, cyk: &Cyk) -> SessionResult {
        loop {
            self.prompt("Word to test: ")?;
            let Some(word) = self.parser.word()? else {
                return Ok(());
            };
            let verdict = if cyk.predict(&word) { "accept" } else { "reject" };
            writeln!(self.output, "{}", verdict)?;
        }
    }
}

/// Reads a grammar definition followed by words from `input` and writes one
/// verdict per word to `output`.
///
/// Stops at the sentinel or the end of the input. Any failure to read or
/// build the grammar ends the session with a single error.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W, options: &Options) -> SessionResult {
    let mut session = Session {
        parser: Parser::new(input, options.sentinel, options.file.clone()),
        output,
        options,
    };

    let cyk = session.build()?;
    if options.show_normalized {
        write!(session.output, "{}", cyk.grammar())?;
    }
    session.answer(&cyk)
}
