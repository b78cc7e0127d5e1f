/*
    This module parses grammar definitions and the words to test against them
*/

pub mod lexer;

use std::fmt::Display;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error_handling::*;
use crate::grammar::{self, word_from_str, Alphabet, ContextFreeGrammar, Rule, Symbol, Word};
use lexer::Scanner;

// Right side (or word) standing for the empty word
pub const EMPTY_WORD: &str = "<eps>";

pub const DEFAULT_SENTINEL: char = '^';

// The parts of a definition, in the order they are read
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Section {
    Terminals,
    Nonterminals,
    StartSymbol,
    Rules,
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Terminals => write!(f, "terminals"),
            Section::Nonterminals => write!(f, "nonterminals"),
            Section::StartSymbol => write!(f, "start symbol"),
            Section::Rules => write!(f, "rules"),
        }
    }
}

#[derive(Debug)]
pub enum ParseErrorType {
    // The input ended before the section was closed
    UnexpectedEnd(Section),
    // A rule's left side was the last token of the input
    MissingRightSide(String),
    // There was an issue with reading the input
    FileError(std::io::Error),
}

impl ErrorType for ParseErrorType {}

impl PartialEq for ParseErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParseErrorType::UnexpectedEnd(a), ParseErrorType::UnexpectedEnd(b)) => a == b,
            (ParseErrorType::MissingRightSide(a), ParseErrorType::MissingRightSide(b)) => a == b,
            (ParseErrorType::FileError(a), ParseErrorType::FileError(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::UnexpectedEnd(section) => write!(f, "Input ended while reading the {}", section),
            ParseErrorType::MissingRightSide(lhs) => write!(f, "Rule `{}` has no right side", lhs),
            ParseErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;

pub fn io_error(error: std::io::Error, file: Option<&Path>) -> ParseError {
    ParseError {
        location: Location::new(file.map(Path::to_path_buf), 0),
        error: ParseErrorType::FileError(error),
    }
}

// Everything needed to build a grammar, as read from the input
#[derive(Debug, PartialEq, Clone)]
pub struct Definition {
    pub terminals: Alphabet,
    pub nonterminals: Alphabet,
    pub start_symbol: Symbol,
    pub rules: Vec<Rule>,
}

impl Definition {
    pub fn into_grammar(self) -> grammar::Result<ContextFreeGrammar> {
        ContextFreeGrammar::new(self.terminals, self.nonterminals, self.start_symbol, self.rules)
    }
}

pub struct Parser<R> {
    scanner: Scanner<R>,
    sentinel: char,
    file: Option<PathBuf>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R, sentinel: char, file: Option<PathBuf>) -> Self {
        Parser {
            scanner: Scanner::new(reader),
            sentinel,
            file,
        }
    }

    fn error(&self, error: ParseErrorType) -> ParseError {
        ParseError {
            location: Location::new(self.file.clone(), self.scanner.line_number()),
            error,
        }
    }

    fn next_char(&mut self) -> ParseResult<Option<char>> {
        self.scanner.next_char().map_err(|e| self.error(ParseErrorType::FileError(e)))
    }

    fn next_token(&mut self) -> ParseResult<Option<String>> {
        self.scanner.next_token().map_err(|e| self.error(ParseErrorType::FileError(e)))
    }

    // Single-character symbols up to the sentinel
    pub fn alphabet(&mut self, section: Section) -> ParseResult<Alphabet> {
        let mut alphabet = Alphabet::new();
        loop {
            match self.next_char()? {
                Some(c) if c == self.sentinel => return Ok(alphabet),
                Some(c) => {
                    alphabet.insert(Symbol::from(c));
                }
                None => return Err(self.error(ParseErrorType::UnexpectedEnd(section))),
            }
        }
    }

    pub fn start_symbol(&mut self) -> ParseResult<Symbol> {
        match self.next_char()? {
            Some(c) => Ok(Symbol::from(c)),
            None => Err(self.error(ParseErrorType::UnexpectedEnd(Section::StartSymbol))),
        }
    }

    // `lhs rhs` token pairs up to a lone sentinel token
    pub fn rules(&mut self) -> ParseResult<Vec<Rule>> {
        let sentinel = self.sentinel.to_string();
        let mut rules = Vec::new();
        loop {
            let lhs = match self.next_token()? {
                Some(token) if token == sentinel => return Ok(rules),
                Some(token) => token,
                None => return Err(self.error(ParseErrorType::UnexpectedEnd(Section::Rules))),
            };
            let rhs = match self.next_token()? {
                Some(token) if token == EMPTY_WORD => String::new(),
                Some(token) => token,
                None => return Err(self.error(ParseErrorType::MissingRightSide(lhs))),
            };
            rules.push(Rule::from((lhs.as_str(), rhs.as_str())));
        }
    }

    pub fn definition(&mut self) -> ParseResult<Definition> {
        Ok(Definition {
            terminals: self.alphabet(Section::Terminals)?,
            nonterminals: self.alphabet(Section::Nonterminals)?,
            start_symbol: self.start_symbol()?,
            rules: self.rules()?,
        })
    }

    // The next word to test, or `None` at the sentinel or the end of input
    pub fn word(&mut self) -> ParseResult<Option<Word>> {
        let sentinel = self.sentinel.to_string();
        Ok(match self.next_token()? {
            Some(token) if token == sentinel => None,
            Some(token) if token == EMPTY_WORD => Some(Word::new()),
            Some(token) => Some(word_from_str(&token)),
            None => None,
        })
    }
}
