use std::collections::HashSet;
use std::fmt::Display;

/// Opaque grammar symbol.
///
/// A symbol carries no terminal/nonterminal tag of its own: whether it is one
/// or the other is decided by the grammar it is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Largest value a symbol can take. Minting past it is an error.
    pub const MAX: Symbol = Symbol(u32::MAX);

    pub const fn new(value: u32) -> Self {
        Symbol(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// The symbol one above this one, or `None` once `MAX` is reached.
    pub fn next(self) -> Option<Symbol> {
        self.0.checked_add(1).map(Symbol)
    }
}

impl From<char> for Symbol {
    fn from(character: char) -> Self {
        Symbol(character as u32)
    }
}

impl From<u32> for Symbol {
    fn from(value: u32) -> Self {
        Symbol(value)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match char::from_u32(self.0) {
            Some(c) if !c.is_whitespace() && !c.is_control() => write!(f, "{}", c),
            _ => write!(f, "<{}>", self.0),
        }
    }
}

// A set of symbols
pub type Alphabet = HashSet<Symbol>;

// An ordered sequence of symbols, possibly empty
pub type Word = Vec<Symbol>;

pub fn word_from_str(text: &str) -> Word {
    text.chars().map(Symbol::from).collect()
}

pub fn alphabet_from_str(text: &str) -> Alphabet {
    text.chars().map(Symbol::from).collect()
}
