/*
    This module is for storing and validating grammars
*/

mod cnf;
mod context_free;
mod symbol;

use std::fmt::Display;

use itertools::Itertools;

pub use context_free::ContextFreeGrammar;
pub use symbol::{alphabet_from_str, word_from_str, Alphabet, Symbol, Word};

// Which construction check a grammar failed
#[derive(Debug, Clone, PartialEq)]
pub enum Defect {
    // The start symbol is not one of the nonterminals
    StartNotNonterminal(Symbol),
    // A symbol is both a terminal and a nonterminal
    SharedSymbol(Symbol),
    // A rule has an empty or nonterminal-free left side, or an unknown symbol
    MalformedRule(Rule),
}

impl Display for Defect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Defect::StartNotNonterminal(symbol) => write!(f, "start symbol `{}` is not a nonterminal", symbol),
            Defect::SharedSymbol(symbol) => write!(f, "`{}` is both a terminal and a nonterminal", symbol),
            Defect::MalformedRule(rule) => write!(f, "rule `{}` is malformed", rule),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    // The alphabets, start symbol or rules do not form a grammar
    IncorrectGrammar(Defect),
    // A left side is not a single nonterminal
    NotContextFree(Rule),
    // Every symbol value up to `Symbol::MAX` has been used
    SymbolSpaceExhausted,
    // A pass that expects right sides of at most two symbols met a longer one.
    // This is a problem with the caller, not the grammar
    FoundLongRule(Rule),
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::IncorrectGrammar(defect) => write!(f, "Grammar is incorrect: {}", defect),
            GrammarError::NotContextFree(rule) => write!(f, "Grammar is not context-free: `{}`", rule),
            GrammarError::SymbolSpaceExhausted => write!(f, "Grammar exceeded symbol limit"),
            GrammarError::FoundLongRule(rule) => write!(f, "Expected only short rules, found `{}` (run long rule removal first)", rule),
        }
    }
}

impl std::error::Error for GrammarError {}

pub type Result<T> = std::result::Result<T, GrammarError>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: Word,
    pub rhs: Word,
}

impl Rule {
    pub fn new(lhs: Word, rhs: Word) -> Self {
        Rule { lhs, rhs }
    }
}

// Shorthand where every character is one symbol and "" on the right is the
// empty production
impl From<(&str, &str)> for Rule {
    fn from((lhs, rhs): (&str, &str)) -> Self {
        Rule::new(word_from_str(lhs), word_from_str(rhs))
    }
}

fn fmt_side(word: &Word) -> String {
    if word.is_empty() {
        "ε".to_string()
    } else {
        word.iter().join("")
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", fmt_side(&self.lhs), fmt_side(&self.rhs))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    terminals: Alphabet,
    nonterminals: Alphabet,
    start_symbol: Symbol,
    rules: Vec<Rule>,
    // Largest symbol seen so far, across both alphabets
    max_symbol: Symbol,
}

impl Grammar {
    pub fn new(terminals: Alphabet, nonterminals: Alphabet, start_symbol: Symbol, rules: Vec<Rule>) -> Result<Self> {
        let max_symbol = terminals
            .iter()
            .chain(nonterminals.iter())
            .copied()
            .max()
            .unwrap_or(Symbol::new(0));

        let grammar = Grammar {
            terminals,
            nonterminals,
            start_symbol,
            rules,
            max_symbol,
        };
        grammar.check()?;

        Ok(grammar)
    }

    pub fn terminals(&self) -> &Alphabet {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &Alphabet {
        &self.nonterminals
    }

    pub fn start_symbol(&self) -> Symbol {
        self.start_symbol
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_context_free(&self) -> bool {
        self.rules.iter().all(|rule| self.rule_is_context_free(rule))
    }

    pub fn symbol_is_terminal(&self, symbol: Symbol) -> bool {
        self.terminals.contains(&symbol)
    }

    pub fn symbol_is_nonterminal(&self, symbol: Symbol) -> bool {
        self.nonterminals.contains(&symbol)
    }

    pub fn symbol_is_correct(&self, symbol: Symbol) -> bool {
        self.symbol_is_terminal(symbol) || self.symbol_is_nonterminal(symbol)
    }

    /// A rule is correct when its left side is non-empty and holds at least
    /// one nonterminal, and every symbol on either side belongs to this
    /// grammar.
    pub fn rule_is_correct(&self, rule: &Rule) -> bool {
        !rule.lhs.is_empty()
            && rule.lhs.iter().chain(rule.rhs.iter()).all(|s| self.symbol_is_correct(*s))
            && rule.lhs.iter().any(|s| self.symbol_is_nonterminal(*s))
    }

    pub fn add_new_terminal(&mut self) -> Result<Symbol> {
        let symbol = self.mint()?;
        self.terminals.insert(symbol);
        Ok(symbol)
    }

    pub fn add_new_nonterminal(&mut self) -> Result<Symbol> {
        let symbol = self.mint()?;
        self.nonterminals.insert(symbol);
        Ok(symbol)
    }

    fn mint(&mut self) -> Result<Symbol> {
        let symbol = self.max_symbol.next().ok_or(GrammarError::SymbolSpaceExhausted)?;
        self.max_symbol = symbol;
        Ok(symbol)
    }

    fn rule_is_context_free(&self, rule: &Rule) -> bool {
        matches!(rule.lhs.as_slice(), [head] if self.symbol_is_nonterminal(*head))
    }

    fn check(&self) -> Result<()> {
        if !self.symbol_is_nonterminal(self.start_symbol) {
            return Err(GrammarError::IncorrectGrammar(Defect::StartNotNonterminal(self.start_symbol)));
        }

        if let Some(symbol) = self.terminals.iter().find(|s| self.symbol_is_nonterminal(**s)) {
            return Err(GrammarError::IncorrectGrammar(Defect::SharedSymbol(*symbol)));
        }

        match self.rules.iter().find(|rule| !self.rule_is_correct(rule)) {
            Some(rule) => Err(GrammarError::IncorrectGrammar(Defect::MalformedRule(rule.clone()))),
            None => Ok(()),
        }
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "terminals: {}", self.terminals.iter().sorted().join(" "))?;
        writeln!(f, "nonterminals: {}", self.nonterminals.iter().sorted().join(" "))?;
        writeln!(f, "start: {}", self.start_symbol)?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
