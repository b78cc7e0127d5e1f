/*
    This module generates random words of a grammar's language
*/

use std::collections::HashMap;
use std::fmt::Display;

use rand::prelude::*;

use crate::error_handling::ErrorType;
use crate::grammar::{ContextFreeGrammar, Rule, Symbol, Word};

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // The nonterminal derives no word of terminals
    NonGenerating(Symbol),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::NonGenerating(nonterminal) => write!(f, "Nonterminal `{}` derives no word", nonterminal),
        }
    }
}

pub type GenResult = Result<Word, GenerateErrorType>;

/// Draws random derivations from a context-free grammar.
///
/// Up to `depth` levels rules are picked uniformly among those that can still
/// finish; below that only rules of least derivation height are picked, so
/// every derivation terminates.
pub struct Generator<'a> {
    grammar: &'a ContextFreeGrammar,
    depth: usize,
    // Height of the shortest derivation tree of each generating nonterminal
    heights: HashMap<Symbol, usize>,
}

impl<'a> Generator<'a> {
    pub fn new(grammar: &'a ContextFreeGrammar, depth: usize) -> Self {
        let mut generator = Generator {
            grammar,
            depth,
            heights: HashMap::new(),
        };
        generator.heights = generator.find_heights();
        generator
    }

    pub fn generate(&self, rng: &mut impl Rng) -> GenResult {
        self.generate_nonterminal(self.grammar.start_symbol(), 0, rng)
    }

    fn find_heights(&self) -> HashMap<Symbol, usize> {
        let mut heights = HashMap::new();
        loop {
            let mut changed = false;
            for rule in self.grammar.rules() {
                let Some(height) = self.rule_height(rule, &heights) else {
                    continue;
                };
                let known = heights.entry(rule.lhs[0]).or_insert(usize::MAX);
                if height < *known {
                    *known = height;
                    changed = true;
                }
            }
            if !changed {
                return heights;
            }
        }
    }

    // One more than the tallest nonterminal on the right side, or `None` while
    // one of them has no known height
    fn rule_height(&self, rule: &Rule, heights: &HashMap<Symbol, usize>) -> Option<usize> {
        rule.rhs
            .iter()
            .filter(|symbol| self.grammar.symbol_is_nonterminal(**symbol))
            .map(|symbol| heights.get(symbol).copied())
            .try_fold(0, |tallest, height| height.map(|h| tallest.max(h)))
            .map(|tallest| tallest + 1)
    }

    fn generate_nonterminal(&self, nonterminal: Symbol, depth: usize, rng: &mut impl Rng) -> GenResult {
        let height = *self.heights
            .get(&nonterminal)
            .ok_or(GenerateErrorType::NonGenerating(nonterminal))?;

        let candidates: Vec<&Rule> = self.grammar
            .rules()
            .iter()
            .filter(|rule| rule.lhs[0] == nonterminal)
            .filter(|rule| match self.rule_height(rule, &self.heights) {
                Some(rule_height) => depth < self.depth || rule_height == height,
                None => false,
            })
            .collect();

        match candidates.choose(rng) {
            Some(rule) => self.generate_rhs(&rule.rhs, depth + 1, rng),
            None => Err(GenerateErrorType::NonGenerating(nonterminal)),
        }
    }

    fn generate_rhs(&self, rhs: &[Symbol], depth: usize, rng: &mut impl Rng) -> GenResult {
        let mut result = Word::new();
        for &symbol in rhs {
            if self.grammar.symbol_is_nonterminal(symbol) {
                result.extend(self.generate_nonterminal(symbol, depth, rng)?);
            } else {
                result.push(symbol);
            }
        }
        Ok(result)
    }
}
