use std::ops::Deref;

use super::{Alphabet, Grammar, GrammarError, Result, Rule, Symbol};

/// A grammar whose every rule rewrites exactly one nonterminal.
///
/// Besides the checks done by [`Grammar`], construction fails with
/// [`GrammarError::NotContextFree`] on the first rule whose left side is not a
/// single nonterminal. The normalization passes in `cnf.rs` keep this
/// invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFreeGrammar {
    pub(super) grammar: Grammar,
}

impl ContextFreeGrammar {
    pub fn new(terminals: Alphabet, nonterminals: Alphabet, start_symbol: Symbol, rules: Vec<Rule>) -> Result<Self> {
        Self::try_from(Grammar::new(terminals, nonterminals, start_symbol, rules)?)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn into_grammar(self) -> Grammar {
        self.grammar
    }

    /// Chomsky normal form: every rule is `A -> a`, `A -> B C` with neither
    /// `B` nor `C` the start symbol, or `S -> ε` for the start symbol `S`.
    pub fn is_normalized(&self) -> bool {
        let start = self.start_symbol();
        self.rules().iter().all(|rule| match rule.rhs.as_slice() {
            [] => head(rule) == start,
            [single] => self.symbol_is_terminal(*single),
            [first, second] => {
                self.symbol_is_nonterminal(*first)
                    && self.symbol_is_nonterminal(*second)
                    && *first != start
                    && *second != start
            }
            _ => false,
        })
    }

    /// Rewrites the grammar into Chomsky normal form, keeping its language.
    ///
    /// Does nothing if the grammar is already normalized. The passes run on a
    /// copy, so on error the grammar is left as it was.
    pub fn normalize(&mut self) -> Result<()> {
        if self.is_normalized() {
            return Ok(());
        }

        let mut grammar = self.clone();
        grammar.remove_long_rules()?;
        grammar.remove_empty_rules()?;
        grammar.remove_chain_rules();
        grammar.remove_non_generating_rules()?;
        grammar.remove_non_reachable_rules();
        grammar.remove_mixed_rules()?;

        *self = grammar;
        Ok(())
    }

    pub fn normalized(&self) -> Result<ContextFreeGrammar> {
        let mut grammar = self.clone();
        grammar.normalize()?;
        Ok(grammar)
    }
}

impl TryFrom<Grammar> for ContextFreeGrammar {
    type Error = GrammarError;

    fn try_from(grammar: Grammar) -> Result<Self> {
        match grammar.rules().iter().find(|rule| !grammar.rule_is_context_free(rule)) {
            Some(rule) => Err(GrammarError::NotContextFree(rule.clone())),
            None => Ok(ContextFreeGrammar { grammar }),
        }
    }
}

impl Deref for ContextFreeGrammar {
    type Target = Grammar;

    fn deref(&self) -> &Grammar {
        &self.grammar
    }
}

impl std::fmt::Display for ContextFreeGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.grammar, f)
    }
}

// The left side of a context-free rule is always exactly one nonterminal
pub(super) fn head(rule: &Rule) -> Symbol {
    rule.lhs[0]
}
