/*
    The passes that bring a context-free grammar into Chomsky normal form.
    Each pass builds a new rule list from the current one; `normalize` runs
    them in the order they appear here
*/

use std::collections::HashSet;

use itertools::Itertools;

use super::context_free::head;
use super::{Alphabet, ContextFreeGrammar, GrammarError, Result, Rule, Symbol, Word};

impl ContextFreeGrammar {
    pub fn has_long_rules(&self) -> bool {
        self.rules().iter().any(|rule| rule.rhs.len() > 2)
    }

    fn expect_short_rules(&self) -> Result<()> {
        match self.rules().iter().find(|rule| rule.rhs.len() > 2) {
            Some(rule) => Err(GrammarError::FoundLongRule(rule.clone())),
            None => Ok(()),
        }
    }

    fn is_chain_rule(&self, rule: &Rule) -> bool {
        matches!(rule.rhs.as_slice(), [single] if self.symbol_is_nonterminal(*single))
    }

    // True when every nonterminal on the right side is in `allowed`
    fn rhs_nonterminals_within(&self, rule: &Rule, allowed: &Alphabet) -> bool {
        rule.rhs
            .iter()
            .all(|symbol| !self.symbol_is_nonterminal(*symbol) || allowed.contains(symbol))
    }

    fn replace_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.grammar.rules = rules.into_iter().unique().collect();
    }

    /// Splits `A -> X1 X2 .. Xn` with `n > 2` into
    /// `A -> X1 N1`, `N1 -> X2 N2`, .., `Nn-2 -> Xn-1 Xn` over fresh `Ni`.
    pub fn remove_long_rules(&mut self) -> Result<()> {
        let mut rules = Vec::with_capacity(self.rules().len());

        for rule in self.rules().to_vec() {
            if rule.rhs.len() <= 2 {
                rules.push(rule);
                continue;
            }

            let (leading, last_pair) = rule.rhs.split_at(rule.rhs.len() - 2);
            let mut lhs = rule.lhs;
            for symbol in leading {
                let next = self.grammar.add_new_nonterminal()?;
                rules.push(Rule::new(lhs, vec![*symbol, next]));
                lhs = vec![next];
            }
            rules.push(Rule::new(lhs, last_pair.to_vec()));
        }

        self.replace_rules(rules);
        Ok(())
    }

    /// Nonterminals that derive the empty word.
    pub fn find_epsilon_generators(&self) -> Result<Alphabet> {
        self.expect_short_rules()?;

        let mut generators: Alphabet = self.rules()
            .iter()
            .filter(|rule| rule.rhs.is_empty())
            .map(head)
            .collect();

        loop {
            let known = generators.len();
            for rule in self.rules() {
                if !rule.rhs.is_empty() && rule.rhs.iter().all(|symbol| generators.contains(symbol)) {
                    generators.insert(head(rule));
                }
            }
            if generators.len() == known {
                return Ok(generators);
            }
        }
    }

    /// Drops every empty rule, adding for each `A -> B C` the shortened
    /// `A -> C` (`A -> B`) when `B` (`C`) derives the empty word.
    ///
    /// The start symbol is replaced by a fresh `S'` with `S' -> S` when it
    /// derives the empty word or occurs on some right side; in the first case
    /// `S' -> ε` is kept as the only empty rule.
    pub fn remove_empty_rules(&mut self) -> Result<()> {
        let generators = self.find_epsilon_generators()?;

        let mut rules = Vec::with_capacity(self.rules().len());
        for rule in self.rules() {
            match rule.rhs.as_slice() {
                [] => {}
                [first, second] => {
                    rules.push(rule.clone());
                    if generators.contains(first) {
                        rules.push(Rule::new(rule.lhs.clone(), vec![*second]));
                    }
                    if generators.contains(second) {
                        rules.push(Rule::new(rule.lhs.clone(), vec![*first]));
                    }
                }
                _ => rules.push(rule.clone()),
            }
        }

        let start = self.start_symbol();
        let start_is_nullable = generators.contains(&start);
        if start_is_nullable || rules.iter().any(|rule| rule.rhs.contains(&start)) {
            let new_start = self.grammar.add_new_nonterminal()?;
            if start_is_nullable {
                rules.push(Rule::new(vec![new_start], Word::new()));
            }
            rules.push(Rule::new(vec![new_start], vec![start]));
            self.grammar.start_symbol = new_start;
        }

        self.replace_rules(rules);
        Ok(())
    }

    /// Pairs `(A, B)` such that `A` rewrites to `B` through one or more chain
    /// rules, in order of discovery.
    pub fn find_chained_pairs(&self) -> Vec<(Symbol, Symbol)> {
        let chain_rules = self.rules()
            .iter()
            .filter(|rule| self.is_chain_rule(rule))
            .map(|rule| (head(rule), rule.rhs[0]))
            .collect_vec();

        let mut pairs = chain_rules.iter().copied().unique().collect_vec();
        let mut known: HashSet<(Symbol, Symbol)> = pairs.iter().copied().collect();

        loop {
            let mut found = Vec::new();
            for &(from, via) in &pairs {
                for &(lhs, to) in &chain_rules {
                    if lhs == via && known.insert((from, to)) {
                        found.push((from, to));
                    }
                }
            }
            if found.is_empty() {
                return pairs;
            }
            pairs.extend(found);
        }
    }

    /// Deletes every chain rule `A -> B`; each `A` instead inherits the
    /// remaining rules of every `B` it chains to.
    pub fn remove_chain_rules(&mut self) {
        let pairs = self.find_chained_pairs();

        let kept = self.rules()
            .iter()
            .filter(|rule| !self.is_chain_rule(rule))
            .cloned()
            .collect_vec();

        let inherited = pairs
            .iter()
            .flat_map(|&(from, to)| {
                kept.iter()
                    .filter(move |rule| head(rule) == to)
                    .map(move |rule| Rule::new(vec![from], rule.rhs.clone()))
            })
            .collect_vec();

        self.replace_rules(kept.into_iter().chain(inherited));
    }

    /// Nonterminals that derive some word of terminals.
    pub fn find_generating_nonterminals(&self) -> Result<Alphabet> {
        self.expect_short_rules()?;

        let mut generating = Alphabet::new();
        loop {
            let known = generating.len();
            for rule in self.rules() {
                if self.rhs_nonterminals_within(rule, &generating) {
                    generating.insert(head(rule));
                }
            }
            if generating.len() == known {
                return Ok(generating);
            }
        }
    }

    pub fn remove_non_generating_rules(&mut self) -> Result<()> {
        let generating = self.find_generating_nonterminals()?;
        let rules = self.rules()
            .iter()
            .filter(|rule| generating.contains(&head(rule)) && self.rhs_nonterminals_within(rule, &generating))
            .cloned()
            .collect_vec();

        self.replace_rules(rules);
        Ok(())
    }

    /// Nonterminals that occur in some sentential form derived from the
    /// start symbol.
    pub fn find_reachable_nonterminals(&self) -> Alphabet {
        let mut reachable: Alphabet = [self.start_symbol()].into();
        loop {
            let known = reachable.len();
            for rule in self.rules() {
                if !reachable.contains(&head(rule)) {
                    continue;
                }
                for &symbol in &rule.rhs {
                    if self.symbol_is_nonterminal(symbol) {
                        reachable.insert(symbol);
                    }
                }
            }
            if reachable.len() == known {
                return reachable;
            }
        }
    }

    pub fn remove_non_reachable_rules(&mut self) {
        let reachable = self.find_reachable_nonterminals();
        let rules = self.rules()
            .iter()
            .filter(|rule| reachable.contains(&head(rule)) && self.rhs_nonterminals_within(rule, &reachable))
            .cloned()
            .collect_vec();

        self.replace_rules(rules);
    }

    /// Replaces each terminal `a` in a two-symbol right side by a fresh
    /// nonterminal `N` with the single rule `N -> a`.
    pub fn remove_mixed_rules(&mut self) -> Result<()> {
        self.expect_short_rules()?;

        let mut rules = Vec::with_capacity(self.rules().len());
        for rule in self.rules().to_vec() {
            if rule.rhs.len() != 2 {
                rules.push(rule);
                continue;
            }

            let mut rhs = Word::with_capacity(2);
            for symbol in rule.rhs {
                if self.symbol_is_terminal(symbol) {
                    let proxy = self.grammar.add_new_nonterminal()?;
                    rules.push(Rule::new(vec![proxy], vec![symbol]));
                    rhs.push(proxy);
                } else {
                    rhs.push(symbol);
                }
            }
            rules.push(Rule::new(rule.lhs, rhs));
        }

        self.replace_rules(rules);
        Ok(())
    }
}
