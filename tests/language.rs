//! Property-based tests for normalization and CYK using proptest
//!
//! Membership is checked against a naive oracle that works on the grammar as
//! written, so a normalization pass that changes the language shows up as a
//! mismatch.

use std::collections::HashSet;

use chomsky::cyk::Cyk;
use chomsky::grammar::{alphabet_from_str, word_from_str, ContextFreeGrammar, Rule, Symbol, Word};
use proptest::prelude::*;

const TERMINALS: &str = "ab";
const NONTERMINALS: &str = "SAB";

// Strategy for a single rule over the fixed alphabets, right sides up to 4 long
fn rule_strategy() -> impl Strategy<Value = Rule> {
    ("[SAB]", "[abSAB]{0,4}").prop_map(|(lhs, rhs)| Rule::from((lhs.as_str(), rhs.as_str())))
}

fn grammar_strategy() -> impl Strategy<Value = ContextFreeGrammar> {
    prop::collection::vec(rule_strategy(), 1..8).prop_map(|rules| {
        ContextFreeGrammar::new(
            alphabet_from_str(TERMINALS),
            alphabet_from_str(NONTERMINALS),
            Symbol::from('S'),
            rules,
        ).unwrap()
    })
}

// Every word over the terminals up to the given length, the empty word included
fn all_words(max_length: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut last = vec![String::new()];
    for _ in 0..max_length {
        last = last
            .iter()
            .flat_map(|word| TERMINALS.chars().map(move |c| format!("{}{}", word, c)))
            .collect();
        words.extend(last.iter().cloned());
    }
    words
}

// Least fixpoint of "nonterminal derives word[i..j]", straight from the rules
fn oracle(grammar: &ContextFreeGrammar, word: &Word) -> bool {
    let mut spans: HashSet<(Symbol, usize, usize)> = HashSet::new();

    loop {
        let known = spans.len();
        for rule in grammar.rules() {
            for start in 0..=word.len() {
                let mut ends: HashSet<usize> = [start].into();
                for &symbol in &rule.rhs {
                    ends = ends
                        .iter()
                        .flat_map(|&from| (from..=word.len()).map(move |to| (from, to)))
                        .filter(|&(from, to)| {
                            if grammar.symbol_is_terminal(symbol) {
                                to == from + 1 && word[from] == symbol
                            } else {
                                spans.contains(&(symbol, from, to))
                            }
                        })
                        .map(|(_, to)| to)
                        .collect();
                }
                for end in ends {
                    spans.insert((rule.lhs[0], start, end));
                }
            }
        }
        if spans.len() == known {
            return spans.contains(&(grammar.start_symbol(), 0, word.len()));
        }
    }
}

proptest! {
    #[test]
    fn normalization_is_idempotent(grammar in grammar_strategy()) {
        let normalized = grammar.normalized().unwrap();
        prop_assert!(normalized.is_normalized(), "{}", normalized);

        let twice = normalized.normalized().unwrap();
        prop_assert!(twice.is_normalized());
        prop_assert_eq!(twice, normalized);
    }

    #[test]
    fn normal_form_shape(grammar in grammar_strategy()) {
        let normalized = grammar.normalized().unwrap();
        for rule in normalized.rules() {
            prop_assert_eq!(rule.lhs.len(), 1);
            prop_assert!(rule.rhs.len() <= 2);
        }
    }

    #[test]
    fn normalization_preserves_the_language(grammar in grammar_strategy()) {
        let cyk = Cyk::new(&grammar).unwrap();
        let normalized_cyk = Cyk::new(&grammar.normalized().unwrap()).unwrap();

        for text in all_words(5) {
            let word = word_from_str(&text);
            let expected = oracle(&grammar, &word);
            prop_assert_eq!(cyk.predict(&word), expected, "word {:?} in\n{}", text, grammar);
            prop_assert_eq!(normalized_cyk.predict(&word), expected, "word {:?} in\n{}", text, grammar);
        }
    }

    #[test]
    fn fresh_symbols_never_collide(count in 1usize..50) {
        let mut grammar = chomsky::grammar::Grammar::new(
            alphabet_from_str(TERMINALS),
            alphabet_from_str(NONTERMINALS),
            Symbol::from('S'),
            vec![],
        ).unwrap();

        let mut seen = alphabet_from_str("abSAB");
        for i in 0..count {
            let symbol = if i % 3 == 0 {
                grammar.add_new_terminal().unwrap()
            } else {
                grammar.add_new_nonterminal().unwrap()
            };
            prop_assert!(seen.insert(symbol));
        }
    }
}

#[test]
fn oracle_agrees_on_parentheses() {
    let grammar = ContextFreeGrammar::new(
        alphabet_from_str("()"),
        alphabet_from_str("S"),
        Symbol::from('S'),
        vec![Rule::from(("S", "SS")), Rule::from(("S", "")), Rule::from(("S", "(S)"))],
    ).unwrap();

    assert!(oracle(&grammar, &word_from_str("")));
    assert!(oracle(&grammar, &word_from_str("(()())")));
    assert!(!oracle(&grammar, &word_from_str("(()")));
}
