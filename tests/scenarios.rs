use std::io::Cursor;

use chomsky::cyk::Cyk;
use chomsky::grammar::{alphabet_from_str, word_from_str, ContextFreeGrammar, Grammar, GrammarError, Rule, Symbol};
use chomsky::session::{self, Options};

fn rules(pairs: &[(&str, &str)]) -> Vec<Rule> {
    pairs.iter().copied().map(Rule::from).collect()
}

fn is_balanced(word: &str) -> bool {
    let mut balance = 0i64;
    for c in word.chars() {
        balance += if c == '(' { 1 } else { -1 };
        if balance < 0 {
            return false;
        }
    }
    balance == 0
}

#[test]
fn single_terminal() {
    let grammar = ContextFreeGrammar::new(alphabet_from_str("a"), alphabet_from_str("A"), Symbol::from('A'), rules(&[("A", "a")])).unwrap();
    let cyk = Cyk::new(&grammar).unwrap();

    assert!(!cyk.predict(&[]));
    assert!(cyk.predict(&word_from_str("a")));
}

#[test]
fn empty_word_through_a_chain() {
    let grammar = ContextFreeGrammar::new(
        alphabet_from_str("a"),
        alphabet_from_str("AB"),
        Symbol::from('A'),
        rules(&[("A", "a"), ("A", "B"), ("B", "")]),
    ).unwrap();

    assert!(Cyk::new(&grammar).unwrap().predict(&[]));
}

#[test]
fn balanced_parentheses() {
    let grammar = ContextFreeGrammar::new(
        alphabet_from_str("()"),
        alphabet_from_str("S"),
        Symbol::from('S'),
        rules(&[("S", "SS"), ("S", ""), ("S", "(S)")]),
    ).unwrap();
    let cyk = Cyk::new(&grammar).unwrap();

    let words = ["", "()", "(())()", ")(", "(()", "((()))(()())", "())(()", "((((((((((()))))))))))"];
    for word in words {
        assert_eq!(cyk.predict_str(word), is_balanced(word), "{:?}", word);
    }

    let mut word = "(())()()(((())()()))()".to_string();
    assert!(cyk.predict_str(&word));
    word.pop();
    assert!(!cyk.predict_str(&word));
}

#[test]
fn mixed_grammar_normal_form() {
    let grammar = ContextFreeGrammar::new(
        alphabet_from_str("ab"),
        alphabet_from_str("SABCD"),
        Symbol::from('S'),
        rules(&[
            ("S", "A"), ("S", "B"), ("A", "B"), ("B", "A"), ("A", "aAbBa"),
            ("B", ""), ("C", "SD"), ("S", "SS"), ("D", "Dab"), ("A", "abab"),
        ]),
    ).unwrap();

    let normalized = grammar.normalized().unwrap();
    assert!(normalized.is_normalized(), "{}", normalized);
    for rule in normalized.rules() {
        assert_eq!(rule.lhs.len(), 1);
        assert!(rule.rhs.len() <= 2);
    }
    assert!(normalized.normalized().unwrap().is_normalized());
}

#[test]
fn validation_errors() {
    let grammar = Grammar::new(alphabet_from_str("a"), alphabet_from_str("A"), Symbol::from('A'), rules(&[("A", "a"), ("aA", "a")])).unwrap();
    assert!(!grammar.is_context_free());
    assert!(matches!(ContextFreeGrammar::try_from(grammar), Err(GrammarError::NotContextFree(_))));

    let result = Grammar::new(alphabet_from_str("a"), alphabet_from_str("A"), Symbol::from('A'), rules(&[("A", "b")]));
    assert!(matches!(result, Err(GrammarError::IncorrectGrammar(_))));
}

#[test]
fn interactive_session() {
    let input = "a b ^\nS A ^\nS\nS aSb\nS A\nA <eps>\n^\nab\naabb\n<eps>\naab\n^\n";
    let mut output = Vec::new();
    session::run(Cursor::new(input), &mut output, &Options::default()).unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "accept\naccept\naccept\nreject\n");
}
