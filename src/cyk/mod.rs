/*
    This module decides membership with the Cocke-Younger-Kasami algorithm
*/

use std::collections::HashMap;

use crate::grammar::{word_from_str, Alphabet, ContextFreeGrammar, Result, Symbol};

/// Membership tester over the Chomsky normal form of a grammar.
///
/// The grammar handed to [`Cyk::new`] is normalized once into an owned copy;
/// the caller's grammar is never touched. Each call to [`Cyk::predict`]
/// builds its own chart, so a `Cyk` can be shared between threads.
#[derive(Debug, Clone)]
pub struct Cyk {
    grammar: ContextFreeGrammar,
    // Chart row of each nonterminal
    index: HashMap<Symbol, usize>,
    // Terminals each nonterminal rewrites to directly
    terminal_children: Vec<Alphabet>,
    // Right sides `B C` of the binary rules of each nonterminal
    binary_children: Vec<Vec<(usize, usize)>>,
}

impl Cyk {
    pub fn new(grammar: &ContextFreeGrammar) -> Result<Self> {
        let grammar = grammar.normalized()?;

        let index: HashMap<Symbol, usize> = grammar
            .nonterminals()
            .iter()
            .enumerate()
            .map(|(i, symbol)| (*symbol, i))
            .collect();

        let mut terminal_children = vec![Alphabet::new(); index.len()];
        let mut binary_children = vec![Vec::new(); index.len()];
        for rule in grammar.rules() {
            let lhs = index[&rule.lhs[0]];
            match rule.rhs.as_slice() {
                [terminal] => {
                    terminal_children[lhs].insert(*terminal);
                }
                [left, right] => binary_children[lhs].push((index[left], index[right])),
                _ => {}
            }
        }

        Ok(Cyk {
            grammar,
            index,
            terminal_children,
            binary_children,
        })
    }

    /// The normalized grammar the chart is built from.
    pub fn grammar(&self) -> &ContextFreeGrammar {
        &self.grammar
    }

    pub fn predict(&self, word: &[Symbol]) -> bool {
        if word.is_empty() {
            return self.accepts_empty_word();
        }

        let start = self.index[&self.grammar.start_symbol()];
        self.fill(word).get(start, 0, word.len() - 1)
    }

    pub fn predict_str(&self, word: &str) -> bool {
        self.predict(&word_from_str(word))
    }

    /// The filled chart for `word`.
    pub fn table(&self, word: &[Symbol]) -> Table {
        Table {
            index: self.index.clone(),
            chart: self.fill(word),
        }
    }

    // Normalization keeps `S -> ε` for a start symbol that derives the empty
    // word, and it is the only empty rule left
    fn accepts_empty_word(&self) -> bool {
        let start = self.grammar.start_symbol();
        self.grammar
            .rules()
            .iter()
            .any(|rule| rule.lhs[0] == start && rule.rhs.is_empty())
    }

    fn fill(&self, word: &[Symbol]) -> Chart {
        let mut chart = Chart::new(self.index.len(), word.len());

        for (position, symbol) in word.iter().enumerate() {
            for (nonterminal, terminals) in self.terminal_children.iter().enumerate() {
                if terminals.contains(symbol) {
                    chart.set(nonterminal, position, position);
                }
            }
        }

        for size in 2..=word.len() {
            for start in 0..=word.len() - size {
                let end = start + size - 1;
                for (nonterminal, children) in self.binary_children.iter().enumerate() {
                    let generates = children.iter().any(|&(left, right)| {
                        (start..end).any(|split| chart.get(left, start, split) && chart.get(right, split + 1, end))
                    });
                    if generates {
                        chart.set(nonterminal, start, end);
                    }
                }
            }
        }

        chart
    }
}

// One flat bit per (nonterminal, start, end); only start <= end is used
#[derive(Debug, Clone)]
struct Chart {
    length: usize,
    cells: Vec<bool>,
}

impl Chart {
    fn new(nonterminals: usize, length: usize) -> Self {
        Chart {
            length,
            cells: vec![false; nonterminals * length * length],
        }
    }

    fn offset(&self, nonterminal: usize, start: usize, end: usize) -> usize {
        (nonterminal * self.length + start) * self.length + end
    }

    fn get(&self, nonterminal: usize, start: usize, end: usize) -> bool {
        self.cells[self.offset(nonterminal, start, end)]
    }

    fn set(&mut self, nonterminal: usize, start: usize, end: usize) {
        let offset = self.offset(nonterminal, start, end);
        self.cells[offset] = true;
    }
}

/// A filled CYK chart, addressed by grammar symbols.
#[derive(Debug, Clone)]
pub struct Table {
    index: HashMap<Symbol, usize>,
    chart: Chart,
}

impl Table {
    /// Whether `nonterminal` derives the part of the word from `start` to
    /// `end`, both inclusive. Symbols that are not nonterminals of the
    /// normalized grammar and spans outside the word derive nothing.
    pub fn generates(&self, nonterminal: Symbol, start: usize, end: usize) -> bool {
        match self.index.get(&nonterminal) {
            Some(&row) if start <= end && end < self.chart.length => self.chart.get(row, start, end),
            _ => false,
        }
    }
}
