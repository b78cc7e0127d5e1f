use std::io::BufRead;
use std::iter::Peekable;
use std::vec::IntoIter;

use itertools::Itertools;

// Reads input lazily, one line at a time, so that an interactive user is only
// asked for more once the current line is used up
pub struct Scanner<R> {
    reader: R,
    line: Peekable<IntoIter<char>>,
    line_number: usize,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Scanner {
            reader,
            line: Vec::new().into_iter().peekable(),
            line_number: 0,
        }
    }

    // Line the last character or token came from (1-based, 0 before any input)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    // Moves to the next non-whitespace character. Returns false at the end of
    // the input
    fn skip_whitespace(&mut self) -> std::io::Result<bool> {
        loop {
            self.line.peeking_take_while(|c| c.is_whitespace()).for_each(drop);
            if self.line.peek().is_some() {
                return Ok(true);
            }

            let mut text = String::new();
            if self.reader.read_line(&mut text)? == 0 {
                return Ok(false);
            }
            self.line_number += 1;
            self.line = text.chars().collect_vec().into_iter().peekable();
        }
    }

    pub fn next_char(&mut self) -> std::io::Result<Option<char>> {
        if self.skip_whitespace()? {
            Ok(self.line.next())
        } else {
            Ok(None)
        }
    }

    pub fn next_token(&mut self) -> std::io::Result<Option<String>> {
        if self.skip_whitespace()? {
            Ok(Some(self.line.peeking_take_while(|c| !c.is_whitespace()).collect()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::iter::zip;

    use super::*;

    #[test]
    fn chars_skip_whitespace() {
        let mut scanner = Scanner::new(Cursor::new("a b\n\n  c^\n"));
        let answers = vec![Some('a'), Some('b'), Some('c'), Some('^'), None, None];
        let lines = vec![1, 1, 3, 3, 3, 3];

        for (answer, line) in zip(answers, lines) {
            assert_eq!(scanner.next_char().unwrap(), answer);
            assert_eq!(scanner.line_number(), line);
        }
    }

    #[test]
    fn tokens_split_on_whitespace() {
        let mut scanner = Scanner::new(Cursor::new("S aSb\n\tS <eps>\n^"));
        let answers = vec!["S", "aSb", "S", "<eps>", "^"];

        for answer in answers {
            assert_eq!(scanner.next_token().unwrap(), Some(answer.to_string()));
        }
        assert_eq!(scanner.next_token().unwrap(), None);
        assert_eq!(scanner.line_number(), 3);
    }

    #[test]
    fn chars_and_tokens_share_the_line() {
        let mut scanner = Scanner::new(Cursor::new("ab^ S AB"));

        assert_eq!(scanner.next_char().unwrap(), Some('a'));
        assert_eq!(scanner.next_char().unwrap(), Some('b'));
        assert_eq!(scanner.next_char().unwrap(), Some('^'));
        assert_eq!(scanner.next_token().unwrap(), Some("S".to_string()));
        assert_eq!(scanner.next_token().unwrap(), Some("AB".to_string()));
    }

    #[test]
    fn empty_input() {
        let mut scanner = Scanner::new(Cursor::new(""));
        assert_eq!(scanner.next_char().unwrap(), None);
        assert_eq!(scanner.next_token().unwrap(), None);
        assert_eq!(scanner.line_number(), 0);
    }
}
