//! Parser module
//!
//! A script line is first split into words by a [`Tokenizer`], then the words are matched
//! against the command grammar by [`command::parse`]:
//! - words are separated by whitespace
//! - double quotes splice a literal section into the current word
//! - a backslash escapes the next character, but stays in the word when the next character
//!   is a letter, so regular expressions like `\d` survive unchanged
use crate::error::ErrorType;
use crate::Error;

pub mod command;

pub use command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Whitespace,
    Word,
    Quoted,
}

/// A struct for holding data about the line being tokenized
#[derive(Debug, Clone)]
pub struct Tokenizer {
    content: Vec<char>,
    position: usize,
    state: State,
    current: String,
    tokens: Vec<String>,
}

impl From<&str> for Tokenizer {
    fn from(line: &str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        Tokenizer {
            content: line.chars().collect::<Vec<char>>(),
            position: 0,
            state: State::Whitespace,
            current: String::new(),
            tokens: vec![],
        }
    }
}

impl Tokenizer {
    /// Splits the line into words
    pub fn tokenize(mut self) -> Result<Vec<String>, Error> {
        while let Some(c) = self.next() {
            match (self.state, c) {
                (State::Whitespace, c) if c.is_whitespace() => (),
                (State::Whitespace, '"') | (State::Word, '"') => self.state = State::Quoted,
                (State::Quoted, '"') => self.state = State::Word,
                (_, '\\') => self.escape()?,
                (State::Word, c) if c.is_whitespace() => self.flush(),
                (State::Quoted, c) => self.current.push(c),
                (_, c) => {
                    self.state = State::Word;
                    self.current.push(c);
                }
            }
        }
        match self.state {
            State::Quoted => Err(ErrorType::UnterminatedString.into()),
            State::Word => {
                self.flush();
                Ok(self.tokens)
            }
            State::Whitespace => Ok(self.tokens),
        }
    }

    /// Handles the character after a backslash
    fn escape(&mut self) -> Result<(), Error> {
        if self.state == State::Whitespace {
            self.state = State::Word;
        }
        match self.next() {
            Some(c) if c.is_alphabetic() => {
                self.current.push('\\');
                self.current.push(c);
            }
            Some(c) => self.current.push(c),
            None => return Err(ErrorType::UnterminatedEscape.into()),
        }
        Ok(())
    }

    fn flush(&mut self) {
        self.tokens.push(std::mem::take(&mut self.current));
        self.state = State::Whitespace;
    }

    fn next(&mut self) -> Option<char> {
        let c = self.content.get(self.position).copied();
        self.position += 1;
        c
    }
}

/// Shorthand for tokenizing a single line
pub fn tokenize(line: &str) -> Result<Vec<String>, Error> {
    Tokenizer::from(line).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_string() {
        assert_eq!(tokenize("").unwrap().len(), 0, "Should be empty");
        assert_eq!(tokenize("  \t ").unwrap().len(), 0, "Should be empty");
    }

    #[test]
    fn plain_words() {
        assert_eq!(tokenize("a b c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(tokenize("  a\tb   c  ").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn regex_escapes_survive() {
        assert_eq!(tokenize(r"[\d]+").unwrap(), vec![r"[\d]+"]);
        assert_eq!(tokenize(r"\w+ \.").unwrap(), vec![r"\w+", "."]);
    }

    #[test]
    fn quotes_splice_into_words() {
        assert_eq!(
            tokenize(r#"CAT-RULE R "Eating out" "PIZZA HUT""#).unwrap(),
            vec!["CAT-RULE", "R", "Eating out", "PIZZA HUT"]
        );
        assert_eq!(tokenize(r#"ab"c d"ef"#).unwrap(), vec!["abc def"]);
        assert_eq!(tokenize(r#""" x"#).unwrap(), vec!["", "x"]);
    }

    #[test]
    fn escapes_outside_letters() {
        assert_eq!(tokenize(r#"a\ b"#).unwrap(), vec!["a b"]);
        assert_eq!(tokenize(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
        assert_eq!(tokenize(r"\\1").unwrap(), vec![r"\1"]);
    }

    #[test]
    fn carriage_returns_are_ignored() {
        assert_eq!(tokenize("PRINT hello\r").unwrap(), vec!["PRINT", "hello"]);
    }

    #[test]
    fn unterminated_input() {
        let err = tokenize(r#"PRINT "open"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(matches!(err.error_type, ErrorType::UnterminatedString));
        let err = tokenize(r"PRINT trailing\").unwrap_err();
        assert!(matches!(err.error_type, ErrorType::UnterminatedEscape));
    }
}
