//! Command lexer - splits command text into shell-style words
//!
//! Whitespace separates words and quoted sections (`"..."` or `'...'`) stay
//! inside one word. Quote characters are kept in the token text so the
//! parser can tell `"42"` (a string) from `42` (an integer). Outside quotes
//! `(`, `)`, `,` and `=` are always tokens of their own.

use std::{fmt::Display, iter::Peekable, str::Chars};

use crate::error::{Error, Result};

/// Represents a single lexical token in the command input
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A word as written, quotes included
    Word(String),
    OpenParen,
    CloseParen,
    Comma,
    Equal,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Token::Word(word) => word,
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Comma => ",",
            Token::Equal => "=",
        })
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_symbol(c: char) -> bool {
    matches!(c, '(' | ')' | ',' | '=')
}

/// Removes the quoting from a word: `"my table"` -> `my table`,
/// `a"b c"d` -> `ab cd`.
pub fn unquote(word: &str) -> String {
    let mut value = String::with_capacity(word.len());
    let mut quote = None;
    for c in word.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => value.push(c),
            None if is_quote(c) => quote = Some(c),
            None => value.push(c),
        }
    }
    value
}

/// Command lexical analyzer
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan().transpose()
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given command text
    pub fn new(text: &'a str) -> Self {
        Self {
            iter: text.chars().peekable(),
        }
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.peek().filter(|&c| predicate(*c))?;
        self.iter.next()
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    /// Removes whitespace from the input stream
    fn erase_whitespace(&mut self) {
        self.next_while(|c| c.is_whitespace());
    }

    /// Scans and returns the next token
    fn scan(&mut self) -> Result<Option<Token>> {
        self.erase_whitespace();
        match self.iter.peek() {
            Some(c) if is_symbol(*c) => Ok(self.scan_symbol()),
            Some(_) => self.scan_word().map(Some),
            None => Ok(None),
        }
    }

    /// Scans a word, keeping any quoted sections verbatim
    fn scan_word(&mut self) -> Result<Token> {
        let mut val = String::new();
        while let Some(c) = self.next_if(|c| !c.is_whitespace() && !is_symbol(c)) {
            val.push(c);
            if is_quote(c) {
                self.scan_quoted(c, &mut val)?;
            }
        }
        Ok(Token::Word(val))
    }

    /// Consumes up to and including the closing quote
    fn scan_quoted(&mut self, quote: char, val: &mut String) -> Result<()> {
        loop {
            match self.iter.next() {
                Some(c) if c == quote => {
                    val.push(c);
                    return Ok(());
                }
                Some(c) => val.push(c),
                None => {
                    return Err(Error::Parse(format!(
                        "[Lexer] No closing quotation in {}",
                        val
                    )))
                }
            }
        }
    }

    /// Scans a single-character symbol token
    fn scan_symbol(&mut self) -> Option<Token> {
        let token = match self.iter.peek()? {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            ',' => Token::Comma,
            '=' => Token::Equal,
            _ => return None,
        };
        self.iter.next();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::{unquote, Lexer, Token};
    use crate::error::{Error, Result};

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    fn tokenize(text: &str) -> Result<Vec<Token>> {
        Lexer::new(text).collect::<Result<Vec<_>>>()
    }

    #[test]
    fn test_lexer_create_table() -> Result<()> {
        let tokens = tokenize("create_table   users name:str\tage:int ")?;
        assert_eq!(
            tokens,
            vec![
                word("create_table"),
                word("users"),
                word("name:str"),
                word("age:int"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_insert_into() -> Result<()> {
        let spaced = tokenize(r#"insert into users values ( "Ann Lee" , 30 , true )"#)?;
        let packed = tokenize(r#"insert into users values("Ann Lee",30,true)"#)?;

        assert_eq!(
            spaced,
            vec![
                word("insert"),
                word("into"),
                word("users"),
                word("values"),
                Token::OpenParen,
                word(r#""Ann Lee""#),
                Token::Comma,
                word("30"),
                Token::Comma,
                word("true"),
                Token::CloseParen,
            ]
        );
        assert_eq!(spaced, packed);
        Ok(())
    }

    #[test]
    fn test_lexer_symbols_inside_quotes() -> Result<()> {
        let tokens = tokenize(r#"where note='a, (b) = c'"#)?;
        assert_eq!(
            tokens,
            vec![
                word("where"),
                word("note"),
                Token::Equal,
                word("'a, (b) = c'"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_unmatched_quote() {
        let result = tokenize(r#"insert into t values ("abc)"#);
        assert!(matches!(result, Err(Error::Parse(_))));

        let result = tokenize("drop_table 'users");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r#""my table""#), "my table");
        assert_eq!(unquote(r#"a"b c"d"#), "ab cd");
        assert_eq!(unquote(r#"'say "hi"'"#), r#"say "hi""#);
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote(r#""""#), "");
    }
}
