use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{command, keyword, Statement};
use crate::sql::parser::lexer::{unquote, Lexer, Token};
use crate::sql::types::{Predicate, Value};

pub mod ast;
mod lexer;

/// Parses one line of command text.
///
/// Returns `Ok(None)` for blank input, `Err(Error::Parse)` for malformed
/// commands and `Statement::Unknown` when the first word isn't a command.
pub fn parse(input: &str) -> Result<Option<Statement>> {
    Parser::new(input).parse()
}

/// Converts a value word into a typed literal.
///
/// `true`/`false` are booleans, words starting with a digit or a sign are
/// integers and words wrapped in matching quotes are strings. Anything else
/// is rejected, so `"42"` is a string while `42abc` is an error.
pub fn parse_literal(word: &str) -> Result<Value> {
    match word {
        keyword::TRUE => return Ok(Value::Boolean(true)),
        keyword::FALSE => return Ok(Value::Boolean(false)),
        _ => {}
    }
    match word.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => Ok(Value::Integer(word.parse()?)),
        Some(q @ ('"' | '\'')) if word.len() >= 2 && word.ends_with(q) => {
            Ok(Value::String(word[1..word.len() - 1].to_string()))
        }
        _ => Err(Error::Parse(format!("[Parser] Invalid value {}", word))),
    }
}

/// Command parser - converts tokens into a [`Statement`]
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given command text
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input).peekable(),
        }
    }

    /// Parses the input into a statement
    pub fn parse(&mut self) -> Result<Option<Statement>> {
        let (command, raw) = match self.lexer.next().transpose()? {
            Some(Token::Word(word)) => (unquote(&word), word),
            Some(token) => (token.to_string(), token.to_string()),
            None => return Ok(None),
        };
        let stmt = self.parse_statement(&command, raw)?;
        log::debug!("parsed {:?}", stmt);
        Ok(Some(stmt))
    }

    /// Parses a statement based on the command word
    fn parse_statement(&mut self, command: &str, raw: String) -> Result<Statement> {
        match command {
            command::HELP => self.parse_bare(Statement::Help),
            command::EXIT => self.parse_bare(Statement::Exit),
            command::LIST_TABLES => self.parse_bare(Statement::ListTables),
            command::CREATE_TABLE => self.parse_create_table(),
            command::DROP_TABLE => self.parse_drop_table(),
            command::INSERT => self.parse_insert(),
            command::SELECT => self.parse_select(),
            command::UPDATE => self.parse_update(),
            command::DELETE => self.parse_delete(),
            command::INFO => self.parse_info(),
            _ => self.parse_bare(Statement::Unknown(raw)),
        }
    }

    /// Commands without arguments; anything after the command word is ignored
    fn parse_bare(&mut self, stmt: Statement) -> Result<Statement> {
        self.skip_rest()?;
        Ok(stmt)
    }

    /// Parses `create_table <name> <col:type> ...`
    fn parse_create_table(&mut self) -> Result<Statement> {
        let name = self.next_ident()?;
        let mut columns = Vec::new();
        while let Some(token) = self.lexer.next().transpose()? {
            match token {
                Token::Word(word) => columns.push(unquote(&word)),
                token => {
                    return Err(Error::Parse(format!(
                        "[Parser] Expected column definition, got token {}",
                        token
                    )))
                }
            }
        }
        Ok(Statement::CreateTable { name, columns })
    }

    /// Parses `drop_table <name>`, ignoring trailing tokens
    fn parse_drop_table(&mut self) -> Result<Statement> {
        let name = self.next_ident()?;
        self.skip_rest()?;
        Ok(Statement::DropTable { name })
    }

    /// Parses `insert into <name> values (v1, v2, ...)`
    fn parse_insert(&mut self) -> Result<Statement> {
        self.next_expect_keyword(keyword::INTO)?;
        let table_name = self.next_ident()?;
        self.next_expect_keyword(keyword::VALUES)?;
        self.next_expect(Token::OpenParen)?;

        let mut values = Vec::new();
        if self.next_if_token(Token::CloseParen).is_none() {
            loop {
                values.push(self.parse_value()?);
                match self.next()? {
                    Token::CloseParen => break,
                    Token::Comma => {}
                    token => {
                        return Err(Error::Parse(format!("[Parser] Unexpected token {}", token)));
                    }
                }
            }
        }
        self.expect_end()?;
        Ok(Statement::Insert { table_name, values })
    }

    /// Parses `select from <name> [where <col> = <value>]`
    fn parse_select(&mut self) -> Result<Statement> {
        self.next_expect_keyword(keyword::FROM)?;
        let table_name = self.next_ident()?;
        let predicate = if self.peek()?.is_some() {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        self.expect_end()?;
        Ok(Statement::Select { table_name, predicate })
    }

    /// Parses `update <name> set <col> = <value> where <col> = <value>`
    fn parse_update(&mut self) -> Result<Statement> {
        let table_name = self.next_ident()?;
        self.next_expect_keyword(keyword::SET)?;
        let set = self.parse_assignment()?;
        let predicate = self.parse_where_clause()?;
        self.expect_end()?;
        Ok(Statement::Update {
            table_name,
            set,
            predicate,
        })
    }

    /// Parses `delete from <name> where <col> = <value>`
    fn parse_delete(&mut self) -> Result<Statement> {
        self.next_expect_keyword(keyword::FROM)?;
        let table_name = self.next_ident()?;
        let predicate = self.parse_where_clause()?;
        self.expect_end()?;
        Ok(Statement::Delete { table_name, predicate })
    }

    /// Parses `info <name>`
    fn parse_info(&mut self) -> Result<Statement> {
        let table_name = self.next_ident()?;
        self.expect_end()?;
        Ok(Statement::Info { table_name })
    }

    /// Parses `where <col> = <value>`
    fn parse_where_clause(&mut self) -> Result<Predicate> {
        self.next_expect_keyword(keyword::WHERE)?;
        self.parse_assignment()
    }

    /// Parses `<col> = <value>`
    fn parse_assignment(&mut self) -> Result<Predicate> {
        let column = self.next_ident()?;
        self.next_expect(Token::Equal)?;
        let value = self.parse_value()?;
        Ok(Predicate::from([(column, value)]))
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.next()? {
            Token::Word(word) => parse_literal(&word),
            token => Err(Error::Parse(format!(
                "[Parser] Expected value, got token {}",
                token
            ))),
        }
    }

    /// Peeks at the next token
    fn peek(&mut self) -> Result<Option<Token>> {
        self.lexer.peek().cloned().transpose()
    }

    /// Consumes and returns the next token
    fn next(&mut self) -> Result<Token> {
        self.lexer
            .next()
            .unwrap_or_else(|| Err(Error::Parse("[Parser] Unexpected end of input".to_string())))
    }

    /// Expects and consumes a name, with its quoting removed
    fn next_ident(&mut self) -> Result<String> {
        match self.next()? {
            Token::Word(word) => Ok(unquote(&word)),
            token => Err(Error::Parse(format!(
                "[Parser] Expected name, got token {}",
                token
            ))),
        }
    }

    /// Expects a specific token, returns error if different
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next()?;
        if token != expect {
            return Err(Error::Parse(format!(
                "[Parser] Expected token {}, got {}",
                expect, token
            )));
        }
        Ok(())
    }

    /// Expects a keyword word such as `into` or `where`
    fn next_expect_keyword(&mut self, keyword: &str) -> Result<()> {
        self.next_expect(Token::Word(keyword.to_string()))
    }

    /// Consumes next token if it matches the given token
    fn next_if_token(&mut self, token: Token) -> Option<Token> {
        self.peek().unwrap_or(None).filter(|t| *t == token)?;
        self.next().ok()
    }

    /// No tokens allowed after a complete command
    fn expect_end(&mut self) -> Result<()> {
        match self.peek()? {
            Some(token) => Err(Error::Parse(format!("[Parser] Unexpected token {}", token))),
            None => Ok(()),
        }
    }

    /// Drains the remaining tokens, still failing on unbalanced quotes
    fn skip_rest(&mut self) -> Result<()> {
        for token in self.lexer.by_ref() {
            token?;
        }
        Ok(())
    }
}
