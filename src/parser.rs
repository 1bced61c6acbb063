use crate::{
    ast::{Condition, Conditions, DEFAULT_OPERATOR, Filter, FilterValue, Literal, Token},
    lexer::{LexError, Lexer},
};
use std::mem;
use thiserror::Error;

/// Errors raised while building the tree from tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, got {found:?}")]
    UnexpectedToken { expected: String, found: Token },

    #[error("too many filters specified, max: {max} received: {observed}")]
    TooManyFilters { observed: usize, max: usize },
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    max_filters: usize,
    filters: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            max_filters: 0,
            filters: 0,
        })
    }

    /// Stop building the tree once more than `max` filters have been read.
    /// The rest of the input is still checked and counted. `0` means no limit.
    pub fn with_max_filters(mut self, max: usize) -> Self {
        self.max_filters = max;
        self
    }

    fn over_limit(&self) -> bool {
        self.max_filters != 0 && self.filters > self.max_filters
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(format!("{:?}", expected)));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: self.current_token.clone(),
        }
    }

    /// Parse `field:[operator]value`
    fn parse_filter(&mut self) -> Result<Condition, ParseError> {
        let field = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Word(name) => name,
            token => {
                self.current_token = token;
                return Err(self.unexpected("field name"));
            }
        };
        self.advance()?;

        self.expect(Token::Colon)?;

        let operator = match self.current_token.operator() {
            Some(op) => {
                self.advance()?;
                op
            }
            None => DEFAULT_OPERATOR,
        };

        let value = self.parse_value()?;
        self.filters += 1;

        Ok(Condition::Filter(Filter::new(field, operator, value)))
    }

    fn parse_value(&mut self) -> Result<FilterValue, ParseError> {
        let literal = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Word(s) | Token::String(s) => Literal::String(s),
            Token::Number(n) => Literal::Number(n),
            Token::Boolean(b) => Literal::Boolean(b),
            Token::Date(d) => Literal::Date(d),
            Token::LBracket => {
                self.advance()?;
                return self.parse_list();
            }
            token => {
                self.current_token = token;
                return Err(self.unexpected("value"));
            }
        };
        self.advance()?;
        Ok(FilterValue::Literal(literal))
    }

    fn parse_list(&mut self) -> Result<FilterValue, ParseError> {
        let mut elements = vec![];

        while !self.check(&Token::RBracket) {
            elements.push(self.parse_value()?);

            if !self.check(&Token::RBracket) {
                self.expect(Token::Comma)?;
            }
        }

        self.expect(Token::RBracket)?;
        Ok(FilterValue::List(elements))
    }

    /// Filters written side by side are joined with AND, as is an explicit `AND`.
    fn parse_and(&mut self) -> Result<Condition, ParseError> {
        let mut left = self.parse_filter()?;

        loop {
            if self.check(&Token::And) {
                self.advance()?;
            } else if !self.check(&Token::Word(String::new())) {
                break;
            }

            let right = self.parse_filter()?;
            if !self.over_limit() {
                left = Condition::and(left, right);
            }
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Condition, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance()?;
            let right = self.parse_and()?;
            if !self.over_limit() {
                left = Condition::or(left, right);
            }
        }
        Ok(left)
    }

    /// Parse a complete query. Empty input yields no conditions.
    pub fn parse(&mut self) -> Result<Conditions, ParseError> {
        if self.check(&Token::Eof) {
            return Ok(Conditions::empty());
        }

        let condition = self.parse_or()?;
        self.expect(Token::Eof)?;

        if self.over_limit() {
            return Err(ParseError::TooManyFilters {
                observed: self.filters,
                max: self.max_filters,
            });
        }
        Ok(Conditions::new(condition))
    }
}

/// Parse a query string into its tree.
pub fn parse(source: &str) -> Result<Conditions, ParseError> {
    Parser::new(Lexer::new(source))?.parse()
}
