use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Bare word: a field name, or an unquoted string value
    ///
    /// # Examples
    /// ```text
    /// age
    /// johan
    /// image/jpeg
    /// ```
    Word(String),

    /// String literal enclosed in double quotes
    ///
    /// # Examples
    /// ```text
    /// "hip hop"
    /// "a OR 1=1"
    /// ```
    String(String),

    /// Decimal number, optionally negative
    ///
    /// # Examples
    /// ```text
    /// 14
    /// 22.40
    /// -3
    /// ```
    Number(Decimal),

    /// Calendar date in ISO format
    ///
    /// # Examples
    /// ```text
    /// 1989-07-24
    /// ```
    Date(NaiveDate),

    /// Boolean values
    Boolean(bool),

    // Keywords
    /// Explicit conjunction (`AND`)
    And,
    /// Disjunction (`OR`)
    Or,

    // Punctuation
    /// Separates a field from its operator and value
    Colon,
    /// Separates list members
    Comma,
    /// `[`
    LBracket,
    /// `]`
    RBracket,

    // Comparison operators
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `=`
    Eq,
    /// `!=`
    NotEq,

    Eof,
}

impl Token {
    /// The operator text for comparison tokens, `None` for everything else.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Token::Gt => Some(">"),
            Token::GtEq => Some(">="),
            Token::Lt => Some("<"),
            Token::LtEq => Some("<="),
            Token::Eq => Some("="),
            Token::NotEq => Some("!="),
            _ => None,
        }
    }
}
