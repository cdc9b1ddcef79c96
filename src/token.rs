use std::fmt;

/// One step of a path query.
///
/// Tokens are produced left to right by the [`Lexer`](crate::lexer::Lexer)
/// and consumed in the same order by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Object field lookup
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// 0
    /// ```
    Literal(String),

    /// Zero-based array index
    ///
    /// # Examples
    /// ```text
    /// items[0]
    /// matrix[12]
    /// ```
    Index(usize),

    /// Final element of the current array
    ///
    /// # Examples
    /// ```text
    /// items[-]
    /// ```
    Last,

    /// Opens one level of per-element iteration over the current array.
    ///
    /// Every field lookup after it is applied to each element instead of
    /// the array itself.
    ///
    /// # Examples
    /// ```text
    /// items[].name
    /// groups[].members[].id
    /// ```
    Iterator,
}

impl Token {
    pub fn is_iterator(&self) -> bool {
        matches!(self, Token::Iterator)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(name) => write!(f, "{}", name),
            Token::Index(i) => write!(f, "[{}]", i),
            Token::Last => write!(f, "[-]"),
            Token::Iterator => write!(f, "[]"),
        }
    }
}
