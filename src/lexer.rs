//! Path tokenizer.
//!
//! A path is a sequence of dot separated field names, each optionally
//! followed by one bracketed modifier:
//!
//! ```text
//! path         := segment ("." segment)*
//! segment      := literal bracket?
//! bracket      := "[" bracket-body "]"
//! bracket-body := "" | "-" | digit+
//! literal      := (alpha | digit | "_")+
//! ```
//!
//! The lexer makes a single left to right pass and never looks at the
//! document being queried.

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::{error::SyntaxError, token::Token};

pub const DIVIDER: char = '.';
pub const ARRAY_OPEN: char = '[';
pub const ARRAY_CLOSE: char = ']';
pub const ARRAY_LAST: char = '-';

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Whether the last emitted token was a field name; brackets may only follow one.
    after_literal: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            after_literal: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_index(&mut self) -> Result<usize, SyntaxError> {
        let start = self.position;
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        digits.parse::<usize>().map_err(|_| SyntaxError::IndexOverflow {
            digits,
            position: start,
        })
    }

    /// Consumes the `]` of the bracket opened at `open`. Anything else
    /// before it is a second value in the same bracket.
    fn close_bracket(&mut self, open: usize) -> Result<(), SyntaxError> {
        self.skip_whitespace();
        match self.current_char() {
            Some(ARRAY_CLOSE) => {
                self.advance();
                Ok(())
            }
            Some(found) => Err(SyntaxError::ExtraBracketContent {
                open,
                found,
                position: self.position,
            }),
            None => Err(SyntaxError::UnclosedBracket { position: open }),
        }
    }

    fn read_bracket(&mut self) -> Result<Token, SyntaxError> {
        let open = self.position;
        if !self.after_literal {
            return Err(SyntaxError::MisplacedBracket { position: open });
        }
        if !self.input[open..].contains(&ARRAY_CLOSE) {
            return Err(SyntaxError::UnclosedBracket { position: open });
        }
        self.advance();
        self.skip_whitespace();

        // The first thing inside the bracket decides what it is.
        let token = match self.current_char() {
            Some(ARRAY_CLOSE) => {
                self.advance();
                return Ok(Token::Iterator);
            }
            Some(ARRAY_LAST) => {
                self.advance();
                Token::Last
            }
            Some(ch) if ch.is_ascii_digit() => Token::Index(self.read_index()?),
            Some(found) => {
                return Err(SyntaxError::InvalidBracketContent {
                    found,
                    position: self.position,
                });
            }
            None => return Err(SyntaxError::UnclosedBracket { position: open }),
        };

        self.close_bracket(open)?;
        Ok(token)
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        loop {
            self.skip_whitespace();

            let token = match self.current_char() {
                None => return Ok(None),
                Some(DIVIDER) => {
                    self.advance();
                    self.after_literal = false;
                    continue;
                }
                Some(ARRAY_OPEN) => self.read_bracket()?,
                Some(ARRAY_CLOSE) => {
                    return Err(SyntaxError::UnexpectedClose {
                        position: self.position,
                    });
                }
                Some(ch) if ch.is_alphanumeric() || ch == '_' => {
                    Token::Literal(self.read_identifier())
                }
                Some(found) => {
                    return Err(SyntaxError::UnexpectedCharacter {
                        found,
                        position: self.position,
                    });
                }
            };

            self.after_literal = matches!(token, Token::Literal(_));
            return Ok(Some(token));
        }
    }
}

/// Tokenizes a whole path.
///
/// # Examples
///
/// ```
/// use rjson::{Token, tokenize};
///
/// let tokens = tokenize("items[].name").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Literal("items".to_string()),
///         Token::Iterator,
///         Token::Literal("name".to_string()),
///     ]
/// );
/// ```
pub fn tokenize(path: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(path);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    trace!("tokenized {:?} into {:?}", path, tokens);
    Ok(tokens)
}

/// A tokenized path, ready to be executed any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    tokens: Vec<Token>,
    iterators: usize,
}

impl Path {
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        Ok(Path::from_tokens(tokenize(text)?))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let iterators = tokens.iter().filter(|t| t.is_iterator()).count();
        Path { tokens, iterators }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of `[]` steps in the path.
    pub fn iterator_count(&self) -> usize {
        self.iterators
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromStr for Path {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 && matches!(token, Token::Literal(_)) {
                write!(f, "{}", DIVIDER)?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[test]
fn test_brackets() {
    let mut lexer = Lexer::new("a[0].b[-].c[]");
    assert_eq!(lexer.next_token(), Ok(Some(Token::Literal("a".to_string()))));
    assert_eq!(lexer.next_token(), Ok(Some(Token::Index(0))));
    assert_eq!(lexer.next_token(), Ok(Some(Token::Literal("b".to_string()))));
    assert_eq!(lexer.next_token(), Ok(Some(Token::Last)));
    assert_eq!(lexer.next_token(), Ok(Some(Token::Literal("c".to_string()))));
    assert_eq!(lexer.next_token(), Ok(Some(Token::Iterator)));
    assert_eq!(lexer.next_token(), Ok(None));
}

#[test]
fn test_canonical_display() {
    let path = Path::parse(" a..b [ 2 ] . c[] ").unwrap();
    assert_eq!(path.to_string(), "a.b[2].c[]");
    assert_eq!(path.iterator_count(), 1);
}
