//! Command-line expression parsing
//!
//! Grammar: `operand (operator operand)*` where an operand is a value or a
//! parenthesized expression and an operator is `and`, `&&`, `or` or `||`.
//! There is no precedence: each operator is applied to everything on its left
//! through [`ExpressionTree::combine`], so `A or B and C` yields `((A || B) && C)`.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{ExpressionTree, Operator};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken { position: usize, token: String },

    #[error("missing operand at position {position}")]
    MissingOperand { position: usize },

    #[error("group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },

    #[error("unmatched ')' at position {position}")]
    UnmatchedClose { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Value(&'a str),
    Op(Operator),
    Open,
    Close,
}

impl Token<'_> {
    fn text(&self) -> String {
        match self {
            Token::Value(value) => value.to_string(),
            Token::Op(operator) => operator.to_string(),
            Token::Open => "(".into(),
            Token::Close => ")".into(),
        }
    }
}

/// Splits arguments on whitespace and peels parentheses off each word.
fn tokenize<S: AsRef<str>>(args: &[S]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for word in args.iter().flat_map(|arg| arg.as_ref().split_whitespace()) {
        let body = word.trim_start_matches('(');
        tokens.extend(std::iter::repeat(Token::Open).take(word.len() - body.len()));

        let inner = body.trim_end_matches(')');
        if !inner.is_empty() {
            tokens.push(classify(inner));
        }
        tokens.extend(std::iter::repeat(Token::Close).take(body.len() - inner.len()));
    }
    tokens
}

fn classify(word: &str) -> Token<'_> {
    match word.to_ascii_lowercase().as_str() {
        "and" | "&&" => Token::Op(Operator::And),
        "or" | "||" => Token::Op(Operator::Or),
        _ => Token::Value(word),
    }
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<ExpressionTree<String>, ParseError> {
        let mut tree = self.operand()?;
        loop {
            match self.peek() {
                None | Some(Token::Close) => return Ok(tree),
                Some(Token::Op(operator)) => {
                    self.pos += 1;
                    let node = self.operand()?;
                    tree.combine(operator, node);
                }
                Some(token) => {
                    return Err(ParseError::UnexpectedToken {
                        position: self.pos,
                        token: token.text(),
                    })
                }
            }
        }
    }

    fn operand(&mut self) -> Result<ExpressionTree<String>, ParseError> {
        let position = self.pos;
        match self.next() {
            Some(Token::Value(value)) => Ok(ExpressionTree::of(value.to_string())),
            Some(Token::Open) => {
                let inner = self.expression()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(ParseError::UnclosedGroup { position }),
                }
            }
            Some(Token::Op(_)) | Some(Token::Close) | None => {
                Err(ParseError::MissingOperand { position })
            }
        }
    }
}

/// Builds a tree from command-line arguments.
///
/// Positions in errors count tokens after splitting, starting at 0.
#[instrument(level = "debug", skip(args), fields(args = args.len()))]
pub fn parse_expression<S: AsRef<str>>(args: &[S]) -> Result<ExpressionTree<String>, ParseError> {
    let tokens = tokenize(args);
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    debug!(tokens = tokens.len(), "tokenized expression");

    let mut parser = Parser { tokens, pos: 0 };
    let tree = parser.expression()?;
    if parser.pos < parser.tokens.len() {
        return Err(ParseError::UnmatchedClose {
            position: parser.pos,
        });
    }
    Ok(tree)
}

/// Values from command-line arguments, split on whitespace.
pub fn split_values<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split_whitespace())
        .map(str::to_string)
        .collect()
}
