//! Text to expression tree.
//!
//! Each level (the whole input, or the inside of one parenthesized group)
//! is split into a flat stack of tokens, the groups are parsed
//! recursively, and the stack is then folded by precedence tier.

use crate::ParseError;
use crate::functions::polynomial::PolynomialNode;
use crate::scalar::{DynamicScalar, Fraction, ScalarKind};
use crate::syntax::Expr;

pub mod assemble;
pub mod keyword;

use keyword::Token;

/// Default limit on nested parentheses and prefix operator runs.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Clone, Debug)]
pub struct ExpressionParser {
  exact: bool,
  variable: Option<String>,
  max_depth: usize,
}

impl ExpressionParser {
  /// `exact` parses literals as fractions instead of doubles.
  pub fn new(exact: bool) -> Self {
    ExpressionParser {
      exact,
      variable: Some("x".to_string()),
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }

  /// The variable name recognized in the input, or none at all.
  pub fn with_variable(mut self, name: Option<&str>) -> Self {
    self.variable = name.map(str::to_lowercase);
    self
  }

  pub fn with_max_depth(mut self, limit: usize) -> Self {
    self.max_depth = limit;
    self
  }

  pub fn kind(&self) -> ScalarKind {
    if self.exact {
      ScalarKind::Fraction
    } else {
      ScalarKind::Double
    }
  }

  pub fn parse(&self, input: &str) -> Result<Expr, ParseError> {
    let input = input.to_lowercase();
    let expr = self.parse_level(&input, 0)?;
    log::debug!("parsed {input:?} as {expr}");
    Ok(expr)
  }

  fn parse_level(&self, input: &str, depth: usize) -> Result<Expr, ParseError> {
    if depth > self.max_depth {
      return Err(ParseError::TooDeep {
        limit: self.max_depth,
      });
    }

    let tokens = keyword::tokenize(input, self.variable.as_deref())?;
    if tokens.is_empty() {
      return Err(ParseError::EmptyExpression);
    }

    let stack = tokens
      .into_iter()
      .map(|token| match token {
        Token::Operator(op) => Ok(op.pending()),
        Token::Variable => {
          Ok(Expr::Polynomial(PolynomialNode::identity(self.kind())))
        }
        Token::Literal(text) => self.literal(&text),
        Token::Container(content) => self.parse_level(&content, depth + 1),
      })
      .collect::<Result<Vec<_>, _>>()?;

    assemble::assemble(stack, depth, self.max_depth)
  }

  fn literal(&self, text: &str) -> Result<Expr, ParseError> {
    let invalid = || ParseError::InvalidLiteral {
      literal: text.to_string(),
    };
    if self.exact {
      let value: Fraction = text.parse()?;
      return Ok(Expr::Constant(DynamicScalar::Fraction(value)));
    }
    let value = match text.split_once('/') {
      Some((numerator, denominator)) => {
        let numerator: f64 = numerator.parse().map_err(|_| invalid())?;
        let denominator: f64 = denominator.parse().map_err(|_| invalid())?;
        numerator / denominator
      }
      None => text.parse().map_err(|_| invalid())?,
    };
    Ok(Expr::Constant(DynamicScalar::Double(value)))
  }
}

impl Default for ExpressionParser {
  fn default() -> Self {
    ExpressionParser::new(false)
  }
}
