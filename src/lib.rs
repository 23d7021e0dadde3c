use thiserror::Error;

pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod scalar;
pub mod syntax;

pub use evaluator::bounds::Bounds;
pub use functions::polynomial::{Polynomial, PolynomialNode};
pub use functions::simplify::simplify_to_fixed_point;
pub use parser::ExpressionParser;
pub use scalar::{DynamicScalar, Fraction, Scalar, ScalarKind};
pub use syntax::{BinaryOperator, Expr, UnaryOperator};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
  #[error("Unexpected input at: {remaining}")]
  UnexpectedInput { remaining: String },
  #[error("Ambiguous keyword at {input:?}: matches {matches:?}")]
  AmbiguousKeyword { input: String, matches: Vec<String> },
  #[error("{operator} operator missing operand")]
  MissingOperand { operator: String },
  #[error("{count} expressions remain unresolved")]
  UnresolvedStack { count: usize },
  #[error("Invalid numeric literal: {literal}")]
  InvalidLiteral { literal: String },
  #[error("Empty expression")]
  EmptyExpression,
  #[error("Nesting deeper than {limit} levels")]
  TooDeep { limit: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
  #[error("Variable {name} has no value")]
  UnboundVariable { name: String },
  #[error("Cannot evaluate a {expected} expression at a {found} value")]
  KindMismatch {
    expected: ScalarKind,
    found: ScalarKind,
  },
  #[error("Expression contains an unresolved operand")]
  Unresolved,
  #[error("{operation} has no numeric evaluation")]
  Unsupported { operation: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
  #[error(transparent)]
  Parse(#[from] ParseError),
  #[error(transparent)]
  Eval(#[from] EvalError),
}

fn scalar_kind(exact: bool) -> ScalarKind {
  if exact {
    ScalarKind::Fraction
  } else {
    ScalarKind::Double
  }
}

/// Parses `input` with the default variable `x`.
pub fn parse(input: &str, exact: bool) -> Result<Expr, ParseError> {
  ExpressionParser::new(exact).parse(input)
}

/// Parses and simplifies until the tree stops changing, then describes it.
pub fn interpret(input: &str, exact: bool) -> Result<String, CalcError> {
  let expr = parse(input, exact)?;
  Ok(simplify_to_fixed_point(&expr).to_string())
}

/// Parses and evaluates at `x`, converted to the literal kind.
pub fn evaluate_at(
  input: &str,
  exact: bool,
  x: f64,
) -> Result<DynamicScalar, CalcError> {
  let expr = parse(input, exact)?;
  let point = DynamicScalar::from_f64(scalar_kind(exact), x);
  Ok(expr.evaluate(&point)?)
}

/// Bounds of the simplified tree.
pub fn bounds_of(input: &str, exact: bool) -> Result<Bounds, CalcError> {
  let expr = parse(input, exact)?;
  Ok(simplify_to_fixed_point(&expr).bounds())
}
