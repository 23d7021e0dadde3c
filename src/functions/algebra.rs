//! Algebraic combinators on expression trees.
//!
//! Every public combinator simplifies its operands once and then builds
//! the combined node. The combined node itself is not simplified again,
//! so a full reduction needs another simplification pass.
//!
//! The `*_node` builders take operands that are already simplified and
//! apply the local rewrites: identities of the same scalar kind, additive
//! inverses, polynomial arithmetic and the sign-aware `abs`.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::functions::polynomial::PolynomialNode;
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};

/// Largest exponent expanded into polynomial multiplication.
const POLYNOMIAL_POWER_LIMIT: i64 = 64;

impl Expr {
  pub fn plus(&self, other: &Expr) -> Expr {
    sum_node(self.simplified(), other.simplified())
  }

  pub fn minus(&self, other: &Expr) -> Expr {
    sum_node(self.simplified(), negate_node(other.simplified()))
  }

  pub fn multiplied(&self, other: &Expr) -> Expr {
    product_node(self.simplified(), other.simplified())
  }

  pub fn divided(&self, other: &Expr) -> Expr {
    quotient_node(self.simplified(), other.simplified())
  }

  pub fn power(&self, exponent: &Expr) -> Expr {
    power_node(self.simplified(), exponent.simplified())
  }

  /// Logarithm of `self` to `base`.
  pub fn logx(&self, base: &Expr) -> Expr {
    Expr::binary(BinaryOperator::Logx, base.simplified(), self.simplified())
  }

  pub fn modulo(&self, modulus: &Expr) -> Expr {
    Expr::binary(BinaryOperator::Mod, self.simplified(), modulus.simplified())
  }

  pub fn nth_derivative(&self, n: &Expr) -> Expr {
    Expr::binary(
      BinaryOperator::NthDerivative,
      self.simplified(),
      n.simplified(),
    )
  }

  pub fn nth_integral(&self, n: &Expr) -> Expr {
    Expr::binary(BinaryOperator::NthIntegral, self.simplified(), n.simplified())
  }

  pub fn negated(&self) -> Expr {
    negate_node(self.simplified())
  }

  pub fn abs(&self) -> Expr {
    abs_node(self.simplified())
  }

  pub fn sqrt(&self) -> Expr {
    Expr::unary(UnaryOperator::Sqrt, self.simplified())
  }

  pub fn ln(&self) -> Expr {
    Expr::unary(UnaryOperator::Ln, self.simplified())
  }

  pub fn log2(&self) -> Expr {
    Expr::unary(UnaryOperator::Log2, self.simplified())
  }

  pub fn log10(&self) -> Expr {
    Expr::unary(UnaryOperator::Log10, self.simplified())
  }

  pub fn factorial(&self) -> Expr {
    Expr::unary(UnaryOperator::Factorial, self.simplified())
  }

  /// Compares the simplified forms of both sides.
  pub fn equivalent(&self, other: &Expr) -> bool {
    self.simplified() == other.simplified()
  }

  fn is_zero_constant(&self) -> bool {
    self.as_constant().is_some_and(|c| c.is_zero())
  }

  fn is_one_constant(&self) -> bool {
    self.as_constant().is_some_and(|c| c.is_one())
  }
}

pub(crate) fn sum_node(left: Expr, right: Expr) -> Expr {
  let kind = left.kind();
  if kind == right.kind() {
    if right.is_zero_constant() {
      return left;
    }
    if left.is_zero_constant() {
      return right;
    }
    if let (Expr::Polynomial(a), Expr::Polynomial(b)) = (&left, &right)
      && let Some(sum) = a.checked_add(b)
    {
      return polynomial_or_zero(sum);
    }
    if cancels(&left, &right) {
      return Expr::zero(kind);
    }
  }
  Expr::binary(BinaryOperator::Sum, left, right)
}

/// Whether `left` is what [`negate_node`] would make of `right`.
fn cancels(left: &Expr, right: &Expr) -> bool {
  match right {
    Expr::Constant(b) => left.as_constant().is_some_and(|a| *a == -b.clone()),
    Expr::Unary {
      op: UnaryOperator::Negate,
      operand,
    } => **operand == *left,
    Expr::Polynomial(b) => {
      matches!(left, Expr::Polynomial(a) if *a == b.negated())
    }
    _ => matches!(
      left,
      Expr::Unary { op: UnaryOperator::Negate, operand } if **operand == *right
    ),
  }
}

pub(crate) fn product_node(left: Expr, right: Expr) -> Expr {
  let kind = left.kind();
  if kind == right.kind() {
    if left.is_zero_constant() || right.is_zero_constant() {
      return Expr::zero(kind);
    }
    if right.is_one_constant() {
      return left;
    }
    if left.is_one_constant() {
      return right;
    }
    if let (Expr::Polynomial(a), Expr::Polynomial(b)) = (&left, &right)
      && let Some(product) = a.checked_mul(b)
    {
      return polynomial_or_zero(product);
    }
    for (quotient, other) in [(&left, &right), (&right, &left)] {
      if let Expr::Binary {
        op: BinaryOperator::Quotient,
        left: numerator,
        right: denominator,
      } = quotient
      {
        // (a / b) * b
        if **denominator == *other {
          return (**numerator).clone();
        }
        // (a / b) * (b / a)
        if let Expr::Binary {
          op: BinaryOperator::Quotient,
          left: n2,
          right: d2,
        } = other
          && n2 == denominator
          && d2 == numerator
        {
          return Expr::one(kind);
        }
      }
    }
  }
  Expr::binary(BinaryOperator::Product, left, right)
}

pub(crate) fn quotient_node(left: Expr, right: Expr) -> Expr {
  let kind = left.kind();
  if kind == right.kind() {
    if right.is_one_constant() {
      return left;
    }
    if left == right && !left.is_zero_constant() {
      return Expr::one(kind);
    }
    if let (Expr::Polynomial(a), Expr::Polynomial(b)) = (&left, &right)
      && b.is_monomial()
      && let Some(product) = a.checked_mul(&b.power(-1))
    {
      return polynomial_or_zero(product);
    }
    if let Expr::Binary {
      op: BinaryOperator::Quotient,
      left: numerator,
      right: denominator,
    } = &left
    {
      // (a / b) / a
      if **numerator == right {
        return Expr::binary(
          BinaryOperator::Quotient,
          Expr::one(kind),
          (**denominator).clone(),
        );
      }
      // (a / b) / c
      return Expr::binary(
        BinaryOperator::Quotient,
        (**numerator).clone(),
        product_node((**denominator).clone(), right),
      );
    }
  }
  Expr::binary(BinaryOperator::Quotient, left, right)
}

pub(crate) fn power_node(base: Expr, exponent: Expr) -> Expr {
  let kind = base.kind();
  if kind == exponent.kind()
    && let Some(value) = exponent.as_constant()
  {
    if value.is_one() {
      return base;
    }
    if value.is_zero() {
      return Expr::one(kind);
    }
    if let Expr::Polynomial(poly) = &base
      && let Some(n) = value.to_whole()
      && n.abs() <= POLYNOMIAL_POWER_LIMIT
      && (n >= 0 || poly.is_monomial())
    {
      return polynomial_or_zero(poly.power(n));
    }
  }
  Expr::binary(BinaryOperator::Power, base, exponent)
}

pub(crate) fn negate_node(operand: Expr) -> Expr {
  match operand {
    Expr::Constant(value) => Expr::Constant(-value),
    Expr::Unary {
      op: UnaryOperator::Negate,
      operand,
    } => *operand,
    Expr::Polynomial(poly) => Expr::Polynomial(poly.negated()),
    other => Expr::unary(UnaryOperator::Negate, other),
  }
}

/// `|operand|` for an operand whose sign is known.
fn signed_abs(operand: Expr, negative: bool) -> Expr {
  if negative {
    negate_node(operand)
  } else {
    operand
  }
}

pub(crate) fn abs_node(operand: Expr) -> Expr {
  match operand {
    Expr::Constant(value) => Expr::Constant(value.abs()),
    Expr::Unary {
      op: UnaryOperator::Abs,
      ..
    } => operand,
    Expr::Unary {
      op: UnaryOperator::Negate,
      operand,
    } => abs_node(*operand),
    Expr::Binary {
      op: BinaryOperator::Sum,
      left,
      right,
    } => match (left.is_negative(), right.is_negative()) {
      (Some(l), Some(r)) if l == r => sum_node(
        signed_abs(*left, l),
        signed_abs(*right, r),
      ),
      _ => Expr::unary(
        UnaryOperator::Abs,
        Expr::binary(BinaryOperator::Sum, *left, *right),
      ),
    },
    Expr::Binary {
      op: op @ (BinaryOperator::Product | BinaryOperator::Quotient),
      left,
      right,
    } => match (left.is_negative(), right.is_negative()) {
      (Some(l), Some(r)) => Expr::binary(
        op,
        signed_abs(*left, l),
        signed_abs(*right, r),
      ),
      _ => Expr::unary(UnaryOperator::Abs, Expr::binary(op, *left, *right)),
    },
    // |a^b| = |a|^b
    Expr::Binary {
      op: BinaryOperator::Power,
      left,
      right,
    } => match left.is_negative() {
      Some(negative) => Expr::binary(
        BinaryOperator::Power,
        signed_abs(*left, negative),
        *right,
      ),
      None => Expr::unary(
        UnaryOperator::Abs,
        Expr::binary(BinaryOperator::Power, *left, *right),
      ),
    },
    other => match other.is_negative() {
      Some(negative) => signed_abs(other, negative),
      None => Expr::unary(UnaryOperator::Abs, other),
    },
  }
}

fn polynomial_or_zero(poly: PolynomialNode) -> Expr {
  if poly.term_count() == 0 {
    Expr::zero(poly.kind())
  } else {
    Expr::Polynomial(poly)
  }
}

impl Add for Expr {
  type Output = Expr;

  fn add(self, rhs: Expr) -> Expr {
    self.plus(&rhs)
  }
}

impl Sub for Expr {
  type Output = Expr;

  fn sub(self, rhs: Expr) -> Expr {
    self.minus(&rhs)
  }
}

impl Mul for Expr {
  type Output = Expr;

  fn mul(self, rhs: Expr) -> Expr {
    self.multiplied(&rhs)
  }
}

impl Div for Expr {
  type Output = Expr;

  fn div(self, rhs: Expr) -> Expr {
    self.divided(&rhs)
  }
}

impl Neg for Expr {
  type Output = Expr;

  fn neg(self) -> Expr {
    self.negated()
  }
}
