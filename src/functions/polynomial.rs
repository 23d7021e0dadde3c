use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};

use crate::evaluator::bounds::Bounds;
use crate::functions::number_theory::{lcm, unique_factors};
use crate::scalar::{DynamicScalar, Fraction, Scalar, ScalarKind};
use crate::EvalError;

/// Sparse single-variable polynomial. Negative powers are allowed.
///
/// No stored coefficient is ever zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial<S: Scalar> {
  coefficients: BTreeMap<i64, S>,
}

impl<S: Scalar> Polynomial<S> {
  pub fn new(coefficients: BTreeMap<i64, S>) -> Self {
    let mut poly = Polynomial { coefficients };
    poly.remove_zero_terms();
    poly
  }

  /// Coefficients from the highest power down to the constant term, so
  /// `[1, 7, 10]` is `x^2 + 7x + 10`.
  pub fn from_standard(coefficients: &[S]) -> Self {
    let map = coefficients
      .iter()
      .rev()
      .enumerate()
      .map(|(power, coef)| (power as i64, coef.clone()))
      .collect();
    Polynomial::new(map)
  }

  pub fn zero() -> Self {
    Polynomial {
      coefficients: BTreeMap::new(),
    }
  }

  pub fn constant(value: S) -> Self {
    Polynomial::monomial(value, 0)
  }

  pub fn monomial(coefficient: S, power: i64) -> Self {
    Polynomial::new(BTreeMap::from([(power, coefficient)]))
  }

  /// `1x^1`
  pub fn identity() -> Self {
    Polynomial::monomial(S::one(), 1)
  }

  fn remove_zero_terms(&mut self) {
    self.coefficients.retain(|_, coef| !coef.is_zero());
  }

  /// `(power, coefficient)` pairs, highest power first.
  pub fn terms(&self) -> impl Iterator<Item = (i64, &S)> {
    self.coefficients.iter().rev().map(|(p, c)| (*p, c))
  }

  pub fn powers(&self) -> Vec<i64> {
    self.coefficients.keys().rev().copied().collect()
  }

  pub fn term_count(&self) -> usize {
    self.coefficients.len()
  }

  pub fn coefficient(&self, power: i64) -> S {
    self.coefficients.get(&power).cloned().unwrap_or_else(S::zero)
  }

  pub fn largest_power(&self) -> i64 {
    self.coefficients.keys().next_back().copied().unwrap_or(0)
  }

  pub fn smallest_power(&self) -> i64 {
    self.coefficients.keys().next().copied().unwrap_or(0)
  }

  pub fn leading_coefficient(&self) -> S {
    self.coefficient(self.largest_power())
  }

  pub fn constant_term(&self) -> S {
    self.coefficient(0)
  }

  pub fn is_zero(&self) -> bool {
    self.coefficients.is_empty()
  }

  pub fn is_constant(&self) -> bool {
    self.is_zero() || (self.term_count() == 1 && self.largest_power() == 0)
  }

  pub fn is_monomial(&self) -> bool {
    self.term_count() == 1
  }

  pub fn eval(&self, x: &S) -> S {
    self
      .coefficients
      .iter()
      .fold(S::zero(), |acc, (power, coef)| {
        acc + coef.clone() * x.powi(*power)
      })
  }

  pub fn added(&self, other: &Self) -> Self {
    let mut sum = self.coefficients.clone();
    for (power, coef) in &other.coefficients {
      let entry = sum.entry(*power).or_insert_with(S::zero);
      *entry = entry.clone() + coef.clone();
    }
    Polynomial::new(sum)
  }

  pub fn negated(&self) -> Self {
    let coefficients = self
      .coefficients
      .iter()
      .map(|(power, coef)| (*power, -coef.clone()))
      .collect();
    Polynomial { coefficients }
  }

  pub fn subtracted(&self, other: &Self) -> Self {
    self.added(&other.negated())
  }

  /// Convolution of the two power maps.
  pub fn multiplied(&self, other: &Self) -> Self {
    let mut product: BTreeMap<i64, S> = BTreeMap::new();
    for (lp, lc) in &self.coefficients {
      for (rp, rc) in &other.coefficients {
        let entry = product.entry(lp + rp).or_insert_with(S::zero);
        *entry = entry.clone() + lc.clone() * rc.clone();
      }
    }
    Polynomial::new(product)
  }

  /// Flips every power and inverts every coefficient. Only a true
  /// reciprocal for a monomial.
  pub fn reciprocal(&self) -> Self {
    let coefficients = self
      .coefficients
      .iter()
      .map(|(power, coef)| (-power, S::one() / coef.clone()))
      .collect();
    Polynomial::new(coefficients)
  }

  pub fn power(&self, exponent: i64) -> Self {
    let mut result = Polynomial::constant(S::one());
    for _ in 0..exponent.unsigned_abs() {
      result = result.multiplied(self);
    }
    if exponent < 0 {
      result.reciprocal()
    } else {
      result
    }
  }

  fn signed_infinity(negative: bool) -> S {
    if negative {
      -S::infinity()
    } else {
      S::infinity()
    }
  }

  pub fn limit_at_positive_infinity(&self) -> S {
    match self.largest_power() {
      p if p > 0 => {
        Self::signed_infinity(self.leading_coefficient().is_negative())
      }
      _ => self.constant_term(),
    }
  }

  pub fn limit_at_negative_infinity(&self) -> S {
    match self.largest_power() {
      p if p > 0 => {
        let flips = p % 2 != 0;
        Self::signed_infinity(self.leading_coefficient().is_negative() != flips)
      }
      _ => self.constant_term(),
    }
  }

  pub fn limit_at_zero_from_above(&self) -> S {
    match self.smallest_power() {
      p if p < 0 => Self::signed_infinity(self.coefficient(p).is_negative()),
      _ => self.constant_term(),
    }
  }

  pub fn limit_at_zero_from_below(&self) -> S {
    match self.smallest_power() {
      p if p < 0 => {
        let flips = p % 2 != 0;
        Self::signed_infinity(self.coefficient(p).is_negative() != flips)
      }
      _ => self.constant_term(),
    }
  }

  /// Interval sum of every monomial's range. Each monomial is monotone on
  /// both half-lines, so its range is spanned by its four limits.
  pub fn bounds(&self) -> Bounds {
    let mut total = Bounds::point(S::zero().into_dynamic());
    for (power, coef) in self.terms() {
      let term = Polynomial::monomial(coef.clone(), power);
      let range = Bounds::from_candidates(
        S::KIND,
        [
          term.limit_at_positive_infinity(),
          term.limit_at_negative_infinity(),
          term.limit_at_zero_from_above(),
          term.limit_at_zero_from_below(),
        ]
        .into_iter()
        .map(Scalar::into_dynamic),
      );
      total = total.sum(&range);
    }
    total
  }
}

impl Polynomial<Fraction> {
  /// Rational-root-theorem candidates: `±p/q` for every divisor `p` of the
  /// lowest coefficient and `q` of the leading one, after clearing
  /// denominators. Zero is included when `x` divides the polynomial.
  pub fn candidate_roots(&self) -> Vec<Fraction> {
    let mut candidates = Vec::new();
    if self.is_zero() {
      return candidates;
    }
    if self.smallest_power() > 0 {
      candidates.push(Fraction::zero());
    }

    let common = self
      .coefficients
      .values()
      .filter_map(|coef| coef.simplified().denominator().cloned())
      .fold(BigUint::from(1u32), |acc, d| lcm(&acc, &d));
    let common = Fraction::from_parts(false, common, BigUint::from(1u32));
    let scaled = |coef: &Fraction| {
      (coef.clone() * common.clone()).simplified().signed_numerator()
    };

    let (Some(lowest), Some(leading)) = (
      scaled(&self.coefficient(self.smallest_power())),
      scaled(&self.leading_coefficient()),
    ) else {
      return candidates;
    };

    let numerators = unique_factors(lowest.magnitude());
    let denominators = unique_factors(leading.magnitude());
    for p in &numerators {
      for q in &denominators {
        let candidate =
          Fraction::new(BigInt::from(p.clone()), BigInt::from(q.clone()))
            .simplified();
        for value in [candidate.clone(), -candidate] {
          if !candidates.contains(&value) {
            candidates.push(value);
          }
        }
      }
    }
    candidates
  }
}

impl<S: Scalar> Add for Polynomial<S> {
  type Output = Polynomial<S>;

  fn add(self, rhs: Polynomial<S>) -> Polynomial<S> {
    self.added(&rhs)
  }
}

impl<S: Scalar> Sub for Polynomial<S> {
  type Output = Polynomial<S>;

  fn sub(self, rhs: Polynomial<S>) -> Polynomial<S> {
    self.subtracted(&rhs)
  }
}

impl<S: Scalar> Mul for Polynomial<S> {
  type Output = Polynomial<S>;

  fn mul(self, rhs: Polynomial<S>) -> Polynomial<S> {
    self.multiplied(&rhs)
  }
}

impl<S: Scalar> Neg for Polynomial<S> {
  type Output = Polynomial<S>;

  fn neg(self) -> Polynomial<S> {
    self.negated()
  }
}

impl<S: Scalar> fmt::Display for Polynomial<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_zero() {
      return write!(f, "{}", S::zero());
    }
    let terms: Vec<String> = self
      .terms()
      .map(|(power, coef)| format!("{coef}x^{power}"))
      .collect();
    write!(f, "{}", terms.join(" + "))
  }
}

/// A polynomial of any scalar kind, as stored in an expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum PolynomialNode {
  Double(Polynomial<f64>),
  Float(Polynomial<f32>),
  Fraction(Polynomial<Fraction>),
}

macro_rules! with_polynomial {
  ($node:expr, |$p:ident| $body:expr) => {
    match $node {
      PolynomialNode::Double($p) => $body,
      PolynomialNode::Float($p) => $body,
      PolynomialNode::Fraction($p) => $body,
    }
  };
}

macro_rules! map_polynomial {
  ($node:expr, |$p:ident| $body:expr) => {
    match $node {
      PolynomialNode::Double($p) => PolynomialNode::Double($body),
      PolynomialNode::Float($p) => PolynomialNode::Float($body),
      PolynomialNode::Fraction($p) => PolynomialNode::Fraction($body),
    }
  };
}

impl PolynomialNode {
  /// `1x^1` in the given kind.
  pub fn identity(kind: ScalarKind) -> Self {
    match kind {
      ScalarKind::Double => PolynomialNode::Double(Polynomial::identity()),
      ScalarKind::Float => PolynomialNode::Float(Polynomial::identity()),
      ScalarKind::Fraction => PolynomialNode::Fraction(Polynomial::identity()),
    }
  }

  pub fn kind(&self) -> ScalarKind {
    match self {
      PolynomialNode::Double(_) => ScalarKind::Double,
      PolynomialNode::Float(_) => ScalarKind::Float,
      PolynomialNode::Fraction(_) => ScalarKind::Fraction,
    }
  }

  pub fn term_count(&self) -> usize {
    with_polynomial!(self, |p| p.term_count())
  }

  pub fn is_monomial(&self) -> bool {
    with_polynomial!(self, |p| p.is_monomial())
  }

  pub fn evaluate(
    &self,
    x: &DynamicScalar,
  ) -> Result<DynamicScalar, EvalError> {
    let mismatch = || EvalError::KindMismatch {
      expected: self.kind(),
      found: x.kind(),
    };
    with_polynomial!(self, |p| {
      let x = Scalar::from_dynamic(x).ok_or_else(mismatch)?;
      Ok(p.eval(&x).into_dynamic())
    })
  }

  pub fn bounds(&self) -> Bounds {
    with_polynomial!(self, |p| p.bounds())
  }

  pub fn negated(&self) -> Self {
    map_polynomial!(self, |p| p.negated())
  }

  /// Sum of two polynomials of the same kind.
  pub fn checked_add(&self, other: &PolynomialNode) -> Option<Self> {
    match (self, other) {
      (PolynomialNode::Double(a), PolynomialNode::Double(b)) => {
        Some(PolynomialNode::Double(a.added(b)))
      }
      (PolynomialNode::Float(a), PolynomialNode::Float(b)) => {
        Some(PolynomialNode::Float(a.added(b)))
      }
      (PolynomialNode::Fraction(a), PolynomialNode::Fraction(b)) => {
        Some(PolynomialNode::Fraction(a.added(b)))
      }
      _ => None,
    }
  }

  /// Product of two polynomials of the same kind.
  pub fn checked_mul(&self, other: &PolynomialNode) -> Option<Self> {
    match (self, other) {
      (PolynomialNode::Double(a), PolynomialNode::Double(b)) => {
        Some(PolynomialNode::Double(a.multiplied(b)))
      }
      (PolynomialNode::Float(a), PolynomialNode::Float(b)) => {
        Some(PolynomialNode::Float(a.multiplied(b)))
      }
      (PolynomialNode::Fraction(a), PolynomialNode::Fraction(b)) => {
        Some(PolynomialNode::Fraction(a.multiplied(b)))
      }
      _ => None,
    }
  }

  pub fn power(&self, exponent: i64) -> Self {
    map_polynomial!(self, |p| p.power(exponent))
  }
}

impl Hash for PolynomialNode {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.kind().hash(state);
    with_polynomial!(self, |p| {
      for (power, coef) in p.terms() {
        power.hash(state);
        coef.clone().into_dynamic().hash(state);
      }
    })
  }
}

impl fmt::Display for PolynomialNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    with_polynomial!(self, |p| write!(f, "{p}"))
  }
}

impl From<Polynomial<f64>> for PolynomialNode {
  fn from(poly: Polynomial<f64>) -> Self {
    PolynomialNode::Double(poly)
  }
}

impl From<Polynomial<f32>> for PolynomialNode {
  fn from(poly: Polynomial<f32>) -> Self {
    PolynomialNode::Float(poly)
  }
}

impl From<Polynomial<Fraction>> for PolynomialNode {
  fn from(poly: Polynomial<Fraction>) -> Self {
    PolynomialNode::Fraction(poly)
  }
}
