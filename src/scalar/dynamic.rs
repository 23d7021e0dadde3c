use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{Fraction, Scalar, ScalarKind};

/// A scalar whose concrete kind is only known at runtime.
#[derive(Clone, Debug)]
pub enum DynamicScalar {
  Double(f64),
  Float(f32),
  Fraction(Fraction),
}

/// Applies a `Scalar` expression to whatever kind `$value` holds.
macro_rules! map_scalar {
  ($value:expr, |$a:ident| $body:expr) => {
    match $value {
      DynamicScalar::Double($a) => DynamicScalar::Double($body),
      DynamicScalar::Float($a) => DynamicScalar::Float($body),
      DynamicScalar::Fraction($a) => DynamicScalar::Fraction($body),
    }
  };
}

/// Promotes both operands to their common kind, then applies `$body`.
macro_rules! zip_scalars {
  ($lhs:expr, $rhs:expr, |$a:ident, $b:ident| $body:expr) => {
    match DynamicScalar::unify($lhs, $rhs) {
      (DynamicScalar::Double($a), DynamicScalar::Double($b)) => {
        DynamicScalar::Double($body)
      }
      (DynamicScalar::Float($a), DynamicScalar::Float($b)) => {
        DynamicScalar::Float($body)
      }
      (DynamicScalar::Fraction($a), DynamicScalar::Fraction($b)) => {
        DynamicScalar::Fraction($body)
      }
      (l, r) => unreachable!("unify left {} and {}", l.kind(), r.kind()),
    }
  };
}

impl DynamicScalar {
  pub fn kind(&self) -> ScalarKind {
    match self {
      DynamicScalar::Double(_) => ScalarKind::Double,
      DynamicScalar::Float(_) => ScalarKind::Float,
      DynamicScalar::Fraction(_) => ScalarKind::Fraction,
    }
  }

  pub fn zero(kind: ScalarKind) -> Self {
    match kind {
      ScalarKind::Double => DynamicScalar::Double(0.0),
      ScalarKind::Float => DynamicScalar::Float(0.0),
      ScalarKind::Fraction => DynamicScalar::Fraction(Fraction::zero()),
    }
  }

  pub fn one(kind: ScalarKind) -> Self {
    match kind {
      ScalarKind::Double => DynamicScalar::Double(1.0),
      ScalarKind::Float => DynamicScalar::Float(1.0),
      ScalarKind::Fraction => DynamicScalar::Fraction(Fraction::one()),
    }
  }

  pub fn infinity(kind: ScalarKind) -> Self {
    DynamicScalar::from_f64(kind, f64::INFINITY)
  }

  pub fn nan(kind: ScalarKind) -> Self {
    DynamicScalar::from_f64(kind, f64::NAN)
  }

  pub fn min_value(kind: ScalarKind) -> Self {
    match kind {
      ScalarKind::Double => DynamicScalar::Double(f64::MIN),
      ScalarKind::Float => DynamicScalar::Float(f32::MIN),
      ScalarKind::Fraction => DynamicScalar::Fraction(Fraction::min_value()),
    }
  }

  pub fn max_value(kind: ScalarKind) -> Self {
    match kind {
      ScalarKind::Double => DynamicScalar::Double(f64::MAX),
      ScalarKind::Float => DynamicScalar::Float(f32::MAX),
      ScalarKind::Fraction => DynamicScalar::Fraction(Fraction::max_value()),
    }
  }

  pub fn from_f64(kind: ScalarKind, value: f64) -> Self {
    match kind {
      ScalarKind::Double => DynamicScalar::Double(value),
      ScalarKind::Float => DynamicScalar::Float(value as f32),
      ScalarKind::Fraction => {
        DynamicScalar::Fraction(Fraction::from_f64(value))
      }
    }
  }

  pub fn to_f64(&self) -> f64 {
    match self {
      DynamicScalar::Double(v) => *v,
      DynamicScalar::Float(v) => *v as f64,
      DynamicScalar::Fraction(f) => f.to_f64(),
    }
  }

  /// Converts to `kind`. Floats move to fractions through their exact
  /// binary value.
  pub fn promote(self, kind: ScalarKind) -> Self {
    if self.kind() == kind {
      return self;
    }
    match (self, kind) {
      (DynamicScalar::Float(v), ScalarKind::Double) => {
        DynamicScalar::Double(v as f64)
      }
      (DynamicScalar::Fraction(f), ScalarKind::Double) => {
        DynamicScalar::Double(f.to_f64())
      }
      (DynamicScalar::Double(v), ScalarKind::Float) => {
        DynamicScalar::Float(v as f32)
      }
      (DynamicScalar::Fraction(f), ScalarKind::Float) => {
        DynamicScalar::Float(f.to_f64() as f32)
      }
      (value, ScalarKind::Fraction) => {
        DynamicScalar::Fraction(Fraction::from_f64(value.to_f64()))
      }
      (value, _) => value,
    }
  }

  /// Both operands in their common kind.
  pub fn unify(lhs: Self, rhs: Self) -> (Self, Self) {
    let kind = lhs.kind().combining(rhs.kind());
    (lhs.promote(kind), rhs.promote(kind))
  }

  pub fn is_nan(&self) -> bool {
    match self {
      DynamicScalar::Double(v) => v.is_nan(),
      DynamicScalar::Float(v) => v.is_nan(),
      DynamicScalar::Fraction(f) => Scalar::is_nan(f),
    }
  }

  pub fn is_zero(&self) -> bool {
    match self {
      DynamicScalar::Double(v) => *v == 0.0,
      DynamicScalar::Float(v) => *v == 0.0,
      DynamicScalar::Fraction(f) => Scalar::is_zero(f),
    }
  }

  pub fn is_one(&self) -> bool {
    *self == DynamicScalar::one(self.kind())
  }

  pub fn is_whole(&self) -> bool {
    match self {
      DynamicScalar::Double(v) => Scalar::is_whole(v),
      DynamicScalar::Float(v) => Scalar::is_whole(v),
      DynamicScalar::Fraction(f) => Scalar::is_whole(f),
    }
  }

  pub fn is_negative(&self) -> bool {
    match self {
      DynamicScalar::Double(v) => Scalar::is_negative(v),
      DynamicScalar::Float(v) => Scalar::is_negative(v),
      DynamicScalar::Fraction(f) => Scalar::is_negative(f),
    }
  }

  /// The value as an `i64` when it is whole and in range.
  pub fn to_whole(&self) -> Option<i64> {
    if !self.is_whole() {
      return None;
    }
    let value = self.to_f64();
    if value.abs() < i64::MAX as f64 {
      Some(value as i64)
    } else {
      None
    }
  }

  pub fn abs(&self) -> Self {
    map_scalar!(self, |v| Scalar::abs(v))
  }

  pub fn sqrt(&self) -> Self {
    map_scalar!(self, |v| Scalar::sqrt(v))
  }

  pub fn ln(&self) -> Self {
    map_scalar!(self, |v| Scalar::ln(v))
  }

  pub fn log2(&self) -> Self {
    map_scalar!(self, |v| Scalar::log2(v))
  }

  pub fn log10(&self) -> Self {
    map_scalar!(self, |v| Scalar::log10(v))
  }

  pub fn factorial(&self) -> Self {
    map_scalar!(self, |v| Scalar::factorial(v))
  }

  pub fn pow(&self, exponent: &DynamicScalar) -> Self {
    zip_scalars!(self.clone(), exponent.clone(), |a, b| Scalar::pow(&a, &b))
  }

  /// Logarithm of `self` to `base`.
  pub fn logx(&self, base: &DynamicScalar) -> Self {
    zip_scalars!(self.clone(), base.clone(), |a, b| Scalar::logx(&a, &b))
  }

  pub fn modulo(&self, modulus: &DynamicScalar) -> Self {
    zip_scalars!(self.clone(), modulus.clone(), |a, b| Scalar::modulo(&a, &b))
  }

  pub fn min(self, other: DynamicScalar) -> Self {
    match self.partial_cmp(&other) {
      Some(Ordering::Greater) => other.promote(self.kind()),
      _ => self,
    }
  }

  pub fn max(self, other: DynamicScalar) -> Self {
    match self.partial_cmp(&other) {
      Some(Ordering::Less) => other.promote(self.kind()),
      _ => self,
    }
  }
}

macro_rules! dynamic_binary_op {
  ($trait:ident, $method:ident) => {
    impl $trait for DynamicScalar {
      type Output = DynamicScalar;

      fn $method(self, rhs: DynamicScalar) -> DynamicScalar {
        zip_scalars!(self, rhs, |a, b| $trait::$method(a, b))
      }
    }
  };
}

dynamic_binary_op!(Add, add);
dynamic_binary_op!(Sub, sub);
dynamic_binary_op!(Mul, mul);
dynamic_binary_op!(Div, div);

impl Neg for DynamicScalar {
  type Output = DynamicScalar;

  fn neg(self) -> DynamicScalar {
    map_scalar!(self, |v| -v)
  }
}

impl PartialEq for DynamicScalar {
  /// Values of different kinds never compare equal.
  fn eq(&self, other: &DynamicScalar) -> bool {
    match (self, other) {
      (DynamicScalar::Double(a), DynamicScalar::Double(b)) => a == b,
      (DynamicScalar::Float(a), DynamicScalar::Float(b)) => a == b,
      (DynamicScalar::Fraction(a), DynamicScalar::Fraction(b)) => a == b,
      _ => false,
    }
  }
}

impl PartialOrd for DynamicScalar {
  fn partial_cmp(&self, other: &DynamicScalar) -> Option<Ordering> {
    match DynamicScalar::unify(self.clone(), other.clone()) {
      (DynamicScalar::Double(a), DynamicScalar::Double(b)) => a.partial_cmp(&b),
      (DynamicScalar::Float(a), DynamicScalar::Float(b)) => a.partial_cmp(&b),
      (DynamicScalar::Fraction(a), DynamicScalar::Fraction(b)) => {
        a.partial_cmp(&b)
      }
      _ => None,
    }
  }
}

impl Hash for DynamicScalar {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.kind().hash(state);
    match self {
      // -0.0 == 0.0, so both must hash alike.
      DynamicScalar::Double(v) => (v + 0.0).to_bits().hash(state),
      DynamicScalar::Float(v) => (v + 0.0).to_bits().hash(state),
      DynamicScalar::Fraction(f) => f.hash(state),
    }
  }
}

impl fmt::Display for DynamicScalar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DynamicScalar::Double(v) => write!(f, "{v:?}"),
      DynamicScalar::Float(v) => write!(f, "{v:?}"),
      DynamicScalar::Fraction(v) => write!(f, "{v}"),
    }
  }
}

impl From<f64> for DynamicScalar {
  fn from(value: f64) -> Self {
    DynamicScalar::Double(value)
  }
}

impl From<f32> for DynamicScalar {
  fn from(value: f32) -> Self {
    DynamicScalar::Float(value)
  }
}

impl From<Fraction> for DynamicScalar {
  fn from(value: Fraction) -> Self {
    DynamicScalar::Fraction(value)
  }
}
