//! The numeric tower every expression is parameterized over.
//!
//! Three concrete representations exist: `f64`, `f32` and the exact
//! [`Fraction`]. All of them implement [`Scalar`]; [`DynamicScalar`] erases
//! which one a value holds so that nodes of different kinds can meet.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

pub mod dynamic;
pub mod float;
pub mod fraction;

pub use dynamic::DynamicScalar;
pub use fraction::Fraction;

/// Which concrete representation a value or node uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalarKind {
  #[default]
  Double,
  Float,
  Fraction,
}

impl ScalarKind {
  /// Rank used to pick a common kind. Higher wins.
  ///
  /// An exact operand keeps the result exact only when the other operand
  /// is exact too; any floating operand pulls the result to the wider of
  /// the floating kinds involved.
  pub const fn priority(self) -> u8 {
    match self {
      ScalarKind::Fraction => 0,
      ScalarKind::Float => 1,
      ScalarKind::Double => 2,
    }
  }

  pub fn combining(self, other: ScalarKind) -> ScalarKind {
    if other.priority() > self.priority() {
      other
    } else {
      self
    }
  }

  pub fn is_exact(self) -> bool {
    self == ScalarKind::Fraction
  }
}

impl Display for ScalarKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      ScalarKind::Double => "double",
      ScalarKind::Float => "float",
      ScalarKind::Fraction => "fraction",
    };
    f.write_str(name)
  }
}

/// Arithmetic contract shared by every concrete scalar.
///
/// Operations that cannot be computed exactly (roots, logarithms,
/// non-integer powers) go through the `f64` projection, so a `Fraction`
/// result of `sqrt` is only as precise as a double.
pub trait Scalar:
  Clone
  + Debug
  + Display
  + PartialEq
  + PartialOrd
  + Add<Output = Self>
  + Sub<Output = Self>
  + Mul<Output = Self>
  + Div<Output = Self>
  + Neg<Output = Self>
{
  const KIND: ScalarKind;

  /// Largest `n` whose factorial is still representable.
  const FACTORIAL_LIMIT: i64;

  fn zero() -> Self;
  fn one() -> Self;
  fn min_value() -> Self;
  fn max_value() -> Self;
  fn infinity() -> Self;
  fn nan() -> Self;

  fn from_f64(value: f64) -> Self;
  fn from_i64(value: i64) -> Self;
  fn to_f64(&self) -> f64;

  fn is_nan(&self) -> bool;
  fn is_whole(&self) -> bool;
  fn is_negative(&self) -> bool;

  fn is_zero(&self) -> bool {
    *self == Self::zero()
  }

  fn abs(&self) -> Self {
    if self.is_negative() {
      -self.clone()
    } else {
      self.clone()
    }
  }

  /// Square-and-multiply; a negative exponent takes the reciprocal.
  fn powi(&self, exponent: i64) -> Self {
    let mut base = self.clone();
    let mut remaining = exponent.unsigned_abs();
    let mut acc = Self::one();
    while remaining > 0 {
      if remaining & 1 == 1 {
        acc = acc * base.clone();
      }
      remaining >>= 1;
      if remaining > 0 {
        base = base.clone() * base;
      }
    }
    if exponent < 0 { Self::one() / acc } else { acc }
  }

  fn pow(&self, exponent: &Self) -> Self {
    Self::from_f64(f64::powf(self.to_f64(), exponent.to_f64()))
  }

  /// Logarithm of `self` to the given base.
  fn logx(&self, base: &Self) -> Self {
    Self::from_f64(f64::ln(self.to_f64()) / f64::ln(base.to_f64()))
  }

  /// Truncated remainder: the sign follows the dividend.
  fn modulo(&self, modulus: &Self) -> Self;

  fn sqrt(&self) -> Self {
    Self::from_f64(f64::sqrt(self.to_f64()))
  }

  fn ln(&self) -> Self {
    Self::from_f64(f64::ln(self.to_f64()))
  }

  fn log2(&self) -> Self {
    Self::from_f64(f64::log2(self.to_f64()))
  }

  fn log10(&self) -> Self {
    Self::from_f64(f64::log10(self.to_f64()))
  }

  /// `n!` for whole, non-negative `n`. Anything else is nan, and results
  /// past [`Scalar::FACTORIAL_LIMIT`] are infinity.
  fn factorial(&self) -> Self {
    if self.is_nan() || !self.is_whole() || self.is_negative() {
      return Self::nan();
    }
    if *self > Self::from_i64(Self::FACTORIAL_LIMIT) {
      return Self::infinity();
    }
    let mut acc = Self::one();
    let mut factor = Self::from_i64(2);
    while factor <= *self {
      acc = acc * factor.clone();
      factor = factor + Self::one();
    }
    acc
  }

  fn into_dynamic(self) -> DynamicScalar;

  /// Unwraps a dynamic value holding exactly this kind.
  fn from_dynamic(value: &DynamicScalar) -> Option<Self>;
}
