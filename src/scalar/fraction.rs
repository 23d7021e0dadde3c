use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use super::{DynamicScalar, Scalar, ScalarKind};
use crate::ParseError;
use crate::functions::number_theory::{gcd, lcm};

/// Largest exponent applied by repeated multiplication. Bigger exponents
/// fall back to the double projection.
const EXACT_POWER_LIMIT: i64 = 4096;

/// Exact signed rational over arbitrary-precision integers.
///
/// Sums are stored unreduced; [`Fraction::simplified`] divides both terms
/// by their GCD. Equality and hashing are value based, so an unreduced
/// fraction still compares equal to its reduced form.
#[derive(Clone, Debug)]
pub enum Fraction {
  /// `denominator` is never zero and zero is never negative.
  Finite {
    negative: bool,
    numerator: BigUint,
    denominator: BigUint,
  },
  Infinite {
    negative: bool,
  },
  NaN,
}

impl Fraction {
  /// Builds `numerator / denominator`. A zero denominator gives infinity,
  /// or nan when the numerator is zero as well.
  pub fn new(numerator: BigInt, denominator: BigInt) -> Self {
    let negative = (numerator.sign() == Sign::Minus)
      != (denominator.sign() == Sign::Minus);
    Fraction::from_parts(
      negative,
      numerator.magnitude().clone(),
      denominator.magnitude().clone(),
    )
  }

  pub fn from_parts(
    negative: bool,
    numerator: BigUint,
    denominator: BigUint,
  ) -> Self {
    if denominator.is_zero() {
      return if numerator.is_zero() {
        Fraction::NaN
      } else {
        Fraction::Infinite { negative }
      };
    }
    Fraction::Finite {
      negative: negative && !numerator.is_zero(),
      numerator,
      denominator,
    }
  }

  pub fn from_integer(value: i64) -> Self {
    Fraction::new(BigInt::from(value), BigInt::one())
  }

  pub fn is_finite(&self) -> bool {
    matches!(self, Fraction::Finite { .. })
  }

  /// Numerator and denominator reduced by their GCD.
  pub fn simplified(&self) -> Self {
    match self {
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => {
        let divisor = gcd(numerator, denominator);
        if divisor.is_one() || divisor.is_zero() {
          return self.clone();
        }
        Fraction::from_parts(
          *negative,
          numerator / &divisor,
          denominator / &divisor,
        )
      }
      other => other.clone(),
    }
  }

  /// The signed numerator, or `None` for infinities and nan.
  pub fn signed_numerator(&self) -> Option<BigInt> {
    match self {
      Fraction::Finite {
        negative,
        numerator,
        ..
      } => Some(signed(*negative, numerator)),
      _ => None,
    }
  }

  pub fn denominator(&self) -> Option<&BigUint> {
    match self {
      Fraction::Finite { denominator, .. } => Some(denominator),
      _ => None,
    }
  }

  pub fn reciprocal(&self) -> Self {
    match self {
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => {
        Fraction::from_parts(*negative, denominator.clone(), numerator.clone())
      }
      Fraction::Infinite { .. } => Fraction::zero(),
      Fraction::NaN => Fraction::NaN,
    }
  }

  /// Rounds toward zero.
  pub fn trunc(&self) -> Self {
    match self {
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => {
        Fraction::from_parts(*negative, numerator / denominator, BigUint::one())
      }
      other => other.clone(),
    }
  }

  /// Floor of the value together with the non-negative remainder over the
  /// same denominator.
  fn floor_parts(&self) -> Option<(BigInt, BigInt, BigInt)> {
    match self {
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => {
        let denominator = BigInt::from(denominator.clone());
        let (whole, remainder) =
          signed(*negative, numerator).div_mod_floor(&denominator);
        Some((whole, remainder, denominator))
      }
      _ => None,
    }
  }
}

fn signed(negative: bool, magnitude: &BigUint) -> BigInt {
  let sign = if negative { Sign::Minus } else { Sign::Plus };
  BigInt::from_biguint(sign, magnitude.clone())
}

/// Scales an integer down so it fits an `f64` alongside a partner value.
fn to_f64_ratio(numerator: &BigUint, denominator: &BigUint) -> f64 {
  let bits = numerator.bits().max(denominator.bits());
  let shift = bits.saturating_sub(1000);
  let n = (numerator >> shift).to_f64().unwrap_or(f64::INFINITY);
  let d = (denominator >> shift).to_f64().unwrap_or(f64::INFINITY);
  if d == 0.0 {
    // The denominator vanished in the shift, so the value is huge.
    f64::INFINITY
  } else {
    n / d
  }
}

impl Scalar for Fraction {
  const KIND: ScalarKind = ScalarKind::Fraction;
  const FACTORIAL_LIMIT: i64 = 1000;

  fn zero() -> Self {
    Fraction::from_parts(false, BigUint::zero(), BigUint::one())
  }

  fn one() -> Self {
    Fraction::from_parts(false, BigUint::one(), BigUint::one())
  }

  fn min_value() -> Self {
    Fraction::from_integer(-i64::MAX)
  }

  fn max_value() -> Self {
    Fraction::from_integer(i64::MAX)
  }

  fn infinity() -> Self {
    Fraction::Infinite { negative: false }
  }

  fn nan() -> Self {
    Fraction::NaN
  }

  /// Decodes the IEEE significand and exponent, then reduces.
  fn from_f64(value: f64) -> Self {
    if value.is_nan() {
      return Fraction::NaN;
    }
    if value.is_infinite() {
      return Fraction::Infinite {
        negative: value < 0.0,
      };
    }
    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    let mantissa = bits & 0x000f_ffff_ffff_ffff;
    let (significand, exponent) = if exponent == 0 {
      (mantissa, -1074)
    } else {
      (mantissa | (1 << 52), exponent - 1075)
    };
    let significand = BigUint::from(significand);
    let fraction = if exponent >= 0 {
      Fraction::from_parts(negative, significand << exponent, BigUint::one())
    } else {
      Fraction::from_parts(
        negative,
        significand,
        BigUint::one() << (-exponent) as u64,
      )
    };
    fraction.simplified()
  }

  fn from_i64(value: i64) -> Self {
    Fraction::from_integer(value)
  }

  fn to_f64(&self) -> f64 {
    match self {
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => {
        let magnitude = to_f64_ratio(numerator, denominator);
        if *negative { -magnitude } else { magnitude }
      }
      Fraction::Infinite { negative: true } => f64::NEG_INFINITY,
      Fraction::Infinite { negative: false } => f64::INFINITY,
      Fraction::NaN => f64::NAN,
    }
  }

  fn is_nan(&self) -> bool {
    matches!(self, Fraction::NaN)
  }

  fn is_whole(&self) -> bool {
    match self {
      Fraction::Finite {
        numerator,
        denominator,
        ..
      } => (numerator % denominator).is_zero(),
      _ => false,
    }
  }

  fn is_negative(&self) -> bool {
    match self {
      Fraction::Finite { negative, .. } | Fraction::Infinite { negative } => {
        *negative
      }
      Fraction::NaN => false,
    }
  }

  fn abs(&self) -> Self {
    match self {
      Fraction::Finite {
        numerator,
        denominator,
        ..
      } => Fraction::from_parts(false, numerator.clone(), denominator.clone()),
      Fraction::Infinite { .. } => Fraction::infinity(),
      Fraction::NaN => Fraction::NaN,
    }
  }

  fn pow(&self, exponent: &Self) -> Self {
    if exponent.is_whole()
      && let Some(n) = exponent.trunc().signed_numerator()
      && let Some(n) = n.to_i64()
      && n.abs() <= EXACT_POWER_LIMIT
    {
      return self.powi(n);
    }
    Fraction::from_f64(f64::powf(self.to_f64(), exponent.to_f64()))
  }

  fn modulo(&self, modulus: &Self) -> Self {
    match (self, modulus) {
      (Fraction::NaN, _) | (_, Fraction::NaN) => Fraction::NaN,
      (Fraction::Infinite { .. }, _) => Fraction::NaN,
      (_, Fraction::Infinite { .. }) => self.clone(),
      _ if modulus.is_zero() => Fraction::NaN,
      _ => {
        let quotient = (self.clone() / modulus.clone()).trunc();
        (self.clone() - modulus.clone() * quotient).simplified()
      }
    }
  }

  fn into_dynamic(self) -> DynamicScalar {
    DynamicScalar::Fraction(self)
  }

  fn from_dynamic(value: &DynamicScalar) -> Option<Self> {
    match value {
      DynamicScalar::Fraction(f) => Some(f.clone()),
      _ => None,
    }
  }
}

impl Add for Fraction {
  type Output = Fraction;

  /// Scales both sides to the least common denominator and leaves the sum
  /// unreduced.
  fn add(self, rhs: Fraction) -> Fraction {
    match (self, rhs) {
      (Fraction::NaN, _) | (_, Fraction::NaN) => Fraction::NaN,
      (
        Fraction::Infinite { negative: a },
        Fraction::Infinite { negative: b },
      ) => {
        if a == b {
          Fraction::Infinite { negative: a }
        } else {
          Fraction::NaN
        }
      }
      (inf @ Fraction::Infinite { .. }, _)
      | (_, inf @ Fraction::Infinite { .. }) => inf,
      (
        Fraction::Finite {
          negative: ln,
          numerator: lnum,
          denominator: lden,
        },
        Fraction::Finite {
          negative: rn,
          numerator: rnum,
          denominator: rden,
        },
      ) => {
        let common = lcm(&lden, &rden);
        let left = signed(ln, &(lnum * (&common / &lden)));
        let right = signed(rn, &(rnum * (&common / &rden)));
        Fraction::new(left + right, BigInt::from(common))
      }
    }
  }
}

impl Neg for Fraction {
  type Output = Fraction;

  fn neg(self) -> Fraction {
    match self {
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => Fraction::from_parts(!negative, numerator, denominator),
      Fraction::Infinite { negative } => Fraction::Infinite {
        negative: !negative,
      },
      Fraction::NaN => Fraction::NaN,
    }
  }
}

impl Sub for Fraction {
  type Output = Fraction;

  fn sub(self, rhs: Fraction) -> Fraction {
    self + (-rhs)
  }
}

impl Mul for Fraction {
  type Output = Fraction;

  fn mul(self, rhs: Fraction) -> Fraction {
    match (self, rhs) {
      (Fraction::NaN, _) | (_, Fraction::NaN) => Fraction::NaN,
      (
        Fraction::Finite {
          negative: ln,
          numerator: lnum,
          denominator: lden,
        },
        Fraction::Finite {
          negative: rn,
          numerator: rnum,
          denominator: rden,
        },
      ) => {
        Fraction::from_parts(ln != rn, lnum * rnum, lden * rden).simplified()
      }
      (left, right) => {
        if left.is_zero() || right.is_zero() {
          Fraction::NaN
        } else {
          Fraction::Infinite {
            negative: left.is_negative() != right.is_negative(),
          }
        }
      }
    }
  }
}

impl Div for Fraction {
  type Output = Fraction;

  fn div(self, rhs: Fraction) -> Fraction {
    if matches!(
      (&self, &rhs),
      (Fraction::Infinite { .. }, Fraction::Infinite { .. })
    ) {
      return Fraction::NaN;
    }
    self * rhs.reciprocal()
  }
}

impl PartialEq for Fraction {
  fn eq(&self, other: &Fraction) -> bool {
    match (self, other) {
      (
        Fraction::Finite {
          negative: ln,
          numerator: lnum,
          denominator: lden,
        },
        Fraction::Finite {
          negative: rn,
          numerator: rnum,
          denominator: rden,
        },
      ) => ln == rn && lnum * rden == rnum * lden,
      (
        Fraction::Infinite { negative: a },
        Fraction::Infinite { negative: b },
      ) => a == b,
      _ => false,
    }
  }
}

impl PartialOrd for Fraction {
  /// Whole parts first, then the remainders by cross-multiplication.
  fn partial_cmp(&self, other: &Fraction) -> Option<Ordering> {
    match (self, other) {
      (Fraction::NaN, _) | (_, Fraction::NaN) => None,
      (
        Fraction::Infinite { negative: a },
        Fraction::Infinite { negative: b },
      ) => Some(b.cmp(a)),
      (Fraction::Infinite { negative }, _) => Some(if *negative {
        Ordering::Less
      } else {
        Ordering::Greater
      }),
      (_, Fraction::Infinite { negative }) => Some(if *negative {
        Ordering::Greater
      } else {
        Ordering::Less
      }),
      _ => {
        let (lwhole, lrem, lden) = self.floor_parts()?;
        let (rwhole, rrem, rden) = other.floor_parts()?;
        Some(
          lwhole
            .cmp(&rwhole)
            .then_with(|| (lrem * rden).cmp(&(rrem * lden))),
        )
      }
    }
  }
}

impl Hash for Fraction {
  fn hash<H: Hasher>(&self, state: &mut H) {
    match self.simplified() {
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => {
        0u8.hash(state);
        negative.hash(state);
        numerator.hash(state);
        denominator.hash(state);
      }
      Fraction::Infinite { negative } => {
        1u8.hash(state);
        negative.hash(state);
      }
      Fraction::NaN => 2u8.hash(state),
    }
  }
}

impl fmt::Display for Fraction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.simplified() {
      Fraction::NaN => write!(f, "nan"),
      Fraction::Infinite { negative: true } => write!(f, "-inf"),
      Fraction::Infinite { negative: false } => write!(f, "inf"),
      Fraction::Finite {
        negative,
        numerator,
        denominator,
      } => {
        let sign = if negative { "-" } else { "" };
        if denominator.is_one() {
          write!(f, "{sign}{numerator}")
        } else {
          write!(f, "{sign}{numerator}/{denominator}")
        }
      }
    }
  }
}

fn parse_digits(digits: &str, literal: &str) -> Result<BigUint, ParseError> {
  if digits.is_empty() {
    return Ok(BigUint::zero());
  }
  if !digits.bytes().all(|b| b.is_ascii_digit()) {
    return Err(ParseError::InvalidLiteral {
      literal: literal.to_string(),
    });
  }
  BigUint::from_str(digits).map_err(|_| ParseError::InvalidLiteral {
    literal: literal.to_string(),
  })
}

impl FromStr for Fraction {
  type Err = ParseError;

  /// Accepts `a`, `a/b`, `a.b`, `.b` and `a.`, optionally signed.
  fn from_str(literal: &str) -> Result<Self, Self::Err> {
    let invalid = || ParseError::InvalidLiteral {
      literal: literal.to_string(),
    };
    let (negative, body) = match literal.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, literal),
    };
    if body.is_empty() || body == "." {
      return Err(invalid());
    }

    if let Some((numerator, denominator)) = body.split_once('/') {
      if numerator.is_empty() || denominator.is_empty() {
        return Err(invalid());
      }
      let numerator = parse_digits(numerator, literal)?;
      let denominator = parse_digits(denominator, literal)?;
      return Ok(Fraction::from_parts(negative, numerator, denominator));
    }

    if let Some((whole, decimals)) = body.split_once('.') {
      let scale = BigUint::from(10u32).pow(decimals.len() as u32);
      let numerator = parse_digits(whole, literal)? * &scale
        + parse_digits(decimals, literal)?;
      return Ok(Fraction::from_parts(negative, numerator, scale));
    }

    Ok(Fraction::from_parts(
      negative,
      parse_digits(body, literal)?,
      BigUint::one(),
    ))
  }
}
