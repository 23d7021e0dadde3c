use super::{DynamicScalar, Scalar, ScalarKind};

macro_rules! impl_float_scalar {
  ($ty:ident, $kind:ident, $limit:expr) => {
    impl Scalar for $ty {
      const KIND: ScalarKind = ScalarKind::$kind;
      const FACTORIAL_LIMIT: i64 = $limit;

      fn zero() -> Self {
        0.0
      }

      fn one() -> Self {
        1.0
      }

      fn min_value() -> Self {
        $ty::MIN
      }

      fn max_value() -> Self {
        $ty::MAX
      }

      fn infinity() -> Self {
        $ty::INFINITY
      }

      fn nan() -> Self {
        $ty::NAN
      }

      fn from_f64(value: f64) -> Self {
        value as $ty
      }

      fn from_i64(value: i64) -> Self {
        value as $ty
      }

      fn to_f64(&self) -> f64 {
        *self as f64
      }

      fn is_nan(&self) -> bool {
        $ty::is_nan(*self)
      }

      fn is_whole(&self) -> bool {
        $ty::is_finite(*self) && $ty::fract(*self) == 0.0
      }

      fn is_negative(&self) -> bool {
        *self < 0.0
      }

      fn abs(&self) -> Self {
        $ty::abs(*self)
      }

      fn powi(&self, exponent: i64) -> Self {
        $ty::powf(*self, exponent as $ty)
      }

      fn pow(&self, exponent: &Self) -> Self {
        $ty::powf(*self, *exponent)
      }

      fn logx(&self, base: &Self) -> Self {
        $ty::ln(*self) / $ty::ln(*base)
      }

      fn modulo(&self, modulus: &Self) -> Self {
        *self % *modulus
      }

      fn sqrt(&self) -> Self {
        $ty::sqrt(*self)
      }

      fn ln(&self) -> Self {
        $ty::ln(*self)
      }

      fn log2(&self) -> Self {
        $ty::log2(*self)
      }

      fn log10(&self) -> Self {
        $ty::log10(*self)
      }

      fn into_dynamic(self) -> DynamicScalar {
        DynamicScalar::$kind(self)
      }

      fn from_dynamic(value: &DynamicScalar) -> Option<Self> {
        match value {
          DynamicScalar::$kind(v) => Some(*v),
          _ => None,
        }
      }
    }
  };
}

impl_float_scalar!(f64, Double, 171);
impl_float_scalar!(f32, Float, 34);
