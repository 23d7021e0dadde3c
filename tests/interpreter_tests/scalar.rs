use super::*;
use symcalc::{BinaryOperator, Expr, Scalar};

mod kinds {
  use super::*;

  #[test]
  fn combining_prefers_the_floating_side() {
    let (exact, single, double) =
      (ScalarKind::Fraction, ScalarKind::Float, ScalarKind::Double);
    assert_eq!(exact.combining(exact), exact);
    assert_eq!(exact.combining(single), single);
    assert_eq!(single.combining(exact), single);
    assert_eq!(exact.combining(double), double);
    assert_eq!(single.combining(double), double);
    assert!(exact.is_exact());
    assert!(!double.is_exact());
  }

  #[test]
  fn mixed_arithmetic_lands_in_the_combined_kind() {
    let half = DynamicScalar::Fraction("1/2".parse().unwrap());
    assert_eq!(
      half.clone() + DynamicScalar::Double(1.0),
      DynamicScalar::Double(1.5)
    );
    assert_eq!(
      half.clone() * DynamicScalar::Float(4.0),
      DynamicScalar::Float(2.0)
    );
    assert_eq!((half.clone() + half).kind(), ScalarKind::Fraction);
  }

  #[test]
  fn equality_is_kind_strict() {
    let double = DynamicScalar::Double(2.0);
    let fraction = DynamicScalar::Fraction(Fraction::from_integer(2));
    assert_ne!(double, fraction);
    assert!(double <= fraction && double >= fraction);
    assert_ne!(Expr::constant(2.0), Expr::constant(Fraction::from_integer(2)));
  }

  #[test]
  fn descriptors_carry_the_combined_kind() {
    let sum = |left: Expr| {
      Expr::binary(BinaryOperator::Sum, left, Expr::constant(2.0))
    };
    let mixed = sum(Expr::constant(Fraction::from_integer(1)));
    let floating = sum(Expr::constant(1.0));
    assert_eq!(mixed.descriptor().kind(), ScalarKind::Double);
    assert_eq!(mixed.kind(), ScalarKind::Double);
    assert_ne!(mixed.descriptor(), floating.descriptor());
    assert_ne!(mixed, floating);
  }
}

mod fractions {
  use super::*;

  fn frac(text: &str) -> Fraction {
    text.parse().unwrap()
  }

  #[test]
  fn literals() {
    assert_eq!(frac("0.75"), frac("3/4"));
    assert_eq!(frac("-6/8").to_string(), "-3/4");
    assert_eq!(frac(".5").to_string(), "1/2");
    assert_eq!(frac("7.").to_string(), "7");
    assert!("1.2.3".parse::<Fraction>().is_err());
    assert_eq!(
      "1/".parse::<Fraction>(),
      Err(ParseError::InvalidLiteral {
        literal: "1/".to_string()
      })
    );
  }

  #[test]
  fn arithmetic_is_exact() {
    assert_eq!(frac("1/3") + frac("1/6"), frac("1/2"));
    assert_eq!(frac("0.1") + frac("0.2"), frac("0.3"));
    assert_eq!(frac("2/3") * frac("3/4"), frac("1/2"));
    assert_eq!(frac("1/2") / frac("1/4"), frac("2"));
    assert_eq!(frac("1/2") - frac("3/4"), frac("-1/4"));
  }

  #[test]
  fn zero_denominators() {
    assert_eq!(frac("1/0").to_string(), "inf");
    assert_eq!((-frac("1/0")).to_string(), "-inf");
    assert!(Scalar::is_nan(&frac("0/0")));
    assert!(Scalar::is_nan(&(frac("1/0") - frac("1/0"))));
    assert!(Scalar::is_nan(&(frac("1/0") * frac("0"))));
  }

  #[test]
  fn ordering() {
    assert!(frac("1/3") < frac("1/2"));
    assert!(frac("-1/2") < frac("-1/3"));
    assert!(frac("7/2") > frac("3"));
    assert!(frac("-1/0") < frac("-1000000"));
    assert_eq!(frac("0/0").partial_cmp(&frac("1")), None);
  }

  #[test]
  fn conversions() {
    assert_eq!(Fraction::from_f64(0.375), frac("3/8"));
    assert_eq!(frac("3/8").to_f64(), 0.375);
    assert_eq!(Fraction::from_f64(f64::INFINITY), frac("1/0"));
  }
}

mod factorial {
  use super::*;

  #[test]
  fn domain() {
    assert!(DynamicScalar::Double(4.5).factorial().is_nan());
    assert!(DynamicScalar::Double(-1.0).factorial().is_nan());
    assert_eq!(
      DynamicScalar::Double(5.0).factorial(),
      DynamicScalar::Double(120.0)
    );
  }

  #[test]
  fn limits_per_kind() {
    assert_eq!(
      DynamicScalar::Float(35.0).factorial(),
      DynamicScalar::Float(f32::INFINITY)
    );
    assert_eq!(
      DynamicScalar::Double(172.0).factorial(),
      DynamicScalar::Double(f64::INFINITY)
    );
    let exact = DynamicScalar::Fraction(Fraction::from_integer(25));
    assert_eq!(
      exact.factorial().to_string(),
      "15511210043330985984000000"
    );
  }
}
