use super::*;
use symcalc::{Expr, UnaryOperator, simplify_to_fixed_point};

fn exact(input: &str) -> String {
  interpret(input, true).unwrap()
}

mod constants {
  use super::*;

  #[test]
  fn constant_subtrees_fold() {
    assert_eq!(exact("(1 + 2) * (3 - 1)"), "6");
    assert_eq!(interpret("1 - 1", false).unwrap(), "0.0");
  }

  #[test]
  fn nan_constants_reach_a_fixed_point() {
    assert_eq!(exact("0/0 + x"), "nan + 1x^1");
  }
}

mod long_inputs {
  use super::*;

  #[test]
  fn flat_sums_collapse() {
    let input = vec!["x"; 1000].join(" + ");
    assert_eq!(exact(&input), "1000x^1");
  }

  #[test]
  fn flat_sums_with_constants_settle() {
    let input = vec!["x"; 500].join(" + 1 + ");
    let expr = parse(&input, true).unwrap();
    let simplified = simplify_to_fixed_point(&expr);
    assert_eq!(simplified, expr.simplified());
    let two = DynamicScalar::Fraction(Fraction::from_integer(2));
    assert_eq!(simplified.evaluate(&two).unwrap().to_string(), "1499");
  }
}

mod identities {
  use super::*;

  #[test]
  fn additive_and_multiplicative() {
    assert_eq!(exact("x + 0"), "1x^1");
    assert_eq!(exact("0 + x"), "1x^1");
    assert_eq!(exact("x * 1"), "1x^1");
    assert_eq!(exact("0 * x"), "0");
    assert_eq!(exact("x / 1"), "1x^1");
    assert_eq!(exact("x / x"), "1");
  }

  #[test]
  fn powers() {
    assert_eq!(exact("x^1"), "1x^1");
    assert_eq!(exact("x^0"), "1");
    assert_eq!(exact("sqrt(x)^1"), "sqrt(1x^1)");
  }

  #[test]
  fn identities_need_matching_kinds() {
    let two = Expr::constant(Fraction::from_integer(2));
    let sum = Expr::constant(0.0).plus(&two);
    assert_eq!(sum.to_string(), "0.0 + 2");
    assert_eq!(simplify_to_fixed_point(&sum).to_string(), "2.0");
  }

  #[test]
  fn additive_inverse() {
    assert_eq!(exact("sqrt(x) - sqrt(x)"), "0");
    assert_eq!(exact("ln(x) + -ln(x)"), "0");
    assert_eq!(interpret("x - x", false).unwrap(), "0.0");
  }

  #[test]
  fn quotient_cancellation() {
    assert_eq!(exact("sqrt(x) / 2 * 2"), "sqrt(1x^1)");
    assert_eq!(exact("(sqrt(x) / ln(x)) * (ln(x) / sqrt(x))"), "1");
    assert_eq!(exact("(sqrt(x) / 2) / sqrt(x)"), "1/2");
    insta::assert_snapshot!(
      exact("(sqrt(x) / 2) / 3"),
      @"sqrt(1x^1) / 6"
    );
  }

  #[test]
  fn double_negation() {
    assert_eq!(exact("-(-sqrt(x))"), "sqrt(1x^1)");
  }
}

mod polynomials {
  use super::*;

  #[test]
  fn variable_arithmetic_collapses() {
    assert_eq!(exact("x * x"), "1x^2");
    assert_eq!(exact("x^2"), "1x^2");
    assert_eq!(exact("x^-1"), "1x^-1");
    assert_eq!(exact("x^2 / x"), "1x^1");
    assert_eq!(exact("(x^2 + x^3) * x^-1"), "1x^2 + 1x^1");
  }

  #[test]
  fn constants_stay_beside_polynomials() {
    insta::assert_snapshot!(exact("x + 1"), @"1x^1 + 1");
  }
}

mod absolute_value {
  use super::*;

  #[test]
  fn sign_known_operands_drop_the_abs() {
    assert_eq!(exact("abs(x^2 + 1)"), "1x^2 + 1");
    assert_eq!(exact("abs(-sqrt(4))"), "2");
    insta::assert_snapshot!(exact("abs(x^-2 * -3)"), @"1x^-2 * 3");
  }

  #[test]
  fn unknown_signs_keep_the_abs() {
    assert_eq!(exact("abs(x)"), "abs(1x^1)");
    assert_eq!(exact("abs(abs(x))"), "abs(1x^1)");
    assert_eq!(exact("abs(-x)"), "abs(-1x^1)");
  }

  #[test]
  fn power_takes_the_abs_of_its_base() {
    insta::assert_snapshot!(exact("abs((-2)^x)"), @"2^(1x^1)");
  }
}

mod combinators {
  use super::*;

  #[test]
  fn combinators_only_simplify_operands() {
    let x = parse("x", true).unwrap();
    let one = Expr::constant(Fraction::from_integer(1));
    let shifted = x.plus(&one).plus(&one);
    assert_eq!(shifted.to_string(), "1x^1 + 1 + 1");
    assert!(shifted.equivalent(&shifted.simplified()));
  }

  #[test]
  fn std_operators() {
    let x = parse("x", false).unwrap();
    let y = parse("x", false).unwrap();
    assert_eq!((x.clone() * y.clone()).to_string(), "1x^2");
    assert_eq!((x.clone() - y).to_string(), "0.0");
    assert_eq!((-x).to_string(), "-1x^1");
  }

  #[test]
  fn unary_builders() {
    let four = Expr::constant(4.0);
    assert_eq!(four.sqrt(), Expr::unary(UnaryOperator::Sqrt, four.clone()));
    assert_eq!(four.sqrt().simplified(), Expr::constant(2.0));
  }
}
