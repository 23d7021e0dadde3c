use super::*;

mod exact {
  use super::*;

  fn exact(input: &str) -> String {
    interpret(input, true).unwrap()
  }

  #[test]
  fn addition_and_subtraction() {
    assert_eq!(exact("1 - 1"), "0");
    assert_eq!(exact("1 + 2"), "3");
    assert_eq!(exact("7 - 3 - 1"), "3");
    assert_eq!(exact("2 - 3"), "-1");
    assert_eq!(exact("1/2 + 1/3"), "5/6");
  }

  #[test]
  fn multiplication_and_division() {
    assert_eq!(exact("3 * 4"), "12");
    assert_eq!(exact("10 / 4"), "5/2");
    assert_eq!(exact("8 / 2 / 2"), "2");
    assert_eq!(exact("0.75 * 4"), "3");
  }

  #[test]
  fn precedence() {
    assert_eq!(exact("1 + 2 * 3"), "7");
    assert_eq!(exact("(1 + 2) * 3"), "9");
    assert_eq!(exact("2 * 3^2"), "18");
    assert_eq!(exact("2^10"), "1024");
    assert_eq!(exact("2^3!"), "64");
  }

  #[test]
  fn unary_minus() {
    assert_eq!(exact("-3"), "-3");
    assert_eq!(exact("1 - -1"), "2");
    assert_eq!(exact("2 * -3"), "-6");
    assert_eq!(exact("-2^2"), "-4");
    assert_eq!(exact("(-2)^2"), "4");
  }

  #[test]
  fn truncated_modulo() {
    assert_eq!(exact("mod(7, 3)"), "1");
    assert_eq!(exact("mod(-7, 3)"), "-1");
    assert_eq!(exact("mod(7/2, 1)"), "1/2");
  }

  #[test]
  fn factorial() {
    assert_eq!(exact("5!"), "120");
    assert_eq!(exact("0!"), "1");
    assert_eq!(exact("4.5!"), "nan");
    assert_eq!(exact("(-1)!"), "nan");
  }

  #[test]
  fn division_by_zero() {
    assert_eq!(exact("1/0"), "inf");
    assert_eq!(exact("-1/0"), "-inf");
    assert_eq!(exact("0/0"), "nan");
  }

  #[test]
  fn functions() {
    assert_eq!(exact("abs(-3)"), "3");
    assert_eq!(exact("sqrt(16)"), "4");
  }
}

mod floating {
  use super::*;

  fn floating(input: &str) -> String {
    interpret(input, false).unwrap()
  }

  #[test]
  fn literals_keep_a_decimal_point() {
    assert_eq!(floating("1 - 1"), "0.0");
    assert_eq!(floating("1 + 2"), "3.0");
    assert_eq!(floating("10 / 4"), "2.5");
    assert_eq!(floating("5!"), "120.0");
  }

  #[test]
  fn factorial_outside_its_domain() {
    assert_eq!(floating("4.5!"), "NaN");
    assert_eq!(floating("171!"), "inf");
  }

  #[test]
  fn modulo_keeps_the_dividend_sign() {
    assert_eq!(floating("mod(-7, 3)"), "-1.0");
  }

  #[test]
  fn functions() {
    assert_eq!(floating("sqrt(16)"), "4.0");
    assert_eq!(floating("ln(1)"), "0.0");
    assert_eq!(floating("log2(8)"), "3.0");
    assert_eq!(floating("1 / 0"), "inf");
  }

  #[test]
  fn logx_takes_the_base_first() {
    let value = evaluate_at("logx(2, 8)", false, 0.0).unwrap();
    assert!((value.to_f64() - 3.0).abs() < 1e-12);
    let value = evaluate_at("logx(10, 100)", false, 0.0).unwrap();
    assert!((value.to_f64() - 2.0).abs() < 1e-12);
  }
}

mod evaluation {
  use super::*;

  #[test]
  fn double_negation_evaluates() {
    assert_eq!(
      evaluate_at("1 - -1", false, 0.0).unwrap(),
      DynamicScalar::Double(2.0)
    );
    assert_eq!(
      evaluate_at("1 - -1", true, 0.0).unwrap(),
      DynamicScalar::Fraction(Fraction::from_integer(2))
    );
  }

  #[test]
  fn at_a_point() {
    assert_eq!(
      evaluate_at("x^2 + 1", false, 3.0).unwrap(),
      DynamicScalar::Double(10.0)
    );
    assert_eq!(evaluate_at("x^2 + 1", true, 0.5).unwrap().to_string(), "5/4");
    assert_eq!(
      evaluate_at("-x", false, -2.0).unwrap(),
      DynamicScalar::Double(2.0)
    );
  }

  #[test]
  fn derivatives_have_no_value() {
    assert_eq!(
      evaluate_at("nthderivative(x, 1)", false, 1.0),
      Err(CalcError::Eval(EvalError::Unsupported {
        operation: "nthderivative".to_string()
      }))
    );
  }
}
