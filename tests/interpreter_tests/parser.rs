use super::*;

mod errors {
  use super::*;

  #[test]
  fn unexpected_input_names_the_rest() {
    assert_eq!(
      parse("2 $ 3", false),
      Err(ParseError::UnexpectedInput {
        remaining: "$ 3".to_string()
      })
    );
    assert_eq!(
      parse("2 $ 3", false).unwrap_err().to_string(),
      "Unexpected input at: $ 3"
    );
  }

  #[test]
  fn missing_operands() {
    assert_eq!(
      parse("1 +", false),
      Err(ParseError::MissingOperand {
        operator: "+".to_string()
      })
    );
    assert_eq!(
      parse("* 2", true),
      Err(ParseError::MissingOperand {
        operator: "*".to_string()
      })
    );
    assert_eq!(
      parse("-", false).unwrap_err().to_string(),
      "- operator missing operand"
    );
    assert!(matches!(
      parse("sqrt", false),
      Err(ParseError::MissingOperand { .. })
    ));
  }

  #[test]
  fn leftover_operands() {
    assert_eq!(
      parse("2 3", false),
      Err(ParseError::UnresolvedStack { count: 2 })
    );
  }

  #[test]
  fn empty_input() {
    assert_eq!(parse("", false), Err(ParseError::EmptyExpression));
    assert_eq!(parse("   ", true), Err(ParseError::EmptyExpression));
    assert_eq!(parse("()", true), Err(ParseError::EmptyExpression));
  }

  #[test]
  fn nesting_limit() {
    let parser = ExpressionParser::new(true).with_max_depth(2);
    assert!(parser.parse("((1))").is_ok());
    assert_eq!(
      parser.parse("(((1)))"),
      Err(ParseError::TooDeep { limit: 2 })
    );
  }

  #[test]
  fn prefix_runs_count_toward_the_depth_limit() {
    let parser = ExpressionParser::new(false).with_max_depth(8);
    assert_eq!(
      parser.parse(&format!("{}1", "-".repeat(5000))),
      Err(ParseError::TooDeep { limit: 8 })
    );
    assert_eq!(
      parser.parse(&format!("{}16", "sqrt ".repeat(20))),
      Err(ParseError::TooDeep { limit: 8 })
    );

    let origin = DynamicScalar::Double(0.0);
    let negated = parser.parse("----1").unwrap();
    assert_eq!(negated.evaluate(&origin).unwrap(), DynamicScalar::Double(1.0));
    let root = parser.parse("sqrt sqrt 16").unwrap();
    assert_eq!(root.evaluate(&origin).unwrap(), DynamicScalar::Double(2.0));
  }

  #[test]
  fn variable_colliding_with_a_keyword() {
    let parser = ExpressionParser::new(false).with_variable(Some("l"));
    assert!(matches!(
      parser.parse("ln(2)"),
      Err(ParseError::AmbiguousKeyword { .. })
    ));
  }

  #[test]
  fn failures_convert_into_calc_errors() {
    assert_eq!(
      interpret("1 +", true),
      Err(CalcError::Parse(ParseError::MissingOperand {
        operator: "+".to_string()
      }))
    );
  }
}

mod variables {
  use super::*;

  #[test]
  fn default_variable_is_x() {
    let expr = parse("x", true).unwrap();
    assert_eq!(expr.to_string(), "1x^1");
  }

  #[test]
  fn custom_variable() {
    let parser = ExpressionParser::new(false).with_variable(Some("T"));
    let expr = parser.parse("t^2").unwrap();
    assert_eq!(
      expr.evaluate(&DynamicScalar::Double(3.0)).unwrap(),
      DynamicScalar::Double(9.0)
    );
  }

  #[test]
  fn no_variable() {
    let parser = ExpressionParser::new(false).with_variable(None);
    assert_eq!(
      parser.parse("x"),
      Err(ParseError::UnexpectedInput {
        remaining: "x".to_string()
      })
    );
  }

  #[test]
  fn point_kind_must_match_polynomial_kind() {
    let expr = parse("x", true).unwrap();
    assert_eq!(
      expr.evaluate(&DynamicScalar::Double(1.0)),
      Err(EvalError::KindMismatch {
        expected: ScalarKind::Fraction,
        found: ScalarKind::Double,
      })
    );
  }
}

mod structure {
  use super::*;

  #[test]
  fn input_is_case_insensitive() {
    assert_eq!(interpret("SQRT(16)", false).unwrap(), "4.0");
  }

  fn tree(input: &str) -> String {
    parse(input, true).unwrap().to_string()
  }

  #[test]
  fn parsed_trees_are_not_simplified() {
    insta::assert_snapshot!(tree("1 + 2 * 3"), @"1 + 2 * 3");
    insta::assert_snapshot!(tree("(1 + 2) * 3"), @"(1 + 2) * 3");
    insta::assert_snapshot!(tree("1 - (2 - 3)"), @"1 - (2 - 3)");
  }

  #[test]
  fn negation_binds_looser_than_powers() {
    insta::assert_snapshot!(tree("-2^2"), @"-2^2");
    insta::assert_snapshot!(tree("(-2)^2"), @"(-2)^2");
    insta::assert_snapshot!(tree("2 * -3"), @"2 * -3");
  }

  #[test]
  fn monomials_need_no_parentheses() {
    insta::assert_snapshot!(tree("2 * x"), @"2 * 1x^1");
    insta::assert_snapshot!(tree("1 / x"), @"1 / 1x^1");
    insta::assert_snapshot!(tree("2 * (x + 1)"), @"2 * (1x^1 + 1)");
  }

  #[test]
  fn function_forms() {
    insta::assert_snapshot!(tree("logx(2, 8)"), @"logx(2, 8)");
    insta::assert_snapshot!(tree("mod(7, 3) + 1"), @"mod(7, 3) + 1");
    insta::assert_snapshot!(tree("sqrt(4)!"), @"sqrt(4)!");
  }

  #[test]
  fn literal_forms() {
    assert_eq!(interpret(".5 + 5.", true).unwrap(), "11/2");
    assert_eq!(interpret("3/4", true).unwrap(), "3/4");
    assert_eq!(interpret("3/4", false).unwrap(), "0.75");
  }
}
