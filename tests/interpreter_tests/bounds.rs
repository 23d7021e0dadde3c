use super::*;
use symcalc::Bounds;

fn interval(input: &str, exact: bool) -> (String, String) {
  let bounds = bounds_of(input, exact).unwrap();
  (bounds.min.to_string(), bounds.max.to_string())
}

fn pair(min: &str, max: &str) -> (String, String) {
  (min.to_string(), max.to_string())
}

#[test]
fn constants_are_points() {
  assert_eq!(
    bounds_of("5", true).unwrap(),
    Bounds::point(DynamicScalar::Fraction(Fraction::from_integer(5)))
  );
  assert_eq!(interval("x * 0", false), pair("0.0", "0.0"));
}

#[test]
fn polynomials() {
  assert_eq!(interval("x", false), pair("-inf", "inf"));
  assert_eq!(interval("x^2", true), pair("0", "inf"));
  assert_eq!(interval("x^2 + 1", true), pair("1", "inf"));
  assert_eq!(interval("x^-2", true), pair("0", "inf"));
}

#[test]
fn functions_clamp_to_their_range() {
  assert_eq!(interval("abs(x) + 1", false), pair("1.0", "inf"));
  assert_eq!(interval("sqrt(x)", false), pair("0.0", "inf"));
  assert_eq!(interval("mod(x, 3)", false), pair("-3.0", "3.0"));
}

#[test]
fn products_use_every_corner() {
  assert_eq!(interval("(abs(x) + 1) * -2", false), pair("-inf", "-2.0"));
}

#[test]
fn division_by_a_range_holding_zero_is_unbounded() {
  assert_eq!(interval("1 / x", false), pair("-inf", "inf"));
}

#[test]
fn known_sign() {
  let sign =
    |input: &str| parse(input, false).unwrap().simplified().is_negative();
  assert_eq!(sign("-(x^2) - 1"), Some(true));
  assert_eq!(sign("x^2"), Some(false));
  assert_eq!(sign("x - 1"), None);
}

#[test]
fn unsimplified_powers_are_unbounded() {
  let expr = parse("x^2", false).unwrap();
  assert_eq!(expr.bounds(), Bounds::unbounded(ScalarKind::Double));
}

#[test]
fn evaluations_fall_inside() {
  for input in ["x^2 - 3", "abs(x) * 2", "-(x^2) + x^-2", "sqrt(x^2) + 1"] {
    let bounds = bounds_of(input, false).unwrap();
    for x in [-4.0, -0.5, 0.25, 3.0] {
      let value = evaluate_at(input, false, x).unwrap();
      assert!(bounds.contains(&value), "{input} at {x}: {value}");
    }
  }
}
