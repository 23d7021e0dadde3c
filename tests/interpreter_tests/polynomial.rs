use super::*;
use symcalc::{Polynomial, PolynomialNode};

fn frac(n: i64) -> Fraction {
  Fraction::from_integer(n)
}

#[test]
fn multiplication_is_convolution() {
  let a = Polynomial::from_standard(&[1.0, 2.0]);
  let b = Polynomial::from_standard(&[1.0, 5.0]);
  let product = a * b;
  assert_eq!(product, Polynomial::from_standard(&[1.0, 7.0, 10.0]));
  insta::assert_snapshot!(product.to_string(), @"1x^2 + 7x^1 + 10x^0");
}

#[test]
fn cancelled_terms_disappear() {
  let a = Polynomial::from_standard(&[frac(1), frac(2)]);
  let b = Polynomial::from_standard(&[frac(-1), frac(3)]);
  let sum = a + b;
  assert_eq!(sum.term_count(), 1);
  assert_eq!(sum.powers(), vec![0]);
  assert_eq!(sum.constant_term(), frac(5));
}

#[test]
fn evaluation_includes_zero() {
  let poly = Polynomial::from_standard(&[frac(2), frac(-3), frac(1)]);
  assert_eq!(poly.eval(&frac(0)), frac(1));
  assert_eq!(poly.eval(&frac(2)), frac(3));
  assert_eq!(poly.eval(&frac(-1)), frac(6));
}

#[test]
fn negative_powers_round_trip() {
  let x = Polynomial::<Fraction>::identity();
  let inverse = x.power(-2);
  assert_eq!(inverse.powers(), vec![-2]);
  assert_eq!(inverse.eval(&frac(2)).to_string(), "1/4");
  assert_eq!((inverse * x.power(2)), Polynomial::constant(frac(1)));
}

#[test]
fn rational_root_candidates() {
  let poly = Polynomial::from_standard(&[frac(2), frac(-3), frac(1)]);
  let candidates = poly.candidate_roots();
  for root in [frac(1), Fraction::new(1.into(), 2.into())] {
    assert!(candidates.contains(&root), "{root} missing");
    assert!(poly.eval(&root).is_finite());
  }
  assert!(candidates.iter().any(|c| poly.eval(c) == frac(0)));

  let divisible = Polynomial::from_standard(&[frac(1), frac(-1), frac(0)]);
  assert!(divisible.candidate_roots().contains(&frac(0)));
}

#[test]
fn nodes_refuse_mixed_kinds() {
  let exact = PolynomialNode::identity(ScalarKind::Fraction);
  let floating = PolynomialNode::identity(ScalarKind::Double);
  assert!(exact.checked_add(&floating).is_none());
  assert!(exact.checked_mul(&exact).is_some());
}
