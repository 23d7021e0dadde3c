use crate::scalar::{DynamicScalar, ScalarKind};
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};

/// Closed interval every evaluation of a node falls into. Sound, not tight.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
  pub min: DynamicScalar,
  pub max: DynamicScalar,
}

impl Bounds {
  pub fn point(value: DynamicScalar) -> Bounds {
    Bounds {
      min: value.clone(),
      max: value,
    }
  }

  pub fn unbounded(kind: ScalarKind) -> Bounds {
    Bounds {
      min: -DynamicScalar::infinity(kind),
      max: DynamicScalar::infinity(kind),
    }
  }

  /// Smallest interval holding every candidate. Any nan candidate means
  /// nothing can be said.
  pub fn from_candidates(
    kind: ScalarKind,
    candidates: impl IntoIterator<Item = DynamicScalar>,
  ) -> Bounds {
    let mut bounds: Option<Bounds> = None;
    for candidate in candidates {
      if candidate.is_nan() {
        return Bounds::unbounded(kind);
      }
      bounds = Some(match bounds {
        None => Bounds::point(candidate),
        Some(b) => Bounds {
          min: b.min.min(candidate.clone()),
          max: b.max.max(candidate),
        },
      });
    }
    bounds.unwrap_or_else(|| Bounds::unbounded(kind))
  }

  pub fn kind(&self) -> ScalarKind {
    self.min.kind().combining(self.max.kind())
  }

  pub fn contains(&self, value: &DynamicScalar) -> bool {
    self.min <= *value && *value <= self.max
  }

  pub fn contains_zero(&self) -> bool {
    self.contains(&DynamicScalar::zero(self.kind()))
  }

  /// `Some(true)` when the whole interval is below zero, `Some(false)` when
  /// none of it is.
  pub fn is_negative(&self) -> Option<bool> {
    let zero = DynamicScalar::zero(self.kind());
    if self.max < zero {
      Some(true)
    } else if self.min >= zero {
      Some(false)
    } else {
      None
    }
  }

  pub fn sum(&self, other: &Bounds) -> Bounds {
    Bounds::from_candidates(
      self.kind().combining(other.kind()),
      [
        self.min.clone() + other.min.clone(),
        self.max.clone() + other.max.clone(),
      ],
    )
  }

  fn negated(&self) -> Bounds {
    Bounds {
      min: -self.max.clone(),
      max: -self.min.clone(),
    }
  }

  /// Applies `f` to all four corner combinations.
  fn corners(
    &self,
    other: &Bounds,
    f: impl Fn(DynamicScalar, DynamicScalar) -> DynamicScalar,
  ) -> Bounds {
    let kind = self.kind().combining(other.kind());
    Bounds::from_candidates(
      kind,
      [
        f(self.min.clone(), other.min.clone()),
        f(self.min.clone(), other.max.clone()),
        f(self.max.clone(), other.min.clone()),
        f(self.max.clone(), other.max.clone()),
      ],
    )
  }

  /// Applies an increasing function to both ends, clamping the lower end
  /// to the function's domain.
  fn monotone(
    &self,
    floor: DynamicScalar,
    f: impl Fn(&DynamicScalar) -> DynamicScalar,
  ) -> Bounds {
    let low = self.min.clone().max(floor);
    Bounds::from_candidates(self.kind(), [f(&low), f(&self.max)])
  }
}

impl Expr {
  pub fn bounds(&self) -> Bounds {
    let kind = self.kind();
    if self.is_constant()
      && let Ok(value) = self.evaluate(&DynamicScalar::zero(kind))
      && !value.is_nan()
    {
      return Bounds::point(value);
    }

    match self {
      Expr::Constant(value) => Bounds::point(value.clone()),
      Expr::Variable { .. } | Expr::Placeholder => Bounds::unbounded(kind),
      Expr::Polynomial(poly) => poly.bounds(),
      Expr::Unary { op, operand } => unary_bounds(*op, &operand.bounds()),
      Expr::Binary { op, left, right } => {
        binary_bounds(*op, &left.bounds(), &right.bounds(), kind)
      }
    }
  }

  /// Statically known sign, derived from the bounds.
  pub fn is_negative(&self) -> Option<bool> {
    self.bounds().is_negative()
  }
}

fn unary_bounds(op: UnaryOperator, inner: &Bounds) -> Bounds {
  let kind = inner.kind();
  let zero = DynamicScalar::zero(kind);
  match op {
    UnaryOperator::Negate => inner.negated(),
    UnaryOperator::Abs => match inner.is_negative() {
      Some(false) => inner.clone(),
      Some(true) => inner.negated(),
      None => Bounds {
        min: zero,
        max: (-inner.min.clone()).max(inner.max.clone()),
      },
    },
    UnaryOperator::Sqrt => inner.monotone(zero, DynamicScalar::sqrt),
    UnaryOperator::Ln => inner.monotone(zero, DynamicScalar::ln),
    UnaryOperator::Log2 => inner.monotone(zero, DynamicScalar::log2),
    UnaryOperator::Log10 => inner.monotone(zero, DynamicScalar::log10),
    UnaryOperator::Factorial => Bounds {
      min: DynamicScalar::one(kind),
      max: DynamicScalar::infinity(kind),
    },
  }
}

fn binary_bounds(
  op: BinaryOperator,
  left: &Bounds,
  right: &Bounds,
  kind: ScalarKind,
) -> Bounds {
  match op {
    BinaryOperator::Sum => left.sum(right),
    BinaryOperator::Difference => left.sum(&right.negated()),
    BinaryOperator::Product => left.corners(right, |a, b| a * b),
    BinaryOperator::Quotient => {
      if right.contains_zero() {
        Bounds::unbounded(kind)
      } else {
        left.corners(right, |a, b| a / b)
      }
    }
    BinaryOperator::Mod => {
      let reach = right.min.abs().max(right.max.abs());
      Bounds::from_candidates(kind, [-reach.clone(), reach])
    }
    BinaryOperator::Power
    | BinaryOperator::Logx
    | BinaryOperator::NthDerivative
    | BinaryOperator::NthIntegral => Bounds::unbounded(kind),
  }
}
