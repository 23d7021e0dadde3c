use crate::EvalError;
use crate::scalar::DynamicScalar;
use crate::syntax::Expr;

pub mod bounds;

impl Expr {
  /// Evaluates the tree at `x`.
  ///
  /// Constants ignore the point. A polynomial needs a point of its own
  /// kind; binary nodes promote their operands to a common kind.
  pub fn evaluate(
    &self,
    x: &DynamicScalar,
  ) -> Result<DynamicScalar, EvalError> {
    match self {
      Expr::Constant(value) => Ok(value.clone()),
      Expr::Variable { name, .. } => Err(EvalError::UnboundVariable {
        name: name.clone(),
      }),
      Expr::Placeholder => Err(EvalError::Unresolved),
      Expr::Polynomial(poly) => poly.evaluate(x),
      Expr::Unary { op, operand } => Ok(op.apply(&operand.evaluate(x)?)),
      Expr::Binary { op, left, right } => {
        let left = left.evaluate(x)?;
        let right = right.evaluate(x)?;
        op.apply(left, right).ok_or_else(|| EvalError::Unsupported {
          operation: op.keyword().to_string(),
        })
      }
    }
  }
}
