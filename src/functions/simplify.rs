use crate::functions::algebra::{
  abs_node, negate_node, power_node, product_node, quotient_node, sum_node,
};
use crate::scalar::DynamicScalar;
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};

/// Upper bound on passes made by [`simplify_to_fixed_point`].
pub const MAX_PASSES: usize = 64;

impl Expr {
  /// One rewriting pass.
  ///
  /// Children are simplified first. A node whose simplified children are
  /// all constants is evaluated and replaced by its value, so a subtree
  /// with only constants below it collapses bottom-up. Every other
  /// composite recombines its children through the algebraic
  /// combinators, so one pass is not necessarily a fixed point.
  pub fn simplified(&self) -> Expr {
    match self {
      Expr::Constant(_)
      | Expr::Variable { .. }
      | Expr::Polynomial(_)
      | Expr::Placeholder => self.clone(),
      Expr::Unary { op, operand } => {
        let operand = operand.simplified();
        if operand.as_constant().is_some() {
          return Expr::unary(*op, operand).folded();
        }
        match op {
          UnaryOperator::Abs => abs_node(operand),
          UnaryOperator::Negate => negate_node(operand),
          _ => Expr::unary(*op, operand),
        }
      }
      Expr::Binary { op, left, right } => {
        let left = left.simplified();
        let right = right.simplified();
        if left.as_constant().is_some() && right.as_constant().is_some() {
          return Expr::binary(*op, left, right).folded();
        }
        match op {
          BinaryOperator::Sum => sum_node(left, right),
          BinaryOperator::Difference => sum_node(left, negate_node(right)),
          BinaryOperator::Product => product_node(left, right),
          BinaryOperator::Quotient => quotient_node(left, right),
          BinaryOperator::Power => power_node(left, right),
          BinaryOperator::Logx
          | BinaryOperator::Mod
          | BinaryOperator::NthDerivative
          | BinaryOperator::NthIntegral => Expr::binary(*op, left, right),
        }
      }
    }
  }

  /// Value of a node over constant operands, or the node itself when it
  /// has no numeric evaluation.
  fn folded(self) -> Expr {
    match self.evaluate(&DynamicScalar::zero(self.kind())) {
      Ok(value) => Expr::Constant(value),
      Err(_) => self,
    }
  }
}

/// Simplifies until a pass no longer changes the tree.
pub fn simplify_to_fixed_point(expr: &Expr) -> Expr {
  let mut current = expr.clone();
  for pass in 1..=MAX_PASSES {
    let next = current.simplified();
    log::trace!("simplify pass {pass}: {next}");
    if next.is_identical(&current) {
      log::debug!("simplified {expr} to {next} in {pass} passes");
      return next;
    }
    current = next;
  }
  log::debug!("simplification of {expr} stopped after {MAX_PASSES} passes");
  current
}
