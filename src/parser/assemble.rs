use crate::ParseError;
use crate::syntax::{
  BinaryOperator, Expr, Operator, Position, Tier, UnaryOperator,
};

/// Folds one level's flat stack into a single tree.
///
/// Operators are bound tier by tier, highest first. Inside a tier the
/// stack is scanned left to right, which makes every binary operator left
/// associative.
///
/// `depth` is the nesting level of this stack. A run of prefix operators
/// nests one level per operator, and going past `limit` fails with
/// [`ParseError::TooDeep`].
pub fn assemble(
  mut stack: Vec<Expr>,
  depth: usize,
  limit: usize,
) -> Result<Expr, ParseError> {
  mark_negations(&mut stack);

  for tier in Tier::DESCENDING {
    if stack.len() <= 1 {
      break;
    }
    let mut index = 0;
    while index < stack.len() {
      if let Some(op) = stack[index].pending_operator()
        && op.tier() == tier
      {
        index = resolve(&mut stack, index, op, depth, limit)?;
      }
      index += 1;
    }
  }

  match stack.len() {
    0 => Err(ParseError::EmptyExpression),
    1 => {
      let node = stack.remove(0);
      match node.pending_operator() {
        Some(op) => Err(missing_operand(op)),
        None => Ok(node),
      }
    }
    count => Err(ParseError::UnresolvedStack { count }),
  }
}

/// Rewrites every `-` that cannot close a difference into a negation.
///
/// A `-` is a difference only when the entry before it can end an
/// operand: a resolved node or a postfix operator.
fn mark_negations(stack: &mut [Expr]) {
  let mut ends_operand = false;
  for entry in stack.iter_mut() {
    match entry.pending_operator() {
      Some(Operator::Binary(BinaryOperator::Difference)) if !ends_operand => {
        *entry = Operator::Unary(UnaryOperator::Negate).pending();
      }
      Some(op) => ends_operand = op.position() == Position::Postfix,
      None => ends_operand = true,
    }
  }
}

fn missing_operand(op: Operator) -> ParseError {
  let operator = match op {
    Operator::Unary(UnaryOperator::Negate) => "-",
    _ => op.keyword(),
  };
  ParseError::MissingOperand {
    operator: operator.to_string(),
  }
}

/// Binds `op` at `index` to its operands and returns the index of the
/// completed node.
fn resolve(
  stack: &mut Vec<Expr>,
  index: usize,
  op: Operator,
  depth: usize,
  limit: usize,
) -> Result<usize, ParseError> {
  if depth > limit {
    return Err(ParseError::TooDeep { limit });
  }
  let offsets = op.operand_offsets();

  // A prefix operator waiting in one of our operand slots, like the
  // negation in `2 * -3`, takes its own operand first.
  for &offset in offsets.iter().filter(|&&o| o > 0) {
    let slot = index + offset as usize;
    if let Some(inner) = stack.get(slot).and_then(Expr::pending_operator)
      && inner.position() == Position::Prefix
    {
      resolve(stack, slot, inner, depth + 1, limit)?;
    }
  }

  let lo = index as isize + offsets.iter().copied().min().unwrap_or(0).min(0);
  let hi = index as isize + offsets.iter().copied().max().unwrap_or(0).max(0);
  if lo < 0 || hi as usize >= stack.len() {
    return Err(missing_operand(op));
  }
  let (lo, hi) = (lo as usize, hi as usize);
  if (lo..=hi).any(|i| i != index && !stack[i].is_resolved()) {
    return Err(missing_operand(op));
  }

  let operands: Vec<Expr> = stack
    .drain(lo..=hi)
    .enumerate()
    .filter(|(i, _)| lo + i != index)
    .map(|(_, node)| node)
    .collect();
  let node = op.complete(operands).ok_or_else(|| missing_operand(op))?;
  log::trace!("resolved {node}");
  stack.insert(lo, node);
  Ok(lo)
}
