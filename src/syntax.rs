use std::fmt;
use std::hash::{Hash, Hasher};

use crate::functions::polynomial::PolynomialNode;
use crate::scalar::{DynamicScalar, ScalarKind};

/// Expression tree over a single variable.
///
/// Operator nodes whose children are still [`Expr::Placeholder`] only
/// exist while the parser assembles a level; they never leave it.
#[derive(Clone, Debug)]
pub enum Expr {
  Constant(DynamicScalar),
  /// Named leaf without a binding. Evaluating it fails.
  Variable {
    name: String,
    kind: ScalarKind,
  },
  Unary {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  Binary {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  Polynomial(PolynomialNode),
  Placeholder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
  Abs,
  Negate,
  Sqrt,
  Ln,
  Log2,
  Log10,
  Factorial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
  Sum,
  Difference,
  Product,
  Quotient,
  Power,
  /// `logx(base, x)`: the left operand is the base.
  Logx,
  Mod,
  NthDerivative,
  NthIntegral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
  Unary(UnaryOperator),
  Binary(BinaryOperator),
}

/// Where an operator finds its operands on the parse stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
  Prefix,
  Postfix,
  Infix,
}

/// Precedence levels, resolved one at a time from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
  Container,
  Prefix,
  Postfix,
  Infix,
  Exponent,
  Multiplication,
  Addition,
}

impl Tier {
  pub const DESCENDING: [Tier; 7] = [
    Tier::Container,
    Tier::Prefix,
    Tier::Postfix,
    Tier::Infix,
    Tier::Exponent,
    Tier::Multiplication,
    Tier::Addition,
  ];
}

impl UnaryOperator {
  pub const ALL: [UnaryOperator; 7] = [
    UnaryOperator::Abs,
    UnaryOperator::Negate,
    UnaryOperator::Sqrt,
    UnaryOperator::Ln,
    UnaryOperator::Log2,
    UnaryOperator::Log10,
    UnaryOperator::Factorial,
  ];

  /// Text matched by the tokenizer. Negation has none: it is recovered
  /// from a `-` that cannot be a difference.
  pub fn keyword(self) -> &'static str {
    match self {
      UnaryOperator::Abs => "abs",
      UnaryOperator::Negate => "",
      UnaryOperator::Sqrt => "sqrt",
      UnaryOperator::Ln => "ln",
      UnaryOperator::Log2 => "log2",
      UnaryOperator::Log10 => "log10",
      UnaryOperator::Factorial => "!",
    }
  }

  pub fn position(self) -> Position {
    match self {
      UnaryOperator::Factorial => Position::Postfix,
      _ => Position::Prefix,
    }
  }

  pub fn tier(self) -> Tier {
    match self {
      UnaryOperator::Negate => Tier::Multiplication,
      UnaryOperator::Factorial => Tier::Postfix,
      _ => Tier::Prefix,
    }
  }

  pub fn apply(self, value: &DynamicScalar) -> DynamicScalar {
    match self {
      UnaryOperator::Abs => value.abs(),
      UnaryOperator::Negate => -value.clone(),
      UnaryOperator::Sqrt => value.sqrt(),
      UnaryOperator::Ln => value.ln(),
      UnaryOperator::Log2 => value.log2(),
      UnaryOperator::Log10 => value.log10(),
      UnaryOperator::Factorial => value.factorial(),
    }
  }
}

impl BinaryOperator {
  pub const ALL: [BinaryOperator; 9] = [
    BinaryOperator::Sum,
    BinaryOperator::Difference,
    BinaryOperator::Product,
    BinaryOperator::Quotient,
    BinaryOperator::Power,
    BinaryOperator::Logx,
    BinaryOperator::Mod,
    BinaryOperator::NthDerivative,
    BinaryOperator::NthIntegral,
  ];

  pub fn keyword(self) -> &'static str {
    match self {
      BinaryOperator::Sum => "+",
      BinaryOperator::Difference => "-",
      BinaryOperator::Product => "*",
      BinaryOperator::Quotient => "/",
      BinaryOperator::Power => "^",
      BinaryOperator::Logx => "logx",
      BinaryOperator::Mod => "mod",
      BinaryOperator::NthDerivative => "nthderivative",
      BinaryOperator::NthIntegral => "nthintegral",
    }
  }

  pub fn position(self) -> Position {
    match self {
      BinaryOperator::Logx
      | BinaryOperator::Mod
      | BinaryOperator::NthDerivative
      | BinaryOperator::NthIntegral => Position::Prefix,
      _ => Position::Infix,
    }
  }

  pub fn tier(self) -> Tier {
    match self {
      BinaryOperator::Sum | BinaryOperator::Difference => Tier::Addition,
      BinaryOperator::Product | BinaryOperator::Quotient => {
        Tier::Multiplication
      }
      BinaryOperator::Power | BinaryOperator::Logx => Tier::Exponent,
      BinaryOperator::Mod => Tier::Infix,
      BinaryOperator::NthDerivative | BinaryOperator::NthIntegral => {
        Tier::Prefix
      }
    }
  }

  /// `None` when the operator has no numeric meaning.
  pub fn apply(
    self,
    left: DynamicScalar,
    right: DynamicScalar,
  ) -> Option<DynamicScalar> {
    let value = match self {
      BinaryOperator::Sum => left + right,
      BinaryOperator::Difference => left - right,
      BinaryOperator::Product => left * right,
      BinaryOperator::Quotient => left / right,
      BinaryOperator::Power => left.pow(&right),
      BinaryOperator::Logx => right.logx(&left),
      BinaryOperator::Mod => left.modulo(&right),
      BinaryOperator::NthDerivative | BinaryOperator::NthIntegral => {
        return None;
      }
    };
    Some(value)
  }
}

impl Operator {
  pub fn keyword(self) -> &'static str {
    match self {
      Operator::Unary(op) => op.keyword(),
      Operator::Binary(op) => op.keyword(),
    }
  }

  pub fn position(self) -> Position {
    match self {
      Operator::Unary(op) => op.position(),
      Operator::Binary(op) => op.position(),
    }
  }

  pub fn tier(self) -> Tier {
    match self {
      Operator::Unary(op) => op.tier(),
      Operator::Binary(op) => op.tier(),
    }
  }

  /// Stack offsets of the operands, relative to the operator, in
  /// argument order.
  pub fn operand_offsets(self) -> &'static [isize] {
    match (self, self.position()) {
      (Operator::Unary(_), Position::Postfix) => &[-1],
      (Operator::Unary(_), _) => &[1],
      (Operator::Binary(_), Position::Prefix) => &[1, 2],
      (Operator::Binary(_), _) => &[-1, 1],
    }
  }

  /// An operator node with placeholder operands.
  pub fn pending(self) -> Expr {
    match self {
      Operator::Unary(op) => Expr::Unary {
        op,
        operand: Box::new(Expr::Placeholder),
      },
      Operator::Binary(op) => Expr::Binary {
        op,
        left: Box::new(Expr::Placeholder),
        right: Box::new(Expr::Placeholder),
      },
    }
  }

  /// Builds the complete node from operands in argument order.
  pub fn complete(self, operands: Vec<Expr>) -> Option<Expr> {
    let mut operands = operands.into_iter();
    let node = match self {
      Operator::Unary(op) => Expr::unary(op, operands.next()?),
      Operator::Binary(op) => {
        let left = operands.next()?;
        Expr::binary(op, left, operands.next()?)
      }
    };
    Some(node)
  }
}

/// Shape of a node and every node below it, minus the leaf values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Descriptor {
  Placeholder,
  Constant(ScalarKind),
  Variable {
    name: String,
    kind: ScalarKind,
  },
  Polynomial(ScalarKind),
  Unary {
    op: UnaryOperator,
    kind: ScalarKind,
    operand: Box<Descriptor>,
  },
  Binary {
    op: BinaryOperator,
    kind: ScalarKind,
    left: Box<Descriptor>,
    right: Box<Descriptor>,
  },
}

impl Descriptor {
  pub fn kind(&self) -> ScalarKind {
    match self {
      Descriptor::Placeholder => ScalarKind::default(),
      Descriptor::Constant(kind)
      | Descriptor::Polynomial(kind)
      | Descriptor::Variable { kind, .. }
      | Descriptor::Unary { kind, .. }
      | Descriptor::Binary { kind, .. } => *kind,
    }
  }
}

impl Expr {
  pub fn constant(value: impl Into<DynamicScalar>) -> Expr {
    Expr::Constant(value.into())
  }

  pub fn variable(name: impl Into<String>, kind: ScalarKind) -> Expr {
    Expr::Variable {
      name: name.into(),
      kind,
    }
  }

  pub fn unary(op: UnaryOperator, operand: Expr) -> Expr {
    Expr::Unary {
      op,
      operand: Box::new(operand),
    }
  }

  pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
      op,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  pub fn zero(kind: ScalarKind) -> Expr {
    Expr::Constant(DynamicScalar::zero(kind))
  }

  pub fn one(kind: ScalarKind) -> Expr {
    Expr::Constant(DynamicScalar::one(kind))
  }

  pub fn kind(&self) -> ScalarKind {
    match self {
      Expr::Constant(value) => value.kind(),
      Expr::Variable { kind, .. } => *kind,
      Expr::Unary { operand, .. } => operand.kind(),
      Expr::Binary { left, right, .. } => left.kind().combining(right.kind()),
      Expr::Polynomial(poly) => poly.kind(),
      Expr::Placeholder => ScalarKind::default(),
    }
  }

  pub fn descriptor(&self) -> Descriptor {
    match self {
      Expr::Constant(value) => Descriptor::Constant(value.kind()),
      Expr::Variable { name, kind } => Descriptor::Variable {
        name: name.clone(),
        kind: *kind,
      },
      Expr::Unary { op, operand } => {
        let operand = operand.descriptor();
        Descriptor::Unary {
          op: *op,
          kind: operand.kind(),
          operand: Box::new(operand),
        }
      }
      Expr::Binary { op, left, right } => {
        let (left, right) = (left.descriptor(), right.descriptor());
        Descriptor::Binary {
          op: *op,
          kind: left.kind().combining(right.kind()),
          left: Box::new(left),
          right: Box::new(right),
        }
      }
      Expr::Polynomial(poly) => Descriptor::Polynomial(poly.kind()),
      Expr::Placeholder => Descriptor::Placeholder,
    }
  }

  /// True when only constants are reachable below this node.
  pub fn is_constant(&self) -> bool {
    match self {
      Expr::Constant(_) => true,
      Expr::Unary { operand, .. } => operand.is_constant(),
      Expr::Binary { left, right, .. } => {
        left.is_constant() && right.is_constant()
      }
      _ => false,
    }
  }

  /// No placeholder anywhere in the tree.
  pub fn is_resolved(&self) -> bool {
    match self {
      Expr::Placeholder => false,
      Expr::Unary { operand, .. } => operand.is_resolved(),
      Expr::Binary { left, right, .. } => {
        left.is_resolved() && right.is_resolved()
      }
      _ => true,
    }
  }

  /// The operator of a node still waiting for its operands.
  pub fn pending_operator(&self) -> Option<Operator> {
    match self {
      Expr::Unary { op, operand } if matches!(**operand, Expr::Placeholder) => {
        Some(Operator::Unary(*op))
      }
      Expr::Binary { op, left, right }
        if matches!(**left, Expr::Placeholder)
          && matches!(**right, Expr::Placeholder) =>
      {
        Some(Operator::Binary(*op))
      }
      _ => None,
    }
  }

  pub fn as_constant(&self) -> Option<&DynamicScalar> {
    match self {
      Expr::Constant(value) => Some(value),
      _ => None,
    }
  }

  /// Structural equality that also treats nan leaves as equal.
  pub fn is_identical(&self, other: &Expr) -> bool {
    self.same_tree(other, true)
  }

  /// Walks both trees together and stops at the first difference.
  fn same_tree(&self, other: &Expr, nan_equal: bool) -> bool {
    match (self, other) {
      (Expr::Constant(a), Expr::Constant(b)) => {
        a == b
          || (nan_equal
            && a.kind() == b.kind()
            && a.is_nan()
            && b.is_nan())
      }
      (
        Expr::Variable { name: a, kind: ka },
        Expr::Variable { name: b, kind: kb },
      ) => a == b && ka == kb,
      (Expr::Polynomial(a), Expr::Polynomial(b)) => a == b,
      (Expr::Placeholder, Expr::Placeholder) => true,
      (
        Expr::Unary { op: a, operand: x },
        Expr::Unary { op: b, operand: y },
      ) => a == b && x.same_tree(y, nan_equal),
      (
        Expr::Binary {
          op: a,
          left: al,
          right: ar,
        },
        Expr::Binary {
          op: b,
          left: bl,
          right: br,
        },
      ) => {
        a == b
          && al.same_tree(bl, nan_equal)
          && ar.same_tree(br, nan_equal)
      }
      _ => false,
    }
  }

  fn hash_leaves<H: Hasher>(&self, state: &mut H) {
    match self {
      Expr::Constant(value) => value.hash(state),
      Expr::Polynomial(poly) => poly.hash(state),
      Expr::Unary { operand, .. } => operand.hash_leaves(state),
      Expr::Binary { left, right, .. } => {
        left.hash_leaves(state);
        right.hash_leaves(state);
      }
      Expr::Variable { .. } | Expr::Placeholder => {}
    }
  }

  /// Binding strength used to decide where parentheses go when printing.
  fn strength(&self) -> u8 {
    match self {
      Expr::Constant(value) if value.is_negative() => 3,
      Expr::Polynomial(poly) if poly.term_count() > 1 => 1,
      Expr::Polynomial(_) => 3,
      Expr::Unary {
        op: UnaryOperator::Negate,
        ..
      } => 3,
      Expr::Unary {
        op: UnaryOperator::Factorial,
        ..
      } => 5,
      Expr::Binary { op, .. } => match op {
        BinaryOperator::Sum | BinaryOperator::Difference => 1,
        BinaryOperator::Product | BinaryOperator::Quotient => 2,
        BinaryOperator::Power => 4,
        _ => 6,
      },
      _ => 6,
    }
  }
}

/// Kind-strict structural equality over operators and leaf values.
impl PartialEq for Expr {
  fn eq(&self, other: &Expr) -> bool {
    self.same_tree(other, false)
  }
}

impl Hash for Expr {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.descriptor().hash(state);
    self.hash_leaves(state);
  }
}

struct Operand<'a>(&'a Expr, bool);

impl fmt::Display for Operand<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.1 {
      write!(f, "({})", self.0)
    } else {
      write!(f, "{}", self.0)
    }
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Constant(value) => write!(f, "{value}"),
      Expr::Variable { name, .. } => write!(f, "{name}"),
      Expr::Polynomial(poly) => write!(f, "{poly}"),
      Expr::Placeholder => write!(f, "_"),
      Expr::Unary { op, operand } => match op {
        UnaryOperator::Negate => {
          write!(f, "-{}", Operand(operand, operand.strength() < 4))
        }
        UnaryOperator::Factorial => {
          write!(f, "{}!", Operand(operand, operand.strength() < 6))
        }
        _ => write!(f, "{}({operand})", op.keyword()),
      },
      Expr::Binary { op, left, right } => match op {
        BinaryOperator::Sum | BinaryOperator::Difference => write!(
          f,
          "{} {} {}",
          left,
          op.keyword(),
          Operand(right, right.strength() <= 1)
        ),
        BinaryOperator::Product | BinaryOperator::Quotient => write!(
          f,
          "{} {} {}",
          Operand(left, left.strength() < 2),
          op.keyword(),
          Operand(right, right.strength() <= 2)
        ),
        BinaryOperator::Power => write!(
          f,
          "{}^{}",
          Operand(left, left.strength() < 5),
          Operand(right, right.strength() < 5)
        ),
        _ => write!(f, "{}({left}, {right})", op.keyword()),
      },
    }
  }
}
