use crate::operator::Arity::*;
use crate::operator::Associativity::*;
use crate::operator::OperatorName::*;
use ahash::AHashMap;
use lazy_static::lazy_static;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Comma,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  NullishCoalescing,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

/// Binding strength, loosest first. Derived ordering is used for every "is this tight enough" check.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Precedence {
  Expr,
  Assign,
  Coalesce,
  Or,
  And,
  BitOr,
  BitXor,
  BitAnd,
  Equals,
  Compare,
  Shift,
  Add,
  Mul,
  Exp,
  Unary,
  Update,
  Lhs,
  Call,
  New,
  Member,
  Primary,
}

impl Precedence {
  /// The next tighter level.
  pub fn tighter(self) -> Precedence {
    use Precedence::*;
    match self {
      Expr => Assign,
      Assign => Coalesce,
      Coalesce => Or,
      Or => And,
      And => BitOr,
      BitOr => BitXor,
      BitXor => BitAnd,
      BitAnd => Equals,
      Equals => Compare,
      Compare => Shift,
      Shift => Add,
      Add => Mul,
      Mul => Exp,
      Exp => Unary,
      Unary => Update,
      Update => Lhs,
      Lhs => Call,
      Call => New,
      New => Member,
      Member => Primary,
      Primary => Primary,
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Arity {
  Unary,
  Binary,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Associativity {
  Left,
  Right,
}

pub struct Operator {
  pub name: OperatorName,
  pub arity: Arity,
  pub associativity: Associativity,
  pub precedence: Precedence,
  // Minimum precedence of the left operand, or of the only operand of a unary operator.
  pub left: Precedence,
  // Minimum precedence of the right operand. Same as `left` for unary operators.
  pub right: Precedence,
  pub syntax: &'static str,
}

impl Operator {
  /// Spelled as a word, so it needs word boundaries on both sides.
  pub fn is_keyword(&self) -> bool {
    self.syntax.as_bytes()[0].is_ascii_alphabetic()
  }

  pub fn is_postfix(&self) -> bool {
    self.arity == Unary && self.associativity == Left
  }
}

const PRECEDENCE_LEVELS: &'static [(Precedence, &'static [(OperatorName, Arity, Associativity, &'static str)])] = &[
  (Precedence::Update, &[
    (PostfixIncrement, Unary, Left, "++"),
    (PostfixDecrement, Unary, Left, "--"),
    (PrefixIncrement, Unary, Right, "++"),
    (PrefixDecrement, Unary, Right, "--"),
  ]),
  (Precedence::Unary, &[
    (LogicalNot, Unary, Right, "!"),
    (BitwiseNot, Unary, Right, "~"),
    (UnaryPlus, Unary, Right, "+"),
    (UnaryNegation, Unary, Right, "-"),
    (Typeof, Unary, Right, "typeof"),
    (Void, Unary, Right, "void"),
    (Delete, Unary, Right, "delete"),
    (Await, Unary, Right, "await"),
  ]),
  (Precedence::Exp, &[(Exponentiation, Binary, Right, "**")]),
  (Precedence::Mul, &[
    (Multiplication, Binary, Left, "*"),
    (Division, Binary, Left, "/"),
    (Remainder, Binary, Left, "%"),
  ]),
  (Precedence::Add, &[(Addition, Binary, Left, "+"), (Subtraction, Binary, Left, "-")]),
  (Precedence::Shift, &[
    (BitwiseLeftShift, Binary, Left, "<<"),
    (BitwiseRightShift, Binary, Left, ">>"),
    (BitwiseUnsignedRightShift, Binary, Left, ">>>"),
  ]),
  (Precedence::Compare, &[
    (LessThan, Binary, Left, "<"),
    (LessThanOrEqual, Binary, Left, "<="),
    (GreaterThan, Binary, Left, ">"),
    (GreaterThanOrEqual, Binary, Left, ">="),
    (In, Binary, Left, "in"),
    (Instanceof, Binary, Left, "instanceof"),
  ]),
  (Precedence::Equals, &[
    (Equality, Binary, Left, "=="),
    (Inequality, Binary, Left, "!="),
    (StrictEquality, Binary, Left, "==="),
    (StrictInequality, Binary, Left, "!=="),
  ]),
  (Precedence::BitAnd, &[(BitwiseAnd, Binary, Left, "&")]),
  (Precedence::BitXor, &[(BitwiseXor, Binary, Left, "^")]),
  (Precedence::BitOr, &[(BitwiseOr, Binary, Left, "|")]),
  (Precedence::And, &[(LogicalAnd, Binary, Left, "&&")]),
  (Precedence::Or, &[(LogicalOr, Binary, Left, "||")]),
  // Cannot be mixed with `||` or `&&` without parentheses, see `operand_minimums`.
  (Precedence::Coalesce, &[(NullishCoalescing, Binary, Left, "??")]),
  (Precedence::Assign, &[
    (Assignment, Binary, Right, "="),
    (AssignmentAddition, Binary, Right, "+="),
    (AssignmentBitwiseAnd, Binary, Right, "&="),
    (AssignmentBitwiseLeftShift, Binary, Right, "<<="),
    (AssignmentBitwiseOr, Binary, Right, "|="),
    (AssignmentBitwiseRightShift, Binary, Right, ">>="),
    (AssignmentBitwiseUnsignedRightShift, Binary, Right, ">>>="),
    (AssignmentBitwiseXor, Binary, Right, "^="),
    (AssignmentDivision, Binary, Right, "/="),
    (AssignmentExponentiation, Binary, Right, "**="),
    (AssignmentLogicalAnd, Binary, Right, "&&="),
    (AssignmentLogicalOr, Binary, Right, "||="),
    (AssignmentMultiplication, Binary, Right, "*="),
    (AssignmentNullishCoalescing, Binary, Right, "??="),
    (AssignmentRemainder, Binary, Right, "%="),
    (AssignmentSubtraction, Binary, Right, "-="),
  ]),
  (Precedence::Expr, &[(Comma, Binary, Left, ",")]),
];

fn operand_minimums(
  name: OperatorName,
  arity: Arity,
  associativity: Associativity,
  precedence: Precedence,
) -> (Precedence, Precedence) {
  match (name, precedence, arity, associativity) {
    // `-a**b` is a syntax error, so the base must be at least an update expression.
    (Exponentiation, ..) => (Precedence::Update, Precedence::Exp),
    (NullishCoalescing, ..) => (Precedence::BitOr, Precedence::BitOr),
    (_, Precedence::Assign, ..) => (Precedence::Lhs, Precedence::Assign),
    (Comma, ..) => (Precedence::Expr, Precedence::Assign),
    (_, _, Unary, Left) => (Precedence::Lhs, Precedence::Lhs),
    (_, _, Unary, Right) => (precedence, precedence),
    (_, _, Binary, Left) => (precedence, precedence.tighter()),
    (_, _, Binary, Right) => (precedence.tighter(), precedence),
  }
}

lazy_static! {
  pub static ref OPERATORS: AHashMap<OperatorName, Operator> = {
    let mut map = AHashMap::<OperatorName, Operator>::new();
    for &(precedence, ops) in PRECEDENCE_LEVELS.iter() {
      for &(name, arity, associativity, syntax) in ops.iter() {
        let (left, right) = operand_minimums(name, arity, associativity, precedence);
        map.insert(
          name,
          Operator {
            name,
            arity,
            associativity,
            precedence,
            left,
            right,
            syntax,
          },
        );
      }
    }
    map
  };
}
