use crate::ast::Expr;
use crate::ast::Literal;
use crate::ast::LiteralKind;
use crate::ast::LiteralTemplatePart;
use crate::ast::Stmt;
use crate::ast::VarDeclMode;
use crate::char::plain_string_contents;
use crate::operator::OperatorName;
use crate::operator::Precedence;
use crate::operator::OPERATORS;
use memchr::memchr2;

pub fn unwrap_groups(mut expr: &Expr) -> &Expr {
  while let Expr::Group(inner) = expr {
    expr = inner;
  }
  expr
}

/// How tightly `expr` binds when printed as is.
pub fn expr_prec(expr: &Expr) -> Precedence {
  match expr {
    Expr::Literal(_)
    | Expr::Array(_)
    | Expr::Object(_)
    | Expr::Function(_)
    | Expr::Method(_)
    | Expr::Class(_)
    | Expr::NewTarget
    | Expr::ImportMeta => Precedence::Primary,
    Expr::Template { tag, .. } => match tag {
      Some(_) => Precedence::Member,
      None => Precedence::Primary,
    },
    Expr::Group(inner) => expr_prec(inner),
    Expr::Binary { operator, .. } | Expr::Unary { operator, .. } => OPERATORS[operator].precedence,
    Expr::Member { .. } | Expr::Index { .. } => Precedence::Member,
    Expr::New { arguments, .. } => match arguments {
      Some(_) => Precedence::Member,
      None => Precedence::New,
    },
    Expr::Call { .. } | Expr::OptionalChain { .. } => Precedence::Call,
    Expr::Yield { .. } | Expr::Conditional { .. } | Expr::Arrow(_) => Precedence::Assign,
    Expr::VarDecl(_) => Precedence::Expr,
  }
}

/// Wraps `expr` in a group if it binds looser than `prec`.
pub fn group_expr(expr: Expr, prec: Precedence) -> Expr {
  if expr_prec(&expr) < prec {
    Expr::Group(Box::new(expr))
  } else {
    expr
  }
}

pub fn binary_expr(operator: OperatorName, left: Expr, right: Expr) -> Expr {
  let op = &OPERATORS[&operator];
  Expr::Binary {
    operator,
    left: Box::new(group_expr(left, op.left)),
    right: Box::new(group_expr(right, op.right)),
  }
}

/// `left, right`, kept left-leaning so no operand needs a group.
pub fn comma_expr(left: Expr, right: Expr) -> Expr {
  match right {
    Expr::Binary {
      operator: OperatorName::Comma,
      left: inner,
      right: last,
    } => Expr::Binary {
      operator: OperatorName::Comma,
      left: Box::new(comma_expr(left, *inner)),
      right: last,
    },
    Expr::Group(inner) if matches!(*inner, Expr::Binary { operator: OperatorName::Comma, .. }) => {
      comma_expr(left, *inner)
    }
    right => binary_expr(OperatorName::Comma, left, right),
  }
}

pub fn cond_expr(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
  Expr::Conditional {
    test: Box::new(group_expr(test, Precedence::Coalesce)),
    consequent: Box::new(group_expr(consequent, Precedence::Assign)),
    alternate: Box::new(group_expr(alternate, Precedence::Assign)),
  }
}

/// Whether evaluating `expr` always produces a boolean.
pub fn is_boolean_expr(expr: &Expr) -> bool {
  match unwrap_groups(expr) {
    Expr::Literal(Literal { kind, .. }) => matches!(kind, LiteralKind::True | LiteralKind::False),
    Expr::Unary { operator, .. } => matches!(operator, OperatorName::LogicalNot | OperatorName::Delete),
    Expr::Binary { operator, left, right } => match operator {
      OperatorName::LogicalAnd | OperatorName::LogicalOr => is_boolean_expr(left) && is_boolean_expr(right),
      OperatorName::Comma | OperatorName::Assignment => is_boolean_expr(right),
      op => matches!(OPERATORS[op].precedence, Precedence::Equals | Precedence::Compare),
    },
    Expr::Conditional {
      consequent, alternate, ..
    } => is_boolean_expr(consequent) && is_boolean_expr(alternate),
    _ => false,
  }
}

/// Structural equality of side-effect-free references and literals, e.g. the same variable twice.
pub fn is_simple_equal(a: &Expr, b: &Expr) -> bool {
  match (unwrap_groups(a), unwrap_groups(b)) {
    (Expr::Literal(a), Expr::Literal(b)) => {
      a.kind == b.kind
        && a.raw == b.raw
        && !matches!(a.kind, LiteralKind::Regex | LiteralKind::Super)
    }
    _ => false,
  }
}

/// Truthiness of a literal that is known without evaluation. Identifiers are never known here, as they depend on
/// bindings.
pub fn literal_truthiness(lit: &Literal) -> Option<bool> {
  let raw = lit.raw.as_slice();
  match lit.kind {
    LiteralKind::True | LiteralKind::Regex => Some(true),
    LiteralKind::False | LiteralKind::Null => Some(false),
    LiteralKind::String => match plain_string_contents(raw) {
      Some(contents) => Some(!contents.is_empty()),
      // Escapes may spell out nothing (line continuations), so only non-empty escapes are conclusive.
      None => None,
    },
    LiteralKind::Number => {
      let mantissa = match memchr2(b'e', b'E', raw) {
        Some(i) => &raw[..i],
        None => raw,
      };
      Some(!mantissa.iter().all(|&c| c == b'0' || c == b'.' || c == b'_'))
    }
    LiteralKind::BinaryNumber | LiteralKind::OctalNumber | LiteralKind::HexNumber => {
      Some(!raw.iter().skip(2).all(|&c| c == b'0' || c == b'_'))
    }
    LiteralKind::BigInt => {
      let digits = raw.strip_suffix(b"n").unwrap_or(raw);
      let digits = match digits {
        [b'0', b'x' | b'X' | b'o' | b'O' | b'b' | b'B', rest @ ..] => rest,
        digits => digits,
      };
      Some(!digits.iter().all(|&c| c == b'0' || c == b'_'))
    }
    LiteralKind::Identifier | LiteralKind::This | LiteralKind::Super => None,
  }
}

pub fn is_true_literal(expr: &Expr) -> bool {
  matches!(unwrap_groups(expr), Expr::Literal(Literal { kind: LiteralKind::True, .. }))
}

pub fn is_false_literal(expr: &Expr) -> bool {
  matches!(unwrap_groups(expr), Expr::Literal(Literal { kind: LiteralKind::False, .. }))
}

/// Evaluating `expr` cannot run user code or throw.
pub fn is_side_effect_free(expr: &Expr) -> bool {
  match expr {
    Expr::Group(inner) => is_side_effect_free(inner),
    Expr::Literal(lit) => lit.kind != LiteralKind::Identifier && lit.kind != LiteralKind::Super,
    Expr::Function(_) | Expr::Arrow(_) => true,
    Expr::Unary { operator, argument } => {
      matches!(
        operator,
        OperatorName::LogicalNot | OperatorName::UnaryNegation | OperatorName::BitwiseNot | OperatorName::Void
      ) && is_side_effect_free(argument)
    }
    Expr::Template { tag: None, parts } => parts
      .iter()
      .all(|p| matches!(p, LiteralTemplatePart::String(_))),
    _ => false,
  }
}

/// Whether any token that may end up first when printing `expr` satisfies `pred`. Descends into every operand that
/// can be printed first, including both branches of a conditional, as reductions may pick either.
pub fn may_start_with(expr: &Expr, pred: &dyn Fn(&Expr) -> bool) -> bool {
  if pred(expr) {
    return true;
  };
  match expr {
    Expr::Group(inner) => may_start_with(inner, pred),
    Expr::Binary { left, .. } => may_start_with(left, pred),
    Expr::Unary { operator, argument } => {
      let op = &OPERATORS[operator];
      if op.is_postfix() {
        return may_start_with(argument, pred);
      };
      // `!!x` may print as `x`.
      match (operator, &**argument) {
        (
          OperatorName::LogicalNot,
          Expr::Unary {
            operator: OperatorName::LogicalNot,
            argument,
          },
        ) => may_start_with(argument, pred),
        _ => false,
      }
    }
    Expr::Call { callee, .. } => may_start_with(callee, pred),
    Expr::Member { object, .. } | Expr::Index { object, .. } | Expr::OptionalChain { object, .. } => {
      may_start_with(object, pred)
    }
    Expr::Template { tag: Some(tag), .. } => may_start_with(tag, pred),
    Expr::Conditional {
      test,
      consequent,
      alternate,
    } => may_start_with(test, pred) || may_start_with(consequent, pred) || may_start_with(alternate, pred),
    _ => false,
  }
}

/// Statements cannot start with these, as they would be read as declarations or blocks.
pub fn is_statement_start_hazard(expr: &Expr) -> bool {
  matches!(expr, Expr::Function(_) | Expr::Class(_) | Expr::Object(_))
}

pub fn is_object_literal(expr: &Expr) -> bool {
  matches!(expr, Expr::Object(_))
}

/// First operand of a comma sequence.
pub fn comma_head(expr: &Expr) -> &Expr {
  match unwrap_groups(expr) {
    Expr::Binary {
      operator: OperatorName::Comma,
      left,
      ..
    } => comma_head(left),
    other => other,
  }
}

/// A call of a function expression, which can be prefixed by `!` at statement start instead of parenthesised.
pub fn is_function_call(expr: &Expr) -> bool {
  match expr {
    Expr::Call { callee, .. } => matches!(unwrap_groups(callee), Expr::Function(_)),
    _ => false,
  }
}

/// Whether printing `expr` in a `for` head could produce an `in` operator outside any brackets, which would turn
/// the loop into a `for-in`.
pub fn contains_in_operator(expr: &Expr) -> bool {
  match expr {
    Expr::Binary {
      operator: OperatorName::In,
      ..
    } => true,
    Expr::Binary { left, right, .. } => contains_in_operator(left) || contains_in_operator(right),
    Expr::Group(inner) => contains_in_operator(inner),
    Expr::Unary { argument, .. } => contains_in_operator(argument),
    Expr::Conditional {
      test,
      consequent,
      alternate,
    } => contains_in_operator(test) || contains_in_operator(consequent) || contains_in_operator(alternate),
    Expr::Call { callee: object, .. }
    | Expr::Member { object, .. }
    | Expr::Index { object, .. }
    | Expr::OptionalChain { object, .. }
    | Expr::New { callee: object, .. } => contains_in_operator(object),
    Expr::Template { tag: Some(tag), .. } => contains_in_operator(tag),
    Expr::Yield {
      argument: Some(argument),
      ..
    } => contains_in_operator(argument),
    Expr::Arrow(func) => func.body.iter().any(|stmt| match stmt {
      Stmt::Expression(e) | Stmt::Return(Some(e)) => contains_in_operator(e),
      _ => false,
    }),
    Expr::VarDecl(decl) => decl
      .declarators
      .iter()
      .any(|d| d.initializer.as_ref().map_or(false, contains_in_operator)),
    _ => false,
  }
}

pub fn is_empty_stmt(stmt: &Stmt) -> bool {
  match stmt {
    Stmt::Empty | Stmt::Debugger => true,
    Stmt::Block(block) => !block.scope.has_declarations() && block.body.iter().all(is_empty_stmt),
    _ => false,
  }
}

/// Control never falls through to the next statement.
pub fn always_exits(stmt: &Stmt) -> bool {
  match stmt {
    Stmt::Return(_) | Stmt::Throw(_) | Stmt::Branch { .. } => true,
    Stmt::Block(block) => block.body.last().map_or(false, always_exits),
    Stmt::If {
      consequent,
      alternate: Some(alternate),
      ..
    } => always_exits(consequent) && always_exits(alternate),
    _ => false,
  }
}

/// Whether printing `stmt` as the consequent of an `if` with an `else` would capture that `else`.
pub fn ends_with_open_if(stmt: &Stmt) -> bool {
  match stmt {
    Stmt::If { alternate, .. } => match alternate {
      None => true,
      Some(alternate) if is_empty_stmt(alternate) => true,
      Some(alternate) => ends_with_open_if(alternate),
    },
    Stmt::While { body, .. }
    | Stmt::For { body, .. }
    | Stmt::ForIn { body, .. }
    | Stmt::ForOf { body, .. }
    | Stmt::With { body, .. }
    | Stmt::Labelled { statement: body, .. } => ends_with_open_if(body),
    _ => false,
  }
}

/// Declares something scoped to the enclosing block, so the block cannot lose its braces.
pub fn declares_lexically(stmt: &Stmt) -> bool {
  match stmt {
    Stmt::VarDecl(decl) => decl.mode != VarDeclMode::Var,
    Stmt::Class(_) | Stmt::Function(_) => true,
    Stmt::Labelled { statement, .. } => declares_lexically(statement),
    _ => false,
  }
}
