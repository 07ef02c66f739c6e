use super::analysis::binary_expr;
use super::analysis::comma_expr;
use super::analysis::cond_expr;
use super::analysis::declares_lexically;
use super::analysis::is_empty_stmt;
use super::analysis::is_side_effect_free;
use super::MinifyPass;
use crate::ast::Block;
use crate::ast::Expr;
use crate::ast::Literal;
use crate::ast::LiteralKind;
use crate::ast::Pattern;
use crate::ast::Stmt;
use crate::ast::VarDeclMode;
use crate::ast::VariableDeclarator;
use crate::operator::OperatorName;
use crate::symbol::Identifier;
use crate::symbol::Scope;
use tracing::trace;

type Unfused = (Stmt, Stmt);

fn is_string_literal(expr: &Expr) -> bool {
  matches!(expr, Expr::Literal(Literal {
    kind: LiteralKind::String,
    ..
  }))
}

fn if_stmt(test: Expr, consequent: Stmt, alternate: Stmt) -> Stmt {
  Stmt::If {
    test,
    consequent: Box::new(consequent),
    alternate: if is_empty_stmt(&alternate) {
      None
    } else {
      Some(Box::new(alternate))
    },
  }
}

/// Folds two adjacent statements into one, or hands them back.
fn fuse_pair(left: Stmt, right: Stmt) -> Result<Stmt, Unfused> {
  match left {
    Stmt::Expression(x) => match right {
      Stmt::Expression(y) => Ok(Stmt::Expression(comma_expr(x, y))),
      Stmt::Return(Some(y)) => Ok(Stmt::Return(Some(comma_expr(x, y)))),
      Stmt::Throw(y) => Ok(Stmt::Throw(comma_expr(x, y))),
      Stmt::For {
        init,
        condition,
        post,
        body,
        scope,
      } if !matches!(init, Some(Expr::VarDecl(_))) => Ok(Stmt::For {
        init: Some(match init {
          Some(init) => comma_expr(x, init),
          None => x,
        }),
        condition,
        post,
        body,
        scope,
      }),
      Stmt::While { condition, body } => Ok(Stmt::For {
        init: Some(x),
        condition: Some(condition),
        post: None,
        body,
        scope: Scope::block(),
      }),
      Stmt::Switch { test, branches, scope } => Ok(Stmt::Switch {
        test: comma_expr(x, test),
        branches,
        scope,
      }),
      Stmt::With { object, body } => Ok(Stmt::With {
        object: comma_expr(x, object),
        body,
      }),
      Stmt::If {
        test,
        consequent,
        alternate,
      } => Ok(Stmt::If {
        test: comma_expr(x, test),
        consequent,
        alternate,
      }),
      right => Err((Stmt::Expression(x), right)),
    },
    Stmt::VarDecl(mut decl) => match right {
      Stmt::VarDecl(next) if next.mode == decl.mode => {
        decl.declarators.extend(next.declarators);
        Ok(Stmt::VarDecl(decl))
      }
      Stmt::For {
        init: Some(Expr::VarDecl(init)),
        condition,
        post,
        body,
        scope,
      } if decl.mode == VarDeclMode::Var && init.mode == VarDeclMode::Var => {
        decl.declarators.extend(init.declarators);
        Ok(Stmt::For {
          init: Some(Expr::VarDecl(decl)),
          condition,
          post,
          body,
          scope,
        })
      }
      Stmt::While { condition, body } if decl.mode == VarDeclMode::Var => Ok(Stmt::For {
        init: Some(Expr::VarDecl(decl)),
        condition: Some(condition),
        post: None,
        body,
        scope: Scope::block(),
      }),
      right => Err((Stmt::VarDecl(decl), right)),
    },
    left => Err((left, right)),
  }
}

/// `if(C)return V;return W` and the `throw` equivalent, with either branch of the `if` being the non-empty one.
fn pop_after(merged: &mut Vec<Stmt>, prologue: usize) -> Option<Stmt> {
  if merged.len() > prologue {
    merged.pop()
  } else {
    None
  }
}

fn fuse_exit(prev: Stmt, next: Stmt) -> Result<Stmt, Unfused> {
  let (test, consequent, alternate) = match prev {
    Stmt::If {
      test,
      consequent,
      alternate,
    } => (test, *consequent, alternate.map_or(Stmt::Empty, |a| *a)),
    prev => return Err((prev, next)),
  };
  match (consequent, alternate, next) {
    (Stmt::Return(Some(v)), alt, Stmt::Return(Some(w))) if is_empty_stmt(&alt) => {
      Ok(Stmt::Return(Some(cond_expr(test, v, w))))
    }
    (cons, Stmt::Return(Some(v)), Stmt::Return(Some(w))) if is_empty_stmt(&cons) => {
      Ok(Stmt::Return(Some(cond_expr(test, w, v))))
    }
    (Stmt::Throw(v), alt, Stmt::Throw(w)) if is_empty_stmt(&alt) => Ok(Stmt::Throw(cond_expr(test, v, w))),
    (cons, Stmt::Throw(v), Stmt::Throw(w)) if is_empty_stmt(&cons) => Ok(Stmt::Throw(cond_expr(test, w, v))),
    (cons, alt, next) => Err((if_stmt(test, cons, alt), next)),
  }
}

impl MinifyPass<'_> {
  /// Rewrites `stmt` into an expression statement or another shorter statement where that is equivalent.
  pub(crate) fn stmt_to_expr(&self, stmt: Stmt) -> Stmt {
    match stmt {
      Stmt::If {
        test,
        consequent,
        alternate,
      } => self.if_to_expr(test, *consequent, alternate.map_or(Stmt::Empty, |a| *a)),
      Stmt::Block(block) => self.block_to_stmt(block),
      stmt @ (Stmt::Expression(_)
      | Stmt::VarDecl(_)
      | Stmt::Return(_)
      | Stmt::Labelled { .. }
      | Stmt::Branch { .. }
      | Stmt::With { .. }
      | Stmt::DoWhile { .. }
      | Stmt::While { .. }
      | Stmt::For { .. }
      | Stmt::ForIn { .. }
      | Stmt::ForOf { .. }
      | Stmt::Switch { .. }
      | Stmt::Throw(_)
      | Stmt::Try { .. }
      | Stmt::Function(_)
      | Stmt::Class(_)
      | Stmt::Debugger
      | Stmt::Empty
      | Stmt::Import(_)
      | Stmt::Export(_)) => stmt,
    }
  }

  fn if_to_expr(&self, test: Expr, consequent: Stmt, alternate: Stmt) -> Stmt {
    let (test, consequent, alternate) = match test {
      Expr::Unary {
        operator: OperatorName::LogicalNot,
        argument,
      } => (*argument, alternate, consequent),
      test => (test, consequent, alternate),
    };
    match (is_empty_stmt(&consequent), is_empty_stmt(&alternate)) {
      (true, true) => Stmt::Expression(test),
      (false, true) => match self.stmt_to_expr(consequent) {
        Stmt::Expression(x) => Stmt::Expression(binary_expr(OperatorName::LogicalAnd, test, x)),
        consequent => if_stmt(test, consequent, Stmt::Empty),
      },
      (true, false) => match self.stmt_to_expr(alternate) {
        Stmt::Expression(y) => Stmt::Expression(binary_expr(OperatorName::LogicalOr, test, y)),
        alternate => if_stmt(test, Stmt::Empty, alternate),
      },
      (false, false) => match (self.stmt_to_expr(consequent), self.stmt_to_expr(alternate)) {
        (Stmt::Expression(x), Stmt::Expression(y)) => Stmt::Expression(cond_expr(test, x, y)),
        (Stmt::Throw(x), Stmt::Throw(y)) => Stmt::Throw(cond_expr(test, x, y)),
        (Stmt::Return(Some(x)), Stmt::Return(Some(y))) => Stmt::Return(Some(cond_expr(test, x, y))),
        (consequent, alternate) => if_stmt(test, consequent, alternate),
      },
    }
  }

  /// Fuses the block's own list, then drops the braces if a single statement that declares nothing remains.
  fn block_to_stmt(&self, block: Block) -> Stmt {
    let Block { body, scope } = block;
    let mut body = self.merge_stmt_list(body, false);
    if scope.has_declarations() || body.len() > 1 {
      return Stmt::Block(Block { body, scope });
    };
    match body.pop() {
      None => Stmt::Empty,
      Some(stmt) if declares_lexically(&stmt) => Stmt::Block(Block {
        body: vec![stmt],
        scope,
      }),
      Some(stmt) => self.stmt_to_expr(stmt),
    }
  }

  /// Whether the binding `name` declared by a statement of the list being fused is never referenced. Declarations
  /// scoped to a block are only trusted when that block's scope is the innermost one (`in_scope`).
  fn is_unused_binding(&self, name: &Identifier, lexical: bool, in_scope: bool) -> bool {
    if lexical && !in_scope {
      return false;
    };
    match self.renamer.binding(name.as_slice()) {
      Some((depth, var)) => depth > 0 && var.uses == 0 && (!lexical || depth == self.renamer.depth()),
      None => false,
    }
  }

  fn is_prunable_declarator(&self, d: &VariableDeclarator, lexical: bool, in_scope: bool) -> bool {
    match &d.pattern {
      Pattern::Identifier(name) => {
        d.initializer.as_ref().map_or(true, is_side_effect_free) && self.is_unused_binding(name, lexical, in_scope)
      }
      Pattern::Array { .. } | Pattern::Object { .. } => false,
    }
  }

  /// Drops declarations of bindings that are never used, unless they belong to the program scope.
  fn prune_unused(&self, stmt: Stmt, in_scope: bool) -> Stmt {
    if self.renamer.in_global_scope() {
      return stmt;
    };
    match stmt {
      Stmt::VarDecl(mut decl) => {
        let lexical = decl.mode != VarDeclMode::Var;
        let before = decl.declarators.len();
        decl
          .declarators
          .retain(|d| !self.is_prunable_declarator(d, lexical, in_scope));
        if decl.declarators.len() < before {
          trace!(pruned = before - decl.declarators.len(), "dropped unused declarators");
        };
        if decl.declarators.is_empty() {
          Stmt::Empty
        } else {
          Stmt::VarDecl(decl)
        }
      }
      Stmt::Function(func)
        if func
          .name
          .as_ref()
          .map_or(false, |name| self.is_unused_binding(name, true, in_scope)) =>
      {
        trace!("dropped unused function declaration");
        Stmt::Empty
      }
      stmt => stmt,
    }
  }

  /// Collapses the statements of one list into fewer, equivalent statements. `in_scope` tells whether the scope the
  /// list belongs to is the innermost one on the renamer's stack.
  pub(crate) fn merge_stmt_list(&self, list: Vec<Stmt>, in_scope: bool) -> Vec<Stmt> {
    let mut merged = Vec::<Stmt>::with_capacity(list.len());
    // Leading string statements are directives such as `"use strict"` and stay as they are.
    let mut prologue = 0;
    for stmt in list {
      let mut stmt = self.stmt_to_expr(self.prune_unused(stmt, in_scope));
      if is_empty_stmt(&stmt) {
        continue;
      };
      if prologue == merged.len() && matches!(&stmt, Stmt::Expression(x) if is_string_literal(x)) {
        merged.push(stmt);
        prologue += 1;
        continue;
      };
      if let Some(prev) = pop_after(&mut merged, prologue) {
        stmt = match fuse_pair(prev, stmt) {
          Ok(fused) => {
            trace!(survivors = merged.len() + 1, "fused adjacent statements");
            fused
          }
          Err((prev, stmt)) => {
            merged.push(prev);
            stmt
          }
        };
      };
      // One hop back: an `if` that exits, followed by an exit of the same kind.
      if let Some(prev) = pop_after(&mut merged, prologue) {
        stmt = match fuse_exit(prev, stmt) {
          Ok(fused) => {
            trace!(survivors = merged.len() + 1, "fused conditional exit");
            fused
          }
          Err((prev, stmt)) => {
            merged.push(prev);
            stmt
          }
        };
      };
      merged.push(stmt);
    }
    merged
  }
}
