use super::analysis::always_exits;
use super::analysis::comma_head;
use super::analysis::contains_in_operator;
use super::analysis::declares_lexically;
use super::analysis::ends_with_open_if;
use super::analysis::is_empty_stmt;
use super::analysis::is_function_call;
use super::analysis::is_statement_start_hazard;
use super::analysis::may_start_with;
use super::analysis::unwrap_groups;
use super::MinifyPass;
use crate::ast::Block;
use crate::ast::BranchKind;
use crate::ast::CatchBlock;
use crate::ast::Export;
use crate::ast::ExportName;
use crate::ast::ExportNames;
use crate::ast::Expr;
use crate::ast::Function;
use crate::ast::Import;
use crate::ast::Literal;
use crate::ast::LiteralKind;
use crate::ast::Pattern;
use crate::ast::Stmt;
use crate::ast::SwitchBranch;
use crate::ast::VarDeclMode;
use crate::operator::Precedence;
use crate::source::SourceRange;

fn is_hoisted(stmt: &Stmt) -> bool {
  match stmt {
    Stmt::Function(_) => true,
    Stmt::VarDecl(decl) => decl.mode == VarDeclMode::Var,
    _ => false,
  }
}

// An `else` branch whose statements can join the enclosing list without capturing or leaking any declaration.
fn can_inline_else(alternate: &Stmt) -> bool {
  match alternate {
    Stmt::Block(block) => !block.scope.has_declarations() && !block.body.iter().any(declares_lexically),
    stmt => !declares_lexically(stmt),
  }
}

impl MinifyPass<'_> {
  /// Fuses and prints the statements of one list. `in_scope` is as for `merge_stmt_list`.
  pub(crate) fn minify_stmt_list(&mut self, list: Vec<Stmt>, in_scope: bool) {
    let merged = self.merge_stmt_list(list, in_scope);
    self.print_stmts(merged);
  }

  /// Prints already fused statements. Statements after one that always exits are dropped, apart from the
  /// declarations the rest of the list can still see through hoisting.
  pub(crate) fn print_stmts(&mut self, list: Vec<Stmt>) {
    let mut exited = false;
    for stmt in list {
      let stmt = if !exited {
        exited = always_exits(&stmt);
        stmt
      } else if is_hoisted(&stmt) {
        match stmt {
          Stmt::VarDecl(mut decl) => {
            for declarator in decl.declarators.iter_mut() {
              if matches!(declarator.pattern, Pattern::Identifier(_)) {
                declarator.initializer = None;
              };
            }
            Stmt::VarDecl(decl)
          }
          stmt => stmt,
        }
      } else {
        continue;
      };
      self.out.write_semicolon();
      self.minify_stmt(stmt, true);
    }
  }

  /// `{…}` around already fused statements.
  pub(crate) fn write_braced(&mut self, list: Vec<Stmt>) {
    self.out.write(b"{");
    self.out.clear_semicolon();
    self.print_stmts(list);
    self.out.clear_semicolon();
    self.out.write(b"}");
  }

  fn minify_block(&mut self, block: Block) {
    let Block { body, scope } = block;
    self.in_scope(scope, |p| {
      let merged = p.merge_stmt_list(body, true);
      p.write_braced(merged);
    });
  }

  /// The single statement body of a loop, `if`, `with` or label.
  fn minify_body(&mut self, stmt: Stmt) {
    let stmt = self.stmt_to_expr(stmt);
    self.print_body(stmt);
  }

  fn print_body(&mut self, stmt: Stmt) {
    if is_empty_stmt(&stmt) {
      self.out.write(b";");
    } else {
      self.minify_stmt(stmt, false);
    };
  }

  fn minify_expr_stmt(&mut self, expr: Expr) {
    if is_function_call(comma_head(&expr)) {
      // `!function(){}()` is a byte shorter than `(function(){})()`.
      self.out.write(b"!");
      self.minify_expr(expr, Precedence::Expr);
    } else if may_start_with(&expr, &is_statement_start_hazard) {
      self.grouped(true, |p| p.minify_expr(expr, Precedence::Expr));
    } else {
      self.minify_expr(expr, Precedence::Expr);
    };
    self.out.require_semicolon();
  }

  fn minify_if(&mut self, test: Expr, consequent: Stmt, alternate: Option<Stmt>, in_list: bool) {
    let consequent = self.stmt_to_expr(consequent);
    let alternate = alternate
      .map(|alternate| self.stmt_to_expr(alternate))
      .filter(|alternate| !is_empty_stmt(alternate));
    self.out.write_keyword(b"if");
    self.out.write(b"(");
    let alternate = match alternate {
      Some(alternate) if is_empty_stmt(&consequent) => {
        // `if(C);else B` as `if(!C)B`.
        self.minify_boolean_expr(test, true, Precedence::Expr);
        self.out.write(b")");
        self.print_body(alternate);
        return;
      }
      alternate => alternate,
    };
    self.minify_expr(test, Precedence::Expr);
    self.out.write(b")");
    let alternate = match alternate {
      None => return self.print_body(consequent),
      Some(alternate) => alternate,
    };

    let exits = always_exits(&consequent);
    if ends_with_open_if(&consequent) {
      self.out.write(b"{");
      self.minify_stmt(consequent, false);
      self.out.clear_semicolon();
      self.out.write(b"}");
    } else {
      self.print_body(consequent);
    };
    self.out.write_semicolon();
    if in_list && exits && can_inline_else(&alternate) {
      match alternate {
        Stmt::Block(Block { body, scope }) => self.in_scope(scope, |p| p.minify_stmt_list(body, true)),
        alternate => self.minify_stmt(alternate, true),
      };
    } else {
      self.out.write_keyword(b"else");
      self.print_body(alternate);
    };
  }

  /// Initialiser of a `for` head, where a bare `in` would make it a `for-in`.
  fn minify_for_init(&mut self, init: Expr) {
    match init {
      Expr::VarDecl(decl) => self.minify_var_decl(decl, true),
      init if contains_in_operator(&init) => self.grouped(true, |p| p.minify_expr(init, Precedence::Expr)),
      init => self.minify_expr(init, Precedence::Expr),
    };
  }

  fn minify_for_lhs(&mut self, lhs: Expr) {
    match lhs {
      Expr::VarDecl(decl) => self.minify_var_decl(decl, true),
      lhs => self.minify_expr(lhs, Precedence::Lhs),
    };
  }

  /// `{case …}` of a `switch` whose case block scope is already entered.
  fn minify_switch_body(&mut self, branches: Vec<SwitchBranch>) {
    self.out.write(b"{");
    for SwitchBranch { case, body } in branches {
      self.out.write_semicolon();
      match case {
        Some(case) => {
          self.out.write_keyword(b"case");
          self.minify_expr(case, Precedence::Expr);
        }
        None => self.out.write_keyword(b"default"),
      };
      self.out.write(b":");
      self.minify_stmt_list(body, true);
    }
    self.out.clear_semicolon();
    self.out.write(b"}");
  }

  fn minify_catch(&mut self, catch: CatchBlock) {
    let CatchBlock {
      parameter,
      body,
      scope,
    } = catch;
    self.out.write_keyword(b"catch");
    self.in_scope(scope, |p| {
      let parameter = parameter.filter(|parameter| match parameter {
        // Optional catch binding.
        Pattern::Identifier(name) => p.renamer.binding(name.as_slice()).map_or(true, |(_, var)| var.uses > 0),
        Pattern::Array { .. } | Pattern::Object { .. } => true,
      });
      if let Some(parameter) = parameter {
        p.out.write(b"(");
        p.minify_pattern(parameter);
        p.out.write(b")");
      };
      let merged = p.merge_stmt_list(body, true);
      p.write_braced(merged);
    });
  }

  fn minify_try(&mut self, wrapped: Block, catch: Option<CatchBlock>, finally: Option<Block>) {
    self.out.write_keyword(b"try");
    self.minify_block(wrapped);
    let has_catch = catch.is_some();
    if let Some(catch) = catch {
      self.minify_catch(catch);
    };
    if let Some(finally) = finally {
      let empty = !finally.scope.has_declarations() && finally.body.iter().all(is_empty_stmt);
      if !has_catch || !empty {
        self.out.write_keyword(b"finally");
        self.minify_block(finally);
      };
    };
  }

  pub(crate) fn minify_function_decl(&mut self, func: Function) {
    let Function {
      is_async,
      generator,
      name,
      params,
      body,
      scope,
    } = func;
    if is_async {
      self.out.write_keyword(b"async");
    };
    self.out.write_keyword(b"function");
    if generator {
      self.out.write(b"*");
    };
    // Declared in the enclosing scope.
    if let Some(name) = name {
      self.write_name(&name);
    };
    self.in_scope(scope, |p| {
      p.minify_params(params);
      p.minify_function_body(body);
    });
  }

  fn write_module(&mut self, module: &SourceRange) {
    self.out.write_keyword(b"from");
    self.write_module_string(module);
  }

  fn write_module_string(&mut self, module: &SourceRange) {
    self.minify_expr(
      Expr::Literal(Literal {
        kind: LiteralKind::String,
        raw: module.clone(),
      }),
      Precedence::Primary,
    );
  }

  fn write_namespace(&mut self, alias: Option<SourceRange>, local: bool) {
    self.out.write(b"*");
    if let Some(alias) = alias {
      self.out.write_keyword(b"as");
      if local {
        self.write_name(&alias);
      } else {
        self.write_word(alias.as_slice());
      };
    };
  }

  /// `{a as b,c}`. For imports the alias is the local binding; for local exports the target is.
  fn write_export_names(&mut self, names: Vec<ExportName>, local_alias: bool, local_target: bool) {
    self.out.write(b"{");
    for (i, ExportName { target, alias }) in names.into_iter().enumerate() {
      if i > 0 {
        self.out.write(b",");
      };
      let target_out = if local_target {
        self.renamer.rename(&target)
      } else {
        target
      };
      let alias_out = if local_alias {
        self.renamer.rename(&alias)
      } else {
        alias
      };
      self.write_word(target_out.as_slice());
      if alias_out != target_out {
        self.out.write_keyword(b"as");
        self.write_word(alias_out.as_slice());
      };
    }
    self.out.write(b"}");
  }

  fn minify_import(&mut self, import: Import) {
    let Import {
      default,
      names,
      module,
    } = import;
    self.out.write_keyword(b"import");
    if default.is_none() && names.is_none() {
      self.write_module_string(&module);
      return;
    };
    if let Some(default) = &default {
      self.write_name(default);
    };
    if let Some(names) = names {
      if default.is_some() {
        self.out.write(b",");
      };
      match names {
        ExportNames::All(alias) => self.write_namespace(alias, true),
        ExportNames::Specific(names) => self.write_export_names(names, true, false),
      };
    };
    self.write_module(&module);
  }

  fn minify_export(&mut self, export: Export) {
    self.out.write_keyword(b"export");
    match export {
      Export::Decl(decl) => self.minify_stmt(*decl, false),
      Export::Default(expr) => {
        self.out.write_keyword(b"default");
        match expr {
          Expr::Function(func) => self.minify_expr(Expr::Function(func), Precedence::Assign),
          Expr::Class(class) => self.minify_class(*class),
          expr => {
            let hazard = may_start_with(&expr, &|e| {
              matches!(unwrap_groups(e), Expr::Function(_) | Expr::Class(_))
            });
            if hazard {
              self.grouped(true, |p| p.minify_expr(expr, Precedence::Expr));
            } else {
              self.minify_expr(expr, Precedence::Assign);
            };
            self.out.require_semicolon();
          }
        };
      }
      Export::List { names, from } => {
        match names {
          ExportNames::All(alias) => self.write_namespace(alias, false),
          ExportNames::Specific(names) => self.write_export_names(names, false, from.is_none()),
        };
        if let Some(from) = from {
          self.write_module(&from);
        };
        self.out.require_semicolon();
      }
    };
  }

  /// Prints one statement. `in_list` is false for the single-statement body of another statement.
  pub(crate) fn minify_stmt(&mut self, stmt: Stmt, in_list: bool) {
    match stmt {
      Stmt::Expression(expr) => self.minify_expr_stmt(expr),
      Stmt::VarDecl(decl) => {
        self.minify_var_decl(decl, false);
        self.out.require_semicolon();
      }
      Stmt::If {
        test,
        consequent,
        alternate,
      } => self.minify_if(test, *consequent, alternate.map(|a| *a), in_list),
      Stmt::Block(block) => self.minify_block(block),
      Stmt::Return(value) => {
        self.out.write_keyword(b"return");
        match value {
          Some(Expr::Literal(Literal {
            kind: LiteralKind::Identifier,
            raw,
          })) if raw.as_slice() == b"undefined" && !self.renamer.is_bound(b"undefined") => {}
          Some(value) => self.minify_expr(value, Precedence::Expr),
          None => {}
        };
        self.out.require_semicolon();
      }
      Stmt::Throw(value) => {
        self.out.write_keyword(b"throw");
        self.minify_expr(value, Precedence::Expr);
        self.out.require_semicolon();
      }
      Stmt::Labelled { name, statement } => {
        self.write_word(name.as_slice());
        self.out.write(b":");
        self.minify_body(*statement);
      }
      Stmt::Branch { kind, label } => {
        self.out.write_keyword(match kind {
          BranchKind::Break => b"break",
          BranchKind::Continue => b"continue",
        });
        if let Some(label) = label {
          self.write_word(label.as_slice());
        };
        self.out.require_semicolon();
      }
      Stmt::With { object, body } => {
        self.out.write_keyword(b"with");
        self.out.write(b"(");
        self.minify_expr(object, Precedence::Expr);
        self.out.write(b")");
        self.minify_body(*body);
      }
      Stmt::DoWhile { body, condition } => {
        self.out.write_keyword(b"do");
        self.minify_body(*body);
        self.out.write_semicolon();
        self.out.write_keyword(b"while");
        self.out.write(b"(");
        self.minify_expr(condition, Precedence::Expr);
        self.out.write(b")");
        self.out.require_semicolon();
      }
      Stmt::While { condition, body } => {
        self.out.write_keyword(b"while");
        self.out.write(b"(");
        self.minify_expr(condition, Precedence::Expr);
        self.out.write(b")");
        self.minify_body(*body);
      }
      Stmt::For {
        init,
        condition,
        post,
        body,
        scope,
      } => self.in_scope(scope, |p| {
        p.out.write_keyword(b"for");
        p.out.write(b"(");
        if let Some(init) = init {
          p.minify_for_init(init);
        };
        p.out.write(b";");
        if let Some(condition) = condition {
          p.minify_expr(condition, Precedence::Expr);
        };
        p.out.write(b";");
        if let Some(post) = post {
          p.minify_expr(post, Precedence::Expr);
        };
        p.out.write(b")");
        p.minify_body(*body);
      }),
      Stmt::ForIn {
        lhs,
        rhs,
        body,
        scope,
      } => self.in_scope(scope, |p| {
        p.out.write_keyword(b"for");
        p.out.write(b"(");
        p.minify_for_lhs(lhs);
        p.out.write_keyword(b"in");
        p.minify_expr(rhs, Precedence::Expr);
        p.out.write(b")");
        p.minify_body(*body);
      }),
      Stmt::ForOf {
        is_await,
        lhs,
        rhs,
        body,
        scope,
      } => self.in_scope(scope, |p| {
        p.out.write_keyword(b"for");
        if is_await {
          p.out.write_keyword(b"await");
        };
        p.out.write(b"(");
        p.minify_for_lhs(lhs);
        p.out.write_keyword(b"of");
        p.minify_expr(rhs, Precedence::Assign);
        p.out.write(b")");
        p.minify_body(*body);
      }),
      Stmt::Switch {
        test,
        branches,
        scope,
      } => {
        // The discriminant is evaluated outside of the case block.
        self.out.write_keyword(b"switch");
        self.out.write(b"(");
        self.minify_expr(test, Precedence::Expr);
        self.out.write(b")");
        self.in_scope(scope, |p| p.minify_switch_body(branches));
      }
      Stmt::Try {
        wrapped,
        catch,
        finally,
      } => self.minify_try(wrapped, catch, finally),
      Stmt::Function(func) => self.minify_function_decl(func),
      Stmt::Class(class) => self.minify_class(class),
      Stmt::Debugger | Stmt::Empty => self.out.write(b";"),
      Stmt::Import(import) => {
        self.minify_import(import);
        self.out.require_semicolon();
      }
      Stmt::Export(export) => self.minify_export(export),
    };
  }
}
