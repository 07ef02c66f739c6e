use super::analysis::binary_expr;
use super::analysis::contains_in_operator;
use super::analysis::expr_prec;
use super::analysis::is_boolean_expr;
use super::analysis::is_false_literal;
use super::analysis::is_object_literal;
use super::analysis::is_simple_equal;
use super::analysis::is_true_literal;
use super::analysis::literal_truthiness;
use super::analysis::may_start_with;
use super::analysis::unwrap_groups;
use super::MinifyPass;
use crate::ast::ArrayElement;
use crate::ast::CallArg;
use crate::ast::ChainAccess;
use crate::ast::ChainLink;
use crate::ast::Class;
use crate::ast::ClassMember;
use crate::ast::ClassOrObjectMemberKey;
use crate::ast::Expr;
use crate::ast::Function;
use crate::ast::Literal;
use crate::ast::LiteralKind;
use crate::ast::LiteralTemplatePart;
use crate::ast::Method;
use crate::ast::MethodKind;
use crate::ast::ObjectMember;
use crate::ast::ParamDecl;
use crate::ast::Pattern;
use crate::ast::Stmt;
use crate::ast::VarDecl;
use crate::char::is_canonical_integer;
use crate::char::is_identifier_name;
use crate::char::plain_string_contents;
use crate::operator::OperatorName;
use crate::operator::Precedence;
use crate::operator::OPERATORS;
use crate::source::SourceRange;
use crate::symbol::Identifier;

/// Strips source parentheses off an owned expression.
fn into_unwrapped(expr: Expr) -> Expr {
  match expr {
    Expr::Group(inner) => into_unwrapped(*inner),
    expr => expr,
  }
}

fn inverse_equality(operator: OperatorName) -> Option<OperatorName> {
  match operator {
    OperatorName::Equality => Some(OperatorName::Inequality),
    OperatorName::Inequality => Some(OperatorName::Equality),
    OperatorName::StrictEquality => Some(OperatorName::StrictInequality),
    OperatorName::StrictInequality => Some(OperatorName::StrictEquality),
    _ => None,
  }
}

fn is_short_circuit(operator: OperatorName) -> bool {
  matches!(
    operator,
    OperatorName::LogicalAnd | OperatorName::LogicalOr | OperatorName::NullishCoalescing
  )
}

// `new a().b` and `new (a().b)` differ, so a callee with a call anywhere in its member chain needs parentheses.
fn callee_contains_call(expr: &Expr) -> bool {
  match unwrap_groups(expr) {
    Expr::Call { .. } | Expr::OptionalChain { .. } => true,
    Expr::Member { object, .. } | Expr::Index { object, .. } => callee_contains_call(object),
    Expr::Template { tag: Some(tag), .. } => callee_contains_call(tag),
    _ => false,
  }
}

fn is_simple_param(params: &[ParamDecl]) -> bool {
  matches!(params, [ParamDecl {
    rest: false,
    pattern: Pattern::Identifier(_),
    default_value: None,
  }])
}

impl MinifyPass<'_> {
  pub(crate) fn grouped(&mut self, group: bool, f: impl FnOnce(&mut Self)) {
    if group {
      self.out.write(b"(");
    };
    f(self);
    if group {
      self.out.write(b")");
    };
  }

  pub(crate) fn write_word(&mut self, word: &[u8]) {
    self.out.write(word);
    self.out.word_ended();
  }

  /// Writes a reference to or declaration of `name` with its spelling in the current scope.
  pub(crate) fn write_name(&mut self, name: &Identifier) {
    let renamed = self.renamer.rename(name);
    self.write_word(renamed.as_slice());
  }

  fn is_unbound_ident(&self, expr: &Expr, name: &[u8]) -> bool {
    match unwrap_groups(expr) {
      Expr::Literal(Literal {
        kind: LiteralKind::Identifier,
        raw,
      }) => raw.as_slice() == name && !self.renamer.is_bound(name),
      _ => false,
    }
  }

  /// Truthiness of `expr` if it is known without running anything.
  fn truthiness(&self, expr: &Expr) -> Option<bool> {
    match unwrap_groups(expr) {
      Expr::Literal(lit) if lit.kind == LiteralKind::Identifier => {
        let name = lit.raw.as_slice();
        if self.renamer.is_bound(name) {
          return None;
        };
        match name {
          b"undefined" | b"NaN" => Some(false),
          b"Infinity" => Some(true),
          _ => None,
        }
      }
      Expr::Literal(lit) => literal_truthiness(lit),
      Expr::Unary {
        operator: OperatorName::LogicalNot,
        argument,
      } => self.truthiness(argument).map(|t| !t),
      Expr::Function(_) | Expr::Arrow(_) => Some(true),
      _ => None,
    }
  }

  fn write_boolean(&mut self, value: bool, prec: Precedence) {
    self.grouped(prec > Precedence::Unary, |p| {
      p.out.write(if value { b"!0" } else { b"!1" })
    });
  }

  /// Writes a numeric literal through the encoder. Returns whether the written form is a bare integer, which
  /// would absorb a following `.`.
  fn write_number(&mut self, kind: LiteralKind, raw: &SourceRange) -> bool {
    let encoder = self.encoder;
    let encoded = encoder.number(kind, raw.as_slice(), self.precision);
    self.out.write(&encoded);
    encoded.iter().all(u8::is_ascii_digit)
  }

  fn write_string(&mut self, raw: &[u8]) {
    let encoder = self.encoder;
    let encoded = encoder.string(raw);
    self.out.write(&encoded);
  }

  fn minify_literal(&mut self, lit: Literal, prec: Precedence) {
    let Literal { kind, raw } = lit;
    match kind {
      LiteralKind::Identifier => {
        let name = raw.as_slice();
        if name == b"undefined" && !self.renamer.is_bound(name) {
          self.grouped(prec > Precedence::Unary, |p| {
            p.out.write_keyword(b"void");
            p.out.write(b"0");
          });
        } else if name == b"Infinity" && !self.renamer.is_bound(name) {
          self.grouped(prec > Precedence::Mul, |p| p.out.write(b"1/0"));
        } else {
          self.write_name(&raw);
        };
      }
      LiteralKind::True => self.write_boolean(true, prec),
      LiteralKind::False => self.write_boolean(false, prec),
      LiteralKind::Number | LiteralKind::BinaryNumber | LiteralKind::OctalNumber | LiteralKind::HexNumber => {
        self.write_number(kind, &raw);
      }
      LiteralKind::String => self.write_string(raw.as_slice()),
      LiteralKind::This | LiteralKind::Super | LiteralKind::Null | LiteralKind::BigInt | LiteralKind::Regex => {
        self.write_word(raw.as_slice())
      }
    };
  }

  /// Writes `expr` as a boolean, inverted if `invert`. Equality operators are flipped rather than negated, and
  /// double negations of expressions that are already boolean are dropped.
  pub(crate) fn minify_boolean_expr(&mut self, expr: Expr, invert: bool, prec: Precedence) {
    let expr = into_unwrapped(expr);
    if invert {
      if let Some(value) = self.truthiness(&expr) {
        return self.write_boolean(!value, prec);
      };
      match expr {
        Expr::Binary {
          operator,
          left,
          right,
        } if inverse_equality(operator).is_some() => self.minify_expr(
          Expr::Binary {
            operator: inverse_equality(operator).unwrap_or(operator),
            left,
            right,
          },
          prec,
        ),
        Expr::Unary {
          operator: OperatorName::LogicalNot,
          argument,
        } if is_boolean_expr(&argument) => self.minify_expr(*argument, prec),
        expr => self.grouped(prec > Precedence::Unary, |p| {
          p.out.write(b"!");
          p.minify_expr(expr, Precedence::Unary);
        }),
      };
    } else if is_boolean_expr(&expr) {
      self.minify_expr(expr, prec);
    } else {
      self.grouped(prec > Precedence::Unary, |p| {
        p.out.write(b"!!");
        p.minify_expr(expr, Precedence::Unary);
      });
    };
  }

  fn minify_conditional(&mut self, test: Expr, consequent: Expr, alternate: Expr, prec: Precedence) {
    let (mut test, mut consequent, mut alternate) = (into_unwrapped(test), consequent, alternate);
    // Only the truthiness of the test matters, so every leading `!` swaps the branches instead.
    loop {
      match test {
        Expr::Unary {
          operator: OperatorName::LogicalNot,
          argument,
        } => {
          test = into_unwrapped(*argument);
          std::mem::swap(&mut consequent, &mut alternate);
        }
        other => {
          test = other;
          break;
        }
      };
    }

    if let Some(truthy) = self.truthiness(&test) {
      return self.minify_expr(if truthy { consequent } else { alternate }, prec);
    };

    let or = &OPERATORS[&OperatorName::LogicalOr];
    let and = &OPERATORS[&OperatorName::LogicalAnd];
    if is_simple_equal(&test, &consequent)
      && prec <= Precedence::Or
      && (expr_prec(&alternate) < Precedence::Assign || expr_prec(&alternate) >= or.right)
    {
      self.minify_expr(test, or.left);
      self.out.write(b"||");
      self.minify_expr(alternate, or.right);
      return;
    };

    if is_simple_equal(&consequent, &alternate) {
      return self.grouped(prec > Precedence::Expr, |p| {
        p.minify_expr(test, Precedence::Expr);
        p.out.write(b",");
        p.minify_expr(consequent, Precedence::Assign);
      });
    };

    let (true_x, false_x) = (is_true_literal(&consequent), is_false_literal(&consequent));
    let (true_y, false_y) = (is_true_literal(&alternate), is_false_literal(&alternate));
    if true_x && false_y || false_x && true_y {
      self.minify_boolean_expr(test, false_x, prec);
    } else if true_x || true_y {
      // `!!C||Y` or `!C||X`.
      self.grouped(prec > Precedence::Or, |p| {
        p.minify_boolean_expr(test, true_y, or.left);
        p.out.write(b"||");
        p.minify_expr(if true_y { consequent } else { alternate }, or.right);
      });
    } else if false_x || false_y {
      // `!C&&Y` or `!!C&&X`.
      self.grouped(prec > Precedence::And, |p| {
        p.minify_boolean_expr(test, false_x, and.left);
        p.out.write(b"&&");
        p.minify_expr(if false_x { alternate } else { consequent }, and.right);
      });
    } else {
      self.grouped(prec > Precedence::Assign, |p| {
        p.minify_expr(test, Precedence::Coalesce);
        p.out.write(b"?");
        p.minify_expr(consequent, Precedence::Assign);
        p.out.write(b":");
        p.minify_expr(alternate, Precedence::Assign);
      });
    };
  }

  fn minify_binary(&mut self, operator: OperatorName, left: Expr, right: Expr) {
    let op = &OPERATORS[&operator];
    self.minify_expr(left, op.left);
    if op.is_keyword() {
      self.out.write_keyword(op.syntax.as_bytes());
    } else {
      self.out.write(op.syntax.as_bytes());
    };
    self.minify_expr(right, op.right);
  }

  fn minify_unary(&mut self, operator: OperatorName, argument: Expr) {
    let op = &OPERATORS[&operator];
    if op.is_postfix() {
      self.minify_expr(argument, op.left);
      self.out.write(op.syntax.as_bytes());
    } else {
      if op.is_keyword() {
        self.out.write_keyword(op.syntax.as_bytes());
      } else {
        self.out.write(op.syntax.as_bytes());
      };
      self.minify_expr(argument, op.right);
    };
  }

  /// Object of a member access, index, call, or tagged template. A parenthesised optional chain keeps its
  /// parentheses, as dropping them would extend the chain's short circuit.
  fn minify_access_object(&mut self, object: Expr, prec: Precedence) {
    if matches!(unwrap_groups(&object), Expr::OptionalChain { .. }) {
      self.grouped(true, |p| p.minify_expr(object, Precedence::Expr));
    } else {
      self.minify_expr(object, prec);
    };
  }

  fn minify_member(&mut self, object: Expr, property: SourceRange) {
    match into_unwrapped(object) {
      Expr::Literal(Literal { kind, raw }) if kind.is_number() => {
        if self.write_number(kind, &raw) {
          self.out.write(b".");
        };
      }
      object => self.minify_access_object(object, Precedence::Member),
    };
    self.out.write(b".");
    self.write_word(property.as_slice());
  }

  /// `[index]`, shortened to `.name` or `[0]` when the index is a string spelling one.
  fn minify_index_access(&mut self, index: Expr, optional: bool) {
    let (dot, bracket): (&[u8], &[u8]) = if optional {
      (&b"?."[..], &b"?.["[..])
    } else {
      (&b"."[..], &b"["[..])
    };
    if let Expr::Literal(Literal {
      kind: LiteralKind::String,
      raw,
    }) = unwrap_groups(&index)
    {
      if let Some(name) = plain_string_contents(raw.as_slice()) {
        if is_identifier_name(name) {
          self.out.write(dot);
          self.write_word(name);
          return;
        };
        if is_canonical_integer(name) {
          self.out.write(bracket);
          self.out.write(name);
          self.out.write(b"]");
          return;
        };
      };
    };
    self.out.write(bracket);
    self.minify_expr(index, Precedence::Expr);
    self.out.write(b"]");
  }

  fn minify_args(&mut self, args: Vec<CallArg>) {
    self.out.write(b"(");
    for (i, arg) in args.into_iter().enumerate() {
      if i > 0 {
        self.out.write(b",");
      };
      if arg.spread {
        self.out.write(b"...");
      };
      self.minify_expr(arg.value, Precedence::Assign);
    }
    self.out.write(b")");
  }

  fn minify_chain(&mut self, object: Expr, links: Vec<ChainLink>) {
    self.minify_access_object(object, Precedence::Member);
    for ChainLink { optional, access } in links {
      match access {
        ChainAccess::Member(property) => {
          self.out.write(if optional { &b"?."[..] } else { &b"."[..] });
          self.write_word(property.as_slice());
        }
        ChainAccess::Index(index) => self.minify_index_access(*index, optional),
        ChainAccess::Call(args) => {
          if optional {
            self.out.write(b"?.");
          };
          self.minify_args(args);
        }
      };
    }
  }

  fn minify_template(&mut self, tag: Option<Box<Expr>>, parts: Vec<LiteralTemplatePart>) {
    if let Some(tag) = tag {
      self.minify_access_object(*tag, Precedence::Member);
    };
    self.out.write(b"`");
    for part in parts {
      match part {
        LiteralTemplatePart::String(raw) => self.out.write(raw.as_slice()),
        LiteralTemplatePart::Substitution(expr) => {
          self.out.write(b"${");
          self.minify_expr(expr, Precedence::Expr);
          self.out.write(b"}");
        }
      };
    }
    self.out.write(b"`");
  }

  fn minify_array(&mut self, elements: Vec<ArrayElement>) {
    let trailing_hole = matches!(elements.last(), Some(ArrayElement::Empty));
    self.out.write(b"[");
    for (i, element) in elements.into_iter().enumerate() {
      if i > 0 {
        self.out.write(b",");
      };
      match element {
        ArrayElement::Single(value) => self.minify_expr(value, Precedence::Assign),
        ArrayElement::Rest(value) => {
          self.out.write(b"...");
          self.minify_expr(value, Precedence::Assign);
        }
        ArrayElement::Empty => {}
      };
    }
    if trailing_hole {
      self.out.write(b",");
    };
    self.out.write(b"]");
  }

  /// A non-computed property name. Quoted names are unquoted when they spell an identifier name or a canonical
  /// integer.
  fn minify_property_name(&mut self, raw: &SourceRange) {
    match raw.as_slice() {
      bytes @ [b'"' | b'\'', ..] => match plain_string_contents(bytes) {
        Some(name) if is_identifier_name(name) || is_canonical_integer(name) => self.write_word(name),
        _ => self.write_string(bytes),
      },
      [b'0', b'x' | b'X', ..] => {
        self.write_number(LiteralKind::HexNumber, raw);
      }
      [b'0', b'o' | b'O', ..] => {
        self.write_number(LiteralKind::OctalNumber, raw);
      }
      [b'0', b'b' | b'B', ..] => {
        self.write_number(LiteralKind::BinaryNumber, raw);
      }
      bytes @ [b'0'..=b'9', .., b'n'] => self.write_word(bytes),
      [b'0'..=b'9' | b'.', ..] => {
        self.write_number(LiteralKind::Number, raw);
      }
      bytes => self.write_word(bytes),
    };
  }

  fn minify_member_key(&mut self, key: ClassOrObjectMemberKey) {
    match key {
      ClassOrObjectMemberKey::Direct(raw) => self.minify_property_name(&raw),
      ClassOrObjectMemberKey::Computed(expr) => {
        self.out.write(b"[");
        self.minify_expr(*expr, Precedence::Assign);
        self.out.write(b"]");
      }
    };
  }

  fn minify_object(&mut self, members: Vec<ObjectMember>) {
    self.out.write(b"{");
    for (i, member) in members.into_iter().enumerate() {
      if i > 0 {
        self.out.write(b",");
      };
      match member {
        ObjectMember::Valued {
          key,
          value: Expr::Method(method),
        } => self.minify_method(false, key, *method),
        ObjectMember::Valued { key, value } => {
          self.minify_member_key(key);
          self.out.write(b":");
          self.minify_expr(value, Precedence::Assign);
        }
        ObjectMember::Shorthand { name, initializer } => {
          let renamed = self.renamer.rename(&name);
          self.write_word(name.as_slice());
          if renamed != name {
            self.out.write(b":");
            self.write_word(renamed.as_slice());
          };
          if let Some(initializer) = initializer {
            self.out.write(b"=");
            self.minify_expr(initializer, Precedence::Assign);
          };
        }
        ObjectMember::Rest(value) => {
          self.out.write(b"...");
          self.minify_expr(value, Precedence::Assign);
        }
      };
    }
    self.out.write(b"}");
  }

  fn minify_default_value(&mut self, default_value: Option<Expr>) {
    if let Some(value) = default_value {
      self.out.write(b"=");
      self.minify_expr(value, Precedence::Assign);
    };
  }

  pub(crate) fn minify_pattern(&mut self, pattern: Pattern) {
    match pattern {
      Pattern::Identifier(name) => self.write_name(&name),
      Pattern::Array { elements, rest } => {
        let has_elements = !elements.is_empty();
        let trailing_hole = rest.is_none() && matches!(elements.last(), Some(None));
        self.out.write(b"[");
        for (i, element) in elements.into_iter().enumerate() {
          if i > 0 {
            self.out.write(b",");
          };
          if let Some(element) = element {
            self.minify_pattern(element.target);
            self.minify_default_value(element.default_value);
          };
        }
        if let Some(rest) = rest {
          if has_elements {
            self.out.write(b",");
          };
          self.out.write(b"...");
          self.minify_pattern(*rest);
        };
        if trailing_hole {
          self.out.write(b",");
        };
        self.out.write(b"]");
      }
      Pattern::Object { properties, rest } => {
        self.out.write(b"{");
        let mut first = true;
        for property in properties {
          if !first {
            self.out.write(b",");
          };
          first = false;
          match (property.key, property.target) {
            (ClassOrObjectMemberKey::Direct(name), None) => {
              let renamed = self.renamer.rename(&name);
              self.write_word(name.as_slice());
              if renamed != name {
                self.out.write(b":");
                self.write_word(renamed.as_slice());
              };
            }
            (ClassOrObjectMemberKey::Computed(_), None) => {
              unreachable!("shorthand binding with a computed key")
            }
            (key, Some(target)) => {
              self.minify_member_key(key);
              self.out.write(b":");
              self.minify_pattern(target);
            }
          };
          self.minify_default_value(property.default_value);
        }
        if let Some(rest) = rest {
          if !first {
            self.out.write(b",");
          };
          self.out.write(b"...");
          self.write_name(&rest);
        };
        self.out.write(b"}");
      }
    };
  }

  pub(crate) fn minify_params(&mut self, params: Vec<ParamDecl>) {
    self.out.write(b"(");
    for (i, param) in params.into_iter().enumerate() {
      if i > 0 {
        self.out.write(b",");
      };
      if param.rest {
        self.out.write(b"...");
      };
      self.minify_pattern(param.pattern);
      self.minify_default_value(param.default_value);
    }
    self.out.write(b")");
  }

  /// `{…}` of a function whose scope is already entered. A trailing bare `return` is dropped.
  pub(crate) fn minify_function_body(&mut self, body: Vec<Stmt>) {
    let mut body = self.merge_stmt_list(body, true);
    if matches!(body.last(), Some(Stmt::Return(None))) {
      body.pop();
    };
    self.write_braced(body);
  }

  fn minify_function_expr(&mut self, func: Function) {
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
    // The name of a function expression is only visible inside it.
    self.in_scope(scope, |p| {
      if let Some(name) = name {
        p.write_name(&name);
      };
      p.minify_params(params);
      p.minify_function_body(body);
    });
  }

  fn minify_arrow(&mut self, func: Function) {
    let Function {
      is_async,
      mut params,
      body,
      scope,
      ..
    } = func;
    if is_async {
      self.out.write_keyword(b"async");
    };
    self.in_scope(scope, |p| {
      if is_simple_param(&params) {
        if let Some(ParamDecl {
          pattern: Pattern::Identifier(name),
          ..
        }) = params.pop()
        {
          p.write_name(&name);
        };
      } else {
        p.minify_params(params);
      };
      p.out.write(b"=>");
      let mut body = p.merge_stmt_list(body, true);
      if matches!(body.last(), Some(Stmt::Return(None))) {
        body.pop();
      };
      match body.pop() {
        Some(Stmt::Return(Some(value))) if body.is_empty() => {
          if may_start_with(&value, &is_object_literal) {
            p.grouped(true, |p| p.minify_expr(value, Precedence::Expr));
          } else {
            p.minify_expr(value, Precedence::Assign);
          };
        }
        Some(last) => {
          body.push(last);
          p.write_braced(body);
        }
        None => p.write_braced(body),
      };
    });
  }

  fn minify_method(&mut self, statik: bool, key: ClassOrObjectMemberKey, method: Method) {
    let Method { kind, function } = method;
    let Function {
      is_async,
      generator,
      params,
      body,
      scope,
      ..
    } = function;
    if statik {
      self.out.write_keyword(b"static");
    };
    match kind {
      MethodKind::Getter => self.out.write_keyword(b"get"),
      MethodKind::Setter => self.out.write_keyword(b"set"),
      MethodKind::Method => {}
    };
    if is_async {
      self.out.write_keyword(b"async");
    };
    if generator {
      self.out.write(b"*");
    };
    self.minify_member_key(key);
    self.in_scope(scope, |p| {
      p.minify_params(params);
      p.minify_function_body(body);
    });
  }

  pub(crate) fn minify_class(&mut self, class: Class) {
    let Class {
      name,
      extends,
      members,
    } = class;
    self.out.write_keyword(b"class");
    if let Some(name) = name {
      self.write_name(&name);
    };
    if let Some(extends) = extends {
      self.out.write_keyword(b"extends");
      self.minify_expr(*extends, Precedence::Lhs);
    };
    self.out.write(b"{");
    let count = members.len();
    for (i, member) in members.into_iter().enumerate() {
      match member {
        ClassMember::Method { statik, key, method } => self.minify_method(statik, key, method),
        ClassMember::Property {
          statik,
          key,
          initializer,
        } => {
          if statik {
            self.out.write_keyword(b"static");
          };
          self.minify_member_key(key);
          self.minify_default_value(initializer);
          if i + 1 < count {
            self.out.write(b";");
          };
        }
      };
    }
    self.out.write(b"}");
  }

  /// `var`/`let`/`const` with its declarators. In a `for` head (`no_in`), initialisers containing `in` are
  /// parenthesised.
  pub(crate) fn minify_var_decl(&mut self, decl: VarDecl, no_in: bool) {
    self.out.write_keyword(decl.mode.keyword());
    for (i, declarator) in decl.declarators.into_iter().enumerate() {
      if i > 0 {
        self.out.write(b",");
      };
      self.minify_pattern(declarator.pattern);
      if let Some(init) = declarator.initializer {
        self.out.write(b"=");
        if no_in && contains_in_operator(&init) {
          self.grouped(true, |p| p.minify_expr(init, Precedence::Expr));
        } else {
          self.minify_expr(init, Precedence::Assign);
        };
      };
    }
  }

  /// Writes `expr` in a position whose operand minimum is `prec`, reducing it on the way and adding parentheses
  /// only where the reduced form binds looser than the position allows.
  pub(crate) fn minify_expr(&mut self, expr: Expr, prec: Precedence) {
    let group = expr_prec(&expr) < prec;
    match expr {
      Expr::Group(inner) => self.minify_expr(*inner, prec),
      Expr::Literal(lit) => self.minify_literal(lit, prec),
      Expr::Conditional {
        test,
        consequent,
        alternate,
      } => self.minify_conditional(*test, *consequent, *alternate, prec),
      Expr::Unary {
        operator: OperatorName::LogicalNot,
        argument,
      } => self.minify_boolean_expr(*argument, true, prec),
      Expr::Unary { operator, argument } => self.grouped(group, |p| p.minify_unary(operator, *argument)),
      // `(a,b)&&c` as `a,b&&c`.
      Expr::Binary {
        operator,
        left,
        right,
      } if prec == Precedence::Expr
        && is_short_circuit(operator)
        && matches!(unwrap_groups(&left), Expr::Binary {
          operator: OperatorName::Comma,
          ..
        }) =>
      {
        match into_unwrapped(*left) {
          Expr::Binary {
            operator: OperatorName::Comma,
            left: head,
            right: last,
          } => self.minify_expr(
            Expr::Binary {
              operator: OperatorName::Comma,
              left: head,
              right: Box::new(binary_expr(operator, *last, *right)),
            },
            prec,
          ),
          _ => unreachable!(),
        }
      }
      Expr::Binary {
        operator,
        left,
        right,
      } => self.grouped(group, |p| p.minify_binary(operator, *left, *right)),
      Expr::Member { object, property } => self.grouped(group, |p| p.minify_member(*object, property)),
      Expr::Index { object, index } => self.grouped(group, |p| {
        p.minify_access_object(*object, Precedence::Member);
        p.minify_index_access(*index, false);
      }),
      Expr::Call { callee, arguments } => self.grouped(group, |p| {
        p.minify_access_object(*callee, Precedence::Call);
        p.minify_args(arguments);
      }),
      Expr::OptionalChain { object, links } => self.grouped(group, |p| p.minify_chain(*object, links)),
      // Without arguments, `new X` cannot be followed by a member access or call.
      Expr::New {
        callee,
        arguments: None,
      } if prec >= Precedence::Call => self.minify_expr(
        Expr::New {
          callee,
          arguments: Some(Vec::new()),
        },
        prec,
      ),
      Expr::New { callee, arguments } => self.grouped(group, |p| {
        p.out.write_keyword(b"new");
        if callee_contains_call(&callee) {
          p.grouped(true, |p| p.minify_expr(*callee, Precedence::Expr));
        } else {
          p.minify_expr(*callee, Precedence::Member);
        };
        if let Some(arguments) = arguments {
          p.minify_args(arguments);
        };
      }),
      Expr::NewTarget => {
        self.out.write_keyword(b"new");
        self.write_word(b".target");
      }
      Expr::ImportMeta => {
        self.out.write_keyword(b"import");
        self.write_word(b".meta");
      }
      Expr::Yield {
        delegate: false,
        argument: Some(argument),
      } if self.is_unbound_ident(&argument, b"undefined") => self.minify_expr(
        Expr::Yield {
          delegate: false,
          argument: None,
        },
        prec,
      ),
      Expr::Yield { delegate, argument } => self.grouped(group, |p| {
        p.out.write_keyword(b"yield");
        if delegate {
          p.out.write(b"*");
        };
        if let Some(argument) = argument {
          p.minify_expr(*argument, Precedence::Assign);
        };
      }),
      Expr::Template { tag, parts } => self.grouped(group, |p| p.minify_template(tag, parts)),
      Expr::Array(elements) => self.minify_array(elements),
      Expr::Object(members) => self.minify_object(members),
      Expr::Function(func) => self.minify_function_expr(*func),
      Expr::Arrow(func) => self.grouped(group, |p| p.minify_arrow(*func)),
      Expr::Class(class) => self.minify_class(*class),
      Expr::Method(_) => unreachable!("method outside of an object literal"),
      Expr::VarDecl(decl) => self.minify_var_decl(decl, false),
    };
  }
}
