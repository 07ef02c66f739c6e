use crate::ast::Block;
use crate::ast::CatchBlock;
use crate::ast::Class;
use crate::ast::ClassMember;
use crate::ast::ClassOrObjectMemberKey;
use crate::ast::Export;
use crate::ast::ExportName;
use crate::ast::ExportNames;
use crate::ast::Expr;
use crate::ast::Function;
use crate::ast::Import;
use crate::ast::LiteralKind;
use crate::ast::Method;
use crate::ast::MethodKind;
use crate::ast::ObjectMember;
use crate::ast::Pattern;
use crate::ast::Stmt;
use crate::ast::VarDecl;
use crate::ast::VarDeclMode;
use crate::ast::VariableDeclarator;
use crate::error::MinifyError;
use crate::literal::LiteralEncoder;
use crate::literal::Verbatim;
use crate::minify::DynamicScopes;
use crate::minify::Minifier;
use crate::operator::OperatorName;
use crate::source::SourceRange;
use crate::symbol::Scope;
use crate::util::test::*;
use std::borrow::Cow;
use std::io;

fn direct(name: &str) -> ClassOrObjectMemberKey {
  ClassOrObjectMemberKey::Direct(SourceRange::from(name))
}

#[test]
fn test_if_else_becomes_conditional() {
  check(
    program(vec![if_stmt(
      ident("a"),
      block(vec![expr_stmt(call(ident("b"), vec![]))]),
      Some(block(vec![expr_stmt(call(ident("c"), vec![]))])),
    )]),
    "a?b():c()",
  );
}

#[test]
fn test_var_declarations_merge() {
  check(
    program(vec![
      var_decl(VarDeclMode::Var, [("x", Some(num("1")))]),
      var_decl(VarDeclMode::Var, [("y", Some(num("2")))]),
    ]),
    "var x=1,y=2",
  );
}

#[test]
fn test_parameters_are_renamed() {
  check(
    program(vec![func_decl(
      "f",
      &["longName"],
      vec![ret(Some(bin(OperatorName::Addition, ident("longName"), num("1"))))],
      Scope::function().with_declared("longName", 1),
    )]),
    "function f(a){return a+1}",
  );
}

#[test]
fn test_loop_absorbs_preceding_expression() {
  check(
    program(vec![
      expr_stmt(call(ident("foo"), vec![])),
      while_stmt(
        boolean(true),
        expr_stmt(unary(OperatorName::PostfixIncrement, ident("x"))),
      ),
    ]),
    "for(foo();!0;)x++",
  );
}

#[test]
fn test_exits_fold_into_conditional_return() {
  check(
    program(vec![func_decl(
      "f",
      &[],
      vec![
        if_stmt(ident("cond"), ret(Some(num("1"))), None),
        ret(Some(num("2"))),
      ],
      Scope::function(),
    )]),
    "function f(){return cond?1:2}",
  );
}

#[test]
fn test_unused_declarations_are_dropped() {
  check(
    program(vec![func_decl(
      "f",
      &[],
      vec![var_decl(VarDeclMode::Var, [("unused", None)]), ret(Some(num("1")))],
      Scope::function().with_declared("unused", 0),
    )]),
    "function f(){return 1}",
  );
}

#[test]
fn test_program_scope_declarations_are_kept() {
  check(
    program(vec![var_decl(VarDeclMode::Var, [("unused", None)])]),
    "var unused",
  );
}

#[test]
fn test_ternary_table() {
  check_expr(cond(ident("x"), boolean(true), boolean(false)), "!!x");
  check_expr(cond(ident("x"), boolean(false), boolean(true)), "!x");
  check_expr(cond(ident("a"), ident("b"), ident("b")), "a,b");
  check_expr(call(ident("f"), vec![cond(ident("a"), ident("b"), ident("b"))]), "f((a,b))");
  check_expr(cond(ident("a"), ident("a"), ident("b")), "a||b");
  check_expr(cond(ident("x"), ident("y"), boolean(true)), "!x||y");
  check_expr(cond(ident("x"), boolean(true), ident("y")), "!!x||y");
  check_expr(cond(ident("x"), boolean(false), ident("y")), "!x&&y");
  check_expr(cond(ident("x"), ident("y"), boolean(false)), "!!x&&y");
  check_expr(cond(not(ident("x")), ident("a"), ident("b")), "x?b:a");
  check_expr(
    bin(OperatorName::Addition, cond(ident("x"), boolean(true), ident("y")), num("1")),
    "(!!x||y)+1",
  );
}

#[test]
fn test_conditional_with_known_test() {
  check_expr(cond(num("1"), ident("a"), ident("b")), "a");
  check_expr(cond(string("''"), ident("a"), ident("b")), "b");
  check_expr(cond(not(num("0")), ident("a"), ident("b")), "a");
  check_expr(cond(ident("undefined"), ident("a"), ident("b")), "b");
}

#[test]
fn test_negations() {
  check_expr(
    not(not(bin(OperatorName::StrictEquality, ident("a"), ident("b")))),
    "a===b",
  );
  check_expr(not(not(ident("x"))), "!!x");
  check_expr(not(group(not(ident("x")))), "!!x");
  check_expr(not(bin(OperatorName::Equality, ident("a"), ident("b"))), "a!=b");
  check_expr(not(bin(OperatorName::LessThan, ident("a"), ident("b"))), "!(a<b)");
  check_expr(not(num("0")), "!0");
  check_expr(not(string("'x'")), "!1");
}

#[test]
fn test_global_constants() {
  check_expr(bin(OperatorName::Assignment, ident("a"), ident("undefined")), "a=void 0");
  check_expr(bin(OperatorName::Assignment, ident("a"), ident("Infinity")), "a=1/0");
  check_expr(bin(OperatorName::Division, num("2"), ident("Infinity")), "2/(1/0)");
  check_expr(unary(OperatorName::Typeof, ident("undefined")), "typeof void 0");
  check_expr(
    call(member(boolean(true), "toString"), vec![]),
    "(!0).toString()",
  );
}

#[test]
fn test_shadowed_undefined_is_kept() {
  let mut prog = program(vec![expr_stmt(bin(
    OperatorName::Assignment,
    ident("a"),
    ident("undefined"),
  ))]);
  prog.scope = Scope::function().with_declared("undefined", 1);
  check(prog, "a=undefined");
}

#[test]
fn test_member_access() {
  check_expr(index(ident("a"), string("\"b\"")), "a.b");
  check_expr(index(ident("a"), string("'1'")), "a[1]");
  check_expr(index(ident("a"), string("'01'")), "a['01']");
  check_expr(index(ident("a"), string("'b c'")), "a['b c']");
  check_expr(member(num("1"), "toString"), "1..toString");
  check_expr(member(num("1.5"), "x"), "1.5.x");
  check_expr(member(num("1e3"), "x"), "1e3.x");
}

#[test]
fn test_new_without_arguments() {
  let new_foo = Expr::New {
    callee: Box::new(ident("Foo")),
    arguments: None,
  };
  check_expr(new_foo.clone(), "new Foo");
  check_expr(member(new_foo, "bar"), "new Foo().bar");
  check_expr(
    Expr::New {
      callee: Box::new(member(call(ident("a"), vec![]), "b")),
      arguments: Some(Vec::new()),
    },
    "new(a().b)()",
  );
  check_expr(
    call(
      group(Expr::New {
        callee: Box::new(ident("X")),
        arguments: None,
      }),
      vec![],
    ),
    "new X()()",
  );
}

#[test]
fn test_keywords_after_words() {
  check(
    program(vec![throw(Expr::New {
      callee: Box::new(ident("E")),
      arguments: Some(Vec::new()),
    })]),
    "throw new E()",
  );
  check_expr(bin(OperatorName::In, ident("a"), ident("b")), "a in b");
  check(
    program(vec![Stmt::ForOf {
      is_await: false,
      lhs: ident("x"),
      rhs: ident("y"),
      body: Box::new(Stmt::Empty),
      scope: Scope::block(),
    }]),
    "for(x of y);",
  );
  check(
    program(vec![Stmt::Export(Export::Default(ident("a")))]),
    "export default a",
  );
  let mut f = func(Some("f"), &[], vec![], Scope::function());
  f.is_async = true;
  check(program(vec![Stmt::Function(f)]), "async function f(){}");
}

#[test]
fn test_operators_that_would_merge() {
  check_expr(
    bin(OperatorName::Subtraction, ident("a"), unary(OperatorName::UnaryNegation, ident("b"))),
    "a- -b",
  );
  check_expr(
    bin(OperatorName::Addition, ident("a"), unary(OperatorName::PrefixIncrement, ident("b"))),
    "a+ ++b",
  );
  check_expr(unary(OperatorName::Typeof, ident("x")), "typeof x");
  check_expr(bin(OperatorName::In, string("\"x\""), ident("o")), "\"x\"in o");
}

#[test]
fn test_statement_start_hazards() {
  check_expr(
    call(func_expr(&[], vec![], Scope::function()), vec![]),
    "!function(){}()",
  );
  check_expr(
    bin(OperatorName::Assignment, member(Expr::Object(vec![]), "a"), num("1")),
    "({}.a=1)",
  );
}

#[test]
fn test_comma_left_of_logical_operator() {
  check(
    program(vec![if_stmt(
      bin(OperatorName::Comma, call(ident("a"), vec![]), ident("b")),
      expr_stmt(call(ident("c"), vec![])),
      None,
    )]),
    "a(),b&&c()",
  );
}

fn assign(body: Vec<Stmt>, params: &[&str], scope: Scope) -> Stmt {
  expr_stmt(bin(OperatorName::Assignment, ident("f"), arrow(params, body, scope)))
}

#[test]
fn test_arrow_bodies() {
  check(
    program(vec![assign(
      vec![ret(Some(ident("x")))],
      &["x"],
      Scope::function().with_declared("x", 1),
    )]),
    "f=a=>a",
  );
  check(
    program(vec![assign(vec![ret(Some(Expr::Object(vec![])))], &[], Scope::function())]),
    "f=()=>({})",
  );
  check(
    program(vec![assign(vec![ret(None)], &[], Scope::function())]),
    "f=()=>{}",
  );
  check(
    program(vec![assign(
      vec![expr_stmt(call(ident("g"), vec![])), ret(Some(ident("y")))],
      &["x", "y"],
      Scope::function().with_declared("x", 0).with_declared("y", 1),
    )]),
    "f=(x,a)=>(g(),a)",
  );
}

#[test]
fn test_unused_parameter_shadows_renamed_outer_name() {
  check(
    program(vec![func_decl(
      "f",
      &["x"],
      vec![
        expr_stmt(call(ident("g"), vec![ident("x")])),
        ret(Some(arrow(
          &["x", "y"],
          vec![ret(Some(ident("y")))],
          Scope::function().with_declared("x", 0).with_declared("y", 1),
        ))),
      ],
      Scope::function().with_declared("x", 1),
    )]),
    "function f(a){return g(a),(x,a)=>a}",
  );
}

#[test]
fn test_unused_variable_shadows_renamed_outer_name() {
  check(
    program(vec![func_decl(
      "outer",
      &["x"],
      vec![
        expr_stmt(call(ident("use"), vec![ident("x")])),
        func_decl(
          "zz",
          &[],
          vec![
            var_decl(VarDeclMode::Var, [("z", Some(num("1")))]),
            var_decl(VarDeclMode::Var, [("x", Some(call(ident("side"), vec![])))]),
            ret(Some(ident("z"))),
          ],
          Scope::function().with_declared("z", 1).with_declared("x", 0),
        ),
        ret(Some(ident("zz"))),
      ],
      Scope::function().with_declared("x", 1).with_declared("zz", 1),
    )]),
    "function outer(a){use(a);function b(){var a=1,x=side();return a}return b}",
  );
}

#[test]
fn test_code_after_exit_keeps_hoisted_declarations() {
  check(
    program(vec![func_decl(
      "f",
      &[],
      vec![
        ret(Some(num("1"))),
        expr_stmt(call(ident("g"), vec![])),
        var_decl(VarDeclMode::Var, [("x", Some(num("2")))]),
        func_decl("h", &[], vec![], Scope::function()),
      ],
      Scope::function().with_declared("x", 1).with_declared("h", 1),
    )]),
    "function f(){return 1;var b;function a(){}}",
  );
}

#[test]
fn test_else_after_exit_is_dropped() {
  check(
    program(vec![func_decl(
      "f",
      &[],
      vec![
        if_stmt(
          ident("a"),
          block(vec![ret(Some(num("1")))]),
          Some(block(vec![expr_stmt(call(ident("b"), vec![]))])),
        ),
        expr_stmt(call(ident("c"), vec![])),
      ],
      Scope::function(),
    )]),
    "function f(){if(a)return 1;b();c()}",
  );
}

#[test]
fn test_dangling_else_is_braced() {
  check(
    program(vec![func_decl(
      "f",
      &[],
      vec![if_stmt(
        ident("a"),
        block(vec![if_stmt(ident("b"), ret(None), None)]),
        Some(expr_stmt(call(ident("d"), vec![]))),
      )],
      Scope::function(),
    )]),
    "function f(){if(a){if(b)return}else d()}",
  );
}

#[test]
fn test_empty_consequent_negates_test() {
  check(
    program(vec![func_decl(
      "f",
      &[],
      vec![if_stmt(
        bin(OperatorName::Equality, ident("a"), ident("b")),
        Stmt::Empty,
        Some(ret(None)),
      )],
      Scope::function(),
    )]),
    "function f(){if(a!=b)return}",
  );
}

#[test]
fn test_lexical_block_keeps_braces() {
  check(
    program(vec![scoped_block(
      vec![
        var_decl(VarDeclMode::Let, [("x", Some(call(ident("g"), vec![])))]),
        expr_stmt(call(ident("x"), vec![])),
      ],
      Scope::block().with_declared("x", 1),
    )]),
    "{let a=g();a()}",
  );
}

fn try_stmt(catch_scope: Scope, catch_body: Vec<Stmt>) -> Stmt {
  Stmt::Try {
    wrapped: Block {
      body: vec![expr_stmt(call(ident("a"), vec![]))],
      scope: Scope::block(),
    },
    catch: Some(CatchBlock {
      parameter: Some(Pattern::Identifier(id("e"))),
      body: catch_body,
      scope: catch_scope,
    }),
    finally: Some(Block {
      body: vec![],
      scope: Scope::block(),
    }),
  }
}

#[test]
fn test_catch_binding() {
  check(
    program(vec![try_stmt(Scope::block().with_declared("e", 0), vec![])]),
    "try{a()}catch{}",
  );
  check(
    program(vec![try_stmt(
      Scope::block().with_declared("e", 1),
      vec![throw(ident("e"))],
    )]),
    "try{a()}catch(a){throw a}",
  );
}

#[test]
fn test_shorthand_property_of_renamed_name() {
  check(
    program(vec![func_decl(
      "f",
      &["longName"],
      vec![ret(Some(Expr::Object(vec![ObjectMember::Shorthand {
        name: id("longName"),
        initializer: None,
      }])))],
      Scope::function().with_declared("longName", 1),
    )]),
    "function f(a){return{longName:a}}",
  );
}

#[test]
fn test_in_operator_in_for_head() {
  check(
    program(vec![Stmt::For {
      init: Some(Expr::VarDecl(VarDecl {
        mode: VarDeclMode::Var,
        declarators: vec![VariableDeclarator {
          pattern: Pattern::Identifier(id("a")),
          initializer: Some(bin(OperatorName::In, string("\"x\""), ident("o"))),
        }],
      })),
      condition: None,
      post: None,
      body: Box::new(Stmt::Empty),
      scope: Scope::block(),
    }]),
    "for(var a=(\"x\"in o);;);",
  );
}

#[test]
fn test_undefined_operands_are_dropped() {
  let mut generator = func(
    Some("g"),
    &[],
    vec![expr_stmt(Expr::Yield {
      delegate: false,
      argument: Some(Box::new(ident("undefined"))),
    })],
    Scope::function(),
  );
  generator.generator = true;
  check(program(vec![Stmt::Function(generator)]), "function*g(){yield}");
  check(
    program(vec![func_decl("f", &[], vec![ret(Some(ident("undefined")))], Scope::function())]),
    "function f(){return}",
  );
}

#[test]
fn test_class_members() {
  let getter = Function {
    is_async: false,
    generator: false,
    name: None,
    params: vec![],
    body: vec![ret(Some(num("1")))],
    scope: Scope::function(),
  };
  check(
    program(vec![Stmt::Class(Class {
      name: Some(id("A")),
      extends: Some(Box::new(ident("B"))),
      members: vec![
        ClassMember::Property {
          statik: true,
          key: direct("x"),
          initializer: Some(num("1")),
        },
        ClassMember::Method {
          statik: false,
          key: direct("m"),
          method: Method {
            kind: MethodKind::Method,
            function: func(None, &[], vec![], Scope::function()),
          },
        },
        ClassMember::Method {
          statik: false,
          key: direct("'y'"),
          method: Method {
            kind: MethodKind::Getter,
            function: getter,
          },
        },
      ],
    })]),
    "class A extends B{static x=1;m(){}get y(){return 1}}",
  );
}

#[test]
fn test_imports_and_exports() {
  let name = |target: &str, alias: &str| ExportName {
    target: SourceRange::from(target),
    alias: id(alias),
  };
  check(
    program(vec![
      Stmt::Import(Import {
        default: Some(id("a")),
        names: Some(ExportNames::Specific(vec![name("b", "c"), name("d", "d")])),
        module: SourceRange::from("\"m\""),
      }),
      Stmt::Export(Export::List {
        names: ExportNames::Specific(vec![name("x", "y")]),
        from: None,
      }),
      Stmt::Export(Export::List {
        names: ExportNames::All(Some(id("ns"))),
        from: Some(SourceRange::from("'n'")),
      }),
    ]),
    "import a,{b as c,d}from\"m\";export{x as y};export*as ns from'n'",
  );
}

#[test]
fn test_dynamic_scopes_can_be_preserved() {
  let prog = || {
    program(vec![func_decl(
      "f",
      &["longName"],
      vec![ret(Some(ident("longName")))],
      Scope::function().with_declared("longName", 1).with_dynamic(),
    )])
  };
  check(prog(), "function f(a){return a}");

  let mut out = Vec::new();
  Minifier::new()
    .with_dynamic_scopes("preserve".parse().unwrap())
    .minify(prog(), &Verbatim, &mut out)
    .unwrap();
  assert_eq!(out.as_slice(), b"function f(longName){return longName}");
  assert_eq!("ignore".parse::<DynamicScopes>(), Ok(DynamicScopes::Ignore));
  assert!("other".parse::<DynamicScopes>().is_err());
}

#[test]
fn test_parse_errors_pass_through() {
  let mut out = Vec::new();
  let err = Minifier::new()
    .minify_parsed(
      Err::<crate::ast::Program, _>(io::Error::new(io::ErrorKind::Other, "unexpected token")),
      &Verbatim,
      &mut out,
    )
    .unwrap_err();
  assert!(matches!(err, MinifyError::Syntax(_)));
  assert_eq!(err.to_string(), "unexpected token");
  assert!(out.is_empty());
}

// Writes every number without its fractional part, and records the precision it was asked for.
struct Truncating;

impl LiteralEncoder for Truncating {
  fn number<'r>(&self, kind: LiteralKind, raw: &'r [u8], precision: usize) -> Cow<'r, [u8]> {
    assert_eq!(kind, LiteralKind::Number);
    assert_eq!(precision, 3);
    match raw.iter().position(|&c| c == b'.') {
      Some(dot) => Cow::Borrowed(&raw[..dot]),
      None => Cow::Borrowed(raw),
    }
  }

  fn string<'r>(&self, raw: &'r [u8]) -> Cow<'r, [u8]> {
    Cow::Owned(raw.iter().map(|&c| if c == b'\'' { b'"' } else { c }).collect())
  }
}

#[test]
fn test_literals_go_through_the_encoder() {
  let mut out = Vec::new();
  Minifier::new()
    .with_precision(3)
    .minify(
      program(vec![
        expr_stmt(member(num("1.0"), "x")),
        expr_stmt(call(ident("f"), vec![string("'s'")])),
      ]),
      &Truncating,
      &mut out,
    )
    .unwrap();
  assert_eq!(out.as_slice(), b"1..x,f(\"s\")");
}
