use crate::operator::OperatorName;
use crate::source::SourceRange;
use crate::symbol::Identifier;
use crate::symbol::Scope;
use ahash::AHashSet;

// Every node owns its children; the minifier consumes the tree by value and moves subtrees around while
// fusing statements.

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub fn keyword(self) -> &'static [u8] {
    match self {
      VarDeclMode::Const => b"const",
      VarDeclMode::Let => b"let",
      VarDeclMode::Var => b"var",
    }
  }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum LiteralKind {
  // Any reference to a variable, including `undefined`, `NaN` and `Infinity`.
  Identifier,
  This,
  Super,
  Null,
  True,
  False,
  Number,
  BinaryNumber,
  OctalNumber,
  HexNumber,
  BigInt,
  String,
  Regex,
}

impl LiteralKind {
  pub fn is_number(self) -> bool {
    matches!(
      self,
      LiteralKind::Number | LiteralKind::BinaryNumber | LiteralKind::OctalNumber | LiteralKind::HexNumber
    )
  }
}

#[derive(Clone, Debug)]
pub struct Literal {
  pub kind: LiteralKind,
  // Source spelling, including quotes and slashes.
  pub raw: SourceRange,
}

#[derive(Clone, Debug)]
pub enum ArrayElement {
  Single(Expr),
  Rest(Expr),
  Empty,
}

#[derive(Clone, Debug)]
pub enum ClassOrObjectMemberKey {
  // Identifier, keyword, string, or number.
  Direct(SourceRange),
  Computed(Box<Expr>),
}

#[derive(Clone, Debug)]
pub enum ObjectMember {
  // A method is a `Valued` member whose value is `Expr::Method`.
  Valued {
    key: ClassOrObjectMemberKey,
    value: Expr,
  },
  Shorthand {
    name: Identifier,
    // Only valid when the object literal is an assignment target, e.g. `({a = 1} = obj)`.
    initializer: Option<Expr>,
  },
  Rest(Expr),
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum MethodKind {
  Method,
  Getter,
  Setter,
}

#[derive(Clone, Debug)]
pub struct Method {
  pub kind: MethodKind,
  // Never named; the key lives on the owning member.
  pub function: Function,
}

#[derive(Clone, Debug)]
pub enum ClassMember {
  Method {
    statik: bool,
    key: ClassOrObjectMemberKey,
    method: Method,
  },
  Property {
    statik: bool,
    key: ClassOrObjectMemberKey,
    initializer: Option<Expr>,
  },
}

#[derive(Clone, Debug)]
pub struct Class {
  pub name: Option<Identifier>,
  pub extends: Option<Box<Expr>>,
  pub members: Vec<ClassMember>,
}

#[derive(Clone, Debug)]
pub struct ParamDecl {
  pub rest: bool,
  pub pattern: Pattern,
  pub default_value: Option<Expr>,
}

/// Function declaration, function expression, arrow function or method body. The scope holds the
/// parameters and the top-level declarations of the body.
#[derive(Clone, Debug)]
pub struct Function {
  pub is_async: bool,
  pub generator: bool,
  pub name: Option<Identifier>,
  pub params: Vec<ParamDecl>,
  pub body: Vec<Stmt>,
  pub scope: Scope,
}

#[derive(Clone, Debug)]
pub struct ArrayPatternElement {
  pub target: Pattern,
  pub default_value: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct ObjectPatternProperty {
  pub key: ClassOrObjectMemberKey,
  // Omitted if shorthand i.e. key is Direct and target is an identifier of the same name.
  pub target: Option<Pattern>,
  pub default_value: Option<Expr>,
}

#[derive(Clone, Debug)]
pub enum Pattern {
  Identifier(Identifier),
  Array {
    // Unnamed elements can exist.
    elements: Vec<Option<ArrayPatternElement>>,
    rest: Option<Box<Pattern>>,
  },
  Object {
    properties: Vec<ObjectPatternProperty>,
    rest: Option<Identifier>,
  },
}

#[derive(Clone, Debug)]
pub struct VariableDeclarator {
  pub pattern: Pattern,
  pub initializer: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct VarDecl {
  pub mode: VarDeclMode,
  pub declarators: Vec<VariableDeclarator>,
}

#[derive(Clone, Debug)]
pub struct CallArg {
  pub spread: bool,
  pub value: Expr,
}

#[derive(Clone, Debug)]
pub enum LiteralTemplatePart {
  Substitution(Expr),
  // Raw text between substitutions, without the backticks and `${`/`}` delimiters.
  String(SourceRange),
}

#[derive(Clone, Debug)]
pub enum ChainAccess {
  Member(SourceRange),
  Index(Box<Expr>),
  Call(Vec<CallArg>),
}

/// One access in an optional chain. Accesses after the first `?.` are part of the same short-circuiting
/// chain, so `a?.b.c` keeps `.c` here rather than in an outer member expression.
#[derive(Clone, Debug)]
pub struct ChainLink {
  pub optional: bool,
  pub access: ChainAccess,
}

#[derive(Clone, Debug)]
pub enum Expr {
  Literal(Literal),
  Binary {
    operator: OperatorName,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  // Prefix and postfix; the operator name tells which.
  Unary {
    operator: OperatorName,
    argument: Box<Expr>,
  },
  Member {
    object: Box<Expr>,
    property: SourceRange,
  },
  // Parentheses in the source. Kept so rewrites can tell grouped operands apart, but printing decides
  // parentheses from precedence alone.
  Group(Box<Expr>),
  Array(Vec<ArrayElement>),
  Object(Vec<ObjectMember>),
  Template {
    tag: Option<Box<Expr>>,
    parts: Vec<LiteralTemplatePart>,
  },
  New {
    callee: Box<Expr>,
    // `new X` without parentheses has none.
    arguments: Option<Vec<CallArg>>,
  },
  NewTarget,
  ImportMeta,
  Yield {
    delegate: bool,
    argument: Option<Box<Expr>>,
  },
  Call {
    callee: Box<Expr>,
    arguments: Vec<CallArg>,
  },
  Index {
    object: Box<Expr>,
    index: Box<Expr>,
  },
  Conditional {
    test: Box<Expr>,
    consequent: Box<Expr>,
    alternate: Box<Expr>,
  },
  OptionalChain {
    object: Box<Expr>,
    links: Vec<ChainLink>,
  },
  Function(Box<Function>),
  Arrow(Box<Function>),
  // Only as the value of an object literal member.
  Method(Box<Method>),
  Class(Box<Class>),
  // Only as the init of a `for` head or the left side of a `for-in`/`for-of` head.
  VarDecl(VarDecl),
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum BranchKind {
  Break,
  Continue,
}

#[derive(Clone, Debug)]
pub struct Block {
  pub body: Vec<Stmt>,
  pub scope: Scope,
}

#[derive(Clone, Debug)]
pub struct SwitchBranch {
  // If None, it's `default`.
  pub case: Option<Expr>,
  pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct CatchBlock {
  pub parameter: Option<Pattern>,
  pub body: Vec<Stmt>,
  // Holds the parameter and the declarations of the body.
  pub scope: Scope,
}

#[derive(Clone, Debug)]
pub struct ExportName {
  // For simplicity, we always set both fields; for shorthands, both are identical.
  pub target: SourceRange,
  pub alias: Identifier,
}

#[derive(Clone, Debug)]
pub enum ExportNames {
  // `import * as name`
  // `export * from "module"`
  // `export * as name from "module"`
  All(Option<Identifier>),
  // `import {a as b, c, default as e}`
  // `export {a as default, b as c, d}`
  Specific(Vec<ExportName>),
}

#[derive(Clone, Debug)]
pub struct Import {
  pub default: Option<Identifier>,
  pub names: Option<ExportNames>,
  // Raw string literal.
  pub module: SourceRange,
}

#[derive(Clone, Debug)]
pub enum Export {
  // `export var a`, `export function f(){}`, `export class A{}`.
  Decl(Box<Stmt>),
  // `export default <expr>`, including function and class expressions.
  Default(Expr),
  List {
    names: ExportNames,
    // Raw string literal.
    from: Option<SourceRange>,
  },
}

#[derive(Clone, Debug)]
pub enum Stmt {
  Expression(Expr),
  VarDecl(VarDecl),
  If {
    test: Expr,
    consequent: Box<Stmt>,
    alternate: Option<Box<Stmt>>,
  },
  Block(Block),
  Return(Option<Expr>),
  Labelled {
    name: Identifier,
    statement: Box<Stmt>,
  },
  Branch {
    kind: BranchKind,
    label: Option<Identifier>,
  },
  With {
    object: Expr,
    body: Box<Stmt>,
  },
  DoWhile {
    body: Box<Stmt>,
    condition: Expr,
  },
  While {
    condition: Expr,
    body: Box<Stmt>,
  },
  // The scope is the loop head's, holding `let`/`const` declared in `init`.
  For {
    init: Option<Expr>,
    condition: Option<Expr>,
    post: Option<Expr>,
    body: Box<Stmt>,
    scope: Scope,
  },
  ForIn {
    lhs: Expr,
    rhs: Expr,
    body: Box<Stmt>,
    scope: Scope,
  },
  ForOf {
    is_await: bool,
    lhs: Expr,
    rhs: Expr,
    body: Box<Stmt>,
    scope: Scope,
  },
  Switch {
    test: Expr,
    branches: Vec<SwitchBranch>,
    scope: Scope,
  },
  Throw(Expr),
  Try {
    wrapped: Block,
    // At least one of these must be present.
    catch: Option<CatchBlock>,
    finally: Option<Block>,
  },
  Function(Function),
  Class(Class),
  Debugger,
  Empty,
  Import(Import),
  Export(Export),
}

/// A parsed and analysed program, as handed over by the upstream parser.
#[derive(Clone, Debug)]
pub struct Program {
  pub body: Vec<Stmt>,
  pub scope: Scope,
  // Referenced but never declared anywhere in the program.
  pub undeclared: AHashSet<Identifier>,
}
