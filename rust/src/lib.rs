use ast::Program;
use std::io::Write;

pub mod ast;
mod char;
mod emit;
pub mod error;
pub mod literal;
pub mod minify;
pub mod operator;
pub mod source;
pub mod symbol;

pub use error::MinifyError;
pub use error::MinifyResult;
pub use error::SyntaxError;
pub use literal::LiteralEncoder;
pub use literal::Verbatim;
pub use minify::DynamicScopes;
pub use minify::Minifier;

/// Minifies an analysed program with the default configuration, writing literals as they appear in the source.
///
/// # Arguments
///
/// * `program` - The parsed program, with a scope table on every function, block and catch clause.
/// * `output` - Destination to write minified output JavaScript code.
///
/// # Examples
///
/// ```
/// use squash_js::ast::{Expr, Literal, LiteralKind, Pattern, Program, Stmt, VarDecl, VarDeclMode, VariableDeclarator};
/// use squash_js::minify;
/// use squash_js::source::SourceRange;
/// use squash_js::symbol::Scope;
///
/// let declare = |name: &str, value: &str| {
///   Stmt::VarDecl(VarDecl {
///     mode: VarDeclMode::Var,
///     declarators: vec![VariableDeclarator {
///       pattern: Pattern::Identifier(SourceRange::from(name)),
///       initializer: Some(Expr::Literal(Literal {
///         kind: LiteralKind::Number,
///         raw: SourceRange::from(value),
///       })),
///     }],
///   })
/// };
/// let program = Program {
///   body: vec![declare("x", "1"), declare("y", "2")],
///   scope: Scope::function(),
///   undeclared: Default::default(),
/// };
/// let mut out = Vec::new();
/// minify(program, &mut out).unwrap();
/// assert_eq!(out.as_slice(), b"var x=1,y=2");
/// ```
pub fn minify<T: Write>(program: Program, output: &mut T) -> MinifyResult<()> {
  Minifier::new().minify(program, &Verbatim, output)
}
