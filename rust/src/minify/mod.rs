use crate::ast::Program;
use crate::emit::Emitter;
use crate::error::MinifyError;
use crate::error::MinifyResult;
use crate::error::SyntaxError;
use crate::literal::LiteralEncoder;
use crate::symbol::Scope;
use rename::Renamer;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

mod analysis;
mod expr;
mod fuse;
mod name;
mod rename;
mod stmt;
#[cfg(test)]
mod tests;

/// What to do with scopes that contain `with` or a direct `eval`, where code may look up names by their source
/// spelling at run time.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DynamicScopes {
  /// Rename as usual.
  #[default]
  Ignore,
  /// Keep the spelling of every name declared in such a scope.
  Preserve,
}

impl FromStr for DynamicScopes {
  type Err = &'static str;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "ignore" => Ok(DynamicScopes::Ignore),
      "preserve" => Ok(DynamicScopes::Preserve),
      _ => Err("expected `ignore` or `preserve`"),
    }
  }
}

/// Configuration of a minification pass. Cheap to clone; every call to `minify` runs an independent pass.
#[derive(Clone, Debug, Default)]
pub struct Minifier {
  /// Significant digits to keep in numbers, forwarded to the literal encoder. 0 keeps all of them.
  pub precision: usize,
  /// Assign short names in sorted order of the original names rather than in the order the analysis reported them.
  pub deterministic: bool,
  /// Whether names in scopes containing `with` or a direct `eval` are renamed.
  pub dynamic_scopes: DynamicScopes,
}

impl Minifier {
  pub fn new() -> Minifier {
    Minifier::default()
  }

  pub fn with_precision(mut self, precision: usize) -> Minifier {
    self.precision = precision;
    self
  }

  pub fn with_deterministic(mut self, deterministic: bool) -> Minifier {
    self.deterministic = deterministic;
    self
  }

  pub fn with_dynamic_scopes(mut self, dynamic_scopes: DynamicScopes) -> Minifier {
    self.dynamic_scopes = dynamic_scopes;
    self
  }

  /// Minifies `program` and writes the result to `output` in one write.
  pub fn minify<T: Write>(
    &self,
    program: Program,
    encoder: &dyn LiteralEncoder,
    output: &mut T,
  ) -> MinifyResult<()> {
    debug!(
      statements = program.body.len(),
      undeclared = program.undeclared.len(),
      deterministic = self.deterministic,
      dynamic_scopes = ?self.dynamic_scopes,
      "minifying program"
    );
    let Program {
      body,
      scope,
      undeclared,
    } = program;
    let mut pass = MinifyPass {
      out: Emitter::new(),
      renamer: Renamer::new(scope, &undeclared, self.deterministic, self.dynamic_scopes),
      encoder,
      precision: self.precision,
    };
    pass.minify_stmt_list(body, true);
    assert_eq!(pass.renamer.depth(), 0, "scopes left open after pass");
    let minified = pass.out.finish();
    debug!(bytes = minified.len(), "minified program");
    output.write_all(&minified)?;
    Ok(())
  }

  /// Like `minify`, but takes the parser's result directly. A parse error is returned as is, without writing
  /// anything.
  pub fn minify_parsed<T: Write, E: Into<SyntaxError>>(
    &self,
    parsed: Result<Program, E>,
    encoder: &dyn LiteralEncoder,
    output: &mut T,
  ) -> MinifyResult<()> {
    let program = parsed.map_err(|err| MinifyError::Syntax(err.into()))?;
    self.minify(program, encoder, output)
  }
}

/// State of one pass: output so far, the scope stack, and the literal encoder. The fuser, reducer and statement
/// printer are implemented on it in their own modules.
pub(crate) struct MinifyPass<'e> {
  pub(crate) out: Emitter,
  pub(crate) renamer: Renamer,
  encoder: &'e dyn LiteralEncoder,
  precision: usize,
}

impl<'e> MinifyPass<'e> {
  #[cfg(test)]
  pub(crate) fn new(
    program_scope: Scope,
    undeclared: &ahash::AHashSet<crate::symbol::Identifier>,
    encoder: &'e dyn LiteralEncoder,
  ) -> MinifyPass<'e> {
    MinifyPass {
      out: Emitter::new(),
      renamer: Renamer::new(program_scope, undeclared, true, DynamicScopes::Ignore),
      encoder,
      precision: 0,
    }
  }

  /// Runs `f` with `scope` pushed. The scope is popped on return, so every path out of `f` restores the parent's
  /// names.
  pub(crate) fn in_scope<R>(&mut self, scope: Scope, f: impl FnOnce(&mut Self) -> R) -> R {
    self.renamer.enter_scope(scope);
    let res = f(self);
    self.renamer.exit_scope();
    res
  }
}
