use crate::source::SourceRange;
use ahash::AHashMap;

pub type Identifier = SourceRange;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScopeType {
  // Program, function, method or arrow function.
  Function,
  // Block statement, loop head, switch body or catch clause.
  Block,
}

/// A name as seen from one scope: either declared there, or inherited because the scope (or one of its
/// descendants) references a binding that resolves further out.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Var {
  pub declared: bool,
  // References only; the declaring occurrence is not counted.
  pub uses: usize,
}

impl Var {
  pub fn declared(uses: usize) -> Var {
    Var {
      declared: true,
      uses,
    }
  }

  pub fn inherited(uses: usize) -> Var {
    Var {
      declared: false,
      uses,
    }
  }
}

/// The variable table of one lexical scope, as reported by the upstream analysis.
#[derive(Clone, Debug)]
pub struct Scope {
  typ: ScopeType,
  vars: AHashMap<Identifier, Var>,
  // For deterministic outputs when renaming in encounter order.
  var_order: Vec<Identifier>,
  // Contains `with` or a direct `eval`, itself or in a descendant.
  dynamic: bool,
}

impl Default for Scope {
  fn default() -> Scope {
    Scope::new(ScopeType::Block)
  }
}

impl Scope {
  pub fn new(typ: ScopeType) -> Scope {
    Scope {
      typ,
      vars: AHashMap::new(),
      var_order: Vec::new(),
      dynamic: false,
    }
  }

  pub fn function() -> Scope {
    Scope::new(ScopeType::Function)
  }

  pub fn block() -> Scope {
    Scope::new(ScopeType::Block)
  }

  pub fn typ(&self) -> ScopeType {
    self.typ
  }

  pub fn is_dynamic(&self) -> bool {
    self.dynamic
  }

  pub fn set_dynamic(&mut self, dynamic: bool) {
    self.dynamic = dynamic;
  }

  /// Records a name. Reporting the same name again merges the entries: it stays declared if either report
  /// declared it, and the use counts add up.
  pub fn add_var(&mut self, name: Identifier, var: Var) {
    match self.vars.get_mut(&name) {
      Some(existing) => {
        existing.declared |= var.declared;
        existing.uses += var.uses;
      }
      None => {
        self.var_order.push(name.clone());
        self.vars.insert(name, var);
      }
    };
  }

  pub fn declare(&mut self, name: impl Into<Identifier>, uses: usize) {
    self.add_var(name.into(), Var::declared(uses));
  }

  pub fn inherit(&mut self, name: impl Into<Identifier>, uses: usize) {
    self.add_var(name.into(), Var::inherited(uses));
  }

  /// Builder form of `declare`.
  pub fn with_declared(mut self, name: &str, uses: usize) -> Scope {
    self.declare(name, uses);
    self
  }

  /// Builder form of `inherit`.
  pub fn with_inherited(mut self, name: &str, uses: usize) -> Scope {
    self.inherit(name, uses);
    self
  }

  pub fn with_dynamic(mut self) -> Scope {
    self.dynamic = true;
    self
  }

  pub fn get(&self, name: &[u8]) -> Option<&Var> {
    self.vars.get(name)
  }

  pub fn declares(&self, name: &[u8]) -> bool {
    self.get(name).map_or(false, |v| v.declared)
  }

  /// All names in the order the analysis reported them.
  pub fn vars(&self) -> impl Iterator<Item = (&Identifier, &Var)> {
    self.var_order.iter().map(move |name| (name, &self.vars[name]))
  }

  pub fn has_declarations(&self) -> bool {
    self.vars.values().any(|v| v.declared)
  }

  pub fn len(&self) -> usize {
    self.var_order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.var_order.is_empty()
  }
}
