use super::name::MinifiedNameGenerator;
use super::DynamicScopes;
use crate::char::GLOBALS;
use crate::char::KEYWORDS;
use crate::source::SourceRange;
use crate::symbol::Identifier;
use crate::symbol::Scope;
use crate::symbol::Var;
use ahash::AHashMap;
use ahash::AHashSet;
use itertools::Itertools;
use tracing::trace;

struct ScopeFrame {
  scope: Scope,
  // Original name to the spelling visible in this scope. Inherited names only appear when spelled differently.
  renames: AHashMap<Identifier, Identifier>,
}

/// Stack of the lexical scopes enclosing the code being printed, with the minified spelling of every name they
/// declare or inherit. The bottom frame is the program scope, which is never renamed.
pub struct Renamer {
  reserved: AHashSet<Vec<u8>>,
  frames: Vec<ScopeFrame>,
  deterministic: bool,
  dynamic_scopes: DynamicScopes,
}

impl Renamer {
  pub fn new(
    global: Scope,
    undeclared: &AHashSet<Identifier>,
    deterministic: bool,
    dynamic_scopes: DynamicScopes,
  ) -> Renamer {
    let reserved = KEYWORDS
      .iter()
      .chain(GLOBALS.iter())
      .map(|n| n.to_vec())
      .chain(undeclared.iter().map(|n| n.as_slice().to_vec()))
      .collect();
    Renamer {
      reserved,
      frames: vec![ScopeFrame {
        scope: global,
        renames: AHashMap::new(),
      }],
      deterministic,
      dynamic_scopes,
    }
  }

  pub fn in_global_scope(&self) -> bool {
    self.frames.len() == 1
  }

  /// Number of scopes entered and not yet exited.
  pub fn depth(&self) -> usize {
    self.frames.len() - 1
  }

  pub fn enter_scope(&mut self, scope: Scope) {
    let mut renames = AHashMap::new();
    // Spellings that a new name in this scope must not take.
    let mut taken = AHashSet::<Vec<u8>>::new();
    for (name, var) in scope.vars().filter(|(_, var)| !var.declared) {
      let visible = self.rename(name);
      taken.insert(visible.as_slice().to_vec());
      if visible != *name {
        renames.insert(name.clone(), visible);
      };
    }

    let frozen = scope.is_dynamic() && self.dynamic_scopes == DynamicScopes::Preserve;
    let mut fresh = Vec::<&Identifier>::new();
    for (name, var) in scope.vars().filter(|(_, var)| var.declared) {
      if !frozen && (var.uses > 0 || taken.contains(name.as_slice())) {
        fresh.push(name);
      } else {
        // Shadows any rename of the same name further out.
        taken.insert(name.as_slice().to_vec());
        renames.insert(name.clone(), name.clone());
      };
    }
    if self.deterministic {
      fresh.sort();
    };
    let mut gen = MinifiedNameGenerator::new();
    for name in fresh {
      let minified = gen.generate_next_available_minified_name(|n| self.reserved.contains(n) || taken.contains(n));
      renames.insert(name.clone(), SourceRange::anonymous(minified));
    }

    trace!(
      depth = self.frames.len(),
      frozen,
      renames = ?renames.iter().map(|(from, to)| format!("{}->{}", from.as_str(), to.as_str())).sorted().collect_vec(),
      "enter scope"
    );
    self.frames.push(ScopeFrame { scope, renames });
  }

  /// Pops the innermost scope and hands its table back. Exiting the program scope is a bug in the caller.
  pub fn exit_scope(&mut self) -> Scope {
    assert!(!self.in_global_scope(), "unpaired scope exit");
    let frame = self.frames.pop().unwrap_or_else(|| unreachable!());
    trace!(depth = self.frames.len(), "exit scope");
    frame.scope
  }

  /// The spelling of `name` as visible from the innermost scope.
  pub fn rename(&self, name: &Identifier) -> Identifier {
    self
      .frames
      .iter()
      .rev()
      .find_map(|f| f.renames.get(name))
      .unwrap_or(name)
      .clone()
  }

  /// The binding `name` resolves to from the innermost scope, with the depth of the declaring scope.
  pub fn binding(&self, name: &[u8]) -> Option<(usize, Var)> {
    self
      .frames
      .iter()
      .enumerate()
      .rev()
      .find_map(|(depth, f)| f.scope.get(name).filter(|v| v.declared).map(|v| (depth, *v)))
  }

  pub fn is_bound(&self, name: &[u8]) -> bool {
    self.binding(name).is_some()
  }

  /// Every renamed name visible from the innermost scope, sorted by original name.
  #[cfg(test)]
  pub fn visible_renames(&self) -> Vec<(Identifier, Identifier)> {
    let mut visible = AHashMap::<&Identifier, &Identifier>::new();
    for frame in self.frames.iter() {
      visible.extend(frame.renames.iter());
    }
    visible
      .into_iter()
      .map(|(from, to)| (from.clone(), to.clone()))
      .sorted()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::Renamer;
  use crate::minify::DynamicScopes;
  use crate::source::SourceRange;
  use crate::symbol::Scope;
  use ahash::AHashSet;
  use proptest::prelude::*;

  fn id(name: &str) -> SourceRange {
    SourceRange::anonymous(name)
  }

  fn renamer(global: Scope, undeclared: &[&str]) -> Renamer {
    let undeclared: AHashSet<_> = undeclared.iter().map(|n| id(n)).collect();
    Renamer::new(global, &undeclared, true, DynamicScopes::Ignore)
  }

  fn spelled(r: &Renamer, name: &str) -> String {
    String::from_utf8(r.rename(&id(name)).as_slice().to_vec()).unwrap()
  }

  #[test]
  fn test_global_scope_is_not_renamed() {
    let r = renamer(Scope::function().with_declared("longName", 3), &[]);
    assert_eq!(spelled(&r, "longName"), "longName");
    assert!(r.in_global_scope());
  }

  #[test]
  fn test_declared_names_get_short_names() {
    let mut r = renamer(Scope::function(), &[]);
    r.enter_scope(Scope::function().with_declared("second", 1).with_declared("first", 1));
    // Deterministic mode assigns in sorted order.
    assert_eq!(spelled(&r, "first"), "a");
    assert_eq!(spelled(&r, "second"), "b");
    assert_eq!(spelled(&r, "other"), "other");
  }

  #[test]
  fn test_encounter_order() {
    let mut r = Renamer::new(Scope::function(), &AHashSet::new(), false, DynamicScopes::Ignore);
    r.enter_scope(Scope::function().with_declared("second", 1).with_declared("first", 1));
    assert_eq!(spelled(&r, "second"), "a");
    assert_eq!(spelled(&r, "first"), "b");
  }

  #[test]
  fn test_unused_declarations_keep_their_name_and_block_it() {
    let mut r = renamer(Scope::function(), &[]);
    r.enter_scope(Scope::function().with_declared("a", 0).with_declared("used", 2));
    assert_eq!(spelled(&r, "a"), "a");
    assert_eq!(spelled(&r, "used"), "b");
  }

  #[test]
  fn test_unused_declarations_shadow_outer_renames() {
    let mut r = renamer(Scope::function(), &[]);
    r.enter_scope(Scope::function().with_declared("x", 2));
    assert_eq!(spelled(&r, "x"), "a");
    r.enter_scope(Scope::function().with_declared("x", 0).with_declared("y", 1));
    assert_eq!(spelled(&r, "x"), "x");
    assert_eq!(spelled(&r, "y"), "a");
    r.exit_scope();
    assert_eq!(spelled(&r, "x"), "a");
  }

  #[test]
  fn test_unused_declarations_avoid_inherited_spellings() {
    let mut r = renamer(Scope::function(), &[]);
    r.enter_scope(Scope::function().with_declared("outer", 1));
    assert_eq!(spelled(&r, "outer"), "a");
    r.enter_scope(
      Scope::function()
        .with_declared("a", 0)
        .with_declared("used", 1)
        .with_inherited("outer", 1),
    );
    assert_eq!(spelled(&r, "outer"), "a");
    assert_eq!(spelled(&r, "a"), "b");
    assert_eq!(spelled(&r, "used"), "c");
  }

  #[test]
  fn test_reserved_names_are_skipped() {
    let mut r = renamer(Scope::function(), &["a"]);
    r.enter_scope(Scope::function().with_declared("x", 1));
    assert_eq!(spelled(&r, "x"), "b");
  }

  #[test]
  fn test_inherited_spellings_are_not_reused() {
    let mut r = renamer(Scope::function().with_declared("g", 1), &[]);
    r.enter_scope(Scope::function().with_declared("outer", 1).with_inherited("g", 1));
    assert_eq!(spelled(&r, "outer"), "a");
    r.enter_scope(
      Scope::function()
        .with_declared("inner", 1)
        .with_inherited("outer", 1)
        .with_inherited("g", 1),
    );
    // `a` is how `outer` is spelled here.
    assert_eq!(spelled(&r, "outer"), "a");
    assert_eq!(spelled(&r, "inner"), "b");
    assert_eq!(spelled(&r, "g"), "g");
    r.exit_scope();
    r.exit_scope();
    assert_eq!(r.depth(), 0);
  }

  #[test]
  fn test_names_not_inherited_may_be_shadowed() {
    let mut r = renamer(Scope::function(), &[]);
    r.enter_scope(Scope::function().with_declared("outer", 1));
    r.enter_scope(Scope::function().with_declared("inner", 1));
    assert_eq!(spelled(&r, "inner"), "a");
  }

  #[test]
  fn test_dynamic_scopes_can_be_preserved() {
    let undeclared = AHashSet::new();
    let mut r = Renamer::new(Scope::function(), &undeclared, true, DynamicScopes::Preserve);
    r.enter_scope(Scope::function().with_declared("kept", 1).with_dynamic());
    assert_eq!(spelled(&r, "kept"), "kept");
    r.exit_scope();
    r.enter_scope(Scope::function().with_declared("renamed", 1));
    assert_eq!(spelled(&r, "renamed"), "a");

    let mut r = renamer(Scope::function(), &[]);
    r.enter_scope(Scope::function().with_declared("renamed", 1).with_dynamic());
    assert_eq!(spelled(&r, "renamed"), "a");
  }

  #[test]
  #[should_panic(expected = "unpaired scope exit")]
  fn test_exiting_global_scope_panics() {
    let mut r = renamer(Scope::function(), &[]);
    r.exit_scope();
  }

  fn arb_scope(depth: usize) -> impl Strategy<Value = Vec<(String, bool, usize)>> {
    let name = prop_oneof![Just("a".to_string()), Just("b".to_string()), "[c-f][a-z]{0,3}"];
    prop::collection::vec((name, any::<bool>(), 0usize..3), 0..(6 + depth))
  }

  proptest! {
    #[test]
    fn scope_chains_never_share_spellings(chain in prop::collection::vec(arb_scope(2), 1..5)) {
      let mut r = renamer(Scope::function(), &["a"]);
      let mut declared_so_far: Vec<String> = Vec::new();
      let mut snapshots = Vec::new();
      for vars in chain.iter() {
        let mut scope = Scope::function();
        for (name, declared, uses) in vars.iter() {
          if *declared {
            scope.declare(name.as_str(), *uses);
          };
        }
        // Everything declared further out is referenced from here, so it must stay distinguishable.
        for name in declared_so_far.iter() {
          if !scope.declares(name.as_bytes()) {
            scope.inherit(name.as_str(), 1);
          };
        }
        snapshots.push(r.visible_renames());
        r.enter_scope(scope.clone());
        let mut spellings = AHashSet::new();
        for (name, _) in scope.vars() {
          let visible = r.rename(name);
          // Only names kept as written may be spelled like the reserved `a`.
          prop_assert!(visible == *name || visible.as_slice() != b"a");
          prop_assert!(spellings.insert(visible.as_slice().to_vec()), "{:?} collides", visible);
        }
        for (name, var) in scope.vars() {
          if var.declared && !declared_so_far.iter().any(|n| n.as_bytes() == name.as_slice()) {
            declared_so_far.push(String::from_utf8(name.as_slice().to_vec()).unwrap());
          };
        }
      }
      while let Some(before) = snapshots.pop() {
        r.exit_scope();
        prop_assert_eq!(r.visible_renames(), before);
      }
      prop_assert_eq!(r.depth(), 0);
    }
  }
}
