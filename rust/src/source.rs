use std::borrow::Borrow;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Slice of a shared source buffer, used for identifiers and raw literal spellings. Compared, hashed and ordered
/// by its bytes only: `foo` at offset 4 equals `foo` at offset 10, and equals a generated `foo`.
#[derive(Clone)]
pub struct SourceRange {
  pub source: Source,
  pub start: usize,
  pub end: usize,
}

impl SourceRange {
  pub fn new(source: Source, start: usize, end: usize) -> SourceRange {
    assert!(start <= end && end <= source.code().len());
    SourceRange { source, start, end }
  }

  /// Ranges not backed by any parsed file, such as generated minified names.
  pub fn anonymous<T: Into<Vec<u8>>>(code: T) -> SourceRange {
    let code = code.into();
    let end = code.len();
    SourceRange {
      source: Source::new(code),
      start: 0,
      end,
    }
  }

  pub fn as_slice(&self) -> &[u8] {
    &self.source.code()[self.start..self.end]
  }

  /// Lossy for the rare range that splits a UTF-8 sequence; only meant for diagnostics.
  pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(self.as_slice())
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

impl Debug for SourceRange {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "`{}`[{}:{}]", self.as_str(), self.start, self.end)
  }
}

impl Eq for SourceRange {}

// Must agree with the hash of `[u8]` so maps keyed by ranges can be queried by slice.
impl Hash for SourceRange {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.as_slice().hash(state);
  }
}

impl PartialEq for SourceRange {
  fn eq(&self, other: &Self) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl PartialEq<[u8]> for SourceRange {
  fn eq(&self, other: &[u8]) -> bool {
    self.as_slice() == other
  }
}

impl PartialEq<str> for SourceRange {
  fn eq(&self, other: &str) -> bool {
    self.as_slice() == other.as_bytes()
  }
}

impl PartialOrd for SourceRange {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for SourceRange {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.as_slice().cmp(other.as_slice())
  }
}

impl Borrow<[u8]> for SourceRange {
  fn borrow(&self) -> &[u8] {
    self.as_slice()
  }
}

impl From<&str> for SourceRange {
  fn from(code: &str) -> SourceRange {
    SourceRange::anonymous(code)
  }
}

#[derive(Clone)]
pub struct Source(Rc<[u8]>);

impl Source {
  pub fn new(code: Vec<u8>) -> Source {
    Source(code.into())
  }

  pub fn code(&self) -> &[u8] {
    &self.0
  }

  /// Range over `start..end` of this source.
  pub fn range(&self, start: usize, end: usize) -> SourceRange {
    SourceRange::new(self.clone(), start, end)
  }
}

#[cfg(test)]
mod tests {
  use super::Source;
  use super::SourceRange;
  use ahash::AHashSet;

  #[test]
  fn test_equality_is_by_content() {
    let a = Source::new(b"var foo = foo;".to_vec());
    let first = a.range(4, 7);
    let second = a.range(10, 13);
    assert_eq!(first, second);
    assert_eq!(first, SourceRange::anonymous("foo"));
    assert_ne!(first, a.range(0, 3));
  }

  #[test]
  fn test_lookup_by_slice() {
    let mut set = AHashSet::new();
    set.insert(Source::new(b"let longName".to_vec()).range(4, 12));
    assert!(set.contains(b"longName".as_slice()));
    assert!(!set.contains(b"long".as_slice()));
  }
}
