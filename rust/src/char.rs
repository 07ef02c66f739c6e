use ahash::AHashSet;
use lazy_static::lazy_static;
use memchr::memchr;
use std::ops::RangeInclusive;

#[derive(Clone)]
pub struct CharFilter {
  table: [bool; 256],
}

impl CharFilter {
  pub fn new() -> CharFilter {
    CharFilter {
      table: [false; 256],
    }
  }

  pub fn add_char(&mut self, c: u8) -> () {
    self.table[c as usize] = true;
  }

  pub fn add_chars(&mut self, chars: RangeInclusive<u8>) -> () {
    for c in chars {
      self.table[c as usize] = true;
    }
  }

  pub fn add_chars_from_slice(&mut self, chars: &[u8]) -> () {
    for c in chars {
      self.table[*c as usize] = true;
    }
  }

  pub fn has(&self, c: u8) -> bool {
    self.table[c as usize]
  }
}

// Alphabet of generated names, in generation order.
pub const ID_START_CHARSTR: &'static [u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$";

lazy_static! {
  pub static ref ID_START: CharFilter = {
    let mut filter = CharFilter::new();
    filter.add_chars_from_slice(ID_START_CHARSTR);
    // Escapes and non-ASCII (UTF-8 lead and continuation bytes) may continue or start a word.
    filter.add_char(b'\\');
    filter.add_chars(0x80..=0xff);
    filter
  };

  pub static ref ID_CONTINUE: CharFilter = {
    let mut filter = ID_START.clone();
    filter.add_chars(b'0'..=b'9');
    filter
  };

  pub static ref KEYWORDS: AHashSet<&'static [u8]> = {
    let mut set = AHashSet::<&'static [u8]>::new();
    for kw in [
      "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
      "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "from", "function",
      "get", "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "of",
      "package", "private", "protected", "public", "return", "set", "static", "super", "switch", "this",
      "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
    ] {
      set.insert(kw.as_bytes());
    }
    set
  };

  // Well-known globals a generated name must never shadow, even if the program does not mention them.
  pub static ref GLOBALS: AHashSet<&'static [u8]> = {
    let mut set = AHashSet::<&'static [u8]>::new();
    for g in [
      "Array", "ArrayBuffer", "BigInt", "Boolean", "DataView", "Date", "Error", "EvalError", "Float32Array",
      "Float64Array", "Function", "Infinity", "Int16Array", "Int32Array", "Int8Array", "Intl", "JSON", "Map",
      "Math", "NaN", "Number", "Object", "Promise", "Proxy", "RangeError", "ReferenceError", "Reflect",
      "RegExp", "Set", "String", "Symbol", "SyntaxError", "TypeError", "URIError", "Uint16Array",
      "Uint32Array", "Uint8Array", "Uint8ClampedArray", "WeakMap", "WeakSet", "WebAssembly", "arguments",
      "console", "decodeURI", "decodeURIComponent", "document", "encodeURI", "encodeURIComponent", "escape",
      "eval", "exports", "global", "globalThis", "isFinite", "isNaN", "module", "parseFloat", "parseInt",
      "require", "self", "undefined", "unescape", "window",
    ] {
      set.insert(g.as_bytes());
    }
    set
  };
}

pub fn is_id_continue(c: u8) -> bool {
  ID_CONTINUE.has(c)
}

/// Whether `name` can be written unquoted as a property name. Only the ASCII subset is recognised.
pub fn is_identifier_name(name: &[u8]) -> bool {
  match name.split_first() {
    Some((&first, rest)) => {
      ID_START_CHARSTR.contains(&first) && rest.iter().all(|&c| c.is_ascii_alphanumeric() || c == b'_' || c == b'$')
    }
    None => false,
  }
}

/// Whether `name` is how a number prints when used as a property key, so `"12"` can be written as `12`.
pub fn is_canonical_integer(name: &[u8]) -> bool {
  match name {
    b"0" => true,
    [b'1'..=b'9', rest @ ..] => rest.len() < 15 && rest.iter().all(u8::is_ascii_digit),
    _ => false,
  }
}

/// Contents of a string literal's raw spelling without the quotes, if they can be copied outside of the
/// literal as-is (no escapes).
pub fn plain_string_contents(raw: &[u8]) -> Option<&[u8]> {
  match raw {
    [q @ (b'"' | b'\''), inner @ .., last] if q == last && memchr(b'\\', inner).is_none() => Some(inner),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_identifier_names() {
    assert!(is_identifier_name(b"foo"));
    assert!(is_identifier_name(b"$a_1"));
    assert!(!is_identifier_name(b"1a"));
    assert!(!is_identifier_name(b"a-b"));
    assert!(!is_identifier_name(b""));
  }

  #[test]
  fn test_canonical_integers() {
    assert!(is_canonical_integer(b"0"));
    assert!(is_canonical_integer(b"1200"));
    assert!(!is_canonical_integer(b"01"));
    assert!(!is_canonical_integer(b"1.5"));
    assert!(!is_canonical_integer(b"99999999999999999999"));
  }

  #[test]
  fn test_plain_string_contents() {
    assert_eq!(plain_string_contents(b"\"abc\""), Some(b"abc".as_slice()));
    assert_eq!(plain_string_contents(b"'a b'"), Some(b"a b".as_slice()));
    assert_eq!(plain_string_contents(b"'a\\u0062'"), None);
    assert_eq!(plain_string_contents(b"'mismatch\""), None);
    assert_eq!(plain_string_contents(b"\""), None);
  }
}
