use crate::char::is_id_continue;

/// Byte sink for minified code. Tokens are written back to back; the emitter only adds the whitespace required for
/// the output to tokenise the same way, and defers statement terminators until it knows another statement follows.
pub struct Emitter {
  out: Vec<u8>,
  // The last token was a word, so a following byte that could continue it must be separated.
  word_boundary: bool,
  semicolon_owed: bool,
}

impl Emitter {
  pub fn new() -> Emitter {
    Emitter {
      out: Vec::new(),
      word_boundary: false,
      semicolon_owed: false,
    }
  }

  fn needs_space_before(&self, token: &[u8]) -> bool {
    let first = match token.first() {
      Some(&c) => c,
      None => return false,
    };
    if self.word_boundary && is_id_continue(first) {
      return true;
    };
    match (self.out.last(), first) {
      // `a+ +b`, `a- --b`.
      (Some(b'+'), b'+') | (Some(b'-'), b'-') => true,
      // Would start a comment.
      (Some(b'/'), b'/' | b'*') => true,
      // HTML-like comments: `a< !--b` and `a-- >b`.
      (Some(b'!'), b'-') => self.out.ends_with(b"<!") && token.starts_with(b"--"),
      (Some(b'-'), b'>') => self.out.ends_with(b"--"),
      _ => false,
    }
  }

  pub fn write(&mut self, token: &[u8]) {
    if self.needs_space_before(token) {
      self.out.push(b' ');
    };
    self.out.extend_from_slice(token);
    self.word_boundary = false;
  }

  /// Writes a keyword or an identifier-like token that must not merge with a word or regex before it, and must not
  /// merge with a word after it.
  pub fn write_keyword(&mut self, keyword: &[u8]) {
    if matches!(self.out.last(), Some(&c) if is_id_continue(c) || c == b'/') {
      self.out.push(b' ');
      self.word_boundary = false;
    };
    self.write(keyword);
    self.word_boundary = true;
  }

  /// Marks the last written token as a word, e.g. after an identifier followed by a keyword operator.
  pub fn word_ended(&mut self) {
    self.word_boundary = true;
  }

  pub fn require_semicolon(&mut self) {
    self.semicolon_owed = true;
  }

  /// Pays an owed statement terminator, if any.
  pub fn write_semicolon(&mut self) {
    if self.semicolon_owed {
      self.out.push(b';');
      self.semicolon_owed = false;
      self.word_boundary = false;
    };
  }

  /// Forgets an owed terminator because a brace already ends the statement.
  pub fn clear_semicolon(&mut self) {
    self.semicolon_owed = false;
  }

  #[cfg(test)]
  pub fn semicolon_owed(&self) -> bool {
    self.semicolon_owed
  }

  #[cfg(test)]
  pub fn as_slice(&self) -> &[u8] {
    &self.out
  }

  pub fn finish(self) -> Vec<u8> {
    self.out
  }
}

#[cfg(test)]
mod tests;
