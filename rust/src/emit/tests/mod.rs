use crate::emit::Emitter;

fn emitted(tokens: &[(&str, bool)]) -> String {
  let mut out = Emitter::new();
  for &(token, keyword) in tokens {
    if keyword {
      out.write_keyword(token.as_bytes());
    } else {
      out.write(token.as_bytes());
    };
  }
  String::from_utf8(out.finish()).unwrap()
}

#[test]
fn test_words_are_separated_only_when_they_would_merge() {
  assert_eq!(emitted(&[("return", true), ("1", false)]), "return 1");
  assert_eq!(emitted(&[("return", true), ("x", false)]), "return x");
  assert_eq!(emitted(&[("return", true), ("\"s\"", false)]), "return\"s\"");
  assert_eq!(emitted(&[("return", true), ("!", false), ("0", false)]), "return!0");
  assert_eq!(emitted(&[("typeof", true), ("(", false)]), "typeof(");
  assert_eq!(emitted(&[("}", false), ("else", true), ("{", false)]), "}else{");
}

#[test]
fn test_keyword_operators_after_words_and_regexes() {
  assert_eq!(emitted(&[("a", false), ("in", true), ("b", false)]), "a in b");
  assert_eq!(emitted(&[(")", false), ("in", true), ("[", false)]), ")in[");
  assert_eq!(emitted(&[("/re/", false), ("instanceof", true), ("R", false)]), "/re/ instanceof R");
  assert_eq!(emitted(&[("1", false), ("in", true), ("o", false)]), "1 in o");
}

#[test]
fn test_operators_that_would_merge() {
  assert_eq!(emitted(&[("a", false), ("+", false), ("+", false), ("b", false)]), "a+ +b");
  assert_eq!(emitted(&[("a", false), ("+", false), ("++", false), ("b", false)]), "a+ ++b");
  assert_eq!(emitted(&[("-", false), ("-", false), ("x", false)]), "- -x");
  assert_eq!(emitted(&[("a", false), ("-", false), ("+", false), ("b", false)]), "a-+b");
  assert_eq!(emitted(&[("a", false), ("/", false), ("/re/", false)]), "a/ /re/");
  assert_eq!(emitted(&[("x", false), ("--", false), (">", false), ("y", false)]), "x-- >y");
  assert_eq!(emitted(&[("a", false), ("<", false), ("!", false), ("--", false), ("b", false)]), "a<! --b");
  assert_eq!(emitted(&[("a", false), ("<", false), ("!", false), ("b", false)]), "a<!b");
}

#[test]
fn test_semicolons_are_deferred() {
  let mut out = Emitter::new();
  out.write(b"a()");
  out.require_semicolon();
  out.write_semicolon();
  out.write(b"b()");
  out.require_semicolon();
  assert!(out.semicolon_owed());
  out.clear_semicolon();
  out.write_semicolon();
  assert_eq!(out.as_slice(), b"a();b()");
}

#[test]
fn test_keywords_after_ended_words_get_one_space() {
  let mut out = Emitter::new();
  out.write(b"a");
  out.word_ended();
  out.write_keyword(b"in");
  out.word_ended();
  out.write(b"b");
  assert_eq!(out.as_slice(), b"a in b");

  let mut out = Emitter::new();
  out.write_keyword(b"throw");
  out.write_keyword(b"new");
  out.word_ended();
  out.write(b"E");
  assert_eq!(String::from_utf8(out.finish()).unwrap(), "throw new E");
}
