use crate::ast::LiteralKind;
use std::borrow::Cow;

/// Chooses the shortest spelling of numeric and string literals. The minifier only decides where literals go
/// and how they combine with surrounding tokens; their own spelling is delegated here.
pub trait LiteralEncoder {
  /// `raw` is the source spelling of a literal of one of the numeric kinds. `precision` is the number of
  /// significant digits to keep, with 0 meaning all of them.
  fn number<'r>(&self, kind: LiteralKind, raw: &'r [u8], precision: usize) -> Cow<'r, [u8]>;

  /// `raw` includes the quotes.
  fn string<'r>(&self, raw: &'r [u8]) -> Cow<'r, [u8]>;
}

/// Writes every literal exactly as it appeared in the source.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verbatim;

impl LiteralEncoder for Verbatim {
  fn number<'r>(&self, _kind: LiteralKind, raw: &'r [u8], _precision: usize) -> Cow<'r, [u8]> {
    Cow::Borrowed(raw)
  }

  fn string<'r>(&self, raw: &'r [u8]) -> Cow<'r, [u8]> {
    Cow::Borrowed(raw)
  }
}
