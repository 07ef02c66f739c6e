use crate::char::ID_START_CHARSTR;

// Generator of minified names. Works by generating the next smallest possible name (starting from `a`), and then
// repeats until it finds one that the caller accepts. Every position uses the same alphabet, so `$` is followed by
// `aa`, and `a$` by `ba`.
pub struct MinifiedNameGenerator {
  // Index of each character of the last generated name, in reverse order (i.e. first character is last element)
  // for optimised extension.
  state: Vec<usize>,
}

impl MinifiedNameGenerator {
  pub fn new() -> MinifiedNameGenerator {
    MinifiedNameGenerator { state: Vec::new() }
  }

  fn transition_to_next_possible_minified_name(&mut self) -> Vec<u8> {
    let n = &mut self.state;
    let mut overflow = true;
    for i in 0..n.len() {
      if n[i] == ID_START_CHARSTR.len() - 1 {
        n[i] = 0;
      } else {
        n[i] += 1;
        overflow = false;
        break;
      };
    }
    if overflow {
      n.push(0);
    };

    n.iter().rev().map(|&idx| ID_START_CHARSTR[idx]).collect()
  }

  /// Skips candidates for which `is_taken` holds.
  pub fn generate_next_available_minified_name(&mut self, is_taken: impl Fn(&[u8]) -> bool) -> Vec<u8> {
    loop {
      let name = self.transition_to_next_possible_minified_name();
      if !is_taken(&name) {
        return name;
      };
    }
  }
}
