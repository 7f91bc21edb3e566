//! Bracket matching and operand boundaries on validated (ASCII) text.

use crate::syntax::is_variable;

/// Returns the index of the bracket matching the one at `index`, scanning
/// forward from `(` and backward from `)`. Expects balanced input.
pub fn matching_bracket(text: &str, index: usize) -> Option<usize> {
  scan_for_match(text.as_bytes(), index, false)
}

/// Like [`matching_bracket`], but a forward scan does not stop at a closing
/// bracket whose next non-space symbol starts a power operator, so
/// `(3)**(x)` from index 0 matches the bracket at 7. Used for operand
/// boundaries only.
pub fn matching_bracket_before_power(text: &str, index: usize) -> Option<usize> {
  scan_for_match(text.as_bytes(), index, true)
}

fn scan_for_match(
  bytes: &[u8],
  index: usize,
  skip_before_power: bool,
) -> Option<usize> {
  let opening = *bytes.get(index)? == b'(';
  let mut balance = 0i32;
  let mut visit = |pointer: usize| -> bool {
    let symbol = bytes[pointer];
    let target = if opening { b')' } else { b'(' };
    if balance == 0
      && symbol == target
      && !(opening && skip_before_power && followed_by_power(bytes, pointer))
    {
      return true;
    }
    match symbol {
      b')' => balance -= 1,
      b'(' => balance += 1,
      _ => {}
    }
    false
  };
  if opening {
    (index + 1..bytes.len()).find(|&pointer| visit(pointer))
  } else {
    (0..index).rev().find(|&pointer| visit(pointer))
  }
}

fn followed_by_power(bytes: &[u8], index: usize) -> bool {
  let rest = &bytes[index + 1..];
  let start = rest.iter().position(|&b| b != b' ').unwrap_or(rest.len());
  let rest = &rest[start..];
  rest.starts_with(b"^") || rest.starts_with(b"**")
}

fn in_numeric_run(symbol: u8) -> bool {
  symbol.is_ascii_digit() || matches!(symbol, b'.' | b',' | b'i' | b' ')
}

/// Start of the operand left of the operator at `operator`.
pub fn operand_start(text: &str, operator: usize) -> usize {
  let bytes = text.as_bytes();
  let operator = operator.min(bytes.len());
  let Some(nearest) = (0..operator).rev().find(|&p| bytes[p] != b' ') else {
    return 0;
  };
  match bytes[nearest] {
    b')' => matching_bracket_before_power(text, nearest).unwrap_or(0),
    symbol if is_variable(symbol as char) => nearest,
    _ => (0..=nearest)
      .rev()
      .find(|&p| !in_numeric_run(bytes[p]))
      .map_or(0, |p| p + 1),
  }
}

/// End (exclusive) of the operand right of an operator whose last symbol
/// sits just before `after`.
pub fn operand_end(text: &str, after: usize) -> usize {
  let bytes = text.as_bytes();
  let length = bytes.len();
  let Some(nearest) = (after..length).find(|&p| bytes[p] != b' ') else {
    return length;
  };
  match bytes[nearest] {
    b'(' => matching_bracket_before_power(text, nearest).map_or(length, |p| p + 1),
    symbol if is_variable(symbol as char) => nearest + 1,
    _ => (nearest..length)
      .find(|&p| !in_numeric_run(bytes[p]))
      .unwrap_or(length),
  }
}
