//! Splits normalized text into sum terms and (factor, exponent) pairs.

use crate::brackets::matching_bracket;
use crate::syntax::{Exponent, IMAGINARY_UNIT};

/// Signed top-level terms, left to right. A leading `-` stays with its
/// term, a leading `+` is dropped.
pub fn split_sum(text: &str) -> Vec<&str> {
  let bytes = text.as_bytes();
  let length = bytes.len();
  let mut terms = Vec::new();
  let mut last = 0;
  let mut index = 0;
  while index < length {
    match bytes[index] {
      symbol @ (b'+' | b'-') => {
        if index > last {
          terms.push(&text[last..index]);
        }
        last = if symbol == b'+' { index + 1 } else { index };
      }
      b'(' => index = matching_bracket(text, index).unwrap_or(length),
      _ => {}
    }
    index += 1;
  }
  let tail = &text[last.min(length)..];
  if !tail.is_empty() {
    terms.push(tail);
  }
  terms
}

#[derive(Default)]
struct Factors(Vec<(String, Exponent)>);

impl Factors {
  fn push(&mut self, factor: &str, exponent: Exponent) {
    if factor.is_empty() {
      return;
    }
    match self.0.iter_mut().find(|(known, _)| known.as_str() == factor) {
      Some((_, accumulated)) => {
        let previous = std::mem::replace(accumulated, Exponent::one());
        *accumulated = previous.accumulate(exponent);
      }
      None => self.0.push((factor.to_string(), exponent)),
    }
  }
}

/// End (exclusive) of the exponent tower starting at `start`. Each link is
/// a bracket group or a bare numeric run; the tower's first symbol is
/// always taken.
fn tower_end(text: &str, start: usize) -> usize {
  let bytes = text.as_bytes();
  let length = bytes.len();
  let mut end = start;
  loop {
    if end < length && bytes[end] == b'(' {
      end = matching_bracket(text, end).map_or(length, |closing| closing + 1);
    } else {
      while end < length
        && (end == start || bytes[end].is_ascii_digit() || bytes[end] == b'.')
      {
        end += 1;
      }
    }
    if end + 1 >= length || bytes[end] != b'^' {
      return end;
    }
    end += 1;
  }
}

/// Factors of a product in first-seen order, each with its exponent.
///
/// A bracket group not preceded by `^` is a factor; the text since the
/// previous factor is flushed as another one. A `/` before a group negates
/// its exponent. Repeated factors sum their exponents lazily:
/// `(x)(y)(x)^(2)` gives `x -> 1+(2)` and `y -> 1`.
pub fn split_composition(text: &str) -> Vec<(String, Exponent)> {
  let bytes = text.as_bytes();
  let length = bytes.len();
  let mut factors = Factors::default();
  let mut last = 0;
  let mut index = 0;
  let mut division = false;
  while index < length {
    match bytes[index] {
      b'/' => division = true,
      b'(' if index == 0 || bytes[index - 1] != b'^' => {
        if index > last {
          let mut prefix = &text[last..index];
          if matches!(bytes[index - 1], b'*' | b'/') {
            prefix = &prefix[..prefix.len() - 1];
          }
          factors.push(prefix, Exponent::one());
        }
        let Some(closing) = matching_bracket(text, index) else {
          break;
        };
        let (mut exponent, end) =
          if closing + 1 < length && bytes[closing + 1] == b'^' {
            let end = tower_end(text, closing + 2);
            (Exponent::text(&text[(closing + 2).min(end)..end]), end)
          } else {
            (Exponent::one(), closing + 1)
          };
        if division {
          exponent = exponent.negated();
          division = false;
        }
        factors.push(&text[index + 1..closing], exponent);
        last = end;
        index = end;
        continue;
      }
      _ => division = false,
    }
    index += 1;
  }
  factors.push(&text[last.min(length)..], Exponent::one());
  factors.0
}

/// True when a `+` or `-` past the first symbol sits outside all brackets.
pub fn is_sum(text: &str) -> bool {
  let mut depth = 0i32;
  for (index, symbol) in text.bytes().enumerate() {
    match symbol {
      b'(' => depth += 1,
      b')' => depth -= 1,
      b'+' | b'-' if depth == 0 && index > 0 => return true,
      _ => {}
    }
  }
  false
}

/// True when `text` is not a sum and keeps every variable outside brackets.
pub fn is_monomial(text: &str) -> bool {
  let mut depth = 0i32;
  for symbol in text.chars() {
    match symbol {
      '(' => depth += 1,
      ')' => depth -= 1,
      symbol
        if depth > 0 && symbol.is_alphabetic() && symbol != IMAGINARY_UNIT =>
      {
        return false
      }
      _ => {}
    }
  }
  !is_sum(text)
}
