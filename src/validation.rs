//! Rejects text before it reaches the decomposer.
//!
//! The trivial pass catches malformed text (Syntax errors), the complicated
//! pass catches well-formed text that is not a polynomial (Value errors).

pub mod complicated;
pub mod trivial;

use log::debug;

pub use complicated::find_complicated_errors;
pub use trivial::find_trivial_errors;

use crate::{PolyError, MAX_NESTING_DEPTH};

/// Deepest bracket nesting in `text`.
pub fn nesting_depth(text: &str) -> usize {
  let mut depth = 0usize;
  let mut deepest = 0usize;
  for symbol in text.chars() {
    match symbol {
      '(' => {
        depth += 1;
        deepest = deepest.max(depth);
      }
      ')' => depth = depth.saturating_sub(1),
      _ => {}
    }
  }
  deepest
}

/// Runs both passes in order and reports the first finding.
pub fn validate(text: &str) -> Result<(), PolyError> {
  if let Some(violation) = find_trivial_errors(text) {
    debug!("trivial validation rejected {:?}: {}", text, violation);
    return Err(violation.into());
  }
  let depth = nesting_depth(text);
  if depth > MAX_NESTING_DEPTH {
    return Err(PolyError::SyntaxError(format!(
      "Brackets nested {depth} deep, at most {MAX_NESTING_DEPTH} allowed."
    )));
  }
  if let Some(violation) = find_complicated_errors(text) {
    debug!("complicated validation rejected {:?}: {}", text, violation);
    return Err(violation.into());
  }
  Ok(())
}
