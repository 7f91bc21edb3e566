//! Decides whether two textual algebraic expressions denote the same
//! polynomial, either exactly or within a numeric tolerance.
//!
//! Text goes through two validators, a normalizer and a bracket-aware
//! decomposer before being folded into a [`Polynomial`]:
//!
//! ```
//! let first = polyeq::parse("(x+y)**2").unwrap();
//! let second = polyeq::parse("x^2 + 2xy + y^2").unwrap();
//! assert!(first.equals_exact(&second));
//! ```

use pest_derive::Parser;
use thiserror::Error;

pub mod brackets;
pub mod evaluator;
pub mod lexemes;
pub mod normalize;
pub mod parser;
pub mod polynomial;
pub mod syntax;
pub mod utils;
pub mod validation;

pub use parser::parse;
pub use polynomial::{Comparison, Monomial, Polynomial, Term};
pub use validation::complicated::{Violation, ViolationKind};
pub use validation::trivial::TrivialViolation;

/// Closed grammar for purely numeric (real or complex) sub-expressions.
#[derive(Parser)]
#[grammar = "arithmetic.pest"]
pub struct ArithmeticParser;

/// Tolerance used when no other comparison is requested.
pub const DEFAULT_EPSILON: f64 = 1e-6;
/// Deepest bracket nesting (and parser recursion) accepted.
pub const MAX_NESTING_DEPTH: usize = 256;
/// Denominators below this magnitude count as zero.
pub const DENOMINATOR_TOLERANCE: f64 = 1e-10;
/// Slack allowed when an exponent must be a real integer.
pub const INTEGER_TOLERANCE: f64 = 1e-15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolyError {
  /// Malformed text.
  #[error("Syntax error: {0}")]
  SyntaxError(String),
  /// Well-formed text that does not denote a polynomial.
  #[error("Value error: {0}")]
  ValueError(String),
}

impl PolyError {
  pub fn message(&self) -> &str {
    match self {
      PolyError::SyntaxError(message) | PolyError::ValueError(message) => {
        message
      }
    }
  }

  pub fn is_syntax(&self) -> bool {
    matches!(self, PolyError::SyntaxError(_))
  }

  pub fn is_value(&self) -> bool {
    matches!(self, PolyError::ValueError(_))
  }

  /// Prefixes the message with the place it was raised in, unless an inner
  /// stage already did.
  pub(crate) fn located(self, context: &str) -> Self {
    let wrap = |message: String| {
      if message.starts_with("Error in") {
        message
      } else {
        format!("{context} {message}")
      }
    };
    match self {
      PolyError::SyntaxError(message) => PolyError::SyntaxError(wrap(message)),
      PolyError::ValueError(message) => PolyError::ValueError(wrap(message)),
    }
  }
}

impl From<TrivialViolation> for PolyError {
  fn from(violation: TrivialViolation) -> Self {
    PolyError::SyntaxError(violation.to_string())
  }
}

impl From<Violation> for PolyError {
  fn from(violation: Violation) -> Self {
    PolyError::ValueError(violation.to_string())
  }
}
