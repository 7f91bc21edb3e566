use std::fmt;

use num_complex::Complex64;

use crate::evaluator::{evaluate, EvalError};

/// The letter reserved for the imaginary unit. Never a variable.
pub const IMAGINARY_UNIT: char = 'i';

pub fn is_variable(symbol: char) -> bool {
  symbol.is_ascii_lowercase() && symbol != IMAGINARY_UNIT
}

pub fn has_variable(text: &str) -> bool {
  text.chars().any(is_variable)
}

/// Not-yet-evaluated exponent of a decomposed factor.
///
/// Repeated factors accumulate their exponents as a [`Exponent::Sum`] and a
/// preceding division wraps the exponent in [`Exponent::Neg`]; nothing is
/// evaluated until the factor is resolved, so a broken exponent still fails
/// with its own text.
#[derive(Debug, Clone, PartialEq)]
pub enum Exponent {
  Text(String),
  Sum(Vec<Exponent>),
  Neg(Box<Exponent>),
}

impl Exponent {
  pub fn one() -> Self {
    Exponent::Text("1".to_string())
  }

  pub fn text(text: &str) -> Self {
    Exponent::Text(text.to_string())
  }

  pub fn negated(self) -> Self {
    Exponent::Neg(Box::new(self))
  }

  /// Appends `other` as another summand.
  pub fn accumulate(self, other: Exponent) -> Self {
    match self {
      Exponent::Sum(mut summands) => {
        summands.push(other);
        Exponent::Sum(summands)
      }
      single => Exponent::Sum(vec![single, other]),
    }
  }

  pub fn has_variable(&self) -> bool {
    match self {
      Exponent::Text(text) => has_variable(text),
      Exponent::Sum(summands) => summands.iter().any(Exponent::has_variable),
      Exponent::Neg(inner) => inner.has_variable(),
    }
  }

  pub fn evaluate(&self) -> Result<Complex64, EvalError> {
    match self {
      Exponent::Text(text) => evaluate(text),
      Exponent::Sum(summands) => summands
        .iter()
        .try_fold(Complex64::new(0.0, 0.0), |total, summand| {
          Ok(total + summand.evaluate()?)
        }),
      Exponent::Neg(inner) => Ok(-inner.evaluate()?),
    }
  }
}

impl fmt::Display for Exponent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Exponent::Text(text) => write!(f, "{}", text),
      Exponent::Sum(summands) => {
        for (index, summand) in summands.iter().enumerate() {
          if index > 0 {
            write!(f, "+")?;
          }
          write!(f, "{}", summand)?;
        }
        Ok(())
      }
      Exponent::Neg(inner) => write!(f, "-({})", inner),
    }
  }
}
