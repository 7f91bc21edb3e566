//! Turns validated text into a [`Polynomial`].
//!
//! `parse_sum` and `parse_composition` recurse into each other through
//! brackets. The depth they carry grows by one per bracket group peeled, so
//! it never exceeds the bracket nesting the validator already bounded by
//! [`MAX_NESTING_DEPTH`].

use std::collections::BTreeMap;

use log::{debug, trace};
use num_complex::Complex64;

use crate::evaluator::{evaluate_factor, Factor};
use crate::lexemes::{is_monomial, is_sum, split_composition, split_sum};
use crate::normalize::normalize;
use crate::polynomial::{Monomial, Polynomial, Term};
use crate::syntax::is_variable;
use crate::validation::complicated::ViolationKind;
use crate::validation::validate;
use crate::{PolyError, MAX_NESTING_DEPTH};

/// Validates, normalizes and compiles `text`.
pub fn parse(text: &str) -> Result<Polynomial, PolyError> {
  if text.trim().is_empty() {
    return Err(PolyError::SyntaxError("Empty expression.".to_string()));
  }
  validate(text)?;
  let normalized = normalize(text);
  debug!("normalized {:?} to {:?}", text, normalized);
  let polynomial = parse_sum(&normalized, 0)?.into_polynomial();
  if polynomial
    .monomials()
    .iter()
    .any(|monomial| !monomial.coefficient().is_finite())
  {
    return Err(PolyError::ValueError(format!(
      "{} found: coefficients of {text} leave the floating point range.",
      ViolationKind::NumericOverflow
    )));
  }
  debug!(
    "{:?} has {} terms: {}",
    text,
    polynomial.monomials().len(),
    polynomial
  );
  Ok(polynomial)
}

fn enter(depth: usize) -> Result<(), PolyError> {
  if depth > MAX_NESTING_DEPTH {
    return Err(PolyError::SyntaxError(format!(
      "Expression nested deeper than {MAX_NESTING_DEPTH} levels."
    )));
  }
  Ok(())
}

/// Adds up the top-level terms of a normalized expression.
pub fn parse_sum(text: &str, depth: usize) -> Result<Term, PolyError> {
  enter(depth)?;
  if !is_sum(text) {
    return parse_composition(text, depth);
  }
  let terms = split_sum(text);
  trace!("sum {:?} -> {:?}", text, terms);
  let mut total: Option<Term> = None;
  for term in terms {
    let parsed = if is_monomial(term) {
      Term::Monomial(parse_monomial(term)?)
    } else {
      parse_composition(term, depth)?
    };
    total = Some(match total {
      Some(total) => total.add(&parsed),
      None => parsed,
    });
  }
  Ok(total.unwrap_or_else(|| Term::Monomial(Monomial::zero())))
}

/// Multiplies out the factors of a normalized product.
pub fn parse_composition(text: &str, depth: usize) -> Result<Term, PolyError> {
  enter(depth)?;
  if is_monomial(text) {
    return Ok(Term::Monomial(parse_monomial(text)?));
  }
  if is_sum(text) {
    return parse_sum(text, depth);
  }
  let factors = split_composition(text);
  trace!("composition {:?} -> {:?}", text, factors);
  let context = format!("Error in lexeme: {text}.");
  let mut product: Option<Term> = None;
  for (factor, exponent) in factors {
    let power = match evaluate_factor(&factor, &exponent)
      .map_err(|error| error.located(&context))?
    {
      Factor::Numeric(value) => Term::Monomial(Monomial::constant(value)),
      Factor::Symbolic { text: base, exponent } => {
        let base = if is_monomial(&base) {
          Term::Monomial(parse_monomial(&base)?)
        } else {
          parse_sum(&base, depth + 1)?
        };
        base.compose(exponent)
      }
    };
    product = Some(match product {
      Some(product) => product.mul(&power),
      None => power,
    });
  }
  product.ok_or_else(|| {
    PolyError::SyntaxError(format!("{context} Nothing to evaluate."))
  })
}

/// Builds a monomial from text whose variables all sit outside brackets.
pub fn parse_monomial(text: &str) -> Result<Monomial, PolyError> {
  let context = format!("Error in monomial {text}.");
  let mut wrapped = String::with_capacity(text.len() * 3);
  for symbol in text.chars() {
    if is_variable(symbol) {
      wrapped.push('(');
      wrapped.push(symbol);
      wrapped.push(')');
    } else {
      wrapped.push(symbol);
    }
  }

  let mut coefficient = Complex64::new(1.0, 0.0);
  let mut variables: BTreeMap<char, u32> = BTreeMap::new();
  for (factor, exponent) in split_composition(&wrapped) {
    match evaluate_factor(&factor, &exponent)
      .map_err(|error| error.located(&context))?
    {
      Factor::Numeric(value) => coefficient *= value,
      Factor::Symbolic { text: name, exponent } => {
        let mut symbols = name.chars();
        let variable = match (symbols.next(), symbols.next()) {
          (Some(variable), None) if is_variable(variable) => variable,
          _ => {
            return Err(PolyError::SyntaxError(format!(
              "{context} Unexpected factor: {name}."
            )))
          }
        };
        let total = variables.entry(variable).or_insert(0);
        *total = total.checked_add(exponent).ok_or_else(|| {
          PolyError::ValueError(format!(
            "{context} Exponent overflow found: {variable} was raised \
             past {}.",
            u32::MAX
          ))
        })?;
      }
    }
  }
  Ok(Monomial::new(coefficient, variables))
}
