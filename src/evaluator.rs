use num_complex::Complex64;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use thiserror::Error;

use crate::syntax::{has_variable, Exponent};
use crate::validation::complicated::ViolationKind;
use crate::{ArithmeticParser, PolyError, Rule, INTEGER_TOLERANCE};

/// Failure of a purely numeric evaluation. Both variants carry the
/// expression as it was given.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
  #[error("Failed evaluating: {0}.")]
  Syntax(String),
  #[error("Division by zero in: {0}.")]
  DivisionByZero(String),
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Evaluates a numeric expression over `+ - * / ^`, brackets, literals and
/// the imaginary unit. Implicit multiplication is juxtaposition.
pub fn evaluate(text: &str) -> Result<Complex64, EvalError> {
  let mut pairs = ArithmeticParser::parse(Rule::Expression, text)
    .map_err(|_| EvalError::Syntax(text.to_string()))?;
  let expression = next_pair(&mut pairs, text)?;
  let mut inner = expression.into_inner();
  eval_sum(next_pair(&mut inner, text)?, text)
}

fn next_pair<'a>(
  pairs: &mut Pairs<'a, Rule>,
  text: &str,
) -> Result<Pair<'a, Rule>, EvalError> {
  pairs.next().ok_or_else(|| EvalError::Syntax(text.to_string()))
}

fn eval_sum(pair: Pair<Rule>, text: &str) -> Result<Complex64, EvalError> {
  let mut inner = pair.into_inner();
  let mut total = eval_product(next_pair(&mut inner, text)?, text)?;
  while let Some(operator) = inner.next() {
    let operand = eval_product(next_pair(&mut inner, text)?, text)?;
    total = match operator.as_str() {
      "-" => total - operand,
      _ => total + operand,
    };
  }
  Ok(total)
}

fn eval_product(pair: Pair<Rule>, text: &str) -> Result<Complex64, EvalError> {
  let mut inner = pair.into_inner();
  let mut product = eval_unary(next_pair(&mut inner, text)?, text)?;
  while let Some(next) = inner.next() {
    product = match next.as_rule() {
      Rule::MulOp => {
        let operand = eval_unary(next_pair(&mut inner, text)?, text)?;
        if next.as_str() == "/" {
          divide(product, operand, text)?
        } else {
          product * operand
        }
      }
      // juxtaposition
      _ => product * eval_power(next, text)?,
    };
  }
  Ok(product)
}

fn eval_unary(pair: Pair<Rule>, text: &str) -> Result<Complex64, EvalError> {
  let mut negative = false;
  for part in pair.into_inner() {
    match part.as_rule() {
      Rule::Sign => negative ^= part.as_str() == "-",
      _ => {
        let value = eval_power(part, text)?;
        return Ok(if negative { -value } else { value });
      }
    }
  }
  Err(EvalError::Syntax(text.to_string()))
}

fn eval_power(pair: Pair<Rule>, text: &str) -> Result<Complex64, EvalError> {
  let mut inner = pair.into_inner();
  let base = eval_primary(next_pair(&mut inner, text)?, text)?;
  match inner.next() {
    Some(exponent) => power(base, eval_unary(exponent, text)?)
      .ok_or_else(|| EvalError::DivisionByZero(text.to_string())),
    None => Ok(base),
  }
}

fn eval_primary(pair: Pair<Rule>, text: &str) -> Result<Complex64, EvalError> {
  match pair.as_rule() {
    Rule::Number => Ok(Complex64::new(parse_literal(pair.as_str(), text)?, 0.0)),
    Rule::Imaginary => {
      let digits = pair.as_str().trim_end_matches('i');
      let magnitude = if digits.is_empty() {
        1.0
      } else {
        parse_literal(digits, text)?
      };
      Ok(Complex64::new(0.0, magnitude))
    }
    Rule::Sum => eval_sum(pair, text),
    _ => Err(EvalError::Syntax(text.to_string())),
  }
}

fn parse_literal(literal: &str, text: &str) -> Result<f64, EvalError> {
  literal
    .parse::<f64>()
    .map_err(|_| EvalError::Syntax(text.to_string()))
}

fn is_zero(value: Complex64) -> bool {
  value.re == 0.0 && value.im == 0.0
}

fn is_real(value: Complex64) -> bool {
  value.im == 0.0
}

fn divide(
  dividend: Complex64,
  divisor: Complex64,
  text: &str,
) -> Result<Complex64, EvalError> {
  if is_zero(divisor) {
    return Err(EvalError::DivisionByZero(text.to_string()));
  }
  if is_real(dividend) && is_real(divisor) {
    return Ok(Complex64::new(dividend.re / divisor.re, 0.0));
  }
  Ok(dividend / divisor)
}

/// Raises `base` to `exponent`, staying on the real path whenever the result
/// is real. Returns `None` when zero is raised to a negative or complex power.
pub fn power(base: Complex64, exponent: Complex64) -> Option<Complex64> {
  if is_zero(base) {
    return if !is_real(exponent) || exponent.re < 0.0 {
      None
    } else if exponent.re == 0.0 {
      Some(ONE)
    } else {
      Some(ZERO)
    };
  }
  if is_real(exponent) {
    let integral = exponent.re.fract() == 0.0;
    if is_real(base) && (base.re > 0.0 || integral) {
      return Some(Complex64::new(base.re.powf(exponent.re), 0.0));
    }
    if integral && exponent.re.abs() <= f64::from(i32::MAX) {
      return Some(base.powi(exponent.re as i32));
    }
  }
  Some(base.powc(exponent))
}

/// Renders an evaluated number for messages: `2`, `-0.5`, `2i`, `1+2i`.
pub fn format_number(value: Complex64) -> String {
  if is_real(value) {
    format!("{}", value.re)
  } else if value.re == 0.0 {
    format!("{}i", value.im)
  } else {
    format!("{}{:+}i", value.re, value.im)
  }
}

/// Reduces an evaluated exponent of a symbolic base to a non-negative
/// integer, or names the reason it cannot be one.
pub fn integer_exponent(value: Complex64) -> Result<f64, ViolationKind> {
  if value.im.abs() >= INTEGER_TOLERANCE {
    return Err(ViolationKind::ComplexExponentFunction);
  }
  let real = value.re;
  let rounded = real.round();
  if !real.is_finite() || (real - rounded).abs() >= INTEGER_TOLERANCE {
    return Err(ViolationKind::IrrationalFunction);
  }
  if rounded < 0.0 {
    return Err(ViolationKind::RationalFunction);
  }
  Ok(rounded)
}

/// Contribution of one decomposed (factor, exponent) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
  /// A number to multiply into the coefficient.
  Numeric(Complex64),
  /// A symbolic sub-expression raised to a positive integer power.
  Symbolic { text: String, exponent: u32 },
}

fn raised(kind: ViolationKind, factor: &str, exponent: &str) -> String {
  format!("{kind} found: {factor} was raised to {exponent}.")
}

/// Resolves one (factor, exponent) pair produced by the composition split.
pub fn evaluate_factor(
  factor: &str,
  exponent: &Exponent,
) -> Result<Factor, PolyError> {
  let mut text = match factor {
    "+" | "-" => format!("{factor}1"),
    _ => factor.to_string(),
  };
  let mut exponent = exponent.clone();
  if text.starts_with('/') {
    text.remove(0);
    exponent = exponent.negated();
  }

  if exponent.has_variable() {
    let kind = if has_variable(&text) {
      ViolationKind::PowerAndExponentFunction
    } else {
      ViolationKind::ExponentFunction
    };
    return Err(PolyError::ValueError(raised(
      kind,
      &text,
      &exponent.to_string(),
    )));
  }

  let value = exponent.evaluate().map_err(|_| {
    PolyError::SyntaxError(format!("Failed evaluating exponent: {exponent}."))
  })?;

  if !has_variable(&text) {
    let base = evaluate(&text).map_err(|error| match error {
      EvalError::Syntax(_) => {
        PolyError::SyntaxError(format!("Failed evaluating lexeme: {text}."))
      }
      EvalError::DivisionByZero(_) => PolyError::ValueError(raised(
        ViolationKind::DivisionByZero,
        &text,
        &format_number(value),
      )),
    })?;
    let result = power(base, value).ok_or_else(|| {
      PolyError::ValueError(raised(
        ViolationKind::DivisionByZero,
        &text,
        &format_number(value),
      ))
    })?;
    if !result.is_finite() {
      return Err(PolyError::ValueError(raised(
        ViolationKind::NumericOverflow,
        &text,
        &format_number(value),
      )));
    }
    return Ok(Factor::Numeric(result));
  }

  let rounded = integer_exponent(value).map_err(|kind| {
    PolyError::ValueError(raised(kind, &text, &format_number(value)))
  })?;
  if rounded == 0.0 {
    return Ok(Factor::Numeric(ONE));
  }
  if rounded > f64::from(u32::MAX) {
    return Err(PolyError::ValueError(raised(
      ViolationKind::ExponentOverflow,
      &text,
      &format_number(value),
    )));
  }
  Ok(Factor::Symbolic {
    text,
    exponent: rounded as u32,
  })
}
