use std::fmt;
use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use thiserror::Error;

use crate::brackets::{operand_end, operand_start};
use crate::evaluator::{evaluate, integer_exponent};
use crate::normalize::normalize;
use crate::syntax::has_variable;
use crate::utils::char_position;
use crate::{DENOMINATOR_TOLERANCE, INTEGER_TOLERANCE};

static DIVISION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[/:]").expect("valid regex literal"));

static POWER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\^|\*{2}").expect("valid regex literal"));

/// Ways in which well-formed text fails to be a polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
  RationalFunction,
  DivisionByZero,
  ExponentFunction,
  PowerAndExponentFunction,
  ComplexExponentFunction,
  IrrationalFunction,
  ExponentOverflow,
  NumericOverflow,
}

impl fmt::Display for ViolationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ViolationKind::RationalFunction => "Rational function",
      ViolationKind::DivisionByZero => "Division by zero",
      ViolationKind::ExponentFunction => "Exponent function",
      ViolationKind::PowerAndExponentFunction => "Power and exponent function",
      ViolationKind::ComplexExponentFunction => "Complex exponent function",
      ViolationKind::IrrationalFunction => "Irrational function",
      ViolationKind::ExponentOverflow => "Exponent overflow",
      ViolationKind::NumericOverflow => "Numeric overflow",
    };
    write!(f, "{}", name)
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} found: {fragment} at {position} position.")]
pub struct Violation {
  pub kind: ViolationKind,
  /// Operator together with both operands, as written.
  pub fragment: String,
  /// Character position of the operator.
  pub position: usize,
}

struct Site<'a> {
  text: &'a str,
  operator: usize,
  left: &'a str,
  right: &'a str,
  start: usize,
  end: usize,
}

impl<'a> Site<'a> {
  fn new(text: &'a str, operator: usize, operator_end: usize) -> Self {
    let start = operand_start(text, operator);
    let end = operand_end(text, operator_end).max(operator_end);
    Site {
      text,
      operator,
      left: &text[start..operator],
      right: &text[operator_end..end],
      start,
      end,
    }
  }

  fn violation(&self, kind: ViolationKind) -> Violation {
    Violation {
      kind,
      fragment: self.text[self.start..self.end].to_string(),
      position: char_position(self.text, self.operator),
    }
  }
}

fn sites<'a>(
  regex: &'a Regex,
  text: &'a str,
) -> impl Iterator<Item = Site<'a>> + 'a {
  regex
    .find_iter(text)
    .map(move |found| Site::new(text, found.start(), found.end()))
}

/// True when a symbolic denominator compiles to the zero polynomial.
fn vanishes(denominator: &str) -> bool {
  matches!(crate::parser::parse(denominator), Ok(polynomial) if polynomial.is_zero())
}

fn division_fault(site: &Site) -> Option<ViolationKind> {
  if has_variable(site.right) {
    return Some(if vanishes(site.right) {
      ViolationKind::DivisionByZero
    } else {
      ViolationKind::RationalFunction
    });
  }
  let denominator = evaluate(&normalize(site.right)).ok()?;
  (denominator.norm() < DENOMINATOR_TOLERANCE)
    .then_some(ViolationKind::DivisionByZero)
}

fn power_fault(site: &Site) -> Option<ViolationKind> {
  let symbolic_base = has_variable(site.left);
  if has_variable(site.right) {
    return Some(if symbolic_base {
      ViolationKind::PowerAndExponentFunction
    } else {
      ViolationKind::ExponentFunction
    });
  }
  let exponent = evaluate(&normalize(site.right)).ok()?;
  if symbolic_base {
    return integer_exponent(exponent).err();
  }
  let base = evaluate(&normalize(site.left)).ok()?;
  let negative_real = exponent.im.abs() < INTEGER_TOLERANCE && exponent.re < 0.0;
  (base.norm() < INTEGER_TOLERANCE && negative_real)
    .then_some(ViolationKind::DivisionByZero)
}

/// Leftmost division by a symbolic or vanishing denominator.
pub fn check_division(text: &str) -> Option<Violation> {
  sites(&DIVISION, text)
    .find_map(|site| division_fault(&site).map(|kind| site.violation(kind)))
}

/// Leftmost power whose exponent is not a non-negative integer.
pub fn check_power(text: &str) -> Option<Violation> {
  sites(&POWER, text)
    .find_map(|site| power_fault(&site).map(|kind| site.violation(kind)))
}

/// Division findings take precedence over power findings.
pub fn find_complicated_errors(text: &str) -> Option<Violation> {
  let violation = check_division(text).or_else(|| check_power(text));
  if let Some(violation) = &violation {
    trace!("{:?} -> {:?}", text, violation);
  }
  violation
}
