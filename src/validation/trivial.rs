use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::utils::char_position;

static INCORRECT_NUMBERS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?:[^0-9]|^) *[.,][ 0-9]*|[ 0-9]*[.,] *(?:[^0-9]|$)|[0-9 ]*[.,][ 0-9]*[.,][0-9 ]*",
  )
  .expect("valid regex literal")
});

static UNEXPECTED_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[^a-z+\-*:/^()0-9., ]").expect("valid regex literal")
});

static INCORRECT_OPERATORS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(concat!(
    r"^ *[*:/^]",
    r"|[+\-*:/^] *$",
    r"|[+\-*:/^] *[+\-:/^]",
    r"|[+\-:/^] *[+\-*:/^]",
    r"|[+\-*:/^] *\*{2}",
    r"|\*{2} *[+\-*:/^]",
    r"|\( *[*:/^]",
    r"|[*:/^] *\)",
    r"|\( *\)",
  ))
  .expect("valid regex literal")
});

/// An offending piece of text and the character position it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
  pub text: String,
  pub position: usize,
}

impl fmt::Display for Fragment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} at {} position", self.text, self.position)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketFault {
  /// A `)` at this position closes nothing.
  NoOpening(usize),
  /// The `(` at this position is never closed.
  NoEnclosing(usize),
}

impl fmt::Display for BracketFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BracketFault::NoOpening(position) => {
        write!(f, "no opening bracket for bracket at position {position}")
      }
      BracketFault::NoEnclosing(position) => {
        write!(f, "no enclosing bracket for bracket at position {position}")
      }
    }
  }
}

fn list(fragments: &[Fragment]) -> String {
  fragments
    .iter()
    .map(Fragment::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrivialViolation {
  #[error("Unbalanced brackets: {0}.")]
  UnbalancedBrackets(BracketFault),
  #[error("Incorrect numbers: {}.", list(.0))]
  IncorrectNumbers(Vec<Fragment>),
  #[error("Unexpected symbols: {}.", list(.0))]
  UnexpectedSymbols(Vec<Fragment>),
  #[error("Incorrect operator sequence: {}.", list(.0))]
  IncorrectOperators(Vec<Fragment>),
}

pub fn check_brackets(text: &str) -> Option<BracketFault> {
  let mut opened = Vec::new();
  for (position, symbol) in text.chars().enumerate() {
    match symbol {
      '(' => opened.push(position),
      ')' => {
        if opened.pop().is_none() {
          return Some(BracketFault::NoOpening(position));
        }
      }
      _ => {}
    }
  }
  opened.first().map(|&position| BracketFault::NoEnclosing(position))
}

fn fragments(regex: &Regex, text: &str) -> Vec<Fragment> {
  regex
    .find_iter(text)
    .map(|found| Fragment {
      text: found.as_str().to_string(),
      position: char_position(text, found.start()),
    })
    .collect()
}

pub fn find_incorrect_numbers(text: &str) -> Vec<Fragment> {
  fragments(&INCORRECT_NUMBERS, text)
}

pub fn find_unexpected_symbols(text: &str) -> Vec<Fragment> {
  fragments(&UNEXPECTED_SYMBOLS, text)
}

pub fn find_incorrect_operators(text: &str) -> Vec<Fragment> {
  fragments(&INCORRECT_OPERATORS, text)
}

/// First failing check, in the order brackets, numbers, symbols, operators.
pub fn find_trivial_errors(text: &str) -> Option<TrivialViolation> {
  if let Some(fault) = check_brackets(text) {
    return Some(TrivialViolation::UnbalancedBrackets(fault));
  }
  let numbers = find_incorrect_numbers(text);
  if !numbers.is_empty() {
    return Some(TrivialViolation::IncorrectNumbers(numbers));
  }
  let symbols = find_unexpected_symbols(text);
  if !symbols.is_empty() {
    return Some(TrivialViolation::UnexpectedSymbols(symbols));
  }
  let operators = find_incorrect_operators(text);
  if !operators.is_empty() {
    return Some(TrivialViolation::IncorrectOperators(operators));
  }
  None
}
