use std::collections::BTreeMap;
use std::fmt;

use num_complex::Complex64;

use crate::evaluator::format_number;
use crate::DEFAULT_EPSILON;

/// How two polynomials are compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
  Exact,
  /// Same-shape coefficients may differ by at most this much.
  Epsilon(f64),
}

impl Comparison {
  /// `Epsilon(10^-digits)`.
  pub fn from_decimal_digits(digits: i32) -> Self {
    Comparison::Epsilon(10f64.powi(-digits))
  }

  pub fn epsilon(self) -> f64 {
    match self {
      Comparison::Exact => 0.0,
      Comparison::Epsilon(epsilon) => epsilon,
    }
  }
}

impl Default for Comparison {
  fn default() -> Self {
    Comparison::Epsilon(DEFAULT_EPSILON)
  }
}

/// A coefficient times a product of variable powers.
///
/// The coefficient is zero exactly when there are no variables, so every
/// zero monomial has the same shape as a constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Monomial {
  coefficient: Complex64,
  variables: BTreeMap<char, u32>,
}

impl Monomial {
  pub fn new(coefficient: Complex64, variables: BTreeMap<char, u32>) -> Self {
    let mut monomial = Monomial {
      coefficient,
      variables,
    };
    monomial.variables.retain(|_, exponent| *exponent > 0);
    if monomial.is_zero() {
      monomial.variables.clear();
    }
    monomial
  }

  pub fn constant(value: Complex64) -> Self {
    Monomial::new(value, BTreeMap::new())
  }

  pub fn zero() -> Self {
    Monomial::constant(Complex64::new(0.0, 0.0))
  }

  pub fn one() -> Self {
    Monomial::constant(Complex64::new(1.0, 0.0))
  }

  pub fn coefficient(&self) -> Complex64 {
    self.coefficient
  }

  pub fn variables(&self) -> &BTreeMap<char, u32> {
    &self.variables
  }

  pub fn is_zero(&self) -> bool {
    self.coefficient.re == 0.0 && self.coefficient.im == 0.0
  }

  pub fn same_shape(&self, other: &Monomial) -> bool {
    self.variables == other.variables
  }

  /// Same shape sums into one monomial, otherwise the two form a polynomial.
  pub fn add(&self, other: &Monomial) -> Term {
    if self.same_shape(other) {
      Term::Monomial(Monomial::new(
        self.coefficient + other.coefficient,
        self.variables.clone(),
      ))
    } else {
      Term::Polynomial(
        Polynomial::from_monomial(self.clone()).add_monomial(other),
      )
    }
  }

  pub fn mul(&self, other: &Monomial) -> Monomial {
    let coefficient = self.coefficient * other.coefficient;
    if coefficient.re == 0.0 && coefficient.im == 0.0 {
      return Monomial::zero();
    }
    let mut variables = self.variables.clone();
    for (&name, &exponent) in &other.variables {
      let entry = variables.entry(name).or_insert(0);
      *entry = entry.saturating_add(exponent);
    }
    Monomial::new(coefficient, variables)
  }
}

impl fmt::Display for Monomial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let unit = self.coefficient == Complex64::new(1.0, 0.0);
    let negative_unit = self.coefficient == Complex64::new(-1.0, 0.0);
    if self.variables.is_empty() {
      return write!(f, "{}", format_number(self.coefficient));
    }
    if negative_unit {
      write!(f, "-")?;
    } else if !unit {
      if self.coefficient.im == 0.0 {
        write!(f, "{}", format_number(self.coefficient))?;
      } else {
        write!(f, "({})", format_number(self.coefficient))?;
      }
    }
    for (name, exponent) in &self.variables {
      match exponent {
        1 => write!(f, "{}", name)?,
        _ => write!(f, "{}^{}", name, exponent)?,
      }
    }
    Ok(())
  }
}

/// A sum of monomials with pairwise distinct shapes, in insertion order.
/// Zero monomials are never stored, so the zero polynomial is empty.
#[derive(Debug, Clone, Default)]
pub struct Polynomial {
  monomials: Vec<Monomial>,
}

impl Polynomial {
  pub fn zero() -> Self {
    Polynomial::default()
  }

  pub fn from_monomial(monomial: Monomial) -> Self {
    let mut polynomial = Polynomial::zero();
    polynomial.absorb(&monomial);
    polynomial
  }

  pub fn monomials(&self) -> &[Monomial] {
    &self.monomials
  }

  pub fn is_zero(&self) -> bool {
    self.monomials.is_empty()
  }

  fn position(&self, monomial: &Monomial) -> Option<usize> {
    self.monomials.iter().position(|known| known.same_shape(monomial))
  }

  fn absorb(&mut self, monomial: &Monomial) {
    match self.position(monomial) {
      Some(index) => {
        let merged = Monomial::new(
          self.monomials[index].coefficient + monomial.coefficient,
          monomial.variables.clone(),
        );
        if merged.is_zero() {
          self.monomials.remove(index);
        } else {
          self.monomials[index] = merged;
        }
      }
      None if !monomial.is_zero() => self.monomials.push(monomial.clone()),
      None => {}
    }
  }

  pub fn add_monomial(&self, monomial: &Monomial) -> Polynomial {
    let mut sum = self.clone();
    sum.absorb(monomial);
    sum
  }

  pub fn add(&self, other: &Polynomial) -> Polynomial {
    let mut sum = self.clone();
    for monomial in &other.monomials {
      sum.absorb(monomial);
    }
    sum
  }

  pub fn multiply_monomial(&self, monomial: &Monomial) -> Polynomial {
    let mut product = Polynomial::zero();
    for own in &self.monomials {
      product.absorb(&own.mul(monomial));
    }
    product
  }

  /// Distributes over every pair of monomials.
  pub fn multiply(&self, other: &Polynomial) -> Polynomial {
    let mut product = Polynomial::zero();
    for own in &self.monomials {
      for theirs in &other.monomials {
        product.absorb(&theirs.mul(own));
      }
    }
    product
  }

  pub fn equals_exact(&self, other: &Polynomial) -> bool {
    self.equals_with_tolerance(other, 0.0)
  }

  /// Every monomial of each side has a same-shape counterpart on the other
  /// whose coefficient is within `epsilon`.
  pub fn equals_with_tolerance(&self, other: &Polynomial, epsilon: f64) -> bool {
    self.contained_in(other, epsilon) && other.contained_in(self, epsilon)
  }

  pub fn compare(&self, other: &Polynomial, comparison: Comparison) -> bool {
    self.equals_with_tolerance(other, comparison.epsilon())
  }

  fn contained_in(&self, other: &Polynomial, epsilon: f64) -> bool {
    self.monomials.iter().filter(|own| !own.is_zero()).all(|own| {
      other.position(own).is_some_and(|index| {
        (other.monomials[index].coefficient - own.coefficient).norm() <= epsilon
      })
    })
  }
}

impl PartialEq for Polynomial {
  fn eq(&self, other: &Self) -> bool {
    self.equals_exact(other)
  }
}

impl fmt::Display for Polynomial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.monomials.is_empty() {
      return write!(f, "0");
    }
    for (index, monomial) in self.monomials.iter().enumerate() {
      let coefficient = monomial.coefficient;
      if index == 0 {
        write!(f, "{}", monomial)?;
      } else if coefficient.im == 0.0 && coefficient.re < 0.0 {
        let negated = Monomial {
          coefficient: -coefficient,
          variables: monomial.variables.clone(),
        };
        write!(f, " - {}", negated)?;
      } else {
        write!(f, " + {}", monomial)?;
      }
    }
    Ok(())
  }
}

/// Either side of the sum/composition recursion.
#[derive(Debug, Clone)]
pub enum Term {
  Monomial(Monomial),
  Polynomial(Polynomial),
}

impl Term {
  pub fn one() -> Self {
    Term::Monomial(Monomial::one())
  }

  pub fn add(&self, other: &Term) -> Term {
    match (self, other) {
      (Term::Monomial(left), Term::Monomial(right)) => left.add(right),
      (Term::Polynomial(left), Term::Monomial(right)) => {
        Term::Polynomial(left.add_monomial(right))
      }
      (Term::Monomial(left), Term::Polynomial(right)) => {
        Term::Polynomial(right.add_monomial(left))
      }
      (Term::Polynomial(left), Term::Polynomial(right)) => {
        Term::Polynomial(left.add(right))
      }
    }
  }

  pub fn mul(&self, other: &Term) -> Term {
    match (self, other) {
      (Term::Monomial(left), Term::Monomial(right)) => {
        Term::Monomial(left.mul(right))
      }
      (Term::Polynomial(left), Term::Monomial(right)) => {
        Term::Polynomial(left.multiply_monomial(right))
      }
      (Term::Monomial(left), Term::Polynomial(right)) => {
        Term::Polynomial(right.multiply_monomial(left))
      }
      (Term::Polynomial(left), Term::Polynomial(right)) => {
        Term::Polynomial(left.multiply(right))
      }
    }
  }

  /// Raises the term to `exponent` by repeated squaring.
  pub fn compose(self, exponent: u32) -> Term {
    let mut power: Option<Term> = None;
    let mut square = self;
    let mut remaining = exponent;
    while remaining > 0 {
      if remaining & 1 == 1 {
        power = Some(match power {
          Some(power) => power.mul(&square),
          None => square.clone(),
        });
      }
      remaining >>= 1;
      if remaining > 0 {
        square = square.mul(&square);
      }
    }
    power.unwrap_or_else(Term::one)
  }

  pub fn into_polynomial(self) -> Polynomial {
    match self {
      Term::Monomial(monomial) => Polynomial::from_monomial(monomial),
      Term::Polynomial(polynomial) => polynomial,
    }
  }
}
