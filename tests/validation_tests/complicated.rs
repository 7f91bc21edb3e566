use super::*;

fn found(text: &str, fragment: &str, position: usize, kind: ViolationKind) {
  let expected = Violation {
    kind,
    fragment: fragment.to_string(),
    position,
  };
  assert_eq!(find_complicated_errors(text), Some(expected), "{text}");
}

mod power {
  use super::*;

  #[test]
  fn correct() {
    for text in ["3x**2", "x+y+x**3+x**2", "4**(4/0)", "2^0.5", "x^(2-1)"] {
      assert_eq!(check_power(text), None, "{text}");
    }
  }

  #[test]
  fn zero_to_a_negative_power() {
    found(" 0 ** (3-4)", " 0 ** (3-4)", 3, ViolationKind::DivisionByZero);
    found("x**(0**(-2))", "0**(-2)", 5, ViolationKind::DivisionByZero);
  }

  #[test]
  fn variable_exponents() {
    found("2^(3)**(x)", "2^(3)**(x)", 1, ViolationKind::ExponentFunction);
    found("3**(4+x)", "3**(4+x)", 1, ViolationKind::ExponentFunction);
    found("x**x", "x**x", 1, ViolationKind::PowerAndExponentFunction);
    found("x**a", "x**a", 1, ViolationKind::PowerAndExponentFunction);
    found("x^ax", "x^a", 1, ViolationKind::PowerAndExponentFunction);
    found(
      "3+ x    ** (axy)",
      "x    ** (axy)",
      8,
      ViolationKind::PowerAndExponentFunction,
    );
  }

  #[test]
  fn complex_exponents() {
    found("x^i", "x^i", 1, ViolationKind::ComplexExponentFunction);
    found(" b**(2^i)", "b**(2^i)", 2, ViolationKind::ComplexExponentFunction);
    found(
      "(x)**(2)^(i)",
      "(x)**(2)^(i)",
      3,
      ViolationKind::ComplexExponentFunction,
    );
  }

  #[test]
  fn negative_and_fractional_exponents() {
    found("x**(2-5)", "x**(2-5)", 1, ViolationKind::RationalFunction);
    found("4+6-x**(7/8)", "x**(7/8)", 5, ViolationKind::IrrationalFunction);
  }
}

mod division {
  use super::*;

  #[test]
  fn correct() {
    for text in ["2/2", "23/ix", "2**i+i-2", "i**i", "i+i-i**(2i)", "x**2**i"] {
      assert_eq!(check_division(text), None, "{text}");
    }
  }

  #[test]
  fn symbolic_denominators() {
    found(" 3:(x y)", " 3:(x y)", 2, ViolationKind::RationalFunction);
    found("1/( x + y )", "1/( x + y )", 1, ViolationKind::RationalFunction);
    found("4i/x", "4i/x", 2, ViolationKind::RationalFunction);
    found("14j/x", "j/x", 3, ViolationKind::RationalFunction);
    found("1/x", "1/x", 1, ViolationKind::RationalFunction);
    found("5/(x)", "5/(x)", 1, ViolationKind::RationalFunction);
  }

  #[test]
  fn vanishing_denominators() {
    found("142+4.25/0.0-x", "4.25/0.0", 8, ViolationKind::DivisionByZero);
    found(
      "0+0/5-(3+2)/(1.5+2.5-4)",
      "(3+2)/(1.5+2.5-4)",
      11,
      ViolationKind::DivisionByZero,
    );
    found("(x)/(0)", "(x)/(0)", 3, ViolationKind::DivisionByZero);
    found("3/(2/0)", "2/0", 4, ViolationKind::DivisionByZero);
  }

  #[test]
  fn symbolic_denominator_that_cancels() {
    found("1/(x-x)", "1/(x-x)", 1, ViolationKind::DivisionByZero);
    found("y/(2x-x-x)^2", "y/(2x-x-x)^2", 1, ViolationKind::DivisionByZero);
  }

  #[test]
  fn division_is_checked_before_power() {
    found("x^(1/0)", "1/0", 4, ViolationKind::DivisionByZero);
    found("x^y+1/x", "1/x", 5, ViolationKind::RationalFunction);
  }
}

mod messages {
  use super::*;

  #[test]
  fn rendering() {
    let violation = find_complicated_errors("x^(1/0)").unwrap();
    insta::assert_snapshot!(
      violation.to_string(),
      @"Division by zero found: 1/0 at 4 position."
    );
    let violation = find_complicated_errors("2+x**(1+y)").unwrap();
    insta::assert_snapshot!(
      violation.to_string(),
      @"Power and exponent function found: x**(1+y) at 3 position."
    );
  }
}

mod combined {
  use super::*;

  #[test]
  fn trivial_errors_are_syntax_errors() {
    let error = validate("(3+4").unwrap_err();
    assert!(error.is_syntax());
  }

  #[test]
  fn complicated_errors_are_value_errors() {
    let error = validate("1/x").unwrap_err();
    assert!(error.is_value());
  }

  #[test]
  fn deep_nesting() {
    let text = format!("{}x{}", "(".repeat(300), ")".repeat(300));
    assert_eq!(nesting_depth(&text), 300);
    let error = validate(&text).unwrap_err();
    assert!(error.is_syntax());
  }

  #[test]
  fn valid_text() {
    assert_eq!(validate("(x+1)**2 - x^2/2"), Ok(()));
  }
}
