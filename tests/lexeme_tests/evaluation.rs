use super::*;

mod arithmetic {
  use super::*;

  #[test]
  fn precedence() {
    assert_eq!(evaluate("2+3*4"), Ok(real(14.0)));
    assert_eq!(evaluate("(2+3)4"), Ok(real(20.0)));
    assert_eq!(evaluate("2-3-4"), Ok(real(-5.0)));
    assert_eq!(evaluate("12/4/3"), Ok(real(1.0)));
  }

  #[test]
  fn powers() {
    assert_eq!(evaluate("2^3^2"), Ok(real(512.0)));
    assert_eq!(evaluate("-2^2"), Ok(real(-4.0)));
    assert_eq!(evaluate("2^-1"), Ok(real(0.5)));
    assert_eq!(evaluate("(-2)^3"), Ok(real(-8.0)));
    assert_eq!(evaluate("0^0"), Ok(real(1.0)));
  }

  #[test]
  fn literals() {
    assert_eq!(evaluate(".5+1."), Ok(real(1.5)));
    assert_eq!(evaluate("1828/99990"), Ok(real(1828.0 / 99990.0)));
  }

  #[test]
  fn imaginary_unit() {
    assert_eq!(evaluate("i"), Ok(Complex64::new(0.0, 1.0)));
    assert_eq!(evaluate("2.5i"), Ok(Complex64::new(0.0, 2.5)));
    assert_eq!(evaluate("ii"), Ok(real(-1.0)));
    assert_eq!(evaluate("(1-i)(1+i)"), Ok(real(2.0)));
    assert_eq!(evaluate("2i^2"), Ok(real(-4.0)));
    assert_eq!(evaluate("0i"), Ok(real(0.0)));
  }

  #[test]
  fn division_by_zero() {
    assert_eq!(
      evaluate("1/(2-2)"),
      Err(EvalError::DivisionByZero("1/(2-2)".to_string()))
    );
    assert_eq!(
      evaluate("0^(-1)"),
      Err(EvalError::DivisionByZero("0^(-1)".to_string()))
    );
  }

  #[test]
  fn malformed() {
    for text in ["", "2+", "x", "2**3", "()", "2..", "(1"] {
      assert_eq!(evaluate(text), Err(EvalError::Syntax(text.to_string())));
    }
  }
}

mod factors {
  use super::*;

  fn factor(text: &str, exponent: &str) -> Factor {
    evaluate_factor(text, &Exponent::text(exponent)).unwrap()
  }

  fn failure(text: &str, exponent: &str) -> String {
    evaluate_factor(text, &Exponent::text(exponent))
      .unwrap_err()
      .to_string()
  }

  #[test]
  fn signs() {
    assert_eq!(factor("+", "1"), Factor::Numeric(real(1.0)));
    assert_eq!(factor("-", "1"), Factor::Numeric(real(-1.0)));
  }

  #[test]
  fn leading_slash_inverts() {
    assert_eq!(factor("/4", "1"), Factor::Numeric(real(0.25)));
    assert_eq!(factor("/2", "-(1)"), Factor::Numeric(real(2.0)));
  }

  #[test]
  fn numeric_powers() {
    assert_eq!(factor("3", "(2)^(2)"), Factor::Numeric(real(81.0)));
    assert_eq!(factor("2+3", "1"), Factor::Numeric(real(5.0)));
  }

  #[test]
  fn symbolic_powers() {
    assert_eq!(
      factor("x", "1+1"),
      Factor::Symbolic {
        text: "x".to_string(),
        exponent: 2
      }
    );
    assert_eq!(
      factor("x+y", "(1-i)(1+i)"),
      Factor::Symbolic {
        text: "x+y".to_string(),
        exponent: 2
      }
    );
  }

  #[test]
  fn zero_exponent_collapses() {
    assert_eq!(factor("x", "(2+4-6)"), Factor::Numeric(real(1.0)));
    assert_eq!(factor("0", "0"), Factor::Numeric(real(1.0)));
  }

  #[test]
  fn value_errors() {
    insta::assert_snapshot!(
      failure("x", "-(1)"),
      @"Value error: Rational function found: x was raised to -1."
    );
    insta::assert_snapshot!(
      failure("x", "0.5"),
      @"Value error: Irrational function found: x was raised to 0.5."
    );
    insta::assert_snapshot!(
      failure("x", "i"),
      @"Value error: Complex exponent function found: x was raised to 1i."
    );
    insta::assert_snapshot!(
      failure("x", "y"),
      @"Value error: Power and exponent function found: x was raised to y."
    );
    insta::assert_snapshot!(
      failure("2", "y+1"),
      @"Value error: Exponent function found: 2 was raised to y+1."
    );
    insta::assert_snapshot!(
      failure("0", "-(1)"),
      @"Value error: Division by zero found: 0 was raised to -1."
    );
    insta::assert_snapshot!(
      failure("x", "2^40"),
      @"Value error: Exponent overflow found: x was raised to 1099511627776."
    );
  }

  #[test]
  fn syntax_errors() {
    insta::assert_snapshot!(
      failure("x", "2+"),
      @"Syntax error: Failed evaluating exponent: 2+."
    );
    insta::assert_snapshot!(
      failure("2+", "1"),
      @"Syntax error: Failed evaluating lexeme: 2+."
    );
  }
}
