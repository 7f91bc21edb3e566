use super::*;

mod outcomes {
  use super::*;

  #[test]
  fn equal() {
    let output = polyeq(&["x**2+2", "2+3x+x**2-x*3"]);
    assert_eq!(code(&output), 0);
    insta::assert_snapshot!(stdout(&output), @"Polynomials are equal.");
  }

  #[test]
  fn not_equal() {
    let output = polyeq(&["x", "y"]);
    assert_eq!(code(&output), 1);
    insta::assert_snapshot!(stdout(&output), @"Polynomials are not equal.");
  }

  #[test]
  fn first_expression_errors() {
    assert_eq!(code(&polyeq(&["(3+4", "x"])), 3);
    assert_eq!(code(&polyeq(&["x**(1+y)", "x"])), 4);
  }

  #[test]
  fn second_expression_errors() {
    assert_eq!(code(&polyeq(&["x", "(3"])), 5);
    assert_eq!(code(&polyeq(&["x", "1/x"])), 6);
  }

  #[test]
  fn first_error_wins() {
    assert_eq!(code(&polyeq(&["1/x", "(3"])), 4);
  }

  #[test]
  fn error_detail_only_when_asked() {
    let quiet = polyeq(&["(3+4", "x"]);
    assert_eq!(stderr(&quiet).trim(), "Error in first expression.");

    let specific = polyeq(&["-s", "(3+4", "x"]);
    assert_eq!(code(&specific), 3);
    assert!(
      stderr(&specific).contains("Unbalanced brackets"),
      "{}",
      stderr(&specific)
    );
  }
}

mod tolerance {
  use super::*;

  #[test]
  fn default_epsilon() {
    assert_eq!(code(&polyeq(&["x+1.0000001", "x+1"])), 0);
    assert_eq!(code(&polyeq(&["x+1.001", "x+1"])), 1);
  }

  #[test]
  fn explicit_epsilon() {
    assert_eq!(code(&polyeq(&["-e", "0.1", "x", "1.05x"])), 0);
    assert_eq!(code(&polyeq(&["--epsilon", "0.01", "x", "1.05x"])), 1);
  }

  #[test]
  fn decimal_digits() {
    assert_eq!(code(&polyeq(&["-d", "2", "1.001", "1"])), 0);
    assert_eq!(code(&polyeq(&["--decimal", "4", "1.001", "1"])), 1);
  }

  #[test]
  fn exact_match() {
    assert_eq!(code(&polyeq(&["-m", "1.0000001", "1"])), 1);
    assert_eq!(code(&polyeq(&["--match", "(x+1)^2", "x^2+2x+1"])), 0);
  }

  #[test]
  fn options_are_exclusive() {
    let output = polyeq(&["-m", "-d", "2", "x", "x"]);
    assert_eq!(code(&output), 2);
  }
}
