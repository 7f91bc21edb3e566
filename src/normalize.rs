use std::sync::LazyLock;

use regex::Regex;

static MARKER_AFTER_SYMBOL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([^0-9])\*").expect("valid regex literal"));

static MARKER_BEFORE_SYMBOL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\*([^0-9])").expect("valid regex literal"));

static BARE_BASE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"([0-9.]+|[a-z])\^").expect("valid regex literal")
});

static BARE_EXPONENT: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\^([0-9.]+|[a-z])").expect("valid regex literal")
});

/// Rewrites validated text into the form the decomposer reads.
///
/// Spaces go, `,` becomes `.`, `**` becomes `^`, `:` becomes `/`, a `*`
/// next to anything but a digit is dropped and bare bases and exponents
/// around `^` get brackets: `x ** 2 + 3,5 : y` becomes `(x)^(2)+3.5/y`.
pub fn normalize(text: &str) -> String {
  let text = text
    .replace(' ', "")
    .replace(',', ".")
    .replace("**", "^")
    .replace(':', "/");
  let text = MARKER_AFTER_SYMBOL.replace_all(&text, "${1}");
  let text = MARKER_BEFORE_SYMBOL.replace_all(&text, "${1}");
  let text = BARE_BASE.replace_all(&text, "(${1})^");
  BARE_EXPONENT.replace_all(&text, "^(${1})").into_owned()
}
