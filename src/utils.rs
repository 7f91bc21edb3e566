use std::io::BufRead;

/// Character index of the byte offset `offset` in `text`.
pub fn char_position(text: &str, offset: usize) -> usize {
  text[..offset].chars().count()
}

/// Pushes non-blank lines of `reader` onto `expressions` until it holds
/// `count` entries or the input ends. Lines are trimmed.
pub fn collect_expressions<R: BufRead>(
  reader: R,
  expressions: &mut Vec<String>,
  count: usize,
) -> Result<(), std::io::Error> {
  for line in reader.lines() {
    if expressions.len() >= count {
      break;
    }
    let line = line?;
    let line = line.trim();
    if !line.is_empty() {
      expressions.push(line.to_string());
    }
  }
  Ok(())
}
