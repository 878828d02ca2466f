//! Text helpers shared by the fragment parser and the template filters

/// Uppercase the first character and leave the rest untouched
///
/// Uses Unicode case mapping, so a first character may expand to more than
/// one (`ß` becomes `SS`).
pub fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Word-wrap `text` into lines of at most `width` characters
///
/// Continuation lines are prefixed with exactly `indent` spaces; the indent is
/// not counted against `width`, so a template can place the first line after
/// a bullet of the same size. Words are never split: a word longer than
/// `width` sits alone on its own line. Runs of whitespace collapse to a
/// single space.
pub fn wrap_indent(text: &str, width: usize, indent: usize) -> String {
  let mut result = String::with_capacity(text.len());
  let mut line_len = 0;

  for word in text.split_whitespace() {
    let word_len = word.chars().count();

    if line_len > 0 && line_len + 1 + word_len > width {
      result.push('\n');
      result.extend(std::iter::repeat_n(' ', indent));
      line_len = 0;
    }

    if line_len > 0 {
      result.push(' ');
      line_len += 1;
    }

    result.push_str(word);
    line_len += word_len;
  }

  result
}
