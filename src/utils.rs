use super::*;

pub(crate) fn format_value(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::Bool(flag) => flag.to_string(),
    Value::Number(number) => number.to_string(),
    Value::String(text) => shorten_timestamp(text).to_string(),
    Value::Array(items) => items
      .iter()
      .map(format_value)
      .collect::<Vec<_>>()
      .join(", "),
    Value::Object(_) => value.to_string(),
  }
}

pub(crate) fn saturating_u16(value: usize) -> u16 {
  u16::try_from(value).unwrap_or(u16::MAX)
}

/// `2023-04-01T00:00:00.000Z` becomes `2023-04-01`. Anything that does not
/// start with an ISO date is returned unchanged.
fn shorten_timestamp(text: &str) -> &str {
  let bytes = text.as_bytes();

  let is_iso_date = bytes.len() > 10
    && bytes[10] == b'T'
    && bytes[4] == b'-'
    && bytes[7] == b'-'
    && bytes[..10]
      .iter()
      .enumerate()
      .all(|(index, byte)| index == 4 || index == 7 || byte.is_ascii_digit());

  if is_iso_date { &text[..10] } else { text }
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result
}
