#[derive(Debug, Default)]
pub(crate) struct SearchInput {
  pub(crate) buffer: String,
}

impl SearchInput {
  pub(crate) fn prompt(&self, focused: bool) -> String {
    if focused {
      format!("Search: {}_", self.buffer)
    } else if self.buffer.is_empty() {
      "Press / to search".to_string()
    } else {
      format!("Search: {}", self.buffer)
    }
  }
}
