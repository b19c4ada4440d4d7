use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PageButton {
  Dots,
  Page(usize),
}

impl PageButton {
  pub(crate) fn page(self) -> Option<usize> {
    match self {
      Self::Dots => None,
      Self::Page(page) => Some(page),
    }
  }
}

impl Display for PageButton {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Dots => f.write_str("..."),
      Self::Page(page) => write!(f, "{page}"),
    }
  }
}
