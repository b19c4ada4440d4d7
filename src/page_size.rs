use super::*;

/// Number of records per page. The same value sets how many neighbouring
/// page buttons are shown before a truncation marker takes over.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageSize(usize);

impl PageSize {
  pub(crate) const DEFAULT: Self = Self(10);

  pub(crate) fn get(self) -> usize {
    self.0
  }

  pub(crate) fn new(page_size: usize) -> Result<Self, Error> {
    if page_size <= 1 {
      return Err(Error::InvalidConfiguration { page_size });
    }

    Ok(Self(page_size))
  }

  /// Checks the first page the back office served against this size. A page
  /// longer than the size, or a short page while more records exist, means
  /// the two disagree and every later page number would be off.
  pub(crate) fn verify(
    self,
    served: usize,
    total_items: Option<usize>,
  ) -> Result<(), Error> {
    let more_pages = total_items.is_some_and(|total| total > served);

    if served > self.0 || (more_pages && served != self.0) {
      return Err(Error::PageSizeMismatch {
        configured: self.0,
        served,
      });
    }

    Ok(())
  }
}

impl Default for PageSize {
  fn default() -> Self {
    Self::DEFAULT
  }
}
