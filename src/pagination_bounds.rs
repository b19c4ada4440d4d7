use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PaginationBounds {
  pub(crate) max: usize,
}

impl PaginationBounds {
  pub(crate) const MIN: usize = 1;

  pub(crate) fn clamp(self, page: usize) -> usize {
    page.clamp(Self::MIN, self.max.max(Self::MIN))
  }

  pub(crate) fn new(total_items: usize, page_size: PageSize) -> Self {
    Self {
      max: total_items.div_ceil(page_size.get()),
    }
  }
}
