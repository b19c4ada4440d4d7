/// Flyout listing the pages hidden behind a truncation marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DotsPopover {
  marker: usize,
  pages: Vec<usize>,
  selected: usize,
}

impl DotsPopover {
  pub(crate) fn marker(&self) -> usize {
    self.marker
  }

  pub(crate) fn new(marker: usize, pages: Vec<usize>) -> Self {
    Self {
      marker,
      pages,
      selected: 0,
    }
  }

  pub(crate) fn pages(&self) -> &[usize] {
    &self.pages
  }

  pub(crate) fn select_next(&mut self) {
    if self.selected + 1 < self.pages.len() {
      self.selected += 1;
    }
  }

  pub(crate) fn select_previous(&mut self) {
    self.selected = self.selected.saturating_sub(1);
  }

  pub(crate) fn selected(&self) -> usize {
    self.selected
  }

  pub(crate) fn selected_page(&self) -> Option<usize> {
    self.pages.get(self.selected).copied()
  }
}
