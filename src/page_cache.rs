use super::*;

/// Records fetched per page during this session. Entries are never evicted,
/// so a cached page may go stale after an edit made elsewhere.
#[derive(Debug)]
pub(crate) struct PageCache<T> {
  pages: IndexMap<usize, Vec<T>>,
}

impl<T> Default for PageCache<T> {
  fn default() -> Self {
    Self {
      pages: IndexMap::new(),
    }
  }
}

impl<T> PageCache<T> {
  pub(crate) fn get(&self, page: usize) -> Option<&[T]> {
    self.pages.get(&page).map(Vec::as_slice)
  }

  pub(crate) fn insert(&mut self, page: usize, items: Vec<T>) {
    self.pages.insert(page, items);
  }

  pub(crate) fn len(&self) -> usize {
    self.pages.len()
  }

  pub(crate) fn seeded(items: Vec<T>) -> Self {
    let mut cache = Self::default();
    cache.insert(PaginationBounds::MIN, items);
    cache
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_page_is_none() {
    let cache = PageCache::<&str>::default();
    assert!(cache.get(3).is_none());
  }

  #[test]
  fn inserted_items_come_back_unchanged() {
    let mut cache = PageCache::default();

    for page in [1, 7, 300] {
      cache.insert(page, vec![page * 10, page * 10 + 1]);
    }

    assert_eq!(cache.get(1), Some(&[10, 11][..]));
    assert_eq!(cache.get(7), Some(&[70, 71][..]));
    assert_eq!(cache.get(300), Some(&[3000, 3001][..]));
    assert_eq!(cache.len(), 3);
  }

  #[test]
  fn last_write_wins() {
    let mut cache = PageCache::default();

    cache.insert(2, vec!["old"]);
    cache.insert(2, vec!["new"]);

    assert_eq!(cache.get(2), Some(&["new"][..]));
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn seeded_cache_holds_the_first_page() {
    let cache = PageCache::seeded(vec!["a", "b"]);

    assert_eq!(cache.get(1), Some(&["a", "b"][..]));
    assert_eq!(cache.len(), 1);
  }
}
