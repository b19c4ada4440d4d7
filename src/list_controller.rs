use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
  Idle,
  Loading,
  Searching,
}

/// Drives a paged list: which page is shown, which pages are cached, and
/// whether a live search has taken over the list.
///
/// The controller never performs I/O. Requests are queued as [`Effect`]s and
/// their outcomes are fed back through [`ListController::page_loaded`],
/// [`ListController::search_started`] and [`ListController::search_loaded`].
/// Every request carries an id, and only the most recent one of each kind is
/// applied.
pub(crate) struct ListController<T> {
  bounds: PaginationBounds,
  cache: PageCache<T>,
  current_page: usize,
  next_request_id: u64,
  page_size: PageSize,
  pending_effects: Vec<Effect>,
  pending_page: Option<PendingPage>,
  pending_search: Option<PendingSearch>,
  search_term: String,
  shown: Vec<T>,
}

impl<T: Clone> ListController<T> {
  pub(crate) fn bounds(&self) -> PaginationBounds {
    self.bounds
  }

  pub(crate) fn buttons(&self) -> Vec<PageButton> {
    page_buttons(self.current_page, self.bounds, self.page_size)
  }

  pub(crate) fn cache(&self) -> &PageCache<T> {
    &self.cache
  }

  pub(crate) fn current_page(&self) -> usize {
    self.current_page
  }

  fn display_cached_page(&mut self) -> Result<(), Error> {
    if let Some(items) = self.cache.get(self.current_page) {
      self.shown = items.to_vec();
      return Ok(());
    }

    if self
      .pending_page
      .as_ref()
      .is_some_and(|pending| pending.page == self.current_page)
    {
      return Ok(());
    }

    Err(Error::MissingCacheEntry {
      page: self.current_page,
    })
  }

  /// Moves to `page`, clamped to the valid range. Ignored while a search
  /// term is set.
  pub(crate) fn go_to_page(&mut self, page: usize) {
    if self.is_searching() {
      return;
    }

    self.load_page(page);
  }

  pub(crate) fn is_loading(&self) -> bool {
    if self.is_searching() {
      self
        .pending_search
        .as_ref()
        .is_some_and(|pending| pending.started)
    } else {
      self.pending_page.is_some()
    }
  }

  pub(crate) fn is_searching(&self) -> bool {
    !self.search_term.is_empty()
  }

  fn issue_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  fn load_page(&mut self, page: usize) {
    let page = self.bounds.clamp(page);

    self.current_page = page;

    if let Some(items) = self.cache.get(page) {
      self.shown = items.to_vec();
      self.pending_page = None;
      return;
    }

    if self
      .pending_page
      .as_ref()
      .is_some_and(|pending| pending.page == page)
    {
      return;
    }

    let request_id = self.issue_request_id();

    debug!(page, request_id, "requesting page");

    self.pending_page = Some(PendingPage { page, request_id });

    self
      .pending_effects
      .push(Effect::FetchPage { page, request_id });
  }

  pub(crate) fn new(
    page_size: PageSize,
    total_items: usize,
    initial_items: Vec<T>,
  ) -> Self {
    Self {
      bounds: PaginationBounds::new(total_items, page_size),
      cache: PageCache::seeded(initial_items.clone()),
      current_page: PaginationBounds::MIN,
      next_request_id: 0,
      page_size,
      pending_effects: Vec::new(),
      pending_page: None,
      pending_search: None,
      search_term: String::new(),
      shown: initial_items,
    }
  }

  pub(crate) fn next_page(&mut self) {
    if self.current_page < self.bounds.max {
      self.go_to_page(self.current_page + 1);
    }
  }

  /// Applies the response to a page request and reports whether it was
  /// applied. Responses to anything but the latest request are dropped.
  pub(crate) fn page_loaded(
    &mut self,
    page: usize,
    request_id: u64,
    result: Result<Vec<T>>,
  ) -> Result<bool, Error> {
    if !self
      .pending_page
      .as_ref()
      .is_some_and(|pending| pending.request_id == request_id)
    {
      debug!(page, request_id, "discarding stale page response");
      return Ok(false);
    }

    self.pending_page = None;

    match result {
      Ok(items) => {
        if !self.is_searching() && page == self.current_page {
          self.shown.clone_from(&items);
        }

        self.cache.insert(page, items);

        debug!(page, cached_pages = self.cache.len(), "page cached");

        Ok(true)
      }
      Err(error) => Err(Error::fetch_failure(FetchTarget::Page(page), &error)),
    }
  }

  pub(crate) fn phase(&self) -> Phase {
    if self.is_loading() {
      Phase::Loading
    } else if self.is_searching() {
      Phase::Searching
    } else {
      Phase::Idle
    }
  }

  pub(crate) fn previous_page(&mut self) {
    if self.current_page > PaginationBounds::MIN {
      self.go_to_page(self.current_page - 1);
    }
  }

  pub(crate) fn search_loaded(
    &mut self,
    request_id: u64,
    result: Result<Vec<T>>,
  ) -> Result<bool, Error> {
    if !self
      .pending_search
      .as_ref()
      .is_some_and(|pending| pending.request_id == request_id)
    {
      debug!(request_id, "discarding stale search response");
      return Ok(false);
    }

    let Some(pending) = self.pending_search.take() else {
      return Ok(false);
    };

    match result {
      Ok(items) => {
        self.shown = items;
        Ok(true)
      }
      Err(error) => Err(Error::fetch_failure(
        FetchTarget::Search(pending.query),
        &error,
      )),
    }
  }

  pub(crate) fn search_started(&mut self, request_id: u64) {
    if let Some(pending) = self.pending_search.as_mut()
      && pending.request_id == request_id
    {
      pending.started = true;
    }
  }

  pub(crate) fn search_term(&self) -> &str {
    &self.search_term
  }

  /// Sets the live search term. A non-empty term schedules a debounced
  /// search. An empty one cancels it and shows the current page again.
  pub(crate) fn set_search_term(&mut self, term: &str) -> Result<(), Error> {
    let term = term.trim();

    if term == self.search_term {
      return Ok(());
    }

    self.search_term = term.to_string();

    if term.is_empty() {
      self.pending_search = None;
      self.pending_effects.push(Effect::CancelSearch);
      return self.display_cached_page();
    }

    let request_id = self.issue_request_id();

    self.pending_search = Some(PendingSearch {
      query: term.to_string(),
      request_id,
      started: false,
    });

    self.pending_effects.push(Effect::ScheduleSearch {
      query: term.to_string(),
      request_id,
    });

    Ok(())
  }

  /// Recomputes the page count. Cached pages are kept as they are.
  pub(crate) fn set_total_items(&mut self, total_items: usize) {
    self.bounds = PaginationBounds::new(total_items, self.page_size);

    let page = self.bounds.clamp(self.current_page);

    if page != self.current_page {
      self.load_page(page);
    }
  }

  pub(crate) fn shown(&self) -> &[T] {
    &self.shown
  }

  pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
    std::mem::take(&mut self.pending_effects)
  }
}
