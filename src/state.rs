use super::*;

pub(crate) struct State {
  button_cursor: usize,
  controller: ListController<Record>,
  help: HelpView,
  message: String,
  mode: Mode,
  narrow: bool,
  pending_effects: Vec<Effect>,
  resource: Resource,
  search_input: SearchInput,
  selected_row: usize,
  transient_message: Option<TransientMessage>,
}

impl State {
  const QUERY_PREVIEW_CHARS: usize = 40;

  fn activate_button(&mut self) -> Result<(), Error> {
    if !self.buttons_focusable() {
      return Ok(());
    }

    let buttons = self.controller.buttons();

    match buttons.get(self.button_cursor) {
      Some(PageButton::Page(page)) => self.go_to_page(*page),
      Some(PageButton::Dots) => {
        let pages = expand_dots(
          &buttons,
          self.button_cursor,
          self.controller.bounds().max,
        )?;

        self.mode = Mode::Dots(DotsPopover::new(self.button_cursor, pages));
        self.refresh_status();
      }
      None => {}
    }

    Ok(())
  }

  fn apply_search_term(&mut self) -> Result<(), Error> {
    let result = self.controller.set_search_term(&self.search_input.buffer);

    self.selected_row = 0;
    self.sync_button_cursor();
    self.refresh_status();

    result
  }

  pub(crate) fn button_cursor(&self) -> usize {
    self.button_cursor
  }

  /// A narrow pagination bar shows arrows only, so there is no page button
  /// to focus or activate.
  fn buttons_focusable(&self) -> bool {
    self.pagination_visible() && !self.narrow
  }

  fn choose_dot(&mut self) {
    let Mode::Dots(popover) = &self.mode else {
      return;
    };

    let page = popover.selected_page();

    self.mode = Mode::Browse;

    match page {
      Some(page) => self.go_to_page(page),
      None => self.refresh_status(),
    }
  }

  fn clear_search(&mut self) -> Result<(), Error> {
    self.mode = Mode::Browse;
    self.search_input.buffer.clear();
    self.apply_search_term()
  }

  fn close_dots(&mut self) {
    if matches!(self.mode, Mode::Dots(_)) {
      self.mode = Mode::Browse;
      self.refresh_status();
    }
  }

  pub(crate) fn controller(&self) -> &ListController<Record> {
    &self.controller
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::ActivateButton => self.activate_button()?,
      Command::ChooseDot => self.choose_dot(),
      Command::ClearSearch => self.clear_search()?,
      Command::CloseDots => self.close_dots(),
      Command::DeleteSearchChar => {
        self.search_input.buffer.pop();
        self.apply_search_term()?;
      }
      Command::EditSelected => self.edit_selected(),
      Command::FirstPage => self.go_to_page(PaginationBounds::MIN),
      Command::FocusNextButton => self.focus_next_button(),
      Command::FocusPreviousButton => self.focus_previous_button(),
      Command::FocusSearch => {
        self.mode = Mode::Search;
        self.refresh_status();
      }
      Command::HideHelp => {
        self.help.hide(&mut self.message);
        self.refresh_status();
      }
      Command::InsertSearchChar(ch) => {
        self.search_input.buffer.push(ch);
        self.apply_search_term()?;
      }
      Command::LastPage => self.go_to_page(self.controller.bounds().max),
      Command::LeaveSearch => {
        self.mode = Mode::Browse;
        self.refresh_status();
      }
      Command::NextDot => self.move_dot_selection(DotsPopover::select_next),
      Command::NextPage => {
        self.controller.next_page();
        self.page_changed();
      }
      Command::None => {}
      Command::PreviousDot => {
        self.move_dot_selection(DotsPopover::select_previous);
      }
      Command::PreviousPage => {
        self.controller.previous_page();
        self.page_changed();
      }
      Command::Quit => {
        should_exit = true;
      }
      Command::RefreshTotal => self.refresh_total(),
      Command::SelectNext => self.select_next(),
      Command::SelectPrevious => self.select_previous(),
      Command::ShowHelp => self.help.show(&mut self.message),
    }

    Ok(CommandDispatch {
      effects: self.take_pending_effects(),
      should_exit,
    })
  }

  fn edit_selected(&mut self) {
    if self.resource.edit_route().is_none() {
      self.set_transient_message(format!(
        "{} cannot be edited",
        self.resource.label()
      ));

      return;
    }

    if let Some(record) = self.selected_record().cloned() {
      self.pending_effects.push(Effect::OpenEditPage { record });
    }
  }

  fn focus_next_button(&mut self) {
    if !self.buttons_focusable() {
      return;
    }

    let count = self.controller.buttons().len();

    if count != 0 {
      self.button_cursor = (self.button_cursor + 1) % count;
    }
  }

  fn focus_previous_button(&mut self) {
    if !self.buttons_focusable() {
      return;
    }

    let count = self.controller.buttons().len();

    if count != 0 {
      self.button_cursor = (self.button_cursor + count - 1) % count;
    }
  }

  fn go_to_page(&mut self, page: usize) {
    self.controller.go_to_page(page);
    self.page_changed();
  }

  /// Applies an outcome reported by a background task and returns the
  /// requests it causes.
  pub(crate) fn handle_event(&mut self, event: Event) -> Vec<Effect> {
    match event {
      Event::Page {
        page,
        request_id,
        result,
      } => match self.controller.page_loaded(page, request_id, result) {
        Ok(true) => self.refresh_status(),
        Ok(false) => {}
        Err(error) => self.report(&error),
      },
      Event::SearchResults { request_id, result } => {
        match self.controller.search_loaded(request_id, result) {
          Ok(true) => {
            self.selected_row = 0;
            self.refresh_status();
          }
          Ok(false) => {}
          Err(error) => self.report(&error),
        }
      }
      Event::SearchStarted { request_id } => {
        self.controller.search_started(request_id);

        if self.controller.is_loading() {
          self.refresh_status();
        }
      }
      Event::TotalItems { result } => match result {
        Ok(total_items) => {
          let page = self.controller.current_page();

          self.controller.set_total_items(total_items);

          if self.controller.current_page() != page {
            self.selected_row = 0;
          }

          self.sync_button_cursor();
          self.refresh_status();

          info!(
            total_items,
            cached_pages = self.controller.cache().len(),
            "item count refreshed"
          );

          if !self.help.is_visible() {
            self.set_transient_message(format!(
              "{} has {total_items} records",
              self.resource.label()
            ));
          }
        }
        Err(error) => {
          self.report(&Error::fetch_failure(FetchTarget::TotalItems, &error));
        }
      },
    }

    self.take_pending_effects()
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn is_narrow(&self) -> bool {
    self.narrow
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode(&self) -> &Mode {
    &self.mode
  }

  fn move_dot_selection(&mut self, step: fn(&mut DotsPopover)) {
    if let Mode::Dots(popover) = &mut self.mode {
      step(popover);
    }
  }

  pub(crate) fn new(
    resource: Resource,
    controller: ListController<Record>,
  ) -> Self {
    let mut state = Self {
      button_cursor: 0,
      controller,
      help: HelpView::new(),
      message: BROWSE_STATUS.into(),
      mode: Mode::Browse,
      narrow: false,
      pending_effects: Vec::new(),
      resource,
      search_input: SearchInput::default(),
      selected_row: 0,
      transient_message: None,
    };

    state.sync_button_cursor();

    state
  }

  fn page_changed(&mut self) {
    if self.controller.is_searching() {
      return;
    }

    self.selected_row = 0;
    self.sync_button_cursor();
    self.refresh_status();
  }

  /// The page buttons are only offered while plain pages are on screen.
  pub(crate) fn pagination_visible(&self) -> bool {
    !self.controller.is_searching() && !self.controller.is_loading()
  }

  fn refresh_status(&mut self) {
    let query =
      truncate(self.controller.search_term(), Self::QUERY_PREVIEW_CHARS);

    let status = match self.controller.phase() {
      Phase::Loading if self.controller.is_searching() => {
        format!("Searching for \"{query}\"...")
      }
      Phase::Loading => LOADING_PAGE_STATUS.into(),
      Phase::Idle | Phase::Searching => match &self.mode {
        Mode::Browse if self.controller.is_searching() => {
          match self.controller.shown().len() {
            0 => format!("No results for \"{query}\""),
            1 => format!("Found 1 result for \"{query}\""),
            count => format!("Found {count} results for \"{query}\""),
          }
        }
        Mode::Browse => BROWSE_STATUS.into(),
        Mode::Dots(_) => DOTS_STATUS.into(),
        Mode::Search => SEARCH_STATUS.into(),
      },
    };

    if !self.help.is_visible() {
      self.message = status;
    }
  }

  fn refresh_total(&mut self) {
    self.pending_effects.push(Effect::FetchTotalItems);

    if !self.help.is_visible() {
      self.set_transient_message("Counting records...".into());
    }
  }

  fn report(&mut self, error: &Error) {
    warn!(%error, "background request failed");

    self.refresh_status();

    if !self.help.is_visible() {
      self.set_transient_message(format!("error: {error}"));
    }
  }

  pub(crate) fn resource(&self) -> Resource {
    self.resource
  }

  pub(crate) fn search_input(&self) -> &SearchInput {
    &self.search_input
  }

  fn select_next(&mut self) {
    if let Some(row) = self.selected_row() {
      self.selected_row = (row + 1).min(self.controller.shown().len() - 1);
    }
  }

  fn select_previous(&mut self) {
    if let Some(row) = self.selected_row() {
      self.selected_row = row.saturating_sub(1);
    }
  }

  fn selected_record(&self) -> Option<&Record> {
    self
      .selected_row()
      .and_then(|row| self.controller.shown().get(row))
  }

  pub(crate) fn selected_row(&self) -> Option<usize> {
    let count = self.controller.shown().len();

    (count != 0).then(|| self.selected_row.min(count - 1))
  }

  pub(crate) fn set_narrow(&mut self, narrow: bool) {
    self.narrow = narrow;
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message = Some(TransientMessage::new(
      message.clone(),
      original,
      Instant::now(),
    ));

    self.message = message;
  }

  fn sync_button_cursor(&mut self) {
    let current = PageButton::Page(self.controller.current_page());

    self.button_cursor = self
      .controller
      .buttons()
      .iter()
      .position(|button| *button == current)
      .unwrap_or(0);
  }

  /// Drains the requests queued so far, including those queued before a
  /// command failed part way through.
  pub(crate) fn take_pending_effects(&mut self) -> Vec<Effect> {
    let mut effects = std::mem::take(&mut self.pending_effects);
    effects.extend(self.controller.take_effects());
    effects
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired(Instant::now()) {
        self.message = transient.original().to_string();
        self.transient_message = None;
      }
    }
  }
}
