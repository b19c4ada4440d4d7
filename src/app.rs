use super::*;

pub(crate) struct App {
  client: Client,
  debouncer: Debouncer,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  const DOTS_WIDTH: u16 = 48;

  /// Column at which the button at `index` starts in the pagination bar.
  fn button_offset(buttons: &[PageButton], index: usize) -> u16 {
    saturating_u16(
      buttons
        .iter()
        .take(index)
        .map(|button| button.to_string().chars().count() + 2)
        .sum(),
    )
  }

  /// Flyout rectangle above the pagination bar, clipped to `bounds`.
  fn dots_area(anchor: Rect, offset: u16, bounds: Rect) -> Rect {
    let width = anchor.width.min(Self::DOTS_WIDTH);

    Rect::new(
      anchor.x + offset.min(anchor.width - width),
      anchor.y.saturating_sub(2),
      width,
      3,
    )
    .intersection(bounds)
  }

  fn dots_line(popover: &DotsPopover, width: u16) -> Line<'static> {
    let pages = popover.pages();

    if pages.is_empty() {
      return Line::from(Span::styled(
        "no hidden pages",
        Style::default().fg(Color::DarkGray),
      ));
    }

    let cell = pages
      .iter()
      .map(|page| page.to_string().len() + 2)
      .max()
      .unwrap_or(3);

    let fit = (usize::from(width) / cell).max(1);

    let start = popover
      .selected()
      .saturating_sub(fit / 2)
      .min(pages.len().saturating_sub(fit));

    let spans = pages
      .iter()
      .enumerate()
      .skip(start)
      .take(fit)
      .map(|(index, page)| {
        let style = if index == popover.selected() {
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
          Style::default().fg(Color::White)
        };

        Span::styled(format!(" {page} "), style)
      })
      .collect::<Vec<_>>();

    Line::from(spans)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_narrow(layout[3].width < NARROW_WIDTH);

    frame.render_widget(self.title_line(), layout[0]);

    let focused = matches!(self.state.mode(), Mode::Search);

    let search = Paragraph::new(self.state.search_input().prompt(focused))
      .style(Style::default().fg(if focused {
        Color::Cyan
      } else {
        Color::DarkGray
      }));

    frame.render_widget(search, layout[1]);

    self.draw_table(frame, layout[2]);

    if self.state.pagination_visible() {
      let controller = self.state.controller();

      let pagination = Self::pagination_line(
        &controller.buttons(),
        self.state.button_cursor(),
        controller.current_page(),
        controller.bounds().max,
        layout[3].width,
      );

      frame.render_widget(Paragraph::new(pagination), layout[3]);
    }

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[4]);

    if let Mode::Dots(popover) = self.state.mode() {
      let offset = if self.state.is_narrow() {
        0
      } else {
        Self::button_offset(
          &self.state.controller().buttons(),
          popover.marker(),
        )
      };

      Self::draw_dots(frame, popover, layout[3], offset);
    }

    self.state.help().draw(frame);
  }

  fn draw_dots(
    frame: &mut Frame,
    popover: &DotsPopover,
    anchor: Rect,
    offset: u16,
  ) {
    let area = Self::dots_area(anchor, offset, frame.area());

    if area.is_empty() {
      return;
    }

    let title = match (popover.pages().first(), popover.pages().last()) {
      (Some(first), Some(last)) => format!("pages {first}-{last}"),
      _ => "pages".to_string(),
    };

    frame.render_widget(Clear, area);

    let flyout = Paragraph::new(Self::dots_line(
      popover,
      area.width.saturating_sub(2),
    ))
    .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(flyout, area);
  }

  fn draw_table(&self, frame: &mut Frame, area: Rect) {
    let controller = self.state.controller();

    let placeholder = if controller.is_loading() {
      Some(if controller.is_searching() {
        LOADING_SEARCH_STATUS
      } else {
        LOADING_PAGE_STATUS
      })
    } else if controller.shown().is_empty() {
      Some(if controller.is_searching() {
        "No records match the search."
      } else {
        "No records to show."
      })
    } else {
      None
    };

    if let Some(text) = placeholder {
      let line = Line::from(vec![Span::raw(BASE_INDENT), Span::raw(text)]);

      frame.render_widget(Paragraph::new(line), area);

      return;
    }

    let columns = self.state.resource().columns();

    let header =
      Row::new(columns.iter().map(|column| Cell::from(column.header))).style(
        Style::default()
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      );

    let rows = controller.shown().iter().map(|record| {
      Row::new(
        columns
          .iter()
          .map(|column| Cell::from(record.cell(column))),
      )
      .style(Style::default().fg(Color::Gray))
    });

    let table = Table::new(rows, columns.iter().map(|_| Constraint::Fill(1)))
      .header(header)
      .column_spacing(2)
      .row_highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      );

    let mut table_state =
      TableState::default().with_selected(self.state.selected_row());

    frame.render_stateful_widget(table, area, &mut table_state);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::CancelSearch => self.debouncer.cancel(),
      Effect::FetchPage { page, request_id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        self.handle.spawn(async move {
          let _ = sender.send(Event::Page {
            page,
            request_id,
            result: client.fetch_page(page).await,
          });
        });
      }
      Effect::FetchTotalItems => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        self.handle.spawn(async move {
          let _ = sender.send(Event::TotalItems {
            result: client.count().await,
          });
        });
      }
      Effect::OpenEditPage { record } => {
        let Some(url) = self.client.edit_url(&record) else {
          self
            .state
            .set_transient_message("The selected record has no id".into());

          return;
        };

        match webbrowser::open(&url) {
          Ok(()) => {
            info!(%url, "opened edit page");

            self.state.set_transient_message(format!(
              "Opened in browser: {}",
              truncate(&url, 80)
            ));
          }
          Err(error) => {
            warn!(%url, %error, "could not open edit page");

            self
              .state
              .set_transient_message(format!("Could not open link: {error}"));
          }
        }
      }
      Effect::ScheduleSearch { query, request_id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        self.debouncer.schedule(async move {
          if sender.send(Event::SearchStarted { request_id }).is_err() {
            return;
          }

          let _ = sender.send(Event::SearchResults {
            request_id,
            result: client.search(&query).await,
          });
        });
      }
    }
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let handle = Handle::current();

    Self {
      client,
      debouncer: Debouncer::new(handle.clone(), SEARCH_DEBOUNCE),
      event_rx,
      event_tx,
      handle,
      state,
    }
  }

  fn pagination_line(
    buttons: &[PageButton],
    cursor: usize,
    current_page: usize,
    max_page: usize,
    width: u16,
  ) -> Line<'static> {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    if width < NARROW_WIDTH {
      return Line::from(vec![
        Span::styled(
          "‹ ",
          if current_page > PaginationBounds::MIN {
            enabled
          } else {
            disabled
          },
        ),
        Span::raw(format!("{current_page}/{max_page}")),
        Span::styled(
          " ›",
          if current_page < max_page {
            enabled
          } else {
            disabled
          },
        ),
      ]);
    }

    let spans = buttons
      .iter()
      .enumerate()
      .map(|(index, button)| {
        let mut style = if *button == PageButton::Page(current_page) {
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
        } else if button.page().is_some() {
          enabled
        } else {
          disabled
        };

        if index == cursor {
          style = style.add_modifier(Modifier::REVERSED);
        }

        Span::styled(format!(" {button} "), style)
      })
      .collect::<Vec<_>>();

    Line::from(spans)
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      for effect in self.state.handle_event(event) {
        self.execute_effect(effect);
      }
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        self.process_pending_events();
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        self.process_pending_events();
        continue;
      };

      if key.kind != KeyEventKind::Press {
        self.process_pending_events();
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else {
        self.state.mode().handle_key(key)
      };

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }

          self.process_pending_events();
        }
        Err(error) => {
          warn!("{error:#}");

          for effect in self.state.take_pending_effects() {
            self.execute_effect(effect);
          }

          self.state.set_transient_message(format!("error: {error}"));
          self.process_pending_events();
        }
      }
    }

    Ok(())
  }

  fn title_line(&self) -> Paragraph<'static> {
    let controller = self.state.controller();

    let position = if controller.is_searching() {
      format!("search \"{}\"", truncate(controller.search_term(), 40))
    } else {
      format!(
        "page {} of {}",
        controller.current_page(),
        controller.bounds().max.max(PaginationBounds::MIN)
      )
    };

    Paragraph::new(Line::from(vec![
      Span::styled(
        self.state.resource().label().to_uppercase(),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!("  {} • {position}", self.client.base_url()),
        Style::default().fg(Color::DarkGray),
      ),
    ]))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn text(line: &Line) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
  }

  #[test]
  fn wide_pagination_lists_every_button() {
    let buttons =
      page_buttons(25, PaginationBounds { max: 50 }, PageSize::DEFAULT);

    let line = App::pagination_line(&buttons, 3, 25, 50, 120);

    assert_eq!(text(&line), " 1  ...  24  25  26  ...  50 ");

    assert!(line.spans[3].style.add_modifier.contains(Modifier::REVERSED));
    assert!(!line.spans[2].style.add_modifier.contains(Modifier::REVERSED));
  }

  #[test]
  fn narrow_pagination_shows_only_arrows() {
    let line = App::pagination_line(&[], 0, 1, 7, NARROW_WIDTH - 1);

    assert_eq!(text(&line), "‹ 1/7 ›");
    assert_eq!(line.spans[0].style.fg, Some(Color::DarkGray));
    assert_eq!(line.spans[2].style.fg, Some(Color::White));
  }

  #[test]
  fn dots_line_scrolls_to_the_selection() {
    let mut popover = DotsPopover::new(10, (11..=49).collect());

    assert_eq!(text(&App::dots_line(&popover, 20)), " 11  12  13  14  15 ");

    for _ in 0..20 {
      popover.select_next();
    }

    assert_eq!(text(&App::dots_line(&popover, 20)), " 29  30  31  32  33 ");
  }

  #[test]
  fn flyout_is_anchored_at_its_marker() {
    let buttons =
      page_buttons(25, PaginationBounds { max: 50 }, PageSize::DEFAULT);

    assert_eq!(App::button_offset(&buttons, 0), 0);
    assert_eq!(App::button_offset(&buttons, 1), 3);
    assert_eq!(App::button_offset(&buttons, 5), 20);
  }

  #[test]
  fn flyout_stays_inside_a_short_terminal() {
    let bounds = Rect::new(0, 0, 80, 2);

    let area = App::dots_area(Rect::new(1, 1, 78, 1), 20, bounds);

    assert_eq!(area, Rect::new(21, 0, 48, 2));
    assert_eq!(bounds.intersection(area), area);
  }

  #[test]
  fn flyout_is_empty_without_room() {
    let area =
      App::dots_area(Rect::new(1, 1, 78, 1), 0, Rect::new(0, 0, 0, 0));

    assert!(area.is_empty());
  }

  #[test]
  fn flyout_fits_above_the_bar() {
    assert_eq!(
      App::dots_area(Rect::new(1, 20, 30, 1), 25, Rect::new(0, 0, 32, 24)),
      Rect::new(1, 18, 30, 3)
    );
  }

  #[test]
  fn empty_flyout_says_so() {
    let popover = DotsPopover::new(2, Vec::new());

    assert_eq!(text(&App::dots_line(&popover, 20)), "no hidden pages");
  }
}
