use {
  anyhow::{Context, anyhow, bail},
  app::App,
  arguments::Arguments,
  clap::{Parser, ValueEnum},
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  count_response::CountResponse,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  debouncer::Debouncer,
  dot_expansion::expand_dots,
  dots_popover::DotsPopover,
  effect::Effect,
  error::{Error, FetchTarget},
  event::Event,
  futures::future::join,
  help_view::HelpView,
  indexmap::IndexMap,
  list_controller::{ListController, Phase},
  mode::Mode,
  page_button::PageButton,
  page_cache::PageCache,
  page_range::page_buttons,
  page_size::PageSize,
  pagination_bounds::PaginationBounds,
  pending_page::PendingPage,
  pending_search::PendingSearch,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
    },
  },
  record::Record,
  resource::{Column, Resource},
  search_input::SearchInput,
  serde::Deserialize,
  serde_json::{Map, Value},
  state::State,
  std::{
    backtrace::BacktraceStatus,
    fmt::{self, Display},
    fs,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time,
  },
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  transient_message::TransientMessage,
  utils::{format_value, saturating_u16, truncate},
};

mod app;
mod arguments;
mod client;
mod command;
mod command_dispatch;
mod count_response;
mod debouncer;
mod dot_expansion;
mod dots_popover;
mod effect;
mod error;
mod event;
mod help_view;
mod list_controller;
mod logging;
mod mode;
mod page_button;
mod page_cache;
mod page_range;
mod page_size;
mod pagination_bounds;
mod pending_page;
mod pending_search;
mod record;
mod resource;
mod search_input;
mod state;
mod transient_message;
mod utils;

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

const DEFAULT_LOG_FILTER: &str = "info";

const NARROW_WIDTH: u16 = 60;

const BROWSE_STATUS: &str = "←/h prev • →/l next • tab/enter pick page • / search • e edit • r recount • ? help • q quit";

const SEARCH_STATUS: &str = "type to search • enter keep results • esc clear";

const DOTS_STATUS: &str = "←/h →/l choose page • enter go • any other key closes";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_PAGE_STATUS: &str = "Loading...";
const LOADING_SEARCH_STATUS: &str = "Searching...";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Pages:
  ← / h      previous page
  → / l      next page
  home       first page
  end        last page
  tab        focus next page button
  shift+tab  focus previous page button
  enter      go to the focused page, or list the pages behind ...

Hidden pages:
  ← / h      previous hidden page
  → / l      next hidden page
  enter      go to the chosen page
  any key    close the list

Records:
  ↑ / k      move selection up
  ↓ / j      move selection down
  e / o      open the selected record for editing in your browser
  r          count the records again

Search:
  /          focus the search box, results update as you type
  enter      keep the results and leave the search box
  esc        clear the search and go back to the pages

  q          quit sgb
  ?          toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  logging::initialize(arguments.log_file.as_deref())?;

  let page_size = arguments.page_size()?;

  let client = Client::new(
    &arguments.base_url,
    arguments.resource,
    arguments.session_token.clone(),
  );

  info!(
    base_url = client.base_url(),
    resource = arguments.resource.endpoint(),
    page_size = page_size.get(),
    "starting"
  );

  let first_page = match arguments.total_items {
    Some(total_items) => client
      .fetch_page(PaginationBounds::MIN)
      .await
      .map(|records| (Ok(total_items), records)),
    None => client.load_first_page().await,
  };

  let (count, first_page) = first_page.with_context(|| {
    format!(
      "could not load {} from {}",
      arguments.resource.label(),
      client.base_url()
    )
  })?;

  let (total_items, count_error) = match count {
    Ok(total_items) => (total_items, None),
    Err(error) => (first_page.len(), Some(error)),
  };

  page_size.verify(
    first_page.len(),
    count_error.is_none().then_some(total_items),
  )?;

  let mut state = State::new(
    arguments.resource,
    ListController::new(page_size, total_items, first_page),
  );

  if let Some(error) = count_error {
    state.handle_event(Event::TotalItems { result: Err(error) });
  }

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, state);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
