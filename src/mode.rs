use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
  Browse,
  Dots(DotsPopover),
  Search,
}

impl Mode {
  pub(crate) fn handle_key(&self, key: KeyEvent) -> Command {
    let modifiers = key.modifiers;

    match self {
      Mode::Browse => match key.code {
        KeyCode::Char('q' | 'Q') => Command::Quit,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Char('/') => Command::FocusSearch,
        KeyCode::Esc => Command::ClearSearch,
        KeyCode::Left | KeyCode::Char('h') => Command::PreviousPage,
        KeyCode::Right | KeyCode::Char('l') => Command::NextPage,
        KeyCode::Home => Command::FirstPage,
        KeyCode::End => Command::LastPage,
        KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
        KeyCode::Tab => Command::FocusNextButton,
        KeyCode::BackTab => Command::FocusPreviousButton,
        KeyCode::Enter => Command::ActivateButton,
        KeyCode::Char('e' | 'o') => Command::EditSelected,
        KeyCode::Char('r') => Command::RefreshTotal,
        _ => Command::None,
      },
      Mode::Dots(_) => match key.code {
        KeyCode::Char('q' | 'Q') => Command::Quit,
        KeyCode::Left | KeyCode::Char('h') => Command::PreviousDot,
        KeyCode::Right | KeyCode::Char('l') => Command::NextDot,
        KeyCode::Enter => Command::ChooseDot,
        _ => Command::CloseDots,
      },
      Mode::Search => match key.code {
        KeyCode::Esc => Command::ClearSearch,
        KeyCode::Enter => Command::LeaveSearch,
        KeyCode::Backspace => Command::DeleteSearchChar,
        KeyCode::Char(_)
          if modifiers.contains(KeyModifiers::CONTROL)
            || modifiers.contains(KeyModifiers::ALT)
            || modifiers.contains(KeyModifiers::SUPER) =>
        {
          Command::None
        }
        KeyCode::Char(ch) => Command::InsertSearchChar(ch),
        _ => Command::None,
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn browse_keys_navigate_pages() {
    assert_eq!(
      Mode::Browse.handle_key(press(KeyCode::Left)),
      Command::PreviousPage
    );
    assert_eq!(
      Mode::Browse.handle_key(press(KeyCode::Char('l'))),
      Command::NextPage
    );
    assert_eq!(
      Mode::Browse.handle_key(press(KeyCode::Tab)),
      Command::FocusNextButton
    );
  }

  #[test]
  fn search_mode_captures_letters() {
    assert_eq!(
      Mode::Search.handle_key(press(KeyCode::Char('q'))),
      Command::InsertSearchChar('q')
    );
    assert_eq!(
      Mode::Search.handle_key(press(KeyCode::Esc)),
      Command::ClearSearch
    );
  }

  #[test]
  fn search_mode_ignores_control_chords() {
    let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);

    assert_eq!(Mode::Search.handle_key(key), Command::None);
  }

  #[test]
  fn any_other_key_closes_the_flyout() {
    let mode = Mode::Dots(DotsPopover::new(1, vec![2, 3]));

    assert_eq!(mode.handle_key(press(KeyCode::Enter)), Command::ChooseDot);
    assert_eq!(mode.handle_key(press(KeyCode::Char('x'))), Command::CloseDots);
    assert_eq!(mode.handle_key(press(KeyCode::Esc)), Command::CloseDots);
  }
}
