#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  ActivateButton,
  ChooseDot,
  ClearSearch,
  CloseDots,
  DeleteSearchChar,
  EditSelected,
  FirstPage,
  FocusNextButton,
  FocusPreviousButton,
  FocusSearch,
  HideHelp,
  InsertSearchChar(char),
  LastPage,
  LeaveSearch,
  NextDot,
  NextPage,
  None,
  PreviousDot,
  PreviousPage,
  Quit,
  RefreshTotal,
  SelectNext,
  SelectPrevious,
  ShowHelp,
}
