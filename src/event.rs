use super::*;

pub(crate) enum Event {
  Page {
    page: usize,
    request_id: u64,
    result: Result<Vec<Record>>,
  },
  SearchResults {
    request_id: u64,
    result: Result<Vec<Record>>,
  },
  SearchStarted {
    request_id: u64,
  },
  TotalItems {
    result: Result<usize>,
  },
}
