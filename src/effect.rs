use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  CancelSearch,
  FetchPage { page: usize, request_id: u64 },
  FetchTotalItems,
  OpenEditPage { record: Record },
  ScheduleSearch { query: String, request_id: u64 },
}
