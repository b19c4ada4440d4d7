pub(crate) struct PendingPage {
  pub(crate) page: usize,
  pub(crate) request_id: u64,
}
