use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct CountResponse {
  pub(crate) count: usize,
}
