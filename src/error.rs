use super::*;

#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum Error {
  #[error("could not load {target}: {reason}")]
  FetchFailure { reason: String, target: FetchTarget },
  #[error("page size must be greater than 1, got {page_size}")]
  InvalidConfiguration { page_size: usize },
  #[error("invalid pagination state: {message}")]
  InvalidPaginationState { message: String },
  #[error("page {page} has no cached entries")]
  MissingCacheEntry { page: usize },
  #[error(
    "the back office serves {served} records per page but the page size is \
     {configured}"
  )]
  PageSizeMismatch { configured: usize, served: usize },
}

impl Error {
  pub(crate) fn fetch_failure(
    target: FetchTarget,
    error: &anyhow::Error,
  ) -> Self {
    Self::FetchFailure {
      reason: format!("{error:#}"),
      target,
    }
  }

  pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
    Self::InvalidPaginationState {
      message: message.into(),
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FetchTarget {
  Page(usize),
  Search(String),
  TotalItems,
}

impl Display for FetchTarget {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Page(page) => write!(f, "page {page}"),
      Self::Search(query) => write!(f, "search results for \"{query}\""),
      Self::TotalItems => write!(f, "the item count"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetch_failure_names_what_could_not_be_loaded() {
    let error = Error::fetch_failure(
      FetchTarget::Page(4),
      &anyhow::anyhow!("connection refused"),
    );

    assert_eq!(error.to_string(), "could not load page 4: connection refused");
  }

  #[test]
  fn search_failure_quotes_the_query() {
    let error = Error::fetch_failure(
      FetchTarget::Search("bor".into()),
      &anyhow::anyhow!("timeout"),
    );

    assert_eq!(
      error.to_string(),
      "could not load search results for \"bor\": timeout"
    );
  }
}
