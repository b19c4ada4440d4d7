use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "sgb",
  version,
  about = "Browse the library back office one page at a time"
)]
pub(crate) struct Arguments {
  #[arg(
    long,
    env = "SGB_BASE_URL",
    default_value = "http://localhost:3000",
    help = "Base URL of the back office"
  )]
  pub(crate) base_url: String,
  #[arg(long, env = "SGB_LOG_FILE", help = "Write logs to this file")]
  pub(crate) log_file: Option<PathBuf>,
  #[arg(
    long,
    env = "SGB_PAGE_SIZE",
    default_value_t = PageSize::DEFAULT.get(),
    help = "Records per page served by the back office, also the number of \
            neighbouring page buttons"
  )]
  pub(crate) page_size: usize,
  #[arg(value_enum, default_value_t = Resource::Authors)]
  pub(crate) resource: Resource,
  #[arg(
    long,
    env = "SGB_SESSION_TOKEN",
    hide_env_values = true,
    help = "Session token sent as the back office session cookie"
  )]
  pub(crate) session_token: Option<String>,
  #[arg(
    long,
    env = "SGB_TOTAL_ITEMS",
    help = "Number of records to page through, skips asking the back office"
  )]
  pub(crate) total_items: Option<usize>,
}

impl Arguments {
  pub(crate) fn page_size(&self) -> Result<PageSize, Error> {
    PageSize::new(self.page_size)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(arguments: &[&str]) -> Arguments {
    let mut argv = vec!["sgb"];
    argv.extend_from_slice(arguments);

    Arguments::try_parse_from(argv).expect("arguments parse")
  }

  #[test]
  fn defaults_browse_authors_ten_at_a_time() {
    let arguments = parse(&[]);

    assert_eq!(arguments.resource, Resource::Authors);
    assert_eq!(arguments.page_size(), Ok(PageSize::DEFAULT));
    assert_eq!(arguments.total_items, None);
  }

  #[test]
  fn total_items_can_be_given() {
    assert_eq!(
      parse(&["books", "--total-items", "137"]).total_items,
      Some(137)
    );
  }

  #[test]
  fn resource_is_positional() {
    assert_eq!(parse(&["book-copies"]).resource, Resource::BookCopies);
    assert_eq!(parse(&["tax-rates"]).resource, Resource::TaxRates);
  }

  #[test]
  fn page_size_of_one_is_rejected() {
    assert_eq!(
      parse(&["--page-size", "1"]).page_size(),
      Err(Error::InvalidConfiguration { page_size: 1 })
    );
  }

  #[test]
  fn unknown_resource_is_rejected() {
    assert!(Arguments::try_parse_from(["sgb", "dragons"]).is_err());
  }
}
