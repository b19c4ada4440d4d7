use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
  resource: Resource,
  session_token: Option<String>,
}

impl Client {
  const COUNT_PARAM: &str = "requestedCount";

  const SESSION_COOKIE: &str = "next-auth.session-token";

  pub(crate) fn base_url(&self) -> &str {
    &self.base_url
  }

  pub(crate) async fn count(&self) -> Result<usize> {
    let body = self.get(Self::COUNT_PARAM, "true").await?;

    let response = serde_json::from_value::<CountResponse>(body)
      .with_context(|| {
        format!("malformed {} count response", self.resource.endpoint())
      })?;

    Ok(response.count)
  }

  pub(crate) fn edit_url(&self, record: &Record) -> Option<String> {
    let route = self.resource.edit_route()?;
    let id = record.id()?;

    Some(format!("{}/{route}/{id}", self.base_url))
  }

  pub(crate) async fn fetch_page(&self, page: usize) -> Result<Vec<Record>> {
    let key = self.resource.response_key();

    let body = self
      .get(self.resource.page_param(), &page.to_string())
      .await
      .with_context(|| format!("failed to request page {page}"))?;

    Self::records(body, key)?
      .with_context(|| format!("page {page} response has no `{key}` field"))
  }

  async fn get(&self, param: &str, value: &str) -> Result<Value> {
    let url = format!("{}/api/{}/", self.base_url, self.resource.endpoint());

    let mut request = self.client.get(&url).query(&[(param, value)]);

    if let Some(token) = &self.session_token {
      request = request.header(
        reqwest::header::COOKIE,
        format!("{}={token}", Self::SESSION_COOKIE),
      );
    }

    debug!(%url, param, value, "GET");

    Ok(
      request
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?,
    )
  }

  /// Loads the first page together with the item count. Only a failed page
  /// is an error; a failed count is handed back for the caller to report.
  pub(crate) async fn load_first_page(
    &self,
  ) -> Result<(Result<usize>, Vec<Record>)> {
    let (count, first_page) =
      join(self.count(), self.fetch_page(PaginationBounds::MIN)).await;

    Ok((count, first_page?))
  }

  pub(crate) fn new(
    base_url: &str,
    resource: Resource,
    session_token: Option<String>,
  ) -> Self {
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client: reqwest::Client::new(),
      resource,
      session_token,
    }
  }

  fn records(body: Value, key: &str) -> Result<Option<Vec<Record>>> {
    let Value::Object(mut fields) = body else {
      bail!("expected a JSON object response");
    };

    match fields.remove(key) {
      None | Some(Value::Null) => Ok(None),
      Some(records) => Ok(Some(
        serde_json::from_value(records)
          .with_context(|| format!("malformed `{key}` records"))?,
      )),
    }
  }

  pub(crate) async fn search(&self, query: &str) -> Result<Vec<Record>> {
    let body = self
      .get(self.resource.search_param(), query)
      .await
      .with_context(|| format!("failed to search for \"{query}\""))?;

    Ok(Self::records(body, self.resource.response_key())?.unwrap_or_default())
  }
}
