use super::*;

/// One row as returned by the back office. Records stay untyped JSON so a
/// single table can show any resource.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub(crate) struct Record {
  fields: Map<String, Value>,
}

impl Record {
  pub(crate) fn cell(&self, column: &Column) -> String {
    let mut path = column.field.split('.');

    let value = path
      .next()
      .and_then(|first| self.fields.get(first))
      .and_then(|value| path.try_fold(value, |value, key| value.get(key)));

    value.map(column.format).unwrap_or_default()
  }

  pub(crate) fn id(&self) -> Option<String> {
    match self.fields.get("id")? {
      Value::String(id) if !id.is_empty() => Some(id.clone()),
      Value::Number(id) => Some(id.to_string()),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, serde_json::json};

  fn record(value: Value) -> Record {
    serde_json::from_value(value).expect("record deserializes")
  }

  #[test]
  fn top_level_field_is_formatted() {
    let author = record(json!({ "id": "a1", "name": "Isabel Allende" }));

    assert_eq!(
      author.cell(&Resource::Authors.columns()[0]),
      "Isabel Allende"
    );
  }

  #[test]
  fn nested_field_follows_the_path() {
    let book = record(json!({
      "name": "Rayuela",
      "author": { "name": "Julio Cortázar" },
      "releaseDate": "1963-06-28T00:00:00.000Z",
    }));

    let columns = Resource::Books.columns();

    assert_eq!(book.cell(&columns[0]), "Julio Cortázar");
    assert_eq!(book.cell(&columns[3]), "1963-06-28");
  }

  #[test]
  fn missing_field_is_blank() {
    let book = record(json!({ "name": "Rayuela", "author": null }));

    assert_eq!(book.cell(&Resource::Books.columns()[0]), "");
    assert_eq!(book.cell(&Resource::Books.columns()[1]), "");
  }

  #[test]
  fn id_accepts_strings_and_numbers() {
    assert_eq!(record(json!({ "id": "abc" })).id().as_deref(), Some("abc"));
    assert_eq!(record(json!({ "id": 7 })).id().as_deref(), Some("7"));
    assert_eq!(record(json!({ "id": "" })).id(), None);
    assert_eq!(record(json!({})).id(), None);
  }

  #[test]
  fn book_copy_row_renders_every_column() {
    let copy = record(json!({
      "id": "c1",
      "edition": "Primera",
      "pages": 736,
      "publisher": "Cátedra",
      "quantityInStock": 4,
      "priceMXN": 249.5,
      "bookId": "b1",
      "book": { "name": "Rayuela" },
    }));

    let cells = Resource::BookCopies
      .columns()
      .iter()
      .map(|column| copy.cell(column))
      .collect::<Vec<_>>();

    assert_eq!(cells, ["Rayuela", "Primera", "736", "Cátedra", "4", "249.5"]);
  }

  #[test]
  fn book_genre_is_translated() {
    let book = record(json!({ "name": "Dune", "genre": "SCIENCE_FICTION" }));

    assert_eq!(book.cell(&Resource::Books.columns()[1]), "Ciencia Ficción");
  }

  #[test]
  fn current_tax_rate_has_no_end_date() {
    let rate = record(json!({
      "percentage": 16,
      "startDate": "2022-01-01T00:00:00.000Z",
      "endDate": "9999-12-31T00:00:00.000Z",
    }));

    let cells = Resource::TaxRates
      .columns()
      .iter()
      .map(|column| rate.cell(column))
      .collect::<Vec<_>>();

    assert_eq!(cells, ["16", "2022-01-01", "Valor Vigente Actualmente"]);
  }

  #[test]
  fn non_object_is_rejected() {
    assert!(serde_json::from_value::<Record>(json!([1, 2])).is_err());
  }
}
