use super::*;

const AUTHOR_COLUMNS: &[Column] = &[Column::new("Nombre", "name")];

const BOOK_COLUMNS: &[Column] = &[
  Column::new("Autor", "author.name"),
  Column::formatted("Género", "genre", genre),
  Column::new("Nombre", "name"),
  Column::new("Fecha de Publicación", "releaseDate"),
];

const BOOK_COPY_COLUMNS: &[Column] = &[
  Column::new("Nombre del Libro", "book.name"),
  Column::new("Edición", "edition"),
  Column::new("Páginas", "pages"),
  Column::new("Editorial", "publisher"),
  Column::new("Cantidad en Inventario", "quantityInStock"),
  Column::new("Precio (MXN)", "priceMXN"),
];

const LIBRARY_USER_COLUMNS: &[Column] = &[
  Column::new("Nombre", "name"),
  Column::new("Email", "email"),
  Column::new("Fecha de Expiración de Membresía", "membershipExpDate"),
];

const MEMBERSHIP_PRICE_COLUMNS: &[Column] = &[
  Column::new("Precio", "membershipPrice"),
  Column::new("Fecha de Inicio", "startDate"),
  Column::formatted("Fecha de Término", "endDate", end_date),
];

/// End date stored for a rate or price that has not been replaced yet.
const OPEN_END_DATE: &str = "9999-12-31";

const SALE_COLUMNS: &[Column] = &[Column::new("ID de Venta", "id")];

const TAX_RATE_COLUMNS: &[Column] = &[
  Column::new("Porcentaje", "percentage"),
  Column::new("Fecha de Inicio", "startDate"),
  Column::formatted("Fecha de Término", "endDate", end_date),
];

/// One table column: a header and the dotted path of the field it shows.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Column {
  pub(crate) field: &'static str,
  pub(crate) format: fn(&Value) -> String,
  pub(crate) header: &'static str,
}

impl Column {
  const fn formatted(
    header: &'static str,
    field: &'static str,
    format: fn(&Value) -> String,
  ) -> Self {
    Self {
      field,
      format,
      header,
    }
  }

  const fn new(header: &'static str, field: &'static str) -> Self {
    Self::formatted(header, field, format_value)
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum Resource {
  Authors,
  BookCopies,
  Books,
  Employees,
  LibraryUsers,
  MembershipPrices,
  Sales,
  TaxRates,
}

impl Resource {
  pub(crate) fn columns(self) -> &'static [Column] {
    match self {
      Self::Authors | Self::Employees => AUTHOR_COLUMNS,
      Self::BookCopies => BOOK_COPY_COLUMNS,
      Self::Books => BOOK_COLUMNS,
      Self::LibraryUsers => LIBRARY_USER_COLUMNS,
      Self::MembershipPrices => MEMBERSHIP_PRICE_COLUMNS,
      Self::Sales => SALE_COLUMNS,
      Self::TaxRates => TAX_RATE_COLUMNS,
    }
  }

  /// Page under which a single record can be edited, if records of this
  /// kind are editable at all. New tax rates and prices replace old ones.
  pub(crate) fn edit_route(self) -> Option<&'static str> {
    match self {
      Self::Authors => Some("autor/actualizarautor"),
      Self::BookCopies => Some("ejemplar/actualizarejemplar"),
      Self::Books => Some("libro/actualizarlibro"),
      Self::Employees => Some("empleado/actualizarempleado"),
      Self::LibraryUsers => Some("usuario/actualizarusuario"),
      Self::Sales => Some("venta/verventa"),
      Self::MembershipPrices | Self::TaxRates => None,
    }
  }

  pub(crate) fn endpoint(self) -> &'static str {
    match self {
      Self::Authors => "autor",
      Self::BookCopies => "ejemplar",
      Self::Books => "libro",
      Self::Employees => "empleado",
      Self::LibraryUsers => "usuario",
      Self::MembershipPrices => "precio",
      Self::Sales => "venta",
      Self::TaxRates => "iva",
    }
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Self::Authors => "Autores",
      Self::BookCopies => "Ejemplares",
      Self::Books => "Libros",
      Self::Employees => "Empleados",
      Self::LibraryUsers => "Usuarios",
      Self::MembershipPrices => "Precios de Membresía",
      Self::Sales => "Ventas",
      Self::TaxRates => "IVAs",
    }
  }

  pub(crate) fn page_param(self) -> &'static str {
    match self {
      Self::Authors => "requestedAuthorsPage",
      Self::BookCopies => "requestedBookCopiesPage",
      Self::Books => "requestedBooksPage",
      Self::Employees => "requestedEmployeesPage",
      Self::LibraryUsers => "requestedLibraryUsersPage",
      Self::MembershipPrices => "requestedMembershipPricePage",
      Self::Sales => "requestedSalesPage",
      Self::TaxRates => "requestedTaxRatePage",
    }
  }

  pub(crate) fn response_key(self) -> &'static str {
    match self {
      Self::Authors => "requestedAuthors",
      Self::BookCopies => "requestedBookCopies",
      Self::Books => "requestedBooks",
      Self::Employees => "requestedEmployees",
      Self::LibraryUsers => "requestedLibraryUsers",
      Self::MembershipPrices => "requestedMembershipPrices",
      Self::Sales => "requestedSales",
      Self::TaxRates => "requestedTaxRates",
    }
  }

  pub(crate) fn search_param(self) -> &'static str {
    match self {
      Self::Authors => "requestedAuthorNameStartsWith",
      Self::BookCopies => "requestedBookCopyEditionNameStartsWith",
      Self::Books => "requestedBookNameStartsWith",
      Self::Employees => "requestedEmployeeNameStartsWith",
      Self::LibraryUsers => "requestedLibraryUserNameStartsWith",
      Self::MembershipPrices => "requestedMembershipPriceStartDateStartsWith",
      Self::Sales => "saleIdStartsWith",
      Self::TaxRates => "requestedTaxRateStartDateStartsWith",
    }
  }
}

fn end_date(value: &Value) -> String {
  let date = format_value(value);

  if date == OPEN_END_DATE {
    "Valor Vigente Actualmente".into()
  } else {
    date
  }
}

fn genre(value: &Value) -> String {
  let label = match value.as_str() {
    Some("FANTASY") => "Fantasía",
    Some("HISTORICAL") => "Histórico",
    Some("HORROR") => "Terror",
    Some("LITERARY") => "Literario",
    Some("PHILOSOPHICAL") => "Filosófico",
    Some("SCIENCE_FICTION") => "Ciencia Ficción",
    Some("THRILLER") => "Thriller",
    _ => return format_value(value),
  };

  label.into()
}

#[cfg(test)]
mod tests {
  use {super::*, serde_json::json, std::collections::HashSet};

  const ALL: [Resource; 8] = [
    Resource::Authors,
    Resource::BookCopies,
    Resource::Books,
    Resource::Employees,
    Resource::LibraryUsers,
    Resource::MembershipPrices,
    Resource::Sales,
    Resource::TaxRates,
  ];

  #[test]
  fn every_resource_shows_at_least_one_column() {
    for resource in ALL {
      assert!(!resource.columns().is_empty(), "{resource:?}");
    }
  }

  #[test]
  fn endpoints_are_distinct() {
    let endpoints = ALL
      .iter()
      .map(|resource| resource.endpoint())
      .collect::<HashSet<_>>();

    assert_eq!(endpoints.len(), ALL.len());
  }

  #[test]
  fn rate_and_price_history_is_read_only() {
    assert_eq!(Resource::TaxRates.edit_route(), None);
    assert_eq!(Resource::MembershipPrices.edit_route(), None);
    assert_eq!(Resource::Sales.edit_route(), Some("venta/verventa"));
  }

  #[test]
  fn books_show_their_author_through_a_nested_field() {
    let column = Resource::Books.columns()[0];

    assert_eq!(column.header, "Autor");
    assert_eq!(column.field, "author.name");
  }

  #[test]
  fn genres_are_shown_in_spanish() {
    assert_eq!(genre(&json!("SCIENCE_FICTION")), "Ciencia Ficción");
    assert_eq!(genre(&json!("HORROR")), "Terror");
    assert_eq!(genre(&json!("POETRY")), "POETRY");
    assert_eq!(genre(&Value::Null), "");
  }

  #[test]
  fn open_end_date_reads_as_current() {
    assert_eq!(
      end_date(&json!("9999-12-31T00:00:00.000Z")),
      "Valor Vigente Actualmente"
    );

    assert_eq!(end_date(&json!("2023-12-31T00:00:00.000Z")), "2023-12-31");
  }
}
