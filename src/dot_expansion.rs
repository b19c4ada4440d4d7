use super::*;

/// Lists the pages hidden behind the truncation marker at `index`.
///
/// A marker preceded by the first page is the left marker and covers the
/// pages up to its right neighbour. Otherwise the marker must be followed by
/// the last page and covers the pages after its left neighbour.
pub(crate) fn expand_dots(
  buttons: &[PageButton],
  index: usize,
  max: usize,
) -> Result<Vec<usize>, Error> {
  if buttons.get(index) != Some(&PageButton::Dots) {
    return Err(Error::invalid_state(format!(
      "button {index} is not a truncation marker"
    )));
  }

  let neighbour = |position: Option<usize>| {
    position
      .and_then(|position| buttons.get(position))
      .and_then(|button| button.page())
  };

  let (Some(left), Some(right)) =
    (neighbour(index.checked_sub(1)), neighbour(index.checked_add(1)))
  else {
    return Err(Error::invalid_state(format!(
      "truncation marker {index} is not surrounded by page numbers"
    )));
  };

  if left == PaginationBounds::MIN {
    return Ok((left + 1..right).collect());
  }

  if right == max {
    return Ok((left + 1..max).collect());
  }

  Err(Error::invalid_state(format!(
    "truncation marker {index} sits between pages {left} and {right}"
  )))
}
