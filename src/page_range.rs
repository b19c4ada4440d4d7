use super::*;

/// Computes the page buttons shown for `current_page`.
///
/// Pages within `page_size` of the current page on one side are listed one
/// by one. A longer run collapses into a single [`PageButton::Dots`]. When
/// both sides collapse, the immediate neighbours of the current page are
/// listed between the two markers.
pub(crate) fn page_buttons(
  current_page: usize,
  bounds: PaginationBounds,
  page_size: PageSize,
) -> Vec<PageButton> {
  let (min, max, window) = (PaginationBounds::MIN, bounds.max, page_size.get());

  if max == 0 {
    return Vec::new();
  }

  let current = bounds.clamp(current_page);

  let add_left_dots = current - min >= window;
  let add_right_dots = max - current >= window;

  if !add_left_dots && !add_right_dots {
    return (min..=max).map(PageButton::Page).collect();
  }

  let mut buttons = Vec::new();

  if current != min {
    buttons.push(PageButton::Page(min));
  }

  if add_left_dots {
    buttons.push(PageButton::Dots);
  } else {
    buttons.extend((min + 1..current).map(PageButton::Page));
    buttons.extend((current..min + window).map(PageButton::Page));
  }

  if add_left_dots && add_right_dots {
    buttons.extend([
      PageButton::Page(current - 1),
      PageButton::Page(current),
      PageButton::Page(current + 1),
    ]);
  }

  if add_right_dots {
    buttons.push(PageButton::Dots);
  } else {
    buttons.extend((max - window + 1..=current).map(PageButton::Page));
    buttons.extend((current + 1..max).map(PageButton::Page));
  }

  if current != max {
    buttons.push(PageButton::Page(max));
  }

  buttons
}

#[cfg(test)]
mod tests {
  use {super::*, PageButton::*};

  fn buttons(
    current_page: usize,
    max: usize,
    page_size: usize,
  ) -> Vec<PageButton> {
    page_buttons(
      current_page,
      PaginationBounds { max },
      PageSize::new(page_size).expect("valid page size"),
    )
  }

  fn pages(range: std::ops::RangeInclusive<usize>) -> Vec<PageButton> {
    range.map(Page).collect()
  }

  #[test]
  fn small_collections_list_every_page() {
    assert_eq!(buttons(2, 3, 10), vec![Page(1), Page(2), Page(3)]);
    assert_eq!(buttons(1, 3, 10), vec![Page(1), Page(2), Page(3)]);
    assert_eq!(buttons(3, 3, 10), vec![Page(1), Page(2), Page(3)]);
  }

  #[test]
  fn single_page_is_a_single_button() {
    assert_eq!(buttons(1, 1, 10), vec![Page(1)]);
  }

  #[test]
  fn empty_collection_has_no_buttons() {
    assert!(buttons(1, 0, 10).is_empty());
  }

  #[test]
  fn middle_page_collapses_both_sides() {
    assert_eq!(
      buttons(25, 50, 10),
      vec![Page(1), Dots, Page(24), Page(25), Page(26), Dots, Page(50)]
    );
  }

  #[test]
  fn first_page_omits_leading_min() {
    let mut expected = pages(1..=10);
    expected.extend([Dots, Page(50)]);

    assert_eq!(buttons(1, 50, 10), expected);
  }

  #[test]
  fn last_page_omits_trailing_max() {
    let mut expected = vec![Page(1), Dots];
    expected.extend(pages(41..=50));

    assert_eq!(buttons(50, 50, 10), expected);
  }

  #[test]
  fn near_the_end_lists_the_tail() {
    let mut expected = vec![Page(1), Dots];
    expected.extend(pages(41..=50));

    assert_eq!(buttons(45, 50, 10), expected);
  }

  #[test]
  fn near_the_start_lists_the_head() {
    let mut expected = pages(1..=10);
    expected.extend([Dots, Page(50)]);

    assert_eq!(buttons(10, 50, 10), expected);
    assert_eq!(buttons(4, 50, 10), expected);
  }

  #[test]
  fn window_threshold_is_inclusive() {
    assert_eq!(
      buttons(11, 50, 10),
      vec![Page(1), Dots, Page(10), Page(11), Page(12), Dots, Page(50)]
    );
  }

  #[test]
  fn right_marker_may_cover_no_pages() {
    let mut expected = pages(1..=10);
    expected.extend([Dots, Page(11)]);

    assert_eq!(buttons(1, 11, 10), expected);
  }

  #[test]
  fn same_input_gives_same_output() {
    assert_eq!(buttons(17, 80, 10), buttons(17, 80, 10));
  }

  #[test]
  fn out_of_range_page_is_clamped() {
    assert_eq!(buttons(9, 3, 10), vec![Page(1), Page(2), Page(3)]);
  }

  #[test]
  fn expanded_buttons_cover_every_page_exactly_once() {
    for page_size in [2, 3, 5, 10] {
      for max in 1..=60 {
        let bounds = PaginationBounds { max };
        let size = PageSize::new(page_size).expect("valid page size");

        for current in 1..=max {
          let buttons = page_buttons(current, bounds, size);

          let mut seen = Vec::new();

          for (index, button) in buttons.iter().enumerate() {
            match button {
              Page(page) => seen.push(*page),
              Dots => seen.extend(
                expand_dots(&buttons, index, max).expect("valid marker"),
              ),
            }
          }

          assert_eq!(
            seen,
            (1..=max).collect::<Vec<_>>(),
            "page_size={page_size} max={max} current={current}"
          );
        }
      }
    }
  }
}
