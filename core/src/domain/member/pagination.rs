use super::value_objects::PageRequest;

/// Infers the total element count from the size of a fetched page, when
/// the page boundary itself proves it.
///
/// Returns `Some(total)` when the fetched slice came back short of the
/// requested size: the result set ends inside this page, so the total is
/// `number * size + fetched` (which reduces to `fetched` on page zero).
/// Returns `None` when the page came back full: the total is
/// undecidable locally and a dedicated count query is required.
///
/// A join that can multiply primary-entity rows breaks the premise that
/// fetched row count reflects distinct members, so inference is refused
/// outright for such query shapes.
pub fn resolved_total(
    page: &PageRequest,
    fetched: usize,
    join_multiplies_rows: bool,
) -> Option<u64> {
    if join_multiplies_rows {
        return None;
    }

    let fetched = fetched as u64;
    if fetched < page.size {
        Some(page.offset() + fetched)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_short_of_size_is_the_whole_result() {
        let page = PageRequest::new(0, 10);
        assert_eq!(resolved_total(&page, 3, false), Some(3));
    }

    #[test]
    fn later_page_short_of_size_is_the_last_page() {
        // 4 rows paged by 3: page 1 holds one row, total = 1 * 3 + 1.
        let page = PageRequest::new(1, 3);
        assert_eq!(resolved_total(&page, 1, false), Some(4));
    }

    #[test]
    fn full_page_is_undecidable() {
        let page = PageRequest::new(0, 2);
        assert_eq!(resolved_total(&page, 2, false), None);

        let page = PageRequest::new(5, 20);
        assert_eq!(resolved_total(&page, 20, false), None);
    }

    #[test]
    fn empty_later_page_resolves_to_preceding_pages() {
        let page = PageRequest::new(2, 10);
        assert_eq!(resolved_total(&page, 0, false), Some(20));
    }

    #[test]
    fn row_multiplying_join_never_resolves() {
        let page = PageRequest::new(0, 10);
        assert_eq!(resolved_total(&page, 3, true), None);
        assert_eq!(resolved_total(&page, 0, true), None);
    }
}
