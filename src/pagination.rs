//! This module defines the common functionality for paging lists of items.

use serde::{Deserialize, Serialize};

use crate::Error;

/// The number of items shown per page. Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Create a page size.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidPageSize] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size == 0 {
            Err(Error::InvalidPageSize)
        } else {
            Ok(Self(size))
        }
    }

    /// Create a page size without validation.
    ///
    /// The caller should ensure that `size` is not zero.
    pub(crate) const fn new_unchecked(size: usize) -> Self {
        Self(size)
    }

    /// The number of items per page.
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        PageSize::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// The visible slice of a paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// The current page, starting at 1.
    pub page: usize,
    /// The number of pages, at least 1 even for an empty list.
    pub total_pages: usize,
    /// The index of the first visible item.
    pub start_index: usize,
    /// One past the index of the last visible item.
    pub end_index: usize,
}

impl PageWindow {
    /// The items of `items` that fall on this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.start_index..self.end_index).unwrap_or(&[])
    }
}

/// Computes the window for `requested_page` of a list of `item_count` items.
///
/// Out of range requests, including zero, negative and very large pages, are
/// clamped to the nearest valid page.
pub fn paginate(item_count: usize, page_size: PageSize, requested_page: i64) -> PageWindow {
    let page_size = page_size.get();
    let total_pages = item_count.div_ceil(page_size).max(1);
    let page = clamp_page(requested_page, total_pages);
    let start_index = (page - 1) * page_size;
    let end_index = (start_index + page_size).min(item_count);

    PageWindow {
        page,
        total_pages,
        start_index,
        end_index,
    }
}

fn clamp_page(requested_page: i64, total_pages: usize) -> usize {
    if requested_page < 1 {
        1
    } else {
        usize::try_from(requested_page).map_or(total_pages, |page| page.min(total_pages))
    }
}

/// The current page and page size of one paged list.
///
/// The only transitions are [PageState::set_page] and
/// [PageState::set_page_size]. [PageState::clamp_to] keeps the page in range
/// after the number of items changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageState {
    current_page: usize,
    page_size: PageSize,
}

impl PageState {
    /// Start on the first page.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    /// The current page, starting at 1.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The number of items per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Go to `requested_page`, clamped to the pages available for `item_count` items.
    pub fn set_page(&mut self, requested_page: i64, item_count: usize) {
        self.current_page = paginate(item_count, self.page_size, requested_page).page;
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Pull the current page back into range for a list of `item_count` items.
    pub fn clamp_to(&mut self, item_count: usize) {
        let requested_page = i64::try_from(self.current_page).unwrap_or(i64::MAX);
        self.set_page(requested_page, item_count);
    }

    /// The window of the current page over `item_count` items.
    pub fn window(&self, item_count: usize) -> PageWindow {
        let requested_page = i64::try_from(self.current_page).unwrap_or(i64::MAX);
        paginate(item_count, self.page_size, requested_page)
    }
}

/// One element of the row of page buttons under a paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "camelCase")]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(usize),
    /// The page being shown.
    CurrPage(usize),
    /// A gap standing in for skipped pages.
    Ellipsis,
    /// A link to the following page.
    NextButton(usize),
    /// A link to the preceding page.
    BackButton(usize),
}

/// Builds the page buttons for `curr_page` of `page_count` pages.
///
/// The first and last pages are always shown, along with the pages either
/// side of the current one. Pages two away from the current page become an
/// ellipsis and anything further out is omitted.
pub fn create_pagination_indicators(
    curr_page: usize,
    page_count: usize,
) -> Vec<PaginationIndicator> {
    let mut indicators = Vec::new();

    if curr_page > 1 {
        indicators.push(PaginationIndicator::BackButton(curr_page - 1));
    }

    for page in 1..=page_count {
        let is_neighbour = page + 1 >= curr_page && page <= curr_page + 1;

        if page == curr_page {
            indicators.push(PaginationIndicator::CurrPage(page));
        } else if page == 1 || page == page_count || is_neighbour {
            indicators.push(PaginationIndicator::Page(page));
        } else if page + 2 == curr_page || page == curr_page + 2 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        pagination::{
            PageSize, PageState, PageWindow, PaginationIndicator, create_pagination_indicators,
            paginate,
        },
    };

    fn page_size(size: usize) -> PageSize {
        PageSize::new(size).unwrap()
    }

    #[test]
    fn rejects_zero_page_size() {
        assert_eq!(PageSize::new(0), Err(Error::InvalidPageSize));
        assert_eq!(PageSize::new(12).map(PageSize::get), Ok(12));
    }

    #[test]
    fn pages_twenty_five_items_by_twelve() {
        let items: Vec<usize> = (0..25).collect();

        let first = paginate(items.len(), page_size(12), 1);
        let last = paginate(items.len(), page_size(12), 3);

        assert_eq!(first.total_pages, 3);
        assert_eq!(first.slice(&items), &items[0..12]);
        assert_eq!(last.slice(&items), &[24]);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let items: Vec<u8> = Vec::new();

        let want = PageWindow {
            page: 1,
            total_pages: 1,
            start_index: 0,
            end_index: 0,
        };

        let got = paginate(0, page_size(12), 1);

        assert_eq!(want, got);
        assert!(got.slice(&items).is_empty());
    }

    #[test]
    fn last_page_window() {
        let want = PageWindow {
            page: 3,
            total_pages: 3,
            start_index: 24,
            end_index: 25,
        };

        let got = paginate(25, page_size(12), 3);

        assert_eq!(want, got);
    }

    #[test]
    fn paginating_twice_gives_identical_windows() {
        for requested_page in [-3, 0, 1, 2, 3, 40] {
            let want = paginate(25, page_size(12), requested_page);
            let got = paginate(25, page_size(12), requested_page);

            assert_eq!(want, got);
        }
    }

    #[test]
    fn clamps_out_of_range_pages() {
        assert_eq!(paginate(25, page_size(12), 0).page, 1);
        assert_eq!(paginate(25, page_size(12), -7).page, 1);
        assert_eq!(paginate(25, page_size(12), 4).page, 3);
        assert_eq!(paginate(25, page_size(12), i64::MAX).page, 3);
        assert_eq!(paginate(25, page_size(12), i64::MIN).page, 1);
    }

    #[test]
    fn page_is_always_in_range() {
        for item_count in [0, 1, 11, 12, 13, 24, 25, 100] {
            for size in [1, 3, 12, 25] {
                for requested_page in [i64::MIN, -1, 0, 1, 2, 5, 50, i64::MAX] {
                    let got = paginate(item_count, page_size(size), requested_page);

                    assert!(got.page >= 1 && got.page <= got.total_pages, "{got:?}");
                    assert!(got.start_index <= got.end_index, "{got:?}");
                    assert!(got.end_index <= item_count, "{got:?}");
                }
            }
        }
    }

    #[test]
    fn set_page_clamps_and_replaces() {
        let mut state = PageState::new(page_size(12));

        state.set_page(3, 25);
        assert_eq!(state.current_page(), 3);

        state.set_page(10, 25);
        assert_eq!(state.current_page(), 3);

        state.set_page(-2, 25);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn set_page_size_resets_to_first_page() {
        let mut state = PageState::new(page_size(8));
        state.set_page(3, 25);

        state.set_page_size(page_size(24));

        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), page_size(24));
    }

    #[test]
    fn clamp_to_follows_shrinking_list() {
        let mut state = PageState::new(page_size(12));
        state.set_page(3, 25);

        state.clamp_to(13);
        assert_eq!(state.current_page(), 2);

        state.clamp_to(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn deserializes_page_size_with_validation() {
        assert_eq!(serde_json::from_str::<PageSize>("25").unwrap(), page_size(25));
        assert!(serde_json::from_str::<PageSize>("0").is_err());
    }

    #[test]
    fn shows_all_pages() {
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(1, 3);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn single_page_has_no_buttons() {
        let want = [PaginationIndicator::CurrPage(1)];

        let got = create_pagination_indicators(1, 1);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_trailing_ellipsis_on_first_page() {
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(1, 10);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_leading_ellipsis_on_last_page() {
        let want = [
            PaginationIndicator::BackButton(9),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(9),
            PaginationIndicator::CurrPage(10),
        ];

        let got = create_pagination_indicators(10, 10);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_both_ellipses_in_center() {
        let want = [
            PaginationIndicator::BackButton(4),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(4),
            PaginationIndicator::CurrPage(5),
            PaginationIndicator::Page(6),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(6),
        ];

        let got = create_pagination_indicators(5, 10);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn first_page_absorbs_ellipsis_position() {
        let want = [
            PaginationIndicator::BackButton(2),
            PaginationIndicator::Page(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::CurrPage(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(4),
        ];

        let got = create_pagination_indicators(3, 10);

        assert_eq!(want, got.as_slice());
    }
}
