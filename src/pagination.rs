use serde::Serialize;

/// Number of tours shown per list page.
pub const TOURS_PER_PAGE: usize = 9;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(TOURS_PER_PAGE)
}

/// Items of the 1-indexed `page`, clamped to what is available.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(TOURS_PER_PAGE).min(items.len());
    let end = page.saturating_mul(TOURS_PER_PAGE).min(items.len());
    &items[start..end]
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// The current page is clamped to `1..=total_pages`.
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, total: usize) -> Self {
        let current_page = current_page.clamp(1, total_pages.max(1));

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total,
        }
    }
}

impl<T: Clone> Paginated<T> {
    /// Cuts the requested page out of an already ordered sequence.
    ///
    /// Pages past the end show the last page.
    pub fn from_ordered(all: &[T], page: usize) -> Self {
        let total_pages = page_count(all.len());
        let page = page.clamp(1, total_pages.max(1));
        let items = page_slice(all, page).to_vec();
        Self::new(items, page, total_pages, all.len())
    }
}
