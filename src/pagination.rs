//! This modules defines the common functionality for paging data.

use maud::{Markup, html};

/// The config for pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationConfig {
    /// The number of rows to display per page.
    pub page_size: u64,
    /// The maximum number of numbered pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_pages: 7,
        }
    }
}

/// The number of pages needed to show `item_count` items, `page_size` at a time.
pub fn page_count(item_count: usize, page_size: u64) -> u64 {
    (item_count as u64).div_ceil(page_size.max(1))
}

/// Clamp `page` into `[1, max(page_count, 1)]`.
pub fn clamp_page(page: u64, page_count: u64) -> u64 {
    page.clamp(1, page_count.max(1))
}

/// One element of the pager.
///
/// The navigation buttons hold the page they link to, or `None` when they
/// are disabled.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    FirstButton(Option<u64>),
    BackButton(Option<u64>),
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(Option<u64>),
    LastButton(Option<u64>),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let half_window = max_pages / 2;

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= half_window {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - half_window) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - half_window)..=(curr_page + half_window))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > half_window + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - half_window) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    let has_previous = curr_page > 1;
    let has_next = curr_page < page_count;

    indicators.insert(
        0,
        PaginationIndicator::BackButton(has_previous.then(|| curr_page - 1)),
    );
    indicators.insert(0, PaginationIndicator::FirstButton(has_previous.then_some(1)));
    indicators.push(PaginationIndicator::NextButton(
        has_next.then(|| curr_page + 1),
    ));
    indicators.push(PaginationIndicator::LastButton(has_next.then_some(page_count)));

    indicators
}

const PAGE_LINK_STYLE: &str = "block px-3 py-2 leading-tight text-gray-500 bg-white \
    border border-gray-300 hover:bg-gray-100 hover:text-gray-700 \
    dark:bg-gray-800 dark:border-gray-700 dark:text-gray-400 \
    dark:hover:bg-gray-700 dark:hover:text-white";
const CURRENT_PAGE_STYLE: &str = "block px-3 py-2 leading-tight text-blue-600 \
    border border-blue-300 bg-blue-50 dark:border-gray-700 dark:bg-gray-700 \
    dark:text-white";
const DISABLED_PAGE_STYLE: &str = "block px-3 py-2 leading-tight text-gray-300 \
    bg-white border border-gray-300 cursor-not-allowed dark:bg-gray-800 \
    dark:border-gray-700 dark:text-gray-600";

/// Render the pager, `page_url` maps a page number to the URL that shows it.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
) -> Markup {
    let nav_button = |label: &str, target: &Option<u64>| match target {
        Some(page) => html! {
            a href=(page_url(*page)) role="button" class=(PAGE_LINK_STYLE) { (label) }
        },
        None => html! {
            span aria-disabled="true" class=(DISABLED_PAGE_STYLE) { (label) }
        },
    };

    html! {
        nav class="pagination flex justify-center mt-4" aria-label="Pagination"
        {
            ul class="pagination inline-flex -space-x-px text-sm"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::FirstButton(target) => { (nav_button("First", target)) }
                            PaginationIndicator::BackButton(target) => { (nav_button("Back", target)) }
                            PaginationIndicator::NextButton(target) => { (nav_button("Next", target)) }
                            PaginationIndicator::LastButton(target) => { (nav_button("Last", target)) }
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page)) class=(PAGE_LINK_STYLE) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                p aria-current="page" class=(CURRENT_PAGE_STYLE) { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class=(PAGE_LINK_STYLE) { "..." }
                            }
                        }
                    }
                }
            }
        }
    }
}
