//! Sliding window of page links for the list view.
//!
//! The window is centered on the current page and kept full whenever there
//! are enough pages. Page 1 and the last page are always reachable; an
//! ellipsis marks a gap between them and the window.

use serde::Serialize;

/// Number of page links in the sliding window.
pub const WINDOW_SIZE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current: u32,
    pub total_pages: u32,
    /// First and last page of the centered window.
    pub start: u32,
    pub end: u32,
    pub items: Vec<PageItem>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

impl PageWindow {
    /// Computes the window with the default [`WINDOW_SIZE`].
    ///
    /// `total_pages` is treated as at least 1 and `current` is clamped into range.
    #[must_use]
    pub fn compute(current: u32, total_pages: u32) -> Self {
        Self::compute_with_size(current, total_pages, WINDOW_SIZE)
    }

    #[must_use]
    pub fn compute_with_size(current: u32, total_pages: u32, window_size: u32) -> Self {
        let total_pages = total_pages.max(1);
        let current = current.clamp(1, total_pages);
        let window_size = window_size.max(1);

        let mut start = current.saturating_sub(window_size / 2).max(1);
        let end = total_pages.min(start.saturating_add(window_size - 1));
        if end - start < window_size - 1 {
            start = end.saturating_sub(window_size - 1).max(1);
        }

        let mut items = Vec::new();
        if start > 1 {
            items.push(page_item(1, current));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend((start..=end).map(|n| page_item(n, current)));
        if end < total_pages {
            if end < total_pages - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(page_item(total_pages, current));
        }

        Self {
            current,
            total_pages,
            start,
            end,
            items,
            previous: (current > 1).then(|| current - 1),
            next: (current < total_pages).then(|| current + 1),
        }
    }

    /// Page numbers inside the centered window, ascending.
    #[must_use]
    pub fn window(&self) -> Vec<u32> {
        (self.start..=self.end).collect()
    }

    /// Whether navigation controls are worth rendering at all.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    #[must_use]
    pub fn has_leading_ellipsis(&self) -> bool {
        self.items.get(1) == Some(&PageItem::Ellipsis)
    }

    #[must_use]
    pub fn has_trailing_ellipsis(&self) -> bool {
        self.items.len() >= 2 && self.items[self.items.len() - 2] == PageItem::Ellipsis
    }
}

fn page_item(number: u32, current: u32) -> PageItem {
    PageItem::Page {
        number,
        current: number == current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(window: &PageWindow) -> Vec<u32> {
        window
            .items
            .iter()
            .filter_map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn first_of_ten_pages() {
        let w = PageWindow::compute(1, 10);
        assert_eq!(w.window(), vec![1, 2, 3, 4, 5]);
        assert!(!w.has_leading_ellipsis());
        assert!(w.has_trailing_ellipsis());
        assert_eq!(w.items.last(), Some(&page_item(10, 1)));
        assert_eq!(w.previous, None);
        assert_eq!(w.next, Some(2));
    }

    #[test]
    fn last_of_ten_pages() {
        let w = PageWindow::compute(10, 10);
        assert_eq!(w.window(), vec![6, 7, 8, 9, 10]);
        assert_eq!(w.items[0], page_item(1, 10));
        assert!(w.has_leading_ellipsis());
        assert!(!w.has_trailing_ellipsis());
        assert_eq!(w.next, None);
    }

    #[test]
    fn small_catalog_has_no_ellipses() {
        let w = PageWindow::compute(2, 3);
        assert_eq!(w.window(), vec![1, 2, 3]);
        assert_eq!(numbers(&w), vec![1, 2, 3]);
        assert!(!w.items.contains(&PageItem::Ellipsis));
    }

    #[test]
    fn middle_page_is_centered() {
        let w = PageWindow::compute(6, 12);
        assert_eq!(w.window(), vec![4, 5, 6, 7, 8]);
        assert_eq!(
            w.items,
            vec![
                page_item(1, 6),
                PageItem::Ellipsis,
                page_item(4, 6),
                page_item(5, 6),
                page_item(6, 6),
                page_item(7, 6),
                page_item(8, 6),
                PageItem::Ellipsis,
                page_item(12, 6),
            ]
        );
    }

    #[test]
    fn adjacent_first_page_gets_no_ellipsis() {
        // start == 2: page 1 is shown directly before the window
        let w = PageWindow::compute(4, 10);
        assert_eq!(w.window(), vec![2, 3, 4, 5, 6]);
        assert_eq!(w.items[0], page_item(1, 4));
        assert!(!w.has_leading_ellipsis());
        assert!(w.has_trailing_ellipsis());
    }

    #[test]
    fn adjacent_last_page_gets_no_ellipsis() {
        let w = PageWindow::compute(7, 10);
        assert_eq!(w.window(), vec![5, 6, 7, 8, 9]);
        assert!(!w.has_trailing_ellipsis());
        assert_eq!(w.items.last(), Some(&page_item(10, 7)));
    }

    #[test]
    fn output_is_ascending_without_duplicates() {
        for total in 1..=15 {
            for current in 1..=total {
                let nums = numbers(&PageWindow::compute(current, total));
                assert!(
                    nums.windows(2).all(|pair| pair[0] < pair[1]),
                    "current={current} total={total} nums={nums:?}"
                );
                assert!(nums.contains(&current));
            }
        }
    }

    #[test]
    fn single_page_is_not_paginated() {
        let w = PageWindow::compute(1, 1);
        assert_eq!(w.window(), vec![1]);
        assert!(!w.is_paginated());
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let w = PageWindow::compute(0, 0);
        assert_eq!(w.current, 1);
        assert_eq!(w.total_pages, 1);
        let w = PageWindow::compute(50, 4);
        assert_eq!(w.current, 4);
        assert_eq!(w.window(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn identical_inputs_give_identical_windows() {
        assert_eq!(PageWindow::compute(3, 9), PageWindow::compute(3, 9));
    }
}
