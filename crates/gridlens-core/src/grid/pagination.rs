//! Pager arithmetic.
//!
//! Pure functions over page numbers; the grid feeds them its browsing state.

/// Number of page buttons shown around the current page.
pub const PAGE_WINDOW: u32 = 5;

/// Clamp a requested page into `1..=total_pages`. With no pages, page 1.
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1))
}

/// Up to `width` consecutive page numbers around `current`.
///
/// Near the start the window is anchored at page 1, near the end at the last
/// page, otherwise `current` sits in the middle.
pub fn page_window(current: u32, total_pages: u32, width: u32) -> Vec<u32> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }
    let width = width.min(total_pages);
    let current = clamp_page(current, total_pages);
    let half = width / 2;

    let start = if current <= half {
        1
    } else if current + half > total_pages {
        total_pages - width + 1
    } else {
        current - half
    };
    (start..start + width).collect()
}

/// 1-based first and last row shown on `page`, for "Showing X to Y of Z".
///
/// `(0, 0)` when there are no rows.
pub fn row_range(page: u32, page_size: u32, total_rows: u64) -> (u64, u64) {
    if total_rows == 0 {
        return (0, 0);
    }
    let size = u64::from(page_size.max(1));
    let first = u64::from(page.max(1) - 1) * size + 1;
    let last = (first + size - 1).min(total_rows);
    (first.min(total_rows), last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(4, 3), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 0), 1);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 3, PAGE_WINDOW), vec![1, 2, 3]);
        assert_eq!(page_window(1, 10, PAGE_WINDOW), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10, PAGE_WINDOW), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(10, 10, PAGE_WINDOW), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(9, 10, PAGE_WINDOW), vec![6, 7, 8, 9, 10]);
        assert!(page_window(1, 0, PAGE_WINDOW).is_empty());
    }

    #[test]
    fn test_row_range() {
        assert_eq!(row_range(1, 50, 120), (1, 50));
        assert_eq!(row_range(3, 50, 120), (101, 120));
        assert_eq!(row_range(1, 50, 0), (0, 0));
        assert_eq!(row_range(1, 50, 7), (1, 7));
    }
}
