//! Pagination envelope.

use serde::Serialize;

/// One page of a listing, with enough bookkeeping for the client to
/// render pagination controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: i64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            (total as u64).div_ceil(u64::from(per_page)) as u32
        };
        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 1, 10, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages_exact_fit() {
        let page: Page<i32> = Page::new(vec![], 2, 10, 20);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_total_pages_empty() {
        let page: Page<i32> = Page::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages, 0);
    }
}
