//! Page/limit pagination used by the cocktail listing.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 12;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Returns `None` when either value is below 1.
    pub fn new(page: i64, limit: i64) -> Option<Self> {
        (page >= 1 && limit >= 1).then_some(Self { page, limit })
    }

    /// Rows skipped before this page: `(page - 1) * limit`, saturating.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_twelve() {
        let p = Pagination::default();
        assert_eq!((p.page, p.limit, p.offset()), (1, 12, 0));
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Pagination::new(3, 12).unwrap().offset(), 24);
        assert_eq!(Pagination::new(2, 5).unwrap().offset(), 5);
    }

    #[test]
    fn rejects_values_below_one() {
        assert_eq!(Pagination::new(0, 12), None);
        assert_eq!(Pagination::new(1, 0), None);
        assert_eq!(Pagination::new(-4, -1), None);
    }

    #[test]
    fn huge_pages_saturate_instead_of_overflowing() {
        assert_eq!(Pagination::new(i64::MAX, i64::MAX).unwrap().offset(), i64::MAX);
    }
}
