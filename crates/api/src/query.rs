//! Shared query parameter types for list and search endpoints.

use residence_core::search::{
    clamp_limit, clamp_page, page_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use residence_db::filter::ListFilter;
use serde::Deserialize;

/// `?page=&limit=&keyword=` for paginated list endpoints.
///
/// `page` is 1-based; both values are clamped rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub keyword: Option<String>,
}

impl ListParams {
    /// Resolve to `(page, limit, filter)`.
    pub fn resolve(&self) -> (i64, i64, ListFilter) {
        let page = clamp_page(self.page);
        let limit = clamp_limit(self.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let filter = ListFilter::page(self.keyword.as_deref(), limit, page_offset(page, limit));
        (page, limit, filter)
    }
}

/// `?keyword=` for `/search` endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

impl SearchParams {
    pub fn filter(&self) -> ListFilter {
        ListFilter::search(self.keyword.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let (page, limit, filter) = ListParams::default().resolve();
        assert_eq!(page, 1);
        assert_eq!(limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.pattern(), None);
    }

    #[test]
    fn later_pages_skip_rows() {
        let params = ListParams {
            page: Some(3),
            limit: Some(10),
            keyword: Some("pump".into()),
        };
        let (page, limit, filter) = params.resolve();
        assert_eq!((page, limit), (3, 10));
        assert_eq!(filter.offset, 20);
        assert_eq!(filter.pattern(), Some("%pump%"));
    }

    #[test]
    fn oversized_limit_is_clamped() {
        let params = ListParams {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(params.resolve().1, MAX_PAGE_LIMIT);
    }
}
