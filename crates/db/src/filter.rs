//! Keyword + pagination filter shared by every `list`/`search` repository
//! method.

use residence_core::search::{keyword_pattern, MAX_SEARCH_RESULTS};

/// Filter passed to repository list queries.
///
/// `pattern` is an already-escaped `ILIKE` pattern (see
/// [`residence_core::search::like_pattern`]); `None` disables the filter.
/// Every list query binds it as `$1` and the paging values as `$2`/`$3`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub pattern: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter {
    /// Filter for a paginated list request. `limit` and `offset` must already
    /// be clamped by the caller.
    pub fn page(keyword: Option<&str>, limit: i64, offset: i64) -> Self {
        Self {
            pattern: keyword_pattern(keyword),
            limit,
            offset,
        }
    }

    /// Filter for a `/search` request: every match up to the search cap.
    pub fn search(keyword: Option<&str>) -> Self {
        Self::page(keyword, MAX_SEARCH_RESULTS, 0)
    }

    /// Bindable pattern for `$1`.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}
