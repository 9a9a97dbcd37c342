//! Pagination and keyword-filter helpers shared by every list endpoint.
//!
//! Keyword filters are plain case-insensitive substring matches executed
//! with PostgreSQL `ILIKE`; [`like_pattern`] turns raw user input into a
//! pattern whose wildcard characters match literally.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum page size for list endpoints.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Upper bound on rows returned by a `/search` endpoint.
pub const MAX_SEARCH_RESULTS: i64 = 500;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a 1-based page number; anything below 1 becomes page 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for a 1-based `page` of `limit` rows.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit)
}

// ---------------------------------------------------------------------------
// Keyword filters
// ---------------------------------------------------------------------------

/// Normalize an optional keyword: trims whitespace and maps blank input to
/// `None` so the filter is skipped entirely.
pub fn normalize_keyword(keyword: Option<&str>) -> Option<&str> {
    keyword.map(str::trim).filter(|k| !k.is_empty())
}

/// Build an `ILIKE` substring pattern from raw user input.
///
/// `\`, `%` and `_` are escaped with a backslash (PostgreSQL's default
/// `LIKE` escape character) so they match literally.
///
/// # Examples
///
/// ```
/// use residence_core::search::like_pattern;
/// assert_eq!(like_pattern("acme"), "%acme%");
/// assert_eq!(like_pattern("50%"), "%50\\%%");
/// ```
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Convenience: normalize then build the pattern, `None` when no filter applies.
pub fn keyword_pattern(keyword: Option<&str>) -> Option<String> {
    normalize_keyword(keyword).map(like_pattern)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamp_limit ---------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(200), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
    }

    // -- pages ---------------------------------------------------------------

    #[test]
    fn page_offset_is_zero_for_first_page() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(clamp_page(Some(0)), 20), 0);
    }

    #[test]
    fn page_offset_skips_previous_pages() {
        assert_eq!(page_offset(3, 25), 50);
    }

    // -- keywords ------------------------------------------------------------

    #[test]
    fn blank_keyword_disables_filter() {
        assert_eq!(keyword_pattern(None), None);
        assert_eq!(keyword_pattern(Some("   ")), None);
    }

    #[test]
    fn keyword_is_trimmed_and_wrapped() {
        assert_eq!(keyword_pattern(Some("  main st ")), Some("%main st%".to_string()));
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("c:\\dir"), "%c:\\\\dir%");
    }
}
