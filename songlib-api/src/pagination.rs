//! Pagination for the song list
//!
//! Pages are 1-indexed. Missing, unparsable or non-positive `page` and
//! `limit` values each fall back to their own configured default.

use songlib_common::config::QueryDefaults;

/// A validated LIMIT/OFFSET window
///
/// `page` and `limit` are always at least 1, so the offset is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: i64,
    limit: i64,
}

impl Page {
    /// Returns `None` unless both values are at least 1
    pub fn new(page: i64, limit: i64) -> Option<Self> {
        (page >= 1 && limit >= 1).then_some(Self { page, limit })
    }

    /// Resolve raw query values against the configured defaults
    ///
    /// # Examples
    /// ```
    /// use songlib_api::pagination::Page;
    /// use songlib_common::config::QueryDefaults;
    ///
    /// let defaults = QueryDefaults { limit: 5, page: 1, verse: 1 };
    ///
    /// let p = Page::resolve(Some("3"), Some("10"), &defaults);
    /// assert_eq!(p.offset(), 20);
    ///
    /// // Invalid values fall back independently
    /// let p = Page::resolve(Some("zero"), Some("-4"), &defaults);
    /// assert_eq!(p.page(), 1);
    /// assert_eq!(p.limit(), 5);
    /// ```
    pub fn resolve(raw_page: Option<&str>, raw_limit: Option<&str>, defaults: &QueryDefaults) -> Self {
        let page = parse_positive(raw_page).unwrap_or(defaults.page).max(1);
        let limit = parse_positive(raw_limit).unwrap_or(defaults.limit).max(1);
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows skipped before this page: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Parse a strictly positive integer query value
pub fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Distinct values so a page/limit mix-up shows up
    const DEFAULTS: QueryDefaults = QueryDefaults {
        limit: 7,
        page: 2,
        verse: 1,
    };

    #[test]
    fn test_pagination_normal() {
        let p = Page::resolve(Some("2"), Some("10"), &DEFAULTS);
        assert_eq!(p.page(), 2);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_first_page() {
        let p = Page::resolve(Some("1"), Some("5"), &DEFAULTS);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_missing_values_use_matching_defaults() {
        let p = Page::resolve(None, None, &DEFAULTS);
        assert_eq!(p.page(), DEFAULTS.page);
        assert_eq!(p.limit(), DEFAULTS.limit);
        assert_eq!(p.offset(), 7);
    }

    #[test]
    fn test_invalid_page_uses_page_default_only() {
        let p = Page::resolve(Some("abc"), Some("3"), &DEFAULTS);
        assert_eq!(p.page(), 2);
        assert_eq!(p.limit(), 3);
    }

    #[test]
    fn test_invalid_limit_uses_limit_default_only() {
        let p = Page::resolve(Some("4"), Some("0"), &DEFAULTS);
        assert_eq!(p.page(), 4);
        assert_eq!(p.limit(), 7);
    }

    #[test]
    fn test_negative_values_rejected() {
        let p = Page::resolve(Some("-1"), Some("-10"), &DEFAULTS);
        assert_eq!(p.page(), 2);
        assert_eq!(p.limit(), 7);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let p = Page::resolve(Some(i64::MAX.to_string().as_str()), Some("1000"), &DEFAULTS);
        assert_eq!(p.offset(), i64::MAX);
    }

    #[test]
    fn test_new_requires_positive() {
        assert!(Page::new(0, 10).is_none());
        assert!(Page::new(1, 0).is_none());
        assert_eq!(Page::new(3, 4).unwrap().offset(), 8);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive(Some(" 12 ")), Some(12));
        assert_eq!(parse_positive(Some("1.5")), None);
        assert_eq!(parse_positive(Some("")), None);
        assert_eq!(parse_positive(None), None);
    }
}
