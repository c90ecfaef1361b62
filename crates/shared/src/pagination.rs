//! Offset pagination parameters for list endpoints.

use serde::Deserialize;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on page size, keeps a single request from dragging whole tables.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Query parameters for paginated list endpoints.
///
/// `page` is 1-based. Out-of-range values are clamped rather than rejected
/// so stale links keep working.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageParams {
    /// Clamped page size for the SQL `LIMIT` clause.
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the SQL `OFFSET` clause.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_for_later_pages() {
        let params = PageParams {
            page: 3,
            per_page: 20,
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_per_page_clamped_to_max() {
        let params = PageParams {
            page: 1,
            per_page: 10_000,
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_non_positive_values_clamped() {
        let params = PageParams {
            page: 0,
            per_page: -5,
        };
        assert_eq!(params.limit(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_deserialize_with_fields() {
        let params: PageParams = serde_json::from_str(r#"{"page": 2, "per_page": 10}"#).unwrap();
        assert_eq!(params.page, 2);
        assert_eq!(params.per_page, 10);
    }
}
