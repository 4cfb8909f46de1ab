//! Shared query parameter types for API handlers.

use serde::Deserialize;
use timeclock_db::models::stamp::SortOrder;

/// Query parameters for the stamp feed (`?limit=&offset=&sort=`).
///
/// Unset fields fall back to a 20-row first page, newest first. Values are
/// clamped rather than rejected.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<SortOrder>,
}

impl FeedParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn sort(&self) -> SortOrder {
        self.sort.unwrap_or(SortOrder::Desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let params = FeedParams {
            limit: None,
            offset: None,
            sort: None,
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.sort(), SortOrder::Desc);

        let params = FeedParams {
            limit: Some(10_000),
            offset: Some(-5),
            sort: Some(SortOrder::Asc),
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.sort(), SortOrder::Asc);
    }
}
