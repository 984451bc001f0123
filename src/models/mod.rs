use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note ID
    pub id: String,
    /// Owner of the note
    pub user_id: String,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title and content written by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteData {
    pub title: String,
    pub content: String,
}

/// Skip/take window handed to the persistence service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub take: i64,
}

/// One page of results as reported by the persistence service.
///
/// `page` is optional: a backend that cannot tell which page it returned
/// leaves it empty, and the response then reports neither a next nor a
/// previous page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub page: Option<i64>,
    pub total_pages: i64,
    pub total: i64,
    pub limit: i64,
}

impl<T> PaginatedResult<T> {
    /// Builds a page from a skip/take window and the total row count.
    pub fn from_window(data: Vec<T>, window: Pagination, total: i64) -> Self {
        let take = window.take.max(1);

        Self {
            data,
            page: Some(window.skip / take + 1),
            total_pages: total / take + i64::from(total % take != 0),
            total,
            limit: take,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.is_some_and(|page| page < self.total_pages)
    }

    pub fn has_prev(&self) -> bool {
        self.page.is_some_and(|page| page > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: Option<i64>, total_pages: i64) -> PaginatedResult<()> {
        PaginatedResult {
            data: Vec::new(),
            page,
            total_pages,
            total: 0,
            limit: 10,
        }
    }

    #[test]
    fn window_math_rounds_total_pages_up() {
        let result =
            PaginatedResult::from_window(vec![1, 2, 3, 4, 5], Pagination { skip: 5, take: 5 }, 12);

        assert_eq!(result.page, Some(2));
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.limit, 5);
        assert!(result.has_next());
        assert!(result.has_prev());
    }

    #[test]
    fn huge_limit_yields_single_page() {
        let result = PaginatedResult::from_window(
            vec![(); 12],
            Pagination {
                skip: 0,
                take: i64::MAX,
            },
            12,
        );

        assert_eq!(result.page, Some(1));
        assert_eq!(result.total_pages, 1);
        assert!(!result.has_next());
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let result =
            PaginatedResult::<()>::from_window(Vec::new(), Pagination { skip: 0, take: 10 }, 0);

        assert_eq!(result.page, Some(1));
        assert_eq!(result.total_pages, 0);
        assert!(!result.has_next());
        assert!(!result.has_prev());
    }

    #[test]
    fn navigation_flags_follow_page_position() {
        assert!(page(Some(1), 3).has_next());
        assert!(!page(Some(1), 3).has_prev());
        assert!(!page(Some(3), 3).has_next());
        assert!(page(Some(3), 3).has_prev());
    }

    #[test]
    fn missing_page_disables_navigation() {
        let result = page(None, 5);

        assert!(!result.has_next());
        assert!(!result.has_prev());
    }
}
