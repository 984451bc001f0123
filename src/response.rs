//! Success envelopes shared by the REST handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    dto::{ApiResponse, PaginatedResponse, PaginationMeta},
    models::PaginatedResult,
};

pub fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    let body = ApiResponse {
        status: status.as_u16(),
        message: message.to_string(),
        data,
    };

    (status, Json(body)).into_response()
}

pub fn paginated<T: Serialize>(
    status: StatusCode,
    message: &str,
    result: PaginatedResult<T>,
) -> Response {
    let pagination = pagination_meta(&result);
    let body = PaginatedResponse {
        status: status.as_u16(),
        message: message.to_string(),
        data: result.data,
        pagination,
    };

    (status, Json(body)).into_response()
}

pub fn pagination_meta<T>(result: &PaginatedResult<T>) -> PaginationMeta {
    PaginationMeta {
        current_page: result.page,
        total_pages: result.total_pages,
        total_items: result.total,
        items_per_page: result.limit,
        has_next: result.has_next(),
        has_prev: result.has_prev(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_mirrors_result() {
        let result = PaginatedResult {
            data: vec!["a", "b"],
            page: Some(2),
            total_pages: 3,
            total: 12,
            limit: 5,
        };

        assert_eq!(
            pagination_meta(&result),
            PaginationMeta {
                current_page: Some(2),
                total_pages: 3,
                total_items: 12,
                items_per_page: 5,
                has_next: true,
                has_prev: true,
            }
        );
    }

    #[test]
    fn meta_without_page_has_no_navigation() {
        let result = PaginatedResult::<()> {
            data: Vec::new(),
            page: None,
            total_pages: 4,
            total: 40,
            limit: 10,
        };

        let meta = pagination_meta(&result);

        assert_eq!(meta.current_page, None);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn envelopes_use_given_status() {
        assert_eq!(
            success(StatusCode::CREATED, "Note created successfully", "x").status(),
            StatusCode::CREATED
        );
    }
}
