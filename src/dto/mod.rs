use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{ApiError, ApiResult},
    models::{NoteData, Pagination},
};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

impl From<CreateNoteRequest> for NoteData {
    fn from(request: CreateNoteRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
        }
    }
}

impl From<UpdateNoteRequest> for NoteData {
    fn from(request: UpdateNoteRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1
    #[param(minimum = 1, default = 1)]
    pub page: Option<i64>,
    /// Notes per page
    #[param(minimum = 1, default = 10)]
    pub limit: Option<i64>,
}

impl PaginationQuery {
    /// Requested page, falling back to the first page for absent or
    /// non-positive values.
    pub fn page(&self) -> i64 {
        self.page.filter(|page| *page >= 1).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.filter(|limit| *limit >= 1).unwrap_or(DEFAULT_LIMIT)
    }

    /// Skip/take window for the requested page. Pages too far out to
    /// address are rejected.
    pub fn window(&self) -> ApiResult<Pagination> {
        let limit = self.limit();
        let skip = (self.page() - 1)
            .checked_mul(limit)
            .ok_or_else(|| ApiError::BadRequest("Invalid pagination parameters".to_string()))?;

        Ok(Pagination { skip, take: limit })
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Text to look for in note titles and contents
    pub q: Option<String>,
    /// Page number, starting at 1
    #[param(minimum = 1, default = 1)]
    pub page: Option<i64>,
    /// Notes per page
    #[param(minimum = 1, default = 10)]
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub const fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Envelope for single-item responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    pub message: String,
    pub data: T,
}

/// Envelope for list responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// HTTP status code
    pub status: u16,
    pub message: String,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Page that was returned, absent when the backend did not report one
    pub current_page: Option<i64>,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Human-readable error message
    pub message: String,
}
