use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, post},
};
use axum_macros::debug_handler;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use std::sync::Arc;

use crate::{
    auth::{self, AuthKeys, AuthUser},
    dto::{
        ApiResponse, CreateNoteRequest, ErrorResponse, PaginatedResponse, PaginationMeta,
        PaginationQuery, SearchQuery, UpdateNoteRequest,
    },
    error::{ApiError, ApiResult},
    extract::{Json, Path, Query},
    models::Note,
    response,
    service::SharedNoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        get_notes,
        search_notes,
        get_note,
        update_note,
        delete_note
    ),
    components(schemas(
        Note,
        CreateNoteRequest,
        UpdateNoteRequest,
        PaginationMeta,
        ErrorResponse
    )),
    modifiers(&SecurityAddon),
    security(("bearer_auth" = [])),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Note routes, guarded by bearer authentication.
pub fn router(service: SharedNoteService, keys: Arc<AuthKeys>) -> Router {
    Router::new()
        .route("/notes", post(create_note).get(get_notes))
        .route("/notes/search", get(search_notes))
        .route(
            "/notes/{id}",
            get(get_note)
                .put(update_note)
                .patch(update_note)
                .delete(delete_note),
        )
        .route_layer(middleware::from_fn_with_state(keys, auth::authenticate))
        .with_state(service)
}

fn require_note_id(id: &str) -> ApiResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest("Note ID is required".to_string()));
    }
    Ok(id)
}

fn require_search_query(query: Option<&str>) -> ApiResult<&str> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(ApiError::BadRequest("Search query is required".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = ApiResponse<Note>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<SharedNoteService>,
    user: AuthUser,
    Json(payload): Json<CreateNoteRequest>,
) -> ApiResult<Response> {
    let note = service.create_note(&user.id, payload.into()).await?;
    tracing::debug!("created note {} for user {}", note.id, user.id);

    Ok(response::success(
        StatusCode::CREATED,
        "Note created successfully",
        note,
    ))
}

#[utoipa::path(
    get,
    path = "/notes",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of the user's notes", body = PaginatedResponse<Note>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_notes(
    State(service): State<SharedNoteService>,
    user: AuthUser,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<Response> {
    let result = service.get_user_notes(&user.id, query.window()?).await?;

    Ok(response::paginated(
        StatusCode::OK,
        "Notes retrieved successfully",
        result,
    ))
}

#[utoipa::path(
    get,
    path = "/notes/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Page of matching notes", body = PaginatedResponse<Note>),
        (status = 400, description = "Search query is required", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn search_notes(
    State(service): State<SharedNoteService>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Response> {
    let q = require_search_query(query.q.as_deref())?;
    let result = service
        .search_user_notes(&user.id, q, query.pagination().window()?)
        .await?;

    Ok(response::paginated(
        StatusCode::OK,
        "Search results retrieved successfully",
        result,
    ))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = ApiResponse<Note>),
        (status = 400, description = "Note ID is required", body = ErrorResponse),
        (status = 403, description = "Note belongs to another user", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_note(
    State(service): State<SharedNoteService>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = require_note_id(&id)?;
    let note = service.get_note_by_id(&user.id, id).await?;

    Ok(response::success(
        StatusCode::OK,
        "Note retrieved successfully",
        note,
    ))
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = ApiResponse<Note>),
        (status = 400, description = "Note ID is required", body = ErrorResponse),
        (status = 403, description = "Note belongs to another user", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<SharedNoteService>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateNoteRequest>,
) -> ApiResult<Response> {
    let id = require_note_id(&id)?;
    let note = service.update_note(&user.id, id, payload.into()).await?;

    Ok(response::success(
        StatusCode::OK,
        "Note updated successfully",
        note,
    ))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = ApiResponse<Note>),
        (status = 400, description = "Note ID is required", body = ErrorResponse),
        (status = 403, description = "Note belongs to another user", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<SharedNoteService>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = require_note_id(&id)?;
    let note = service.delete_note(&user.id, id).await?;
    tracing::debug!("deleted note {} of user {}", note.id, user.id);

    Ok(response::success(
        StatusCode::OK,
        "Note deleted successfully",
        note,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_note_id_is_rejected() {
        let err = require_note_id("   ").unwrap_err();

        assert_eq!(err.to_string(), "Note ID is required");
    }

    #[test]
    fn note_id_is_trimmed() {
        assert_eq!(require_note_id(" abc ").unwrap(), "abc");
    }

    #[test]
    fn search_query_must_be_present() {
        assert_eq!(
            require_search_query(None).unwrap_err().to_string(),
            "Search query is required"
        );
        assert_eq!(
            require_search_query(Some("")).unwrap_err().to_string(),
            "Search query is required"
        );
        assert_eq!(require_search_query(Some(" todo ")).unwrap(), "todo");
    }

    #[test]
    fn openapi_lists_note_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/notes"));
        assert!(doc.paths.paths.contains_key("/notes/search"));
        assert!(doc.paths.paths.contains_key("/notes/{id}"));
    }
}
