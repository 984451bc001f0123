use async_trait::async_trait;

use std::sync::Arc;

use crate::{
    models::{Note, NoteData, PaginatedResult, Pagination},
    repository::Repository,
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(#[from] tokio_postgres::Error),
}

/// Persistence operations the REST handlers rely on.
///
/// Every call is scoped to the user that owns the notes.
#[async_trait]
pub trait NotePersistenceService: Send + Sync {
    async fn create_note(&self, user_id: &str, data: NoteData) -> Result<Note, ServiceError>;

    async fn get_user_notes(
        &self,
        user_id: &str,
        window: Pagination,
    ) -> Result<PaginatedResult<Note>, ServiceError>;

    async fn search_user_notes(
        &self,
        user_id: &str,
        query: &str,
        window: Pagination,
    ) -> Result<PaginatedResult<Note>, ServiceError>;

    async fn get_note_by_id(&self, user_id: &str, id: &str) -> Result<Note, ServiceError>;

    async fn update_note(
        &self,
        user_id: &str,
        id: &str,
        data: NoteData,
    ) -> Result<Note, ServiceError>;

    async fn delete_note(&self, user_id: &str, id: &str) -> Result<Note, ServiceError>;
}

pub type SharedNoteService = Arc<dyn NotePersistenceService>;

/// Postgres-backed note service.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<Repository>,
}

impl NoteService {
    pub const fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Loads a note and checks that `user_id` owns it.
    async fn owned_note(&self, user_id: &str, id: &str) -> Result<Note, ServiceError> {
        let note = self
            .repo
            .get_one_note(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Note not found".to_string()))?;

        if note.user_id != user_id {
            tracing::warn!("user {} attempted to access note {} owned by another user", user_id, id);
            return Err(ServiceError::Forbidden(
                "You do not have access to this note".to_string(),
            ));
        }

        Ok(note)
    }
}

#[async_trait]
impl NotePersistenceService for NoteService {
    async fn create_note(&self, user_id: &str, data: NoteData) -> Result<Note, ServiceError> {
        Ok(self
            .repo
            .create_note(user_id, &data.title, &data.content)
            .await?)
    }

    async fn get_user_notes(
        &self,
        user_id: &str,
        window: Pagination,
    ) -> Result<PaginatedResult<Note>, ServiceError> {
        let (notes, total) = self.repo.get_user_notes(user_id, window).await?;

        Ok(PaginatedResult::from_window(notes, window, total))
    }

    async fn search_user_notes(
        &self,
        user_id: &str,
        query: &str,
        window: Pagination,
    ) -> Result<PaginatedResult<Note>, ServiceError> {
        let (notes, total) = self
            .repo
            .search_user_notes(user_id, &like_pattern(query), window)
            .await?;

        Ok(PaginatedResult::from_window(notes, window, total))
    }

    async fn get_note_by_id(&self, user_id: &str, id: &str) -> Result<Note, ServiceError> {
        self.owned_note(user_id, id).await
    }

    async fn update_note(
        &self,
        user_id: &str,
        id: &str,
        data: NoteData,
    ) -> Result<Note, ServiceError> {
        self.owned_note(user_id, id).await?;

        self.repo
            .update_note(id, &data.title, &data.content)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Note not found".to_string()))
    }

    async fn delete_note(&self, user_id: &str, id: &str) -> Result<Note, ServiceError> {
        self.owned_note(user_id, id).await?;

        self.repo
            .delete_note(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Note not found".to_string()))
    }
}

/// Wraps `query` for a substring `ILIKE` match, escaping the wildcards it
/// contains.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
