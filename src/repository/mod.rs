mod embedded;

use embedded::migrations;

use tokio_postgres::{Client, NoTls, Row};

use crate::models::{Note, Pagination};

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    pub async fn create_note(
        &self,
        user_id: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, tokio_postgres::Error> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notes (user_id, title, content) VALUES ($1, $2, $3) \
                 RETURNING id, user_id, title, content, created_at, updated_at",
                &[&user_id, &title, &content],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    pub async fn update_note(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "UPDATE notes SET title = $1, content = $2, updated_at = NOW() WHERE id = $3 \
                 RETURNING id, user_id, title, content, created_at, updated_at",
                &[&title, &content, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    pub async fn delete_note(&self, id: &str) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "DELETE FROM notes WHERE id = $1 \
                 RETURNING id, user_id, title, content, created_at, updated_at",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    pub async fn get_one_note(&self, id: &str) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "SELECT id, user_id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    /// Returns one window of the user's notes, newest first, together with
    /// the user's total note count.
    pub async fn get_user_notes(
        &self,
        user_id: &str,
        window: Pagination,
    ) -> Result<(Vec<Note>, i64), tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, user_id, title, content, created_at, updated_at FROM notes \
                 WHERE user_id = $1 ORDER BY updated_at DESC, id LIMIT $2 OFFSET $3",
                &[&user_id, &window.take, &window.skip],
            )
            .await?;

        let total: i64 = self
            .client
            .query_one("SELECT COUNT(*) FROM notes WHERE user_id = $1", &[&user_id])
            .await?
            .get(0);

        Ok((rows.iter().map(note_from_row).collect(), total))
    }

    /// Same as [`Self::get_user_notes`], restricted to notes whose title or
    /// content matches the `ILIKE` pattern.
    pub async fn search_user_notes(
        &self,
        user_id: &str,
        pattern: &str,
        window: Pagination,
    ) -> Result<(Vec<Note>, i64), tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, user_id, title, content, created_at, updated_at FROM notes \
                 WHERE user_id = $1 AND (title ILIKE $2 OR content ILIKE $2) \
                 ORDER BY updated_at DESC, id LIMIT $3 OFFSET $4",
                &[&user_id, &pattern, &window.take, &window.skip],
            )
            .await?;

        let total: i64 = self
            .client
            .query_one(
                "SELECT COUNT(*) FROM notes WHERE user_id = $1 AND (title ILIKE $2 OR content ILIKE $2)",
                &[&user_id, &pattern],
            )
            .await?
            .get(0);

        Ok((rows.iter().map(note_from_row).collect(), total))
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
