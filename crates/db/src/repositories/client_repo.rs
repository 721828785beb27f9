//! Repository for the `clients` table.

use realtrust_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient, UpdateClient};

const COLUMNS: &str =
    "id, name, description, designation, image_url, image_public_id, created_at, updated_at";

/// Provides CRUD operations for client testimonials.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (id, name, description, designation, image_url, image_public_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.designation)
            .bind(&input.image.url)
            .bind(&input.image.public_id)
            .fetch_one(pool)
            .await
    }

    /// Find a client by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clients ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                designation = COALESCE($4, designation),
                image_url = COALESCE($5, image_url),
                image_public_id = COALESCE($6, image_public_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.designation)
            .bind(input.image.as_ref().map(|i| &i.url))
            .bind(input.image.as_ref().map(|i| &i.public_id))
            .fetch_optional(pool)
            .await
    }

    /// Delete a client by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
