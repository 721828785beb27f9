//! Repository for the `contacts` table.

use realtrust_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::contact::{Contact, CreateContact};

const COLUMNS: &str = "id, full_name, email, mobile, city, created_at, updated_at";

/// Provides create/read/delete operations for contact submissions.
pub struct ContactRepo;

impl ContactRepo {
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (id, full_name, email, mobile, city)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(new_id())
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.city)
            .fetch_one(pool)
            .await
    }

    /// List all submissions, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
