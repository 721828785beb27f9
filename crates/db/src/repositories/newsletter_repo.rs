//! Repository for the `newsletter_subscriptions` table.

use realtrust_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::newsletter::{CreateSubscription, Subscription};

const COLUMNS: &str = "id, email, created_at, updated_at";

/// Provides create/read/delete operations for newsletter subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a subscription. Fails with a unique violation on
    /// `uq_newsletter_subscriptions_email` if the email is already stored.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO newsletter_subscriptions (id, email)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(new_id())
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Exact, case-sensitive lookup on the stored email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM newsletter_subscriptions WHERE email = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all subscriptions, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_subscriptions ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM newsletter_subscriptions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
