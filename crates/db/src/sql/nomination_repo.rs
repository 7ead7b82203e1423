//! Repository for nominations and the award rows behind them.
//!
//! A nomination owns exactly one `awards` row (its result) linked to one
//! category, so writes span several tables and run in a transaction. A
//! credited nomination also records the professional's role in the movie.

use oscars_core::nomination::{NominationResult, Role};
use oscars_core::types::DbId;
use sqlx::PgPool;

/// Fields needed to record a nomination.
#[derive(Debug, Clone)]
pub struct NewNomination<'a> {
    pub movie_id: DbId,
    pub professional_id: Option<DbId>,
    pub category: &'a str,
    pub year: i32,
    pub result: NominationResult,
}

/// Provides write operations for nominations.
pub struct NominationRepo;

impl NominationRepo {
    /// Insert the category (if new), the award and the nomination.
    pub async fn create(pool: &PgPool, input: &NewNomination<'_>) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (category_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO categories (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
        )
        .bind(input.category.trim())
        .fetch_one(&mut *tx)
        .await?;

        let (award_id,): (DbId,) =
            sqlx::query_as("INSERT INTO awards (result) VALUES ($1) RETURNING id")
                .bind(input.result.as_str())
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query("INSERT INTO award_categories (award_id, category_id) VALUES ($1, $2)")
            .bind(award_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        let (nomination_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO nominations (movie_id, award_id, professional_id, year) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(input.movie_id)
        .bind(award_id)
        .bind(input.professional_id)
        .bind(input.year)
        .fetch_one(&mut *tx)
        .await?;

        if let (Some(professional_id), Some(role)) =
            (input.professional_id, Role::for_category(input.category))
        {
            sqlx::query(
                "INSERT INTO participations (professional_id, movie_id, role) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(professional_id)
            .bind(input.movie_id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(nomination_id)
    }

    /// Change the result of a nomination's award. Returns `true` if a row matched.
    pub async fn update_result(
        pool: &PgPool,
        id: DbId,
        result: NominationResult,
    ) -> Result<bool, sqlx::Error> {
        let outcome = sqlx::query(
            "UPDATE awards SET result = $1 \
             WHERE id = (SELECT award_id FROM nominations WHERE id = $2)",
        )
        .bind(result.as_str())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(outcome.rows_affected() > 0)
    }

    /// Delete a nomination by removing its award; the nomination and the
    /// category link cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let outcome = sqlx::query(
            "DELETE FROM awards WHERE id = (SELECT award_id FROM nominations WHERE id = $1)",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(outcome.rows_affected() > 0)
    }
}
