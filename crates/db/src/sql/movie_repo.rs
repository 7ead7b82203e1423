//! Repository for the `movies` table.

use oscars_core::catalog::{MovieChanges, MovieInput};
use oscars_core::types::DbId;
use sqlx::PgPool;

use crate::models::sql::SqlMovie;

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// All movies with their computed counters, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<SqlMovie>, sqlx::Error> {
        sqlx::query_as::<_, SqlMovie>(
            "SELECT m.id, m.title, m.year, m.genre, m.synopsis, \
                    COUNT(DISTINCT a.id) FILTER (WHERE a.result = 'Winner') AS awards_won, \
                    COUNT(DISTINCT n.id) AS nominations_count, \
                    (SELECT COUNT(*) FROM votes v WHERE v.movie_id = m.id) AS votes, \
                    COALESCE(array_agg(DISTINCT c.name) FILTER (WHERE c.name IS NOT NULL), '{}') \
                        AS categories \
             FROM movies m \
             LEFT JOIN nominations n ON n.movie_id = m.id \
             LEFT JOIN awards a ON a.id = n.award_id \
             LEFT JOIN award_categories ac ON ac.award_id = a.id \
             LEFT JOIN categories c ON c.id = ac.category_id \
             GROUP BY m.id \
             ORDER BY m.year DESC, m.title ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Insert a new movie, returning its id.
    pub async fn create(pool: &PgPool, input: &MovieInput) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO movies (title, year, genre, synopsis) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(input.year)
        .bind(&input.genre)
        .bind(&input.synopsis)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Update a movie. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MovieChanges,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "UPDATE movies SET \
                title = COALESCE($1, title), \
                year = COALESCE($2, year), \
                genre = COALESCE($3, genre), \
                synopsis = COALESCE($4, synopsis), \
                updated_at = now() \
             WHERE id = $5 \
             RETURNING id",
        )
        .bind(input.title.as_deref().map(str::trim))
        .bind(input.year)
        .bind(&input.genre)
        .bind(&input.synopsis)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Delete a movie together with the awards of its nominations.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM awards WHERE id IN (SELECT award_id FROM nominations WHERE movie_id = $1)")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
