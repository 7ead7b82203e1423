//! Repository for the `professionals` table.

use oscars_core::catalog::{ProfessionalChanges, ProfessionalInput};
use oscars_core::types::DbId;
use sqlx::PgPool;

use crate::models::sql::SqlProfessional;

/// Provides CRUD operations for professionals.
pub struct ProfessionalRepo;

impl ProfessionalRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<SqlProfessional>, sqlx::Error> {
        sqlx::query_as::<_, SqlProfessional>(
            "SELECT p.id, p.first_name, p.last_name, p.nationality, p.birth_date, \
                    COUNT(DISTINCT a.id) FILTER (WHERE a.result = 'Winner') AS awards_won, \
                    COUNT(DISTINCT n.id) AS nominations_count \
             FROM professionals p \
             LEFT JOIN nominations n ON n.professional_id = p.id \
             LEFT JOIN awards a ON a.id = n.award_id \
             GROUP BY p.id \
             ORDER BY p.last_name ASC, p.first_name ASC, p.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM professionals WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    pub async fn create(pool: &PgPool, input: &ProfessionalInput) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO professionals (first_name, last_name, nationality, birth_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(&input.nationality)
        .bind(input.date_of_birth)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Update a professional. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProfessionalChanges,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "UPDATE professionals SET \
                first_name = COALESCE($1, first_name), \
                last_name = COALESCE($2, last_name), \
                nationality = COALESCE($3, nationality), \
                birth_date = COALESCE($4, birth_date), \
                updated_at = now() \
             WHERE id = $5 \
             RETURNING id",
        )
        .bind(input.first_name.as_deref().map(str::trim))
        .bind(input.last_name.as_deref().map(str::trim))
        .bind(&input.nationality)
        .bind(input.date_of_birth)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Delete a professional and the awards of the nominations credited to them.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM awards WHERE id IN \
             (SELECT award_id FROM nominations WHERE professional_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM professionals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
