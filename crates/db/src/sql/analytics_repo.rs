//! Analytical queries against the relational schema.
//!
//! Award counts are never stored; they are computed from the nominations
//! joined to their award results. Actor and director questions only consider
//! professionals holding that role in `participations`.

use oscars_core::analytics::{
    AWARDED_MOVIES_MIN_AWARDS, AWARDED_MOVIES_NOMINATIONS_ABOVE, MOST_AWARDED_MOVIES_LIMIT,
    NEVER_WON_NOMINATIONS_ABOVE, NOMINATED_MOVIES_LIMIT,
};
use oscars_core::search::NameQuery;
use sqlx::PgPool;

use crate::models::sql::{
    SqlDirectorNominations, SqlMovieSummary, SqlProfessionalSummary, SqlVoteTally,
};

/// Per-movie aggregate. Callers append `HAVING` / `ORDER BY` / `LIMIT`.
const MOVIE_SUMMARY: &str = "\
    SELECT m.id, m.title, m.year, m.genre, m.synopsis, \
           COUNT(DISTINCT n.id) AS nominations_count, \
           COUNT(DISTINCT a.id) FILTER (WHERE a.result = 'Winner') AS awards_won, \
           COALESCE(json_agg(json_build_object( \
               'category', c.name, 'year', n.year, 'result', a.result, 'movie', m.title \
           )) FILTER (WHERE n.id IS NOT NULL), '[]') AS nominations \
    FROM movies m \
    LEFT JOIN nominations n ON n.movie_id = m.id \
    LEFT JOIN awards a ON a.id = n.award_id \
    LEFT JOIN award_categories ac ON ac.award_id = a.id \
    LEFT JOIN categories c ON c.id = ac.category_id \
    GROUP BY m.id";

/// Per-actor aggregate over the nominations credited to them.
const ACTOR_SUMMARY: &str = "\
    SELECT p.id, p.first_name, p.last_name, p.nationality, p.birth_date, \
           COUNT(DISTINCT n.id) AS nominations_count, \
           COUNT(DISTINCT a.id) FILTER (WHERE a.result = 'Winner') AS awards_won, \
           COALESCE(json_agg(json_build_object( \
               'category', c.name, 'year', n.year, 'result', a.result, 'movie', m.title \
           )) FILTER (WHERE n.id IS NOT NULL), '[]') AS nominations \
    FROM professionals p \
    LEFT JOIN nominations n ON n.professional_id = p.id \
    LEFT JOIN movies m ON m.id = n.movie_id \
    LEFT JOIN awards a ON a.id = n.award_id \
    LEFT JOIN award_categories ac ON ac.award_id = a.id \
    LEFT JOIN categories c ON c.id = ac.category_id \
    WHERE EXISTS ( \
        SELECT 1 FROM participations pa \
        WHERE pa.professional_id = p.id AND pa.role = 'Actor' \
    ) \
    GROUP BY p.id";

/// Vote totals per movie. Callers append `ORDER BY` / `LIMIT`.
const VOTE_TALLY: &str = "\
    SELECT m.id AS movie_id, m.title, m.synopsis, MIN(c.name) AS category, \
           COUNT(v.id) AS votes \
    FROM votes v \
    JOIN movies m ON m.id = v.movie_id \
    LEFT JOIN categories c ON c.id = v.category_id \
    GROUP BY m.id";

/// Provides the analytical read queries.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Movies with at least one nomination, most recent first.
    pub async fn movies_nominated(pool: &PgPool) -> Result<Vec<SqlMovieSummary>, sqlx::Error> {
        let query = format!(
            "{MOVIE_SUMMARY} HAVING COUNT(n.id) > 0 ORDER BY m.year DESC, m.title ASC LIMIT $1"
        );
        sqlx::query_as::<_, SqlMovieSummary>(&query)
            .bind(NOMINATED_MOVIES_LIMIT as i64)
            .fetch_all(pool)
            .await
    }

    /// Movies above both the award and the nomination cut-off.
    pub async fn movies_nominated_and_awarded(
        pool: &PgPool,
    ) -> Result<Vec<SqlMovieSummary>, sqlx::Error> {
        let query = format!(
            "{MOVIE_SUMMARY} \
             HAVING COUNT(DISTINCT a.id) FILTER (WHERE a.result = 'Winner') >= $1 \
                AND COUNT(DISTINCT n.id) > $2 \
             ORDER BY awards_won DESC, m.id ASC"
        );
        sqlx::query_as::<_, SqlMovieSummary>(&query)
            .bind(AWARDED_MOVIES_MIN_AWARDS)
            .bind(AWARDED_MOVIES_NOMINATIONS_ABOVE)
            .fetch_all(pool)
            .await
    }

    pub async fn most_awarded_movies(pool: &PgPool) -> Result<Vec<SqlMovieSummary>, sqlx::Error> {
        let query = format!("{MOVIE_SUMMARY} ORDER BY awards_won DESC, m.id ASC LIMIT $1");
        sqlx::query_as::<_, SqlMovieSummary>(&query)
            .bind(MOST_AWARDED_MOVIES_LIMIT as i64)
            .fetch_all(pool)
            .await
    }

    /// Actors nominated often who never won.
    pub async fn nominated_never_won(
        pool: &PgPool,
    ) -> Result<Vec<SqlProfessionalSummary>, sqlx::Error> {
        let query = format!(
            "{ACTOR_SUMMARY} \
             HAVING COUNT(DISTINCT n.id) > $1 \
                AND COUNT(DISTINCT a.id) FILTER (WHERE a.result = 'Winner') = 0 \
             ORDER BY nominations_count DESC, p.id ASC"
        );
        sqlx::query_as::<_, SqlProfessionalSummary>(&query)
            .bind(NEVER_WON_NOMINATIONS_ABOVE)
            .fetch_all(pool)
            .await
    }

    /// The actor with the most wins. `None` when no actor is recorded.
    pub async fn most_awarded_actor(
        pool: &PgPool,
    ) -> Result<Option<SqlProfessionalSummary>, sqlx::Error> {
        let query = format!("{ACTOR_SUMMARY} ORDER BY awards_won DESC, p.id ASC LIMIT 1");
        sqlx::query_as::<_, SqlProfessionalSummary>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn most_voted(pool: &PgPool) -> Result<Option<SqlVoteTally>, sqlx::Error> {
        let query = format!("{VOTE_TALLY} ORDER BY votes DESC, m.id ASC LIMIT 1");
        sqlx::query_as::<_, SqlVoteTally>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn least_voted(pool: &PgPool) -> Result<Option<SqlVoteTally>, sqlx::Error> {
        let query = format!("{VOTE_TALLY} ORDER BY votes ASC, m.id DESC LIMIT 1");
        sqlx::query_as::<_, SqlVoteTally>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Directors whose first or last name contains every query term.
    pub async fn director_nominations(
        pool: &PgPool,
        query: &NameQuery,
    ) -> Result<Vec<SqlDirectorNominations>, sqlx::Error> {
        let patterns = query.like_patterns();
        let conditions: Vec<String> = (1..=patterns.len())
            .map(|i| format!("(LOWER(p.first_name) LIKE ${i} OR LOWER(p.last_name) LIKE ${i})"))
            .collect();
        let sql = format!(
            "SELECT p.id, p.first_name || ' ' || p.last_name AS director, \
                    COUNT(DISTINCT n.id) AS nominations_count, \
                    COALESCE(json_agg(json_build_object( \
                        'category', c.name, 'year', n.year, 'result', a.result, 'movie', m.title \
                    )) FILTER (WHERE n.id IS NOT NULL), '[]') AS nominations \
             FROM professionals p \
             LEFT JOIN nominations n ON n.professional_id = p.id \
             LEFT JOIN movies m ON m.id = n.movie_id \
             LEFT JOIN awards a ON a.id = n.award_id \
             LEFT JOIN award_categories ac ON ac.award_id = a.id \
             LEFT JOIN categories c ON c.id = ac.category_id \
             WHERE EXISTS ( \
                 SELECT 1 FROM participations pa \
                 WHERE pa.professional_id = p.id AND pa.role = 'Director' \
             ) AND {} \
             GROUP BY p.id \
             ORDER BY nominations_count DESC, p.id ASC",
            conditions.join(" AND ")
        );
        let mut q = sqlx::query_as::<_, SqlDirectorNominations>(&sql);
        for pattern in &patterns {
            q = q.bind(pattern);
        }
        q.fetch_all(pool).await
    }
}
