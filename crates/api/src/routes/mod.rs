pub mod backend;
pub mod health;
pub mod panels;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /panels/movie-nominations                         normalized, all backends
/// /panels/movie-awards
/// /panels/most-awarded-movies
/// /panels/nominated-never-won
/// /panels/most-awarded-actor
/// /panels/vote-extremes
/// /panels/director-nominations?q=
///
/// /{backend}/analytics/movies-nominated             raw rows, one backend
/// /{backend}/analytics/movies-nominated-and-awarded
/// /{backend}/analytics/most-awarded-movies
/// /{backend}/analytics/nominated-never-won
/// /{backend}/analytics/most-awarded-actor
/// /{backend}/analytics/vote-extremes
/// /{backend}/analytics/director-nominations?q=
///
/// /{backend}/movies                                 list, create (?use_case=)
/// /{backend}/movies/{id}                            update, delete (?use_case=)
/// /{backend}/professionals                          list, create
/// /{backend}/professionals/{id}                     update, delete
/// /{backend}/nominations                            create
/// /{backend}/nominations/{id}                       update, delete
/// ```
///
/// `{backend}` is one of `mongo`, `cassandra`, `sql`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/panels", panels::router())
        .nest("/{backend}", backend::router())
}
