//! Route definitions for one backend, mounted at `/{backend}`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{analytics, movies, nominations, professionals};
use crate::state::AppState;

/// ```text
/// GET    /analytics/movies-nominated              -> movies_nominated
/// GET    /analytics/movies-nominated-and-awarded  -> movies_nominated_and_awarded
/// GET    /analytics/most-awarded-movies           -> most_awarded_movies
/// GET    /analytics/nominated-never-won           -> nominated_never_won
/// GET    /analytics/most-awarded-actor            -> most_awarded_actor
/// GET    /analytics/vote-extremes                 -> vote_extremes
/// GET    /analytics/director-nominations          -> director_nominations
/// GET    /movies                                  -> list_movies
/// POST   /movies                                  -> create_movie
/// PUT    /movies/{id}                             -> update_movie
/// DELETE /movies/{id}                             -> delete_movie
/// GET    /professionals                           -> list_professionals
/// POST   /professionals                           -> create_professional
/// PUT    /professionals/{id}                      -> update_professional
/// DELETE /professionals/{id}                      -> delete_professional
/// POST   /nominations                             -> create_nomination
/// PUT    /nominations/{id}                        -> update_nomination
/// DELETE /nominations/{id}                        -> delete_nomination
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/analytics", analytics_router())
        .route(
            "/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/movies/{id}",
            put(movies::update_movie).delete(movies::delete_movie),
        )
        .route(
            "/professionals",
            get(professionals::list_professionals).post(professionals::create_professional),
        )
        .route(
            "/professionals/{id}",
            put(professionals::update_professional).delete(professionals::delete_professional),
        )
        .route("/nominations", post(nominations::create_nomination))
        .route(
            "/nominations/{id}",
            put(nominations::update_nomination).delete(nominations::delete_nomination),
        )
}

fn analytics_router() -> Router<AppState> {
    Router::new()
        .route("/movies-nominated", get(analytics::movies_nominated))
        .route(
            "/movies-nominated-and-awarded",
            get(analytics::movies_nominated_and_awarded),
        )
        .route("/most-awarded-movies", get(analytics::most_awarded_movies))
        .route("/nominated-never-won", get(analytics::nominated_never_won))
        .route("/most-awarded-actor", get(analytics::most_awarded_actor))
        .route("/vote-extremes", get(analytics::vote_extremes))
        .route("/director-nominations", get(analytics::director_nominations))
}
