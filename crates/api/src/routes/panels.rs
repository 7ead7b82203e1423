use axum::routing::get;
use axum::Router;

use crate::handlers::panels;
use crate::state::AppState;

/// Panel routes mounted at `/panels`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movie-nominations", get(panels::movie_nominations))
        .route("/movie-awards", get(panels::movie_awards))
        .route("/most-awarded-movies", get(panels::most_awarded_movies))
        .route("/nominated-never-won", get(panels::nominated_never_won))
        .route("/most-awarded-actor", get(panels::most_awarded_actor))
        .route("/vote-extremes", get(panels::vote_extremes))
        .route("/director-nominations", get(panels::director_nominations))
}
