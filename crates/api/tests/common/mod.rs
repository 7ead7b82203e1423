#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use oscars_api::config::ServerConfig;
use oscars_api::router::build_app_router;
use oscars_api::state::{AppState, Stores};
use oscars_core::backend::Backend;
use oscars_core::catalog::{
    MovieChanges, MovieInput, MovieRecord, MutationAck, NominationChanges, NominationInput,
    ProfessionalChanges, ProfessionalInput, ProfessionalRecord,
};
use oscars_core::error::CoreError;
use oscars_core::search::NameQuery;
use oscars_core::wide_column::UseCase;
use oscars_db::models::cassandra::{
    ActorAwards, AwardsByActor, AwardsByMovie, MovieByCategory, MovieByNominationsCount,
    MovieByVotes, NominationEntry, NominationsByDirector, VotesByCategory,
};
use oscars_db::models::{
    AwardedMovieRow, DirectorRow, MostAwardedActorRow, MostAwardedMovieRow, NeverWonRow,
    NominatedMovieRow, VoteExtremesRow,
};
use oscars_db::{AnalyticsStore, CatalogStore, StoreError, StoreResult};
use serde_json::Value;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Fake store
// ---------------------------------------------------------------------------

/// How a fake store answers the analytical questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One fixture row per question.
    Stocked,
    /// Empty lists and not-found singletons.
    Empty,
    /// Every call fails as an unreachable backend would.
    Failing,
}

/// In-memory stand-in for a backend adapter.
pub struct FakeStore {
    backend: Backend,
    mode: Mode,
    calls: AtomicUsize,
    next_id: AtomicUsize,
    movies: Mutex<Vec<MovieRecord>>,
    professionals: Mutex<Vec<ProfessionalRecord>>,
    nominations: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn new(backend: Backend, mode: Mode) -> Self {
        Self {
            backend,
            mode,
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            movies: Mutex::new(Vec::new()),
            professionals: Mutex::new(Vec::new()),
            nominations: Mutex::new(Vec::new()),
        }
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Mode::Failing => Err(StoreError::Core(CoreError::Internal(format!(
                "{} connection refused",
                self.backend
            )))),
            _ => Ok(()),
        }
    }

    fn stocked(&self) -> bool {
        self.mode == Mode::Stocked
    }

    fn allocate_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

pub fn entry(category: &str, result: &str, movie: &str) -> NominationEntry {
    NominationEntry {
        category: Some(category.to_string()),
        year: Some(2020),
        result: Some(result.to_string()),
        movie: Some(movie.to_string()),
    }
}

fn votes_row(category: &str, movie: &str, votes: i32) -> MovieByVotes {
    MovieByVotes {
        category: category.to_string(),
        movie_name: movie.to_string(),
        votes: Some(votes),
        synopsis: None,
    }
}

#[async_trait]
impl AnalyticsStore for FakeStore {
    fn backend(&self) -> Backend {
        self.backend
    }

    async fn ping(&self) -> StoreResult<()> {
        self.enter()
    }

    async fn movies_nominated(&self) -> StoreResult<Vec<NominatedMovieRow>> {
        self.enter()?;
        if !self.stocked() {
            return Ok(Vec::new());
        }
        Ok(vec![NominatedMovieRow::Cassandra(MovieByCategory {
            movie: "Parasite".to_string(),
            year: 2019,
            genre: Some("Thriller".to_string()),
            synopsis: None,
            nominations: Some(vec!["Best Picture".to_string()]),
        })])
    }

    async fn movies_nominated_and_awarded(&self) -> StoreResult<Vec<AwardedMovieRow>> {
        self.enter()?;
        if !self.stocked() {
            return Ok(Vec::new());
        }
        Ok(vec![AwardedMovieRow::Cassandra(MovieByNominationsCount {
            nominations_count: 6,
            movie_name: "Parasite".to_string(),
            year: 2019,
            genre: None,
            synopsis: None,
            awards_won: Some(4),
        })])
    }

    async fn most_awarded_movies(&self) -> StoreResult<Vec<MostAwardedMovieRow>> {
        self.enter()?;
        if !self.stocked() {
            return Ok(Vec::new());
        }
        Ok(vec![MostAwardedMovieRow::Cassandra(AwardsByMovie {
            awards_won: 11,
            movie: "Titanic".to_string(),
            year: 1997,
            synopsis: None,
            category: Some(vec!["Best Picture".to_string()]),
        })])
    }

    async fn nominated_never_won(&self) -> StoreResult<Vec<NeverWonRow>> {
        self.enter()?;
        if !self.stocked() {
            return Ok(Vec::new());
        }
        Ok(vec![NeverWonRow::Cassandra(ActorAwards {
            has_won_award: false,
            nominations: 8,
            last_name: "Close".to_string(),
            first_name: "Glenn".to_string(),
            nationality: None,
            nominations_categories: None,
        })])
    }

    async fn most_awarded_actor(&self) -> StoreResult<MostAwardedActorRow> {
        self.enter()?;
        if !self.stocked() {
            return Err(StoreError::not_found("Actor", "most awarded"));
        }
        Ok(MostAwardedActorRow::Cassandra(AwardsByActor {
            awards_won: 4,
            actor_name: "Katharine Hepburn".to_string(),
            birthdate: None,
            nationality: None,
            nominations: Some(vec![entry("Best Actress", "Winner", "On Golden Pond")]),
        }))
    }

    async fn vote_extremes(&self) -> StoreResult<VoteExtremesRow> {
        self.enter()?;
        if !self.stocked() {
            return Err(StoreError::not_found("Movie", "vote extremes"));
        }
        Ok(VoteExtremesRow::Cassandra(VotesByCategory {
            most_voted: votes_row("most_votes", "Up", 30),
            least_voted: votes_row("least_votes", "Cars", 2),
        }))
    }

    async fn director_nominations(&self, query: &NameQuery) -> StoreResult<Vec<DirectorRow>> {
        self.enter()?;
        let director = "Steven Spielberg";
        if !self.stocked() || !query.matches_full_name(director) {
            return Ok(Vec::new());
        }
        Ok(vec![DirectorRow::Cassandra(NominationsByDirector {
            director_name: director.to_string(),
            nominations: Some(vec![entry("Best Director", "Winner", "Schindler's List")]),
            nominations_count: Some(1),
        })])
    }
}

#[async_trait]
impl CatalogStore for FakeStore {
    async fn list_movies(&self, _use_case: UseCase) -> StoreResult<Vec<MovieRecord>> {
        self.enter()?;
        Ok(self.movies.lock().unwrap().clone())
    }

    async fn create_movie(&self, input: &MovieInput, _use_case: UseCase) -> StoreResult<MutationAck> {
        self.enter()?;
        oscars_core::catalog::validate_movie_input(input)?;
        let mut movies = self.movies.lock().unwrap();
        if movies
            .iter()
            .any(|m| m.title == input.title && m.year == Some(input.year))
        {
            return Err(CoreError::Conflict(format!("Movie '{}' already exists", input.title)).into());
        }
        let id = self.allocate_id();
        movies.push(MovieRecord {
            id: id.clone(),
            title: input.title.clone(),
            year: Some(input.year),
            genre: input.genre.clone(),
            synopsis: input.synopsis.clone(),
            awards_won: 0,
            nominations_count: 0,
            votes: None,
            categories: Vec::new(),
        });
        Ok(MutationAck::ok(id))
    }

    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
        _use_case: UseCase,
    ) -> StoreResult<MutationAck> {
        self.enter()?;
        let mut movies = self.movies.lock().unwrap();
        let current = movies
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("Movie", id))?;
        let title = changes.title.clone().unwrap_or_else(|| current.title.clone());
        let year = changes.year.or(current.year);
        if movies
            .iter()
            .any(|m| m.id != id && m.title == title && m.year == year)
        {
            return Err(CoreError::Conflict(format!("Movie '{title}' already exists")).into());
        }
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("Movie", id))?;
        movie.year = year;
        if let Some(title) = &changes.title {
            movie.title = title.clone();
        }
        if let Some(genre) = &changes.genre {
            movie.genre = genre.clone();
        }
        Ok(MutationAck::ok(id))
    }

    async fn delete_movie(&self, id: &str, _use_case: UseCase) -> StoreResult<MutationAck> {
        self.enter()?;
        let mut movies = self.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        if movies.len() == before {
            return Err(StoreError::not_found("Movie", id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn list_professionals(&self) -> StoreResult<Vec<ProfessionalRecord>> {
        self.enter()?;
        Ok(self.professionals.lock().unwrap().clone())
    }

    async fn create_professional(&self, input: &ProfessionalInput) -> StoreResult<MutationAck> {
        self.enter()?;
        oscars_core::catalog::validate_professional_input(input)?;
        let id = self.allocate_id();
        self.professionals.lock().unwrap().push(ProfessionalRecord {
            id: id.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            nationality: input.nationality.clone(),
            date_of_birth: input.date_of_birth,
            awards_won: 0,
            nominations_count: 0,
        });
        Ok(MutationAck::ok(id))
    }

    async fn update_professional(
        &self,
        id: &str,
        changes: &ProfessionalChanges,
    ) -> StoreResult<MutationAck> {
        self.enter()?;
        let mut professionals = self.professionals.lock().unwrap();
        let professional = professionals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Professional", id))?;
        if let Some(nationality) = &changes.nationality {
            professional.nationality = nationality.clone();
        }
        Ok(MutationAck::ok(id))
    }

    async fn delete_professional(&self, id: &str) -> StoreResult<MutationAck> {
        self.enter()?;
        let mut professionals = self.professionals.lock().unwrap();
        let before = professionals.len();
        professionals.retain(|p| p.id != id);
        if professionals.len() == before {
            return Err(StoreError::not_found("Professional", id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn create_nomination(&self, input: &NominationInput) -> StoreResult<MutationAck> {
        self.enter()?;
        if !self.movies.lock().unwrap().iter().any(|m| m.id == input.movie_id) {
            return Err(StoreError::not_found("Movie", &input.movie_id));
        }
        let id = format!("{}|{}", input.movie_id, input.category);
        self.nominations.lock().unwrap().push(id.clone());
        Ok(MutationAck::ok(id))
    }

    async fn update_nomination(
        &self,
        id: &str,
        _changes: &NominationChanges,
    ) -> StoreResult<MutationAck> {
        self.enter()?;
        if !self.nominations.lock().unwrap().iter().any(|n| n == id) {
            return Err(StoreError::not_found("Nomination", id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn delete_nomination(&self, id: &str) -> StoreResult<MutationAck> {
        self.enter()?;
        let mut nominations = self.nominations.lock().unwrap();
        let before = nominations.len();
        nominations.retain(|n| n != id);
        if nominations.len() == before {
            return Err(StoreError::not_found("Nomination", id));
        }
        Ok(MutationAck::ok(id))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// The fakes behind a test app, kept so tests can inspect call counts.
pub struct Fakes {
    pub mongo: Arc<FakeStore>,
    pub cassandra: Arc<FakeStore>,
    pub sql: Arc<FakeStore>,
}

impl Fakes {
    pub fn new(mongo: Mode, cassandra: Mode, sql: Mode) -> Self {
        Self {
            mongo: Arc::new(FakeStore::new(Backend::Mongo, mongo)),
            cassandra: Arc::new(FakeStore::new(Backend::Cassandra, cassandra)),
            sql: Arc::new(FakeStore::new(Backend::Sql, sql)),
        }
    }

    pub fn all(mode: Mode) -> Self {
        Self::new(mode, mode, mode)
    }

    pub fn total_calls(&self) -> usize {
        self.mongo.calls() + self.cassandra.calls() + self.sql.calls()
    }

    /// Build the full application router over these fakes.
    pub fn app(&self) -> Router {
        let stores = Stores {
            mongo: self.mongo.clone(),
            cassandra: self.cassandra.clone(),
            sql: self.sql.clone(),
        };
        let config = test_config();
        build_app_router(AppState::new(config.clone(), stores), &config)
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
