//! Analytical queries against the document collections.
//!
//! Two questions keep the store's two-step shape: the collection is filtered
//! on the denormalized `awardsWon` counter and the nomination-count cut-off
//! is applied to the loaded documents.

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::Database;
use oscars_core::analytics::{
    qualifies_as_awarded_movie, qualifies_as_never_won, vote_extremes, AWARDED_MOVIES_MIN_AWARDS,
    MOST_AWARDED_MOVIES_LIMIT, NOMINATED_MOVIES_LIMIT,
};
use oscars_core::search::NameQuery;

use crate::error::{StoreError, StoreResult};
use crate::models::mongo::{
    MovieDocument, ProfessionalDocument, VoteTally, MOVIES, PROFESSIONALS, VOTES,
};
use crate::models::MongoVoteExtremes;

pub struct MongoAnalytics;

impl MongoAnalytics {
    pub async fn movies_nominated(db: &Database) -> StoreResult<Vec<MovieDocument>> {
        let cursor = db
            .collection::<MovieDocument>(MOVIES)
            .find(doc! { "nominations": { "$exists": true, "$ne": [] } })
            .sort(doc! { "year": -1, "title": 1 })
            .limit(NOMINATED_MOVIES_LIMIT as i64)
            .await?;
        let movies: Vec<MovieDocument> = cursor.try_collect().await?;
        Ok(movies
            .into_iter()
            .filter(|m| !m.nominations.is_empty())
            .collect())
    }

    pub async fn movies_nominated_and_awarded(db: &Database) -> StoreResult<Vec<MovieDocument>> {
        let cursor = db
            .collection::<MovieDocument>(MOVIES)
            .find(doc! { "awardsWon": { "$gte": AWARDED_MOVIES_MIN_AWARDS } })
            .sort(doc! { "awardsWon": -1, "_id": 1 })
            .await?;
        let movies: Vec<MovieDocument> = cursor.try_collect().await?;
        Ok(movies
            .into_iter()
            .filter(|m| qualifies_as_awarded_movie(m.awards_won, m.nominations.len() as i64))
            .collect())
    }

    pub async fn most_awarded_movies(db: &Database) -> StoreResult<Vec<MovieDocument>> {
        let cursor = db
            .collection::<MovieDocument>(MOVIES)
            .find(doc! {})
            .sort(doc! { "awardsWon": -1, "_id": 1 })
            .limit(MOST_AWARDED_MOVIES_LIMIT as i64)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn nominated_never_won(db: &Database) -> StoreResult<Vec<ProfessionalDocument>> {
        let cursor = db
            .collection::<ProfessionalDocument>(PROFESSIONALS)
            .find(doc! { "awardsWon": 0 })
            .sort(doc! { "_id": 1 })
            .await?;
        let people: Vec<ProfessionalDocument> = cursor.try_collect().await?;
        Ok(people
            .into_iter()
            .filter(|p| qualifies_as_never_won(p.awards_won, p.nominations.len() as i64))
            .collect())
    }

    pub async fn most_awarded_actor(db: &Database) -> StoreResult<ProfessionalDocument> {
        db.collection::<ProfessionalDocument>(PROFESSIONALS)
            .find_one(doc! {})
            .sort(doc! { "awardsWon": -1, "_id": 1 })
            .await?
            .ok_or_else(|| StoreError::not_found("Professional", "most awarded"))
    }

    /// Sum votes per movie, then take the first and the last of the ranking.
    pub async fn vote_extremes(db: &Database) -> StoreResult<MongoVoteExtremes> {
        let pipeline = vec![
            doc! { "$group": {
                "_id": "$movie",
                "votes": { "$sum": "$votes" },
                "category": { "$first": "$category" },
            } },
            doc! { "$sort": { "votes": -1, "_id": 1 } },
        ];
        let cursor = db
            .collection::<Document>(VOTES)
            .aggregate(pipeline)
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        let tallies = docs
            .into_iter()
            .map(bson::from_document::<VoteTally>)
            .collect::<Result<Vec<_>, _>>()?;
        let (most_voted, least_voted) = vote_extremes(&tallies, |t| t.votes)
            .ok_or_else(|| StoreError::not_found("Vote", "any movie"))?;
        Ok(MongoVoteExtremes {
            most_voted,
            least_voted,
        })
    }

    /// Every term must match the first or the last name, case-insensitively.
    pub async fn director_nominations(
        db: &Database,
        query: &NameQuery,
    ) -> StoreResult<Vec<ProfessionalDocument>> {
        let clauses: Vec<Document> = query
            .regex_patterns()
            .into_iter()
            .map(|p| {
                doc! { "$or": [
                    { "firstName": { "$regex": p.as_str(), "$options": "i" } },
                    { "lastName": { "$regex": p.as_str(), "$options": "i" } },
                ] }
            })
            .collect();
        let cursor = db
            .collection::<ProfessionalDocument>(PROFESSIONALS)
            .find(doc! { "$and": clauses })
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
