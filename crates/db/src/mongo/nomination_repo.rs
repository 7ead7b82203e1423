//! Nominations embedded in movie and professional documents.
//!
//! A nomination lives in the movie's `nominations` array and, when a
//! professional was nominated with it, in theirs too (linked by `awardId`).
//! The `awardsWon` counters on both documents move with every winner.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use bson::{doc, Document};
use mongodb::Database;
use oscars_core::error::CoreError;
use oscars_core::nomination::NominationResult;

use crate::error::{StoreError, StoreResult};
use crate::models::mongo::{MovieDocument, MovieNomination, MOVIES, PROFESSIONALS};

use super::movie_repo::MovieRepo;
use super::professional_repo::ProfessionalRepo;

/// Identity of an embedded nomination, exposed as `"{movie}|{category}|{year}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNominationId {
    pub movie: ObjectId,
    pub category: String,
    pub year: i32,
}

impl fmt::Display for DocumentNominationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.movie.to_hex(), self.category, self.year)
    }
}

impl FromStr for DocumentNominationId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            CoreError::Validation(format!(
                "Invalid nomination id '{s}', expected movie|category|year"
            ))
        };
        let (head, year) = s.rsplit_once('|').ok_or_else(invalid)?;
        let (movie, category) = head.split_once('|').ok_or_else(invalid)?;
        if category.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            movie: ObjectId::parse_str(movie).map_err(|_| invalid())?,
            category: category.to_string(),
            year: year.parse().map_err(|_| invalid())?,
        })
    }
}

fn find_entry<'a>(
    movie: &'a MovieDocument,
    id: &DocumentNominationId,
) -> Option<&'a MovieNomination> {
    movie
        .nominations
        .iter()
        .find(|n| n.category_id == id.category && n.year == Some(id.year))
}

fn win_count(result: NominationResult) -> i64 {
    i64::from(result.is_winner())
}

pub struct NominationRepo;

impl NominationRepo {
    /// Push the nomination into the movie (and the professional, if any).
    pub async fn create(
        db: &Database,
        id: &DocumentNominationId,
        result: NominationResult,
        professional: Option<ObjectId>,
    ) -> StoreResult<()> {
        let movie = MovieRepo::find(db, id.movie)
            .await?
            .ok_or_else(|| StoreError::not_found("Movie", id.movie.to_hex()))?;
        if let Some(pid) = professional {
            if ProfessionalRepo::find(db, pid).await?.is_none() {
                return Err(StoreError::not_found("Professional", pid.to_hex()));
            }
        }
        if find_entry(&movie, id).is_some() {
            return Err(CoreError::Conflict(format!("Nomination '{id}' already exists")).into());
        }

        let wins = win_count(result);
        db.collection::<Document>(MOVIES)
            .update_one(
                doc! { "_id": id.movie },
                doc! {
                    "$push": { "nominations": {
                        "categoryId": &id.category,
                        "result": result.as_str(),
                        "year": id.year,
                    } },
                    "$inc": { "awardsWon": wins },
                },
            )
            .await?;

        if let Some(pid) = professional {
            db.collection::<Document>(PROFESSIONALS)
                .update_one(
                    doc! { "_id": pid },
                    doc! {
                        "$push": { "nominations": {
                            "category": &id.category,
                            "year": id.year,
                            "awardId": id.to_string(),
                            "movie": &movie.title,
                            "result": result.as_str(),
                        } },
                        "$inc": { "awardsWon": wins },
                    },
                )
                .await?;
        }
        Ok(())
    }

    /// Change the result in place. A no-op when the result is unchanged.
    pub async fn update_result(
        db: &Database,
        id: &DocumentNominationId,
        result: NominationResult,
    ) -> StoreResult<()> {
        let movie = MovieRepo::find(db, id.movie)
            .await?
            .ok_or_else(|| StoreError::not_found("Nomination", id))?;
        let entry = find_entry(&movie, id).ok_or_else(|| StoreError::not_found("Nomination", id))?;
        let previous = NominationResult::from_stored(entry.result.as_deref());
        if previous == result {
            return Ok(());
        }

        let delta = win_count(result) - win_count(previous);
        db.collection::<Document>(MOVIES)
            .update_one(
                doc! {
                    "_id": id.movie,
                    "nominations": { "$elemMatch": { "categoryId": &id.category, "year": id.year } },
                },
                doc! {
                    "$set": { "nominations.$.result": result.as_str() },
                    "$inc": { "awardsWon": delta },
                },
            )
            .await?;
        db.collection::<Document>(PROFESSIONALS)
            .update_many(
                doc! { "nominations.awardId": id.to_string() },
                doc! {
                    "$set": { "nominations.$.result": result.as_str() },
                    "$inc": { "awardsWon": delta },
                },
            )
            .await?;
        Ok(())
    }

    pub async fn delete(db: &Database, id: &DocumentNominationId) -> StoreResult<()> {
        let movie = MovieRepo::find(db, id.movie)
            .await?
            .ok_or_else(|| StoreError::not_found("Nomination", id))?;
        let entry = find_entry(&movie, id).ok_or_else(|| StoreError::not_found("Nomination", id))?;
        let wins = win_count(NominationResult::from_stored(entry.result.as_deref()));

        db.collection::<Document>(MOVIES)
            .update_one(
                doc! { "_id": id.movie },
                doc! {
                    "$pull": { "nominations": { "categoryId": &id.category, "year": id.year } },
                    "$inc": { "awardsWon": -wins },
                },
            )
            .await?;
        db.collection::<Document>(PROFESSIONALS)
            .update_many(
                doc! { "nominations.awardId": id.to_string() },
                doc! {
                    "$pull": { "nominations": { "awardId": id.to_string() } },
                    "$inc": { "awardsWon": -wins },
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const OID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    #[test]
    fn id_round_trips_through_display() {
        let id: DocumentNominationId = format!("{OID}|Best Picture|1998").parse().unwrap();
        assert_eq!(id.category, "Best Picture");
        assert_eq!(id.year, 1998);
        assert_eq!(id.to_string(), format!("{OID}|Best Picture|1998"));
    }

    #[test]
    fn id_requires_three_parts() {
        assert_matches!(
            format!("{OID}|1998").parse::<DocumentNominationId>(),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            "nope|Best Picture|1998".parse::<DocumentNominationId>(),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            format!("{OID}|Best Picture|soon").parse::<DocumentNominationId>(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn find_entry_matches_category_and_year() {
        let movie = MovieDocument {
            id: ObjectId::parse_str(OID).unwrap(),
            title: "Titanic".to_string(),
            year: Some(1997),
            genre: None,
            synopsis: None,
            awards_won: 1,
            nominations: vec![MovieNomination {
                category_id: "Best Picture".to_string(),
                result: Some("Winner".to_string()),
                year: Some(1998),
            }],
        };
        let hit: DocumentNominationId = format!("{OID}|Best Picture|1998").parse().unwrap();
        let miss: DocumentNominationId = format!("{OID}|Best Picture|1999").parse().unwrap();
        assert!(find_entry(&movie, &hit).is_some());
        assert!(find_entry(&movie, &miss).is_none());
    }
}
