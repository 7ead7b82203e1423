//! Repository for the `movies` collection.

use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::Database;
use oscars_core::catalog::{MovieChanges, MovieInput, MovieRecord};

use crate::error::StoreResult;
use crate::models::mongo::{MovieDocument, MOVIES};

use super::{inserted_object_id, parse_object_id};

pub struct MovieRepo;

impl MovieRepo {
    pub async fn list(db: &Database) -> StoreResult<Vec<MovieRecord>> {
        let cursor = db
            .collection::<MovieDocument>(MOVIES)
            .find(doc! {})
            .sort(doc! { "year": -1, "title": 1 })
            .await?;
        let docs: Vec<MovieDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(MovieRecord::from).collect())
    }

    pub async fn find(db: &Database, id: ObjectId) -> StoreResult<Option<MovieDocument>> {
        Ok(db
            .collection::<MovieDocument>(MOVIES)
            .find_one(doc! { "_id": id })
            .await?)
    }

    pub async fn create(db: &Database, input: &MovieInput) -> StoreResult<ObjectId> {
        let result = db
            .collection::<Document>(MOVIES)
            .insert_one(doc! {
                "title": input.title.trim(),
                "year": input.year,
                "genre": &input.genre,
                "synopsis": &input.synopsis,
                "awardsWon": 0_i64,
                "nominations": [],
            })
            .await?;
        inserted_object_id(result.inserted_id)
    }

    /// `$set` the supplied fields. Returns `false` if no document matched.
    pub async fn update(db: &Database, id: &str, changes: &MovieChanges) -> StoreResult<bool> {
        let oid = parse_object_id("movie", id)?;
        let mut set = Document::new();
        if let Some(title) = &changes.title {
            set.insert("title", title.trim());
        }
        if let Some(year) = changes.year {
            set.insert("year", year);
        }
        if let Some(genre) = &changes.genre {
            set.insert("genre", genre);
        }
        if let Some(synopsis) = &changes.synopsis {
            set.insert("synopsis", synopsis);
        }
        let result = db
            .collection::<Document>(MOVIES)
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn delete(db: &Database, id: &str) -> StoreResult<bool> {
        let oid = parse_object_id("movie", id)?;
        let result = db
            .collection::<Document>(MOVIES)
            .delete_one(doc! { "_id": oid })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

impl From<MovieDocument> for MovieRecord {
    fn from(m: MovieDocument) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for n in &m.nominations {
            if !categories.contains(&n.category_id) {
                categories.push(n.category_id.clone());
            }
        }
        MovieRecord {
            id: m.id.to_hex(),
            title: m.title,
            year: m.year,
            genre: m.genre.unwrap_or_default(),
            synopsis: m.synopsis.unwrap_or_default(),
            awards_won: m.awards_won,
            nominations_count: m.nominations.len() as i64,
            votes: None,
            categories,
        }
    }
}
