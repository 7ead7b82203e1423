//! Repository for the `professionals` collection.

use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::{NaiveDate, NaiveTime};
use futures::TryStreamExt;
use mongodb::Database;
use oscars_core::catalog::{ProfessionalChanges, ProfessionalInput, ProfessionalRecord};

use crate::error::StoreResult;
use crate::models::mongo::{ProfessionalDocument, PROFESSIONALS};

use super::{inserted_object_id, parse_object_id};

/// Midnight UTC of a calendar date, as stored in `dateOfBirth`.
pub fn date_to_bson(date: NaiveDate) -> bson::DateTime {
    bson::DateTime::from_chrono(date.and_time(NaiveTime::MIN).and_utc())
}

pub struct ProfessionalRepo;

impl ProfessionalRepo {
    pub async fn list(db: &Database) -> StoreResult<Vec<ProfessionalRecord>> {
        let cursor = db
            .collection::<ProfessionalDocument>(PROFESSIONALS)
            .find(doc! {})
            .sort(doc! { "lastName": 1, "firstName": 1, "_id": 1 })
            .await?;
        let docs: Vec<ProfessionalDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(ProfessionalRecord::from).collect())
    }

    pub async fn find(db: &Database, id: ObjectId) -> StoreResult<Option<ProfessionalDocument>> {
        Ok(db
            .collection::<ProfessionalDocument>(PROFESSIONALS)
            .find_one(doc! { "_id": id })
            .await?)
    }

    pub async fn create(db: &Database, input: &ProfessionalInput) -> StoreResult<ObjectId> {
        let mut document = doc! {
            "firstName": input.first_name.trim(),
            "lastName": input.last_name.trim(),
            "nationality": &input.nationality,
            "awardsWon": 0_i64,
            "nominations": [],
        };
        if let Some(date) = input.date_of_birth {
            document.insert("dateOfBirth", date_to_bson(date));
        }
        let result = db
            .collection::<Document>(PROFESSIONALS)
            .insert_one(document)
            .await?;
        inserted_object_id(result.inserted_id)
    }

    pub async fn update(
        db: &Database,
        id: &str,
        changes: &ProfessionalChanges,
    ) -> StoreResult<bool> {
        let oid = parse_object_id("professional", id)?;
        let mut set = Document::new();
        if let Some(first) = &changes.first_name {
            set.insert("firstName", first.trim());
        }
        if let Some(last) = &changes.last_name {
            set.insert("lastName", last.trim());
        }
        if let Some(nationality) = &changes.nationality {
            set.insert("nationality", nationality);
        }
        if let Some(date) = changes.date_of_birth {
            set.insert("dateOfBirth", date_to_bson(date));
        }
        let result = db
            .collection::<Document>(PROFESSIONALS)
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn delete(db: &Database, id: &str) -> StoreResult<bool> {
        let oid = parse_object_id("professional", id)?;
        let result = db
            .collection::<Document>(PROFESSIONALS)
            .delete_one(doc! { "_id": oid })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

impl From<ProfessionalDocument> for ProfessionalRecord {
    fn from(p: ProfessionalDocument) -> Self {
        ProfessionalRecord {
            id: p.id.to_hex(),
            first_name: p.first_name,
            last_name: p.last_name,
            nationality: p.nationality.unwrap_or_default(),
            date_of_birth: p.date_of_birth.map(|d| d.to_chrono().date_naive()),
            awards_won: p.awards_won,
            nominations_count: p.nominations.len() as i64,
        }
    }
}
