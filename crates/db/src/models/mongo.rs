//! Document models for the `movies`, `professionals` and `votes` collections.

use bson::oid::ObjectId;
use bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize, Serializer};

pub const MOVIES: &str = "movies";
pub const PROFESSIONALS: &str = "professionals";
pub const VOTES: &str = "votes";

/// Nomination embedded in a movie document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieNomination {
    pub category_id: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDocument {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub awards_won: i64,
    #[serde(default)]
    pub nominations: Vec<MovieNomination>,
}

/// Nomination embedded in a professional document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalNomination {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub award_id: Option<String>,
    #[serde(default)]
    pub movie: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalDocument {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default, serialize_with = "serialize_opt_datetime")]
    pub date_of_birth: Option<bson::DateTime>,
    #[serde(default)]
    pub awards_won: i64,
    #[serde(default)]
    pub nominations: Vec<ProfessionalNomination>,
}

/// Output of the vote aggregation: total votes per movie title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    #[serde(rename = "_id")]
    pub movie: String,
    pub votes: i64,
    #[serde(default)]
    pub category: Option<String>,
}

fn serialize_opt_datetime<S: Serializer>(
    value: &Option<bson::DateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_some(&dt.to_chrono().date_naive()),
        None => serializer.serialize_none(),
    }
}
