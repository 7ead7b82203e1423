//! Admin catalog payloads and their validation.
//!
//! These are the write-side shapes accepted by every backend's
//! `CatalogStore`, and the list records returned to the admin screens.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::nomination::NominationResult;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of a movie title.
pub const MAX_TITLE_LEN: usize = 300;

/// Maximum length of a first or last name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a synopsis.
pub const MAX_SYNOPSIS_LEN: usize = 5_000;

/// Earliest release year eligible for the first ceremony.
pub const MIN_YEAR: i32 = 1927;

/// Upper bound on release years accepted by the admin screens.
pub const MAX_YEAR: i32 = 2100;

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// Payload for creating a movie.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub synopsis: String,
}

/// Partial update of a movie. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
}

impl MovieChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.year.is_none() && self.genre.is_none() && self.synopsis.is_none()
    }
}

/// A movie as listed by the admin screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: RecordId,
    pub title: String,
    /// Not every wide-column access-pattern table stores the year.
    pub year: Option<i32>,
    pub genre: String,
    pub synopsis: String,
    pub awards_won: i64,
    pub nominations_count: i64,
    /// Vote count, only known by stores that keep a vote tally per movie.
    pub votes: Option<i64>,
    pub categories: Vec<String>,
}

// ---------------------------------------------------------------------------
// Professionals
// ---------------------------------------------------------------------------

/// Payload for creating a professional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProfessionalInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub nationality: String,
    pub date_of_birth: Option<NaiveDate>,
}

impl ProfessionalInput {
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

/// Partial update of a professional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProfessionalChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl ProfessionalChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.nationality.is_none()
            && self.date_of_birth.is_none()
    }

    pub fn renames(&self) -> bool {
        self.first_name.is_some() || self.last_name.is_some()
    }
}

/// A professional as listed by the admin screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalRecord {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub date_of_birth: Option<NaiveDate>,
    pub awards_won: i64,
    pub nominations_count: i64,
}

// ---------------------------------------------------------------------------
// Nominations
// ---------------------------------------------------------------------------

/// Payload for recording a nomination of a movie (and optionally a
/// professional) in a category.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NominationInput {
    pub movie_id: RecordId,
    pub category: String,
    pub year: i32,
    #[serde(default)]
    pub result: NominationResult,
    pub professional_id: Option<RecordId>,
}

/// The only mutable part of a nomination is its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NominationChanges {
    pub result: NominationResult,
}

// ---------------------------------------------------------------------------
// Acknowledgement
// ---------------------------------------------------------------------------

/// Response of a mutation that does not echo the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationAck {
    pub success: bool,
    pub id: RecordId,
}

impl MutationAck {
    pub fn ok(id: impl Into<RecordId>) -> Self {
        Self {
            success: true,
            id: id.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Join first and last name with a single space, skipping an empty part.
pub fn join_name(first: &str, last: &str) -> String {
    match (first.trim(), last.trim()) {
        ("", last) => last.to_string(),
        (first, "") => first.to_string(),
        (first, last) => format!("{first} {last}"),
    }
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if trimmed.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), CoreError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(())
}

fn validate_synopsis(synopsis: &str) -> Result<(), CoreError> {
    if synopsis.len() > MAX_SYNOPSIS_LEN {
        return Err(CoreError::Validation(format!(
            "Synopsis must be at most {MAX_SYNOPSIS_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_name_part(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Category names become part of wide-column keys, so the key separator is
/// not allowed in them.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    validate_name_part("Category", category)?;
    if category.contains('|') {
        return Err(CoreError::Validation(
            "Category must not contain '|'".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_movie_input(input: &MovieInput) -> Result<(), CoreError> {
    validate_title(&input.title)?;
    validate_year(input.year)?;
    validate_synopsis(&input.synopsis)
}

pub fn validate_movie_changes(changes: &MovieChanges) -> Result<(), CoreError> {
    if changes.is_empty() {
        return Err(CoreError::Validation("No fields to update".to_string()));
    }
    if let Some(title) = &changes.title {
        validate_title(title)?;
    }
    if let Some(year) = changes.year {
        validate_year(year)?;
    }
    if let Some(synopsis) = &changes.synopsis {
        validate_synopsis(synopsis)?;
    }
    Ok(())
}

pub fn validate_professional_input(input: &ProfessionalInput) -> Result<(), CoreError> {
    validate_name_part("First name", &input.first_name)?;
    validate_name_part("Last name", &input.last_name)
}

pub fn validate_professional_changes(changes: &ProfessionalChanges) -> Result<(), CoreError> {
    if changes.is_empty() {
        return Err(CoreError::Validation("No fields to update".to_string()));
    }
    if let Some(first) = &changes.first_name {
        validate_name_part("First name", first)?;
    }
    if let Some(last) = &changes.last_name {
        validate_name_part("Last name", last)?;
    }
    Ok(())
}

pub fn validate_nomination_input(input: &NominationInput) -> Result<(), CoreError> {
    if input.movie_id.trim().is_empty() {
        return Err(CoreError::Validation("Movie id must not be empty".to_string()));
    }
    validate_category(&input.category)?;
    validate_year(input.year)
}
