/// All relational primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Identifier of a record as exposed over the API.
///
/// Each backend has its own identity scheme: an ObjectId hex string for the
/// document store, a `"{title}_{year}"` composite for wide-column movies, and
/// a stringified [`DbId`] for the relational store.
pub type RecordId = String;
