//! Domain crate for the Oscars cross-store analytics service.
//!
//! Holds everything that does not touch a database connection: error and id
//! types, the backend tag, analytical thresholds, director name search, the
//! canonical display shapes, admin DTOs, and the wide-column mutation
//! planner. Both the store adapters and the HTTP layer depend on it.

pub mod analytics;
pub mod backend;
pub mod catalog;
pub mod error;
pub mod nomination;
pub mod search;
pub mod types;
pub mod views;
pub mod wide_column;
