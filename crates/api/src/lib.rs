pub mod config;
pub mod error;
pub mod handlers;
pub mod panels;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
