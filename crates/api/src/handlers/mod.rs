pub mod analytics;
pub mod movies;
pub mod nominations;
pub mod panels;
pub mod professionals;

use oscars_core::backend::Backend;
use oscars_db::DataStore;

use crate::error::AppResult;
use crate::state::AppState;

/// Resolve the `{backend}` path segment to its store adapter.
pub(crate) fn store_for<'a>(state: &'a AppState, backend: &str) -> AppResult<&'a dyn DataStore> {
    let backend: Backend = backend.parse()?;
    Ok(state.stores.get(backend).as_ref())
}
