//! Shared session handle, statement execution and schema bootstrap.

use oscars_core::wide_column::{CellValue, NominationEntryCell, Statement};
use scylla::batch::{Batch, BatchType};
use scylla::deserialize::DeserializeRow;
use scylla::frame::response::result::CqlValue;
use scylla::query::Query;
use scylla::serialize::row::SerializeRow;
use scylla::{Session, SessionBuilder};

use crate::error::StoreResult;

/// Keyspace name used in `db/cql/schema.cql`.
const SCHEMA_KEYSPACE: &str = "oscars";

/// Name of the user-defined type backing `CellValue::Entries`.
const ENTRY_TYPE: &str = "nomination_entry";

/// A connected session bound to one keyspace. Statements are always written
/// fully qualified (`keyspace.table`).
pub struct CqlSession {
    session: Session,
    keyspace: String,
}

impl CqlSession {
    pub async fn connect(nodes: &[String], keyspace: &str) -> StoreResult<Self> {
        let session = SessionBuilder::new().known_nodes(nodes).build().await?;
        Ok(Self {
            session,
            keyspace: keyspace.to_string(),
        })
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    /// `keyspace.table`.
    pub fn table(&self, table: &str) -> String {
        format!("{}.{table}", self.keyspace)
    }

    /// Run a query and decode every row by column name.
    pub async fn fetch<R>(&self, cql: String, values: impl SerializeRow) -> StoreResult<Vec<R>>
    where
        R: for<'frame, 'metadata> DeserializeRow<'frame, 'metadata>,
    {
        let result = self.session.query_unpaged(cql, values).await?;
        let rows = result.into_rows_result()?;
        let decoded = rows.rows::<R>()?.collect::<Result<Vec<R>, _>>()?;
        Ok(decoded)
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.session
            .query_unpaged("SELECT release_version FROM system.local", ())
            .await?;
        Ok(())
    }

    /// Execute planned statements as one logged batch. An empty plan is a
    /// no-op.
    pub async fn run_plan(&self, statements: Vec<Statement>) -> StoreResult<()> {
        if statements.is_empty() {
            tracing::debug!("Nothing to write");
            return Ok(());
        }
        let mut batch = Batch::new(BatchType::Logged);
        let mut values: Vec<Vec<Option<CqlValue>>> = Vec::with_capacity(statements.len());
        for statement in &statements {
            let (cql, cells) = statement.to_cql(&self.keyspace);
            tracing::debug!(table = %statement.table(), cql = %cql, "Planned statement");
            batch.append_statement(Query::new(cql));
            values.push(
                cells
                    .into_iter()
                    .map(|c| to_cql_value(c, &self.keyspace))
                    .collect(),
            );
        }
        self.session.batch(&batch, values).await?;
        tracing::info!(statements = statements.len(), "Wide-column batch applied");
        Ok(())
    }

    /// Create the keyspace, types and tables if they do not exist.
    pub async fn apply_schema(&self, schema: &str) -> StoreResult<()> {
        for statement in schema_statements(schema, &self.keyspace) {
            self.session.query_unpaged(statement, ()).await?;
        }
        tracing::info!(keyspace = %self.keyspace, "CQL schema applied");
        Ok(())
    }
}

/// Split a schema file into statements, dropping `--` comment lines and
/// renaming the keyspace.
pub fn schema_statements(schema: &str, keyspace: &str) -> Vec<String> {
    let stripped: String = schema
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");
    stripped
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.replace(
                &format!("EXISTS {SCHEMA_KEYSPACE}"),
                &format!("EXISTS {keyspace}"),
            )
        })
        .collect()
}

fn text(value: Option<String>) -> Option<CqlValue> {
    value.map(CqlValue::Text)
}

fn entry_value(entry: NominationEntryCell, keyspace: &str) -> CqlValue {
    CqlValue::UserDefinedType {
        keyspace: keyspace.to_string(),
        type_name: ENTRY_TYPE.to_string(),
        fields: vec![
            ("category".to_string(), text(entry.category)),
            ("year".to_string(), entry.year.map(CqlValue::Int)),
            ("result".to_string(), text(entry.result)),
            ("movie".to_string(), text(entry.movie)),
        ],
    }
}

/// Bind value for a planned cell. `Null` binds as an unset-to-null column.
pub fn to_cql_value(cell: CellValue, keyspace: &str) -> Option<CqlValue> {
    match cell {
        CellValue::Null => None,
        CellValue::Text(s) => Some(CqlValue::Text(s)),
        CellValue::Int(i) => Some(CqlValue::Int(i)),
        CellValue::Bool(b) => Some(CqlValue::Boolean(b)),
        CellValue::Date(d) => Some(CqlValue::Date(d.into())),
        CellValue::TextList(items) => Some(CqlValue::List(
            items.into_iter().map(CqlValue::Text).collect(),
        )),
        CellValue::Entries(entries) => Some(CqlValue::List(
            entries
                .into_iter()
                .map(|e| entry_value(e, keyspace))
                .collect(),
        )),
    }
}
