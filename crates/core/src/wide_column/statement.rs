//! Backend-neutral CQL statements produced by the planner.

use chrono::NaiveDate;

use super::snapshot::NominationEntryCell;
use super::Table;

/// A bound value. The store adapter converts these into driver values.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Int(i32),
    Bool(bool),
    Date(NaiveDate),
    TextList(Vec<String>),
    Entries(Vec<NominationEntryCell>),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        value.map_or(CellValue::Null, CellValue::text)
    }

    pub fn opt_date(value: Option<NaiveDate>) -> Self {
        value.map_or(CellValue::Null, CellValue::Date)
    }

    pub fn list_of(item: impl Into<String>) -> Self {
        CellValue::TextList(vec![item.into()])
    }
}

/// Right-hand side of an `UPDATE ... SET`.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// `col = ?`
    Set(&'static str, CellValue),
    /// `col = col + ?` on a list column.
    Append(&'static str, CellValue),
    /// `col = col - ?` on a list column.
    Remove(&'static str, CellValue),
}

impl Assignment {
    pub fn column(&self) -> &'static str {
        match self {
            Assignment::Set(c, _) | Assignment::Append(c, _) | Assignment::Remove(c, _) => c,
        }
    }

    fn value(&self) -> &CellValue {
        match self {
            Assignment::Set(_, v) | Assignment::Append(_, v) | Assignment::Remove(_, v) => v,
        }
    }
}

/// One statement of a planned batch. Column lists keep the order in which
/// they were given, so the rendered CQL is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert {
        table: Table,
        columns: Vec<(&'static str, CellValue)>,
    },
    Update {
        table: Table,
        assignments: Vec<Assignment>,
        key: Vec<(&'static str, CellValue)>,
    },
    /// Deleting with a key prefix removes a whole partition or slice.
    Delete {
        table: Table,
        key: Vec<(&'static str, CellValue)>,
    },
}

impl Statement {
    pub fn table(&self) -> Table {
        match self {
            Statement::Insert { table, .. }
            | Statement::Update { table, .. }
            | Statement::Delete { table, .. } => *table,
        }
    }

    /// Render as CQL with `?` markers, plus the values in marker order.
    pub fn to_cql(&self, keyspace: &str) -> (String, Vec<CellValue>) {
        match self {
            Statement::Insert { table, columns } => {
                let names: Vec<&str> = columns.iter().map(|(c, _)| *c).collect();
                let markers = vec!["?"; columns.len()].join(", ");
                let cql = format!(
                    "INSERT INTO {keyspace}.{table} ({}) VALUES ({markers})",
                    names.join(", ")
                );
                (cql, columns.iter().map(|(_, v)| v.clone()).collect())
            }
            Statement::Update {
                table,
                assignments,
                key,
            } => {
                let sets: Vec<String> = assignments
                    .iter()
                    .map(|a| match a {
                        Assignment::Set(c, _) => format!("{c} = ?"),
                        Assignment::Append(c, _) => format!("{c} = {c} + ?"),
                        Assignment::Remove(c, _) => format!("{c} = {c} - ?"),
                    })
                    .collect();
                let cql = format!(
                    "UPDATE {keyspace}.{table} SET {} WHERE {}",
                    sets.join(", "),
                    where_clause(key)
                );
                let values = assignments
                    .iter()
                    .map(|a| a.value().clone())
                    .chain(key.iter().map(|(_, v)| v.clone()))
                    .collect();
                (cql, values)
            }
            Statement::Delete { table, key } => {
                let cql = format!("DELETE FROM {keyspace}.{table} WHERE {}", where_clause(key));
                (cql, key.iter().map(|(_, v)| v.clone()).collect())
            }
        }
    }
}

fn where_clause(key: &[(&'static str, CellValue)]) -> String {
    key.iter()
        .map(|(c, _)| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(" AND ")
}
