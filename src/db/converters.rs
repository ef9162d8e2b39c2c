//! Row-to-struct converters for the `vertices` and `edges` tables.
//!
//! Written against column names rather than positions so `SELECT *` keeps
//! working if columns are appended.

use rusqlite::Row;

use crate::error::Result;
use crate::types::{properties_from_json, StoredEdge, StoredVertex};

pub fn row_to_stored_vertex(row: &Row<'_>) -> Result<StoredVertex> {
    let raw: Option<String> = row.get("properties")?;
    Ok(StoredVertex {
        id: row.get("id")?,
        label: row.get("label")?,
        properties: properties_from_json(raw.as_deref())?,
    })
}

pub fn row_to_stored_edge(row: &Row<'_>) -> Result<StoredEdge> {
    let raw: Option<String> = row.get("properties")?;
    Ok(StoredEdge {
        id: row.get("id")?,
        source: row.get("source_id")?,
        target: row.get("target_id")?,
        kind: row.get("type")?,
        properties: properties_from_json(raw.as_deref())?,
    })
}
