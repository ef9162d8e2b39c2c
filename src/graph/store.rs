//! SQLite-backed graph store.
//!
//! Uses `rusqlite` with `prepare_cached` for automatic statement caching.
//! The store is the host graph for the path search: it implements
//! [`GraphAccessor`] over its `edges` table, enumerating a vertex's
//! outgoing edges in row-id (insertion) order.

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::converters::{row_to_stored_edge, row_to_stored_vertex};
use crate::db::schema::initialize_database;
use crate::error::Result;
use crate::graph::accessor::GraphAccessor;
use crate::graph::document::{json_properties, GraphDocument};
use crate::types::{properties_to_json, Properties, PropertyValue, StoredEdge, StoredVertex};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Aggregate statistics about the stored graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub vertices: usize,
    pub edges: usize,
}

/// Row counts written by [`GraphStore::import_document`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub vertices: usize,
    pub edges: usize,
}

// ---------------------------------------------------------------------------
// GraphStore
// ---------------------------------------------------------------------------

/// Typed wrapper around the graph SQLite database.
pub struct GraphStore {
    pub conn: Connection,
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// SQL constants
// ---------------------------------------------------------------------------

const UPSERT_VERTEX_SQL: &str = "\
INSERT INTO vertices (id, label, properties)
VALUES (?1, ?2, ?3)
ON CONFLICT(id) DO UPDATE SET
  label = excluded.label,
  properties = excluded.properties";

const ENSURE_VERTEX_SQL: &str = "\
INSERT OR IGNORE INTO vertices (id, label, properties) VALUES (?1, NULL, NULL)";

const INSERT_EDGE_SQL: &str = "\
INSERT INTO edges (source_id, target_id, type, properties)
VALUES (?1, ?2, ?3, ?4)";

const OUT_EDGES_SQL: &str = "\
SELECT * FROM edges WHERE source_id = ?1 ORDER BY id ASC";

impl GraphStore {
    /// Open (or create) the database at `db_path`, apply the schema, and
    /// return a ready-to-use store.
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = initialize_database(db_path)?;
        tracing::info!(path = db_path, "opened graph store");
        Ok(Self { conn })
    }

    /// Wrap an already-open connection. Useful in tests where the caller
    /// has already called `initialize_database(":memory:")`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    // -------------------------------------------------------------------
    // Single-row mutations
    // -------------------------------------------------------------------

    /// Insert or update a vertex.
    pub fn upsert_vertex(&self, id: &str, label: Option<&str>, properties: &Properties) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(UPSERT_VERTEX_SQL)?;
        stmt.execute(params![id, label, properties_to_json(properties)])?;
        Ok(())
    }

    /// Insert a directed edge, registering bare endpoint vertices if they
    /// are not stored yet. Returns the new edge id.
    pub fn insert_edge(
        &self,
        source: &str,
        target: &str,
        kind: &str,
        properties: &Properties,
    ) -> Result<i64> {
        let mut ensure = self.conn.prepare_cached(ENSURE_VERTEX_SQL)?;
        ensure.execute(params![source])?;
        ensure.execute(params![target])?;
        let mut stmt = self.conn.prepare_cached(INSERT_EDGE_SQL)?;
        stmt.execute(params![source, target, kind, properties_to_json(properties)])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Convenience for an edge with a single `weight` property.
    pub fn insert_weighted_edge(
        &self,
        source: &str,
        target: &str,
        weight: impl Into<PropertyValue>,
    ) -> Result<i64> {
        let mut props = Properties::new();
        props.insert("weight".to_string(), weight.into());
        self.insert_edge(source, target, "REL", &props)
    }

    // -------------------------------------------------------------------
    // Batch mutations (transactional)
    // -------------------------------------------------------------------

    /// Load a whole document inside one transaction. Vertices are upserted;
    /// edges are appended, so importing the same document twice doubles its
    /// edges.
    pub fn import_document(&self, doc: &GraphDocument) -> Result<ImportSummary> {
        doc.validate()?;
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut upsert = tx.prepare_cached(UPSERT_VERTEX_SQL)?;
            for vertex in &doc.vertices {
                upsert.execute(params![
                    vertex.id.to_string(),
                    vertex.label,
                    properties_to_json(&json_properties(&vertex.properties)),
                ])?;
            }
            let mut ensure = tx.prepare_cached(ENSURE_VERTEX_SQL)?;
            let mut insert = tx.prepare_cached(INSERT_EDGE_SQL)?;
            for edge in &doc.edges {
                let source = edge.source.to_string();
                let target = edge.target.to_string();
                ensure.execute(params![source])?;
                ensure.execute(params![target])?;
                insert.execute(params![
                    source,
                    target,
                    edge.kind,
                    properties_to_json(&json_properties(&edge.properties)),
                ])?;
            }
        }
        tx.commit()?;
        let summary = ImportSummary {
            vertices: doc.vertices.len(),
            edges: doc.edges.len(),
        };
        tracing::info!(
            vertices = summary.vertices,
            edges = summary.edges,
            "imported graph document"
        );
        Ok(summary)
    }

    // -------------------------------------------------------------------
    // Queries: single lookups
    // -------------------------------------------------------------------

    pub fn get_vertex(&self, id: &str) -> Result<Option<StoredVertex>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT * FROM vertices WHERE id = ?1")?;
        stmt.query_row(params![id], |row| Ok(row_to_stored_vertex(row)))
            .optional()?
            .transpose()
    }

    pub fn contains_vertex(&self, id: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT count(*) FROM vertices WHERE id = ?1")?;
        let count: i64 = stmt.query_row(params![id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Outgoing edges of `vertex_id`, oldest first.
    pub fn get_out_edges(&self, vertex_id: &str) -> Result<Vec<StoredEdge>> {
        let mut stmt = self.conn.prepare_cached(OUT_EDGES_SQL)?;
        let rows = stmt.query_and_then(params![vertex_id], row_to_stored_edge)?;
        rows.collect()
    }

    // -------------------------------------------------------------------
    // Queries: aggregate counts
    // -------------------------------------------------------------------

    pub fn get_vertex_count(&self) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached("SELECT count(*) FROM vertices")?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn get_edge_count(&self) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached("SELECT count(*) FROM edges")?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn get_stats(&self) -> Result<GraphStats> {
        Ok(GraphStats {
            vertices: self.get_vertex_count()?,
            edges: self.get_edge_count()?,
        })
    }
}

impl GraphAccessor for GraphStore {
    type Vertex = String;
    type Edge = StoredEdge;

    fn outgoing_edges(&self, vertex: &String) -> Result<Vec<StoredEdge>> {
        self.get_out_edges(vertex)
    }

    fn target(&self, edge: &StoredEdge) -> String {
        edge.target.clone()
    }

    fn edge_property(&self, edge: &StoredEdge, key: &str) -> Option<PropertyValue> {
        edge.properties.get(key).cloned()
    }

    fn describe_edge(&self, edge: &StoredEdge) -> String {
        edge.describe()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
