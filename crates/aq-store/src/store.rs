//! The network store: in-memory collections plus the SQLite snapshot.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

use crate::events::CanvasUpdate;
use crate::schema::{NODE_COLUMNS, NodeRecord, PIPE_COLUMNS, PipeEndpoint, PipeRecord, Table};
use crate::{StoreError, StoreResult};

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY,
    name TEXT,
    attr1 TEXT,
    attr2 TEXT,
    attr3 TEXT,
    attr4 TEXT,
    attr5 TEXT,
    pressure REAL,
    head REAL,
    head_known INTEGER,
    inflow REAL,
    inflow_known INTEGER,
    x REAL,
    y REAL
);

CREATE TABLE IF NOT EXISTS pipes (
    id INTEGER PRIMARY KEY,
    name TEXT,
    node1 TEXT,
    node2 TEXT,
    attr1 TEXT,
    attr2 TEXT,
    attr3 TEXT,
    attr4 TEXT,
    attr5 TEXT,
    nominal_diameter REAL,
    internal_diameter REAL,
    length REAL,
    flow REAL,
    flow_direction INTEGER,
    velocity REAL,
    reynolds_number REAL,
    friction_factor REAL,
    n_exp REAL
);
"#;

const INSERT_NODE: &str = "INSERT INTO nodes \
    (id, name, attr1, attr2, attr3, attr4, attr5, pressure, head, head_known, \
     inflow, inflow_known, x, y) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";

const INSERT_PIPE: &str = "INSERT INTO pipes \
    (id, name, node1, node2, attr1, attr2, attr3, attr4, attr5, \
     nominal_diameter, internal_diameter, length, flow, flow_direction, \
     velocity, reynolds_number, friction_factor, n_exp) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, \
            ?15, ?16, ?17, ?18)";

/// Result of a node delete request.
///
/// A connected node is refused, not failed: the record stays and the caller
/// learns why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Connected { pipes: usize },
    Missing,
}

impl DeleteOutcome {
    pub fn removed(self) -> bool {
        self == DeleteOutcome::Removed
    }
}

/// The authoritative node and pipe collections, mirrored to a `.pfh`
/// SQLite snapshot on demand.
#[derive(Debug, Default)]
pub struct NetworkStore {
    nodes: Vec<NodeRecord>,
    pipes: Vec<PipeRecord>,
    path: Option<PathBuf>,
    node_columns: usize,
    pipe_columns: usize,
}

impl NetworkStore {
    /// An empty, unbound store with the declared schema.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            pipes: Vec::new(),
            path: None,
            node_columns: NODE_COLUMNS.len(),
            pipe_columns: PIPE_COLUMNS.len(),
        }
    }

    /// Open a snapshot. No path, or a path that is not an existing file,
    /// yields a fresh empty store; otherwise both tables are read fully
    /// into memory and the path stays bound for later saves.
    pub fn open(path: Option<&Path>) -> StoreResult<Self> {
        let Some(path) = path else {
            return Ok(Self::new());
        };
        if !path.is_file() {
            return Ok(Self::new());
        }

        let conn = Connection::open(path).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let node_columns = declared_columns(&conn, Table::Nodes)?;
        let pipe_columns = declared_columns(&conn, Table::Pipes)?;
        let nodes = read_nodes(&conn)?;
        let pipes = read_pipes(&conn)?;

        tracing::info!(
            path = %path.display(),
            nodes = nodes.len(),
            pipes = pipes.len(),
            "opened network snapshot"
        );

        Ok(Self {
            nodes,
            pipes,
            path: Some(path.to_path_buf()),
            node_columns,
            pipe_columns,
        })
    }

    /// Visual updates that rebuild the drawn scene from scratch: one
    /// `AddNode` per node, then one `AddPipe` per pipe whose endpoint names
    /// both resolve. A pipe with a dangling endpoint is not drawn but stays
    /// in the collection.
    pub fn reload(&self) -> Vec<CanvasUpdate> {
        let mut updates = Vec::with_capacity(self.nodes.len() + self.pipes.len());
        for node in &self.nodes {
            updates.push(CanvasUpdate::AddNode {
                id: node.id,
                x: node.x,
                y: node.y,
            });
        }
        for pipe in &self.pipes {
            match (self.node_by_name(&pipe.node1), self.node_by_name(&pipe.node2)) {
                (Some(n1), Some(n2)) => updates.push(CanvasUpdate::AddPipe {
                    id: pipe.id,
                    x1: n1.x,
                    y1: n1.y,
                    x2: n2.x,
                    y2: n2.y,
                }),
                _ => {
                    tracing::debug!(pipe = pipe.id, "pipe endpoint does not resolve, not drawn");
                }
            }
        }
        updates
    }

    /// Next free id for a table: 1 when empty, max + 1 otherwise. The two
    /// counters are independent.
    pub fn next_id(&self, table: Table) -> i64 {
        let max = match table {
            Table::Nodes => self.nodes.iter().map(|n| n.id).max(),
            Table::Pipes => self.pipes.iter().map(|p| p.id).max(),
        };
        max.map_or(1, |m| m + 1)
    }

    pub fn insert_node(&mut self, x: f64, y: f64) -> i64 {
        let id = self.next_id(Table::Nodes);
        self.nodes.push(NodeRecord::placed(id, x, y));
        id
    }

    pub fn insert_pipe(&mut self, node1: &str, node2: &str) -> i64 {
        let id = self.next_id(Table::Pipes);
        self.pipes.push(PipeRecord::connecting(id, node1, node2));
        id
    }

    /// Remove a node unless a pipe still references its name.
    pub fn delete_node(&mut self, id: i64) -> DeleteOutcome {
        let Some(index) = self.nodes.iter().position(|n| n.id == id) else {
            return DeleteOutcome::Missing;
        };
        let pipes = self.connectivity(id);
        if pipes > 0 {
            return DeleteOutcome::Connected { pipes };
        }
        self.nodes.remove(index);
        DeleteOutcome::Removed
    }

    /// Remove a pipe. No connectivity constraint applies.
    pub fn delete_pipe(&mut self, id: i64) -> bool {
        let before = self.pipes.len();
        self.pipes.retain(|p| p.id != id);
        self.pipes.len() != before
    }

    /// Update a node's canvas position.
    pub fn move_node(&mut self, id: i64, x: f64, y: f64) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        node.x = x;
        node.y = y;
        true
    }

    /// Rename a node. Pipe references are name-based and are deliberately
    /// not rewritten; a rename can orphan pipe endpoints.
    pub fn rename_node(&mut self, id: i64, name: &str) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        node.name = name.to_string();
        true
    }

    /// Point one end of a pipe at a different node name.
    pub fn reconnect_pipe(&mut self, id: i64, end: PipeEndpoint, node_name: &str) -> bool {
        let Some(pipe) = self.pipes.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        match end {
            PipeEndpoint::Node1 => pipe.node1 = node_name.to_string(),
            PipeEndpoint::Node2 => pipe.node2 = node_name.to_string(),
        }
        true
    }

    /// Number of pipes referencing this node's name as either endpoint.
    pub fn connectivity(&self, node_id: i64) -> usize {
        let Some(node) = self.node_by_id(node_id) else {
            return 0;
        };
        self.pipes
            .iter()
            .filter(|p| p.node1 == node.name || p.node2 == node.name)
            .count()
    }

    /// Write the whole store to `path`: any stale file is removed first,
    /// then a fresh database with the declared schema is populated row by
    /// row inside one transaction. On success the store is bound to `path`.
    pub fn save_as(&mut self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        if path.exists() {
            std::fs::remove_file(path).map_err(|e| StoreError::Remove {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let mut conn = Connection::open(path).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let write_err = |e: rusqlite::Error| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        let tx = conn.transaction().map_err(write_err)?;
        tx.execute_batch(CREATE_TABLES).map_err(write_err)?;
        for node in &self.nodes {
            tx.execute(
                INSERT_NODE,
                params![
                    node.id,
                    node.name,
                    node.attr1,
                    node.attr2,
                    node.attr3,
                    node.attr4,
                    node.attr5,
                    node.pressure,
                    node.head,
                    node.head_known,
                    node.inflow,
                    node.inflow_known,
                    node.x,
                    node.y,
                ],
            )
            .map_err(write_err)?;
        }
        for pipe in &self.pipes {
            tx.execute(
                INSERT_PIPE,
                params![
                    pipe.id,
                    pipe.name,
                    pipe.node1,
                    pipe.node2,
                    pipe.attr1,
                    pipe.attr2,
                    pipe.attr3,
                    pipe.attr4,
                    pipe.attr5,
                    pipe.nominal_diameter,
                    pipe.internal_diameter,
                    pipe.length,
                    pipe.flow,
                    pipe.flow_direction,
                    pipe.velocity,
                    pipe.reynolds_number,
                    pipe.friction_factor,
                    pipe.n_exp,
                ],
            )
            .map_err(write_err)?;
        }
        tx.commit().map_err(write_err)?;

        self.path = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            nodes = self.nodes.len(),
            pipes = self.pipes.len(),
            "saved network snapshot"
        );
        Ok(())
    }

    /// Save to the bound path.
    pub fn save(&mut self) -> StoreResult<()> {
        let Some(path) = self.path.clone() else {
            return Err(StoreError::Unbound);
        };
        self.save_as(&path)
    }

    /// Declared column count for a table; re-derived from the file's actual
    /// schema whenever a snapshot is opened.
    pub fn column_count(&self, table: Table) -> usize {
        match table {
            Table::Nodes => self.node_columns,
            Table::Pipes => self.pipe_columns,
        }
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn pipes(&self) -> &[PipeRecord] {
        &self.pipes
    }

    pub fn node_by_id(&self, id: i64) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First node with this name; the reload join uses the same rule, so
    /// duplicated names resolve consistently.
    pub fn node_by_name(&self, name: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn pipe_by_id(&self, id: i64) -> Option<&PipeRecord> {
        self.pipes.iter().find(|p| p.id == id)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.pipes.is_empty()
    }
}

fn declared_columns(conn: &Connection, table: Table) -> StoreResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM pragma_table_info(?1)",
        [table.name()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn read_nodes(conn: &Connection) -> StoreResult<Vec<NodeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, attr1, attr2, attr3, attr4, attr5, pressure, head, \
         head_known, inflow, inflow_known, x, y FROM nodes ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(NodeRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            attr1: row.get(2)?,
            attr2: row.get(3)?,
            attr3: row.get(4)?,
            attr4: row.get(5)?,
            attr5: row.get(6)?,
            pressure: row.get(7)?,
            head: row.get(8)?,
            head_known: row.get(9)?,
            inflow: row.get(10)?,
            inflow_known: row.get(11)?,
            x: row.get(12)?,
            y: row.get(13)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn read_pipes(conn: &Connection) -> StoreResult<Vec<PipeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, node1, node2, attr1, attr2, attr3, attr4, attr5, \
         nominal_diameter, internal_diameter, length, flow, flow_direction, \
         velocity, reynolds_number, friction_factor, n_exp FROM pipes ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(PipeRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            node1: row.get(2)?,
            node2: row.get(3)?,
            attr1: row.get(4)?,
            attr2: row.get(5)?,
            attr3: row.get(6)?,
            attr4: row.get(7)?,
            attr5: row.get(8)?,
            nominal_diameter: row.get(9)?,
            internal_diameter: row.get(10)?,
            length: row.get(11)?,
            flow: row.get(12)?,
            flow_direction: row.get(13)?,
            velocity: row.get(14)?,
            reynolds_number: row.get(15)?,
            friction_factor: row.get(16)?,
            n_exp: row.get(17)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
