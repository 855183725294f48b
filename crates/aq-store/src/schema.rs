//! Record schema for the two persisted tables.
//!
//! The column sets mirror the `.pfh` file format exactly: pipes reference
//! node endpoints by `name`, not by id. The hydraulic columns are persisted
//! placeholders; nothing computes them yet.

use serde::Serialize;

/// The two tables of a network snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Nodes,
    Pipes,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Nodes => "nodes",
            Table::Pipes => "pipes",
        }
    }
}

/// Which end of a pipe a name reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeEndpoint {
    Node1,
    Node2,
}

/// Declared columns of `nodes`, in file order. `x`/`y` are the last two.
pub const NODE_COLUMNS: [&str; 14] = [
    "id",
    "name",
    "attr1",
    "attr2",
    "attr3",
    "attr4",
    "attr5",
    "pressure",
    "head",
    "head_known",
    "inflow",
    "inflow_known",
    "x",
    "y",
];

/// Declared columns of `pipes`, in file order.
pub const PIPE_COLUMNS: [&str; 18] = [
    "id",
    "name",
    "node1",
    "node2",
    "attr1",
    "attr2",
    "attr3",
    "attr4",
    "attr5",
    "nominal_diameter",
    "internal_diameter",
    "length",
    "flow",
    "flow_direction",
    "velocity",
    "reynolds_number",
    "friction_factor",
    "n_exp",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: i64,
    pub name: String,
    pub attr1: String,
    pub attr2: String,
    pub attr3: String,
    pub attr4: String,
    pub attr5: String,
    pub pressure: f64,
    pub head: f64,
    pub head_known: bool,
    pub inflow: f64,
    pub inflow_known: bool,
    pub x: f64,
    pub y: f64,
}

impl NodeRecord {
    /// A freshly placed node: every non-positional field at its zero/empty
    /// sentinel.
    pub fn placed(id: i64, x: f64, y: f64) -> Self {
        Self {
            id,
            name: String::new(),
            attr1: String::new(),
            attr2: String::new(),
            attr3: String::new(),
            attr4: String::new(),
            attr5: String::new(),
            pressure: 0.0,
            head: 0.0,
            head_known: false,
            inflow: 0.0,
            inflow_known: false,
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeRecord {
    pub id: i64,
    pub name: String,
    pub node1: String,
    pub node2: String,
    pub attr1: String,
    pub attr2: String,
    pub attr3: String,
    pub attr4: String,
    pub attr5: String,
    pub nominal_diameter: f64,
    pub internal_diameter: f64,
    pub length: f64,
    pub flow: f64,
    pub flow_direction: i64,
    pub velocity: f64,
    pub reynolds_number: f64,
    pub friction_factor: f64,
    pub n_exp: f64,
}

impl PipeRecord {
    /// A freshly drawn pipe between two node names; everything else at its
    /// zero/empty sentinel.
    pub fn connecting(id: i64, node1: &str, node2: &str) -> Self {
        Self {
            id,
            name: String::new(),
            node1: node1.to_string(),
            node2: node2.to_string(),
            attr1: String::new(),
            attr2: String::new(),
            attr3: String::new(),
            attr4: String::new(),
            attr5: String::new(),
            nominal_diameter: 0.0,
            internal_diameter: 0.0,
            length: 0.0,
            flow: 0.0,
            flow_direction: 0,
            velocity: 0.0,
            reynolds_number: 0.0,
            friction_factor: 0.0,
            n_exp: 0.0,
        }
    }

    pub fn endpoint(&self, end: PipeEndpoint) -> &str {
        match end {
            PipeEndpoint::Node1 => &self.node1,
            PipeEndpoint::Node2 => &self.node2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_column_counts() {
        assert_eq!(NODE_COLUMNS.len(), 14);
        assert_eq!(PIPE_COLUMNS.len(), 18);
        assert_eq!(NODE_COLUMNS[12], "x");
        assert_eq!(NODE_COLUMNS[13], "y");
    }

    #[test]
    fn placed_node_is_blank_except_position() {
        let node = NodeRecord::placed(3, 10.0, 20.0);
        assert_eq!(node.id, 3);
        assert_eq!(node.name, "");
        assert_eq!(node.pressure, 0.0);
        assert!(!node.head_known);
        assert_eq!((node.x, node.y), (10.0, 20.0));
    }
}
