//! Drawn-shape index and hit-testing.
//!
//! The index is the retained picture of the canvas: node markers of fixed
//! radius and pipe segments between marker centers. The rendering surface
//! paints from it every frame; the router hit-tests against it.

use aq_core::geom::{Point, dist_to_segment};
use aq_store::CanvasUpdate;

/// Radius of node markers, in canvas pixels.
pub const NODE_RADIUS: f64 = 8.0;

/// Pick tolerance around pipe segments, in canvas pixels.
pub const PIPE_PICK_TOLERANCE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeTag {
    Node(i64),
    Pipe(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMarker {
    pub id: i64,
    pub center: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSegment {
    pub id: i64,
    /// Endpoint at the pipe's `node1`.
    pub a: Point,
    /// Endpoint at the pipe's `node2`.
    pub b: Point,
}

#[derive(Debug, Default)]
pub struct ShapeIndex {
    nodes: Vec<NodeMarker>,
    pipes: Vec<PipeSegment>,
}

impl ShapeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: &CanvasUpdate) {
        match *update {
            CanvasUpdate::Clear => self.clear(),
            CanvasUpdate::AddNode { id, x, y } => self.nodes.push(NodeMarker {
                id,
                center: Point::new(x, y),
            }),
            CanvasUpdate::RemoveNode { id } => self.nodes.retain(|n| n.id != id),
            CanvasUpdate::AddPipe { id, x1, y1, x2, y2 } => self.pipes.push(PipeSegment {
                id,
                a: Point::new(x1, y1),
                b: Point::new(x2, y2),
            }),
            CanvasUpdate::RemovePipe { id } => self.pipes.retain(|p| p.id != id),
        }
    }

    pub fn apply_all(&mut self, updates: &[CanvasUpdate]) {
        for update in updates {
            self.apply(update);
        }
    }

    /// Top-most shape under `at`. Node markers are drawn above pipe
    /// segments, so they always win; within a kind, the most recently
    /// drawn shape wins.
    pub fn hit_test(&self, at: Point) -> Option<ShapeTag> {
        if let Some(marker) = self
            .nodes
            .iter()
            .rev()
            .find(|n| n.center.dist(at) <= NODE_RADIUS)
        {
            return Some(ShapeTag::Node(marker.id));
        }
        self.pipes
            .iter()
            .rev()
            .find(|p| dist_to_segment(at, p.a, p.b) <= PIPE_PICK_TOLERANCE)
            .map(|p| ShapeTag::Pipe(p.id))
    }

    pub fn node_marker(&self, id: i64) -> Option<&NodeMarker> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn pipe_segment(&self, id: i64) -> Option<&PipeSegment> {
        self.pipes.iter().find(|p| p.id == id)
    }

    /// Markers in draw order (oldest first).
    pub fn nodes(&self) -> &[NodeMarker] {
        &self.nodes
    }

    /// Segments in draw order (oldest first). Paint these before the
    /// markers so nodes sit on top.
    pub fn pipes(&self) -> &[PipeSegment] {
        &self.pipes
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.pipes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.pipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_node(index: &mut ShapeIndex, id: i64, x: f64, y: f64) {
        index.apply(&CanvasUpdate::AddNode { id, x, y });
    }

    #[test]
    fn node_hit_within_radius() {
        let mut index = ShapeIndex::new();
        add_node(&mut index, 1, 100.0, 100.0);

        assert_eq!(
            index.hit_test(Point::new(105.0, 100.0)),
            Some(ShapeTag::Node(1))
        );
        assert_eq!(index.hit_test(Point::new(120.0, 100.0)), None);
    }

    #[test]
    fn node_wins_over_pipe() {
        let mut index = ShapeIndex::new();
        index.apply(&CanvasUpdate::AddPipe {
            id: 7,
            x1: 0.0,
            y1: 100.0,
            x2: 200.0,
            y2: 100.0,
        });
        add_node(&mut index, 1, 100.0, 100.0);

        // The segment passes straight under the marker.
        assert_eq!(
            index.hit_test(Point::new(100.0, 100.0)),
            Some(ShapeTag::Node(1))
        );
        assert_eq!(
            index.hit_test(Point::new(30.0, 101.0)),
            Some(ShapeTag::Pipe(7))
        );
    }

    #[test]
    fn topmost_node_wins_among_overlaps() {
        let mut index = ShapeIndex::new();
        add_node(&mut index, 1, 100.0, 100.0);
        add_node(&mut index, 2, 104.0, 100.0);

        assert_eq!(
            index.hit_test(Point::new(102.0, 100.0)),
            Some(ShapeTag::Node(2))
        );
    }

    #[test]
    fn remove_updates_hits() {
        let mut index = ShapeIndex::new();
        add_node(&mut index, 1, 50.0, 50.0);
        index.apply(&CanvasUpdate::RemoveNode { id: 1 });
        assert_eq!(index.hit_test(Point::new(50.0, 50.0)), None);
        assert!(index.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut index = ShapeIndex::new();
        add_node(&mut index, 1, 0.0, 0.0);
        index.apply(&CanvasUpdate::AddPipe {
            id: 1,
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        });
        index.apply(&CanvasUpdate::Clear);
        assert!(index.is_empty());
    }
}
