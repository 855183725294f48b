//! Visual updates the rendering surface applies.
//!
//! `NetworkStore::reload` emits these to rebuild the drawn scene; the click
//! router emits them incrementally as records are placed and removed.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasUpdate {
    /// Drop every drawn shape before a full rebuild.
    Clear,
    AddNode {
        id: i64,
        x: f64,
        y: f64,
    },
    RemoveNode {
        id: i64,
    },
    AddPipe {
        id: i64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    RemovePipe {
        id: i64,
    },
}
