//! Click routing: the tool active at click time decides what happens.

use aq_core::geom::Point;
use aq_store::{CanvasUpdate, DeleteOutcome, NetworkStore, PipeEndpoint};

use crate::mode::{ModeController, NodeTool, PipeTool, Tool};
use crate::shapes::{ShapeIndex, ShapeTag};

/// An in-progress multi-click gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    PipeStart { node_id: i64 },
    MoveStart { node_id: i64 },
    ReconnectStart { pipe_id: i64, end: PipeEndpoint },
}

impl Gesture {
    fn belongs_to(self, tool: Tool) -> bool {
        matches!(
            (self, tool),
            (Gesture::PipeStart { .. }, Tool::Pipe(PipeTool::Add))
                | (Gesture::MoveStart { .. }, Tool::Node(NodeTool::Move))
                | (Gesture::ReconnectStart { .. }, Tool::Pipe(PipeTool::Reconnect))
        )
    }
}

/// Routes pointer clicks into store mutations and shape-index updates.
///
/// Within one click the store mutation and the matching visual change both
/// happen (or neither does); the returned updates have already been applied
/// to the shape index and are informational for the caller.
#[derive(Debug, Default)]
pub struct EventRouter {
    pending: Option<Gesture>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a pipe-add gesture has recorded its start endpoint.
    pub fn is_drawing(&self) -> bool {
        matches!(self.pending, Some(Gesture::PipeStart { .. }))
    }

    pub fn pending_pipe_start(&self) -> Option<i64> {
        match self.pending {
            Some(Gesture::PipeStart { node_id }) => Some(node_id),
            _ => None,
        }
    }

    pub fn pending_move_node(&self) -> Option<i64> {
        match self.pending {
            Some(Gesture::MoveStart { node_id }) => Some(node_id),
            _ => None,
        }
    }

    pub fn pending_reconnect_pipe(&self) -> Option<i64> {
        match self.pending {
            Some(Gesture::ReconnectStart { pipe_id, .. }) => Some(pipe_id),
            _ => None,
        }
    }

    pub fn cancel_gesture(&mut self) {
        self.pending = None;
    }

    pub fn on_primary_click(
        &mut self,
        modes: &ModeController,
        store: &mut NetworkStore,
        shapes: &mut ShapeIndex,
        at: Point,
    ) -> Vec<CanvasUpdate> {
        let tool = modes.tool();

        // A gesture armed under a different tool is stale.
        if let Some(pending) = self.pending
            && !pending.belongs_to(tool)
        {
            self.pending = None;
        }

        let mut updates = Vec::new();
        match tool {
            Tool::Select => {
                // Hit-testing only; selection highlighting is not built.
                let _ = shapes.hit_test(at);
            }

            Tool::Node(NodeTool::Add) => {
                let id = store.insert_node(at.x, at.y);
                push(shapes, &mut updates, CanvasUpdate::AddNode { id, x: at.x, y: at.y });
            }

            Tool::Node(NodeTool::Delete) => {
                if let Some(ShapeTag::Node(id)) = shapes.hit_test(at) {
                    match store.delete_node(id) {
                        DeleteOutcome::Removed => {
                            push(shapes, &mut updates, CanvasUpdate::RemoveNode { id });
                        }
                        DeleteOutcome::Connected { pipes } => {
                            tracing::debug!(node = id, pipes, "delete refused, node still connected");
                        }
                        DeleteOutcome::Missing => {
                            tracing::debug!(node = id, "marker without record, nothing deleted");
                        }
                    }
                }
            }

            Tool::Node(NodeTool::Move) => match self.pending {
                None => {
                    if let Some(ShapeTag::Node(id)) = shapes.hit_test(at) {
                        self.pending = Some(Gesture::MoveStart { node_id: id });
                    }
                }
                Some(Gesture::MoveStart { node_id }) => {
                    self.pending = None;
                    if store.move_node(node_id, at.x, at.y) {
                        rebuild(store, shapes, &mut updates);
                    }
                }
                Some(_) => {}
            },

            Tool::Pipe(PipeTool::Add) => match (self.pending_pipe_start(), shapes.hit_test(at)) {
                (None, Some(ShapeTag::Node(id))) => {
                    self.pending = Some(Gesture::PipeStart { node_id: id });
                }
                (Some(start), Some(ShapeTag::Node(id))) if id != start => {
                    let names = store
                        .node_by_id(start)
                        .map(|n| n.name.clone())
                        .zip(store.node_by_id(id).map(|n| n.name.clone()));
                    let ends = shapes
                        .node_marker(start)
                        .map(|m| m.center)
                        .zip(shapes.node_marker(id).map(|m| m.center));
                    if let (Some((name1, name2)), Some((a, b))) = (names, ends) {
                        let pipe = store.insert_pipe(&name1, &name2);
                        push(
                            shapes,
                            &mut updates,
                            CanvasUpdate::AddPipe {
                                id: pipe,
                                x1: a.x,
                                y1: a.y,
                                x2: b.x,
                                y2: b.y,
                            },
                        );
                    }
                    self.pending = None;
                }
                // Same marker or empty space: the gesture stays armed; an
                // empty click before the gesture starts is a no-op.
                _ => {}
            },

            Tool::Pipe(PipeTool::Delete) => {
                if let Some(ShapeTag::Pipe(id)) = shapes.hit_test(at)
                    && store.delete_pipe(id)
                {
                    push(shapes, &mut updates, CanvasUpdate::RemovePipe { id });
                }
            }

            Tool::Pipe(PipeTool::Reconnect) => {
                match (self.pending, shapes.hit_test(at)) {
                    // A pipe click picks (or re-picks) the segment and the
                    // endpoint nearer to the click.
                    (_, Some(ShapeTag::Pipe(id))) => {
                        if let Some(segment) = shapes.pipe_segment(id) {
                            let end = if at.dist(segment.a) <= at.dist(segment.b) {
                                PipeEndpoint::Node1
                            } else {
                                PipeEndpoint::Node2
                            };
                            self.pending = Some(Gesture::ReconnectStart { pipe_id: id, end });
                        }
                    }
                    (
                        Some(Gesture::ReconnectStart { pipe_id, end }),
                        Some(ShapeTag::Node(node_id)),
                    ) => {
                        self.pending = None;
                        let name = store.node_by_id(node_id).map(|n| n.name.clone());
                        if let Some(name) = name
                            && store.reconnect_pipe(pipe_id, end, &name)
                        {
                            rebuild(store, shapes, &mut updates);
                        }
                    }
                    _ => {}
                }
            }
        }
        updates
    }
}

fn push(shapes: &mut ShapeIndex, updates: &mut Vec<CanvasUpdate>, update: CanvasUpdate) {
    shapes.apply(&update);
    updates.push(update);
}

/// Rebuild the drawn scene from store contents after a change that moves
/// name-joined geometry.
fn rebuild(store: &NetworkStore, shapes: &mut ShapeIndex, updates: &mut Vec<CanvasUpdate>) {
    push(shapes, updates, CanvasUpdate::Clear);
    for update in store.reload() {
        push(shapes, updates, update);
    }
}
