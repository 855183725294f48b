//! aq-editor: canvas interaction for the network sketcher.
//!
//! Contains:
//! - mode (the active tool and its sub-mode)
//! - shapes (drawn-shape index + hit-testing)
//! - router (click dispatch into store mutations and canvas updates)

pub mod mode;
pub mod router;
pub mod shapes;

pub use mode::{ModeController, NodeTool, PipeTool, Tool};
pub use router::EventRouter;
pub use shapes::{NODE_RADIUS, PIPE_PICK_TOLERANCE, ShapeIndex, ShapeTag};
