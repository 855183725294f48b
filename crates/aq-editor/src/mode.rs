//! The tool mode governing what a canvas click does.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTool {
    Add,
    Delete,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeTool {
    Add,
    Delete,
    Reconnect,
}

/// Primary mode plus sub-mode as one flat tag. Exactly one tool is active
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Node(NodeTool),
    Pipe(PipeTool),
}

/// Holds the active tool for the session.
///
/// Any UI affordance may set a new tool at any time; setting fully replaces
/// the previous one, with no transition guards.
#[derive(Debug, Default)]
pub struct ModeController {
    tool: Tool,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set(&mut self, tool: Tool) {
        self.tool = tool;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_select() {
        assert_eq!(ModeController::new().tool(), Tool::Select);
    }

    #[test]
    fn setting_replaces_previous_tool() {
        let mut modes = ModeController::new();
        modes.set(Tool::Node(NodeTool::Delete));
        modes.set(Tool::Pipe(PipeTool::Add));
        assert_eq!(modes.tool(), Tool::Pipe(PipeTool::Add));

        modes.set(Tool::Select);
        assert_eq!(modes.tool(), Tool::Select);
    }
}
