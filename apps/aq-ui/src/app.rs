use std::path::PathBuf;

use egui_file_dialog::{DialogMode, FileDialog};

use aq_core::AppConfig;
use aq_editor::{EventRouter, ModeController, NodeTool, PipeTool, ShapeIndex, Tool};
use aq_store::NetworkStore;

use crate::canvas::CanvasView;

pub struct AquaflowApp {
    store: NetworkStore,
    shapes: ShapeIndex,
    modes: ModeController,
    router: EventRouter,
    canvas: CanvasView,
    file_dialog: FileDialog,
    file_dialog_action: Option<FileDialogAction>,
    status: String,
    confirm_close: bool,
    allowed_to_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogAction {
    Open,
    SaveAs,
}

impl AquaflowApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        startup_path: Option<PathBuf>,
    ) -> Self {
        let store = match startup_path {
            Some(path) => match NetworkStore::open(Some(&path)) {
                Ok(store) => store,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "startup open failed, falling back to an empty network"
                    );
                    NetworkStore::new()
                }
            },
            None => NetworkStore::new(),
        };

        let mut shapes = ShapeIndex::new();
        shapes.apply_all(&store.reload());

        Self {
            store,
            shapes,
            modes: ModeController::new(),
            router: EventRouter::new(),
            canvas: CanvasView::new(&config),
            file_dialog: FileDialog::new(),
            file_dialog_action: None,
            status: String::new(),
            confirm_close: false,
            allowed_to_close: false,
        }
    }

    fn new_network(&mut self) {
        self.store = NetworkStore::new();
        self.shapes.clear();
        self.router.cancel_gesture();
        self.modes.set(Tool::Select);
        self.status = "New network".to_string();
    }

    fn open_network(&mut self, path: PathBuf) {
        self.router.cancel_gesture();
        self.shapes.clear();
        match NetworkStore::open(Some(&path)) {
            Ok(store) => {
                self.store = store;
                self.shapes.apply_all(&self.store.reload());
                self.status = format!("Opened {}", path.display());
            }
            Err(err) => {
                // Named fallback: any open failure yields a fresh empty model.
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "open failed, falling back to an empty network"
                );
                self.store = NetworkStore::new();
                self.status = format!("Could not open {}, started empty", path.display());
            }
        }
    }

    fn save_network(&mut self) {
        if self.store.path().is_some() {
            match self.store.save() {
                Ok(()) => self.status = "Saved".to_string(),
                Err(err) => {
                    tracing::error!(error = %err, "save failed");
                    self.status = format!("Save failed: {err}");
                }
            }
        } else {
            self.file_dialog_action = Some(FileDialogAction::SaveAs);
            self.file_dialog.save_file();
        }
    }

    fn save_network_as(&mut self, mut path: PathBuf) {
        if path.extension().is_none() {
            path.set_extension("pfh");
        }
        match self.store.save_as(&path) {
            Ok(()) => self.status = format!("Saved {}", path.display()),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "save failed");
                self.status = format!("Save failed: {err}");
            }
        }
    }

    fn tool_button(&mut self, ui: &mut egui::Ui, label: &str, tool: Tool) {
        if ui.selectable_label(self.modes.tool() == tool, label).clicked() {
            self.modes.set(tool);
        }
    }

    fn status_line(&self) -> String {
        let tool = match self.modes.tool() {
            Tool::Select => "Select",
            Tool::Node(NodeTool::Add) => "Add Node",
            Tool::Node(NodeTool::Delete) => "Delete Node",
            Tool::Node(NodeTool::Move) => "Move Node",
            Tool::Pipe(PipeTool::Add) => "Add Pipe",
            Tool::Pipe(PipeTool::Delete) => "Delete Pipe",
            Tool::Pipe(PipeTool::Reconnect) => "Reconnect Pipe",
        };
        let mut line = format!("Tool: {tool}");
        if let Some(id) = self.router.pending_pipe_start() {
            line.push_str(&format!(" | drawing pipe from node {id}"));
        }
        if let Some(id) = self.router.pending_move_node() {
            line.push_str(&format!(" | moving node {id}"));
        }
        if let Some(id) = self.router.pending_reconnect_pipe() {
            line.push_str(&format!(" | reconnecting pipe {id}"));
        }
        if let Some(path) = self.store.path() {
            line.push_str(&format!(" | {}", path.display()));
        }
        if !self.status.is_empty() {
            line.push_str(&format!(" | {}", self.status));
        }
        line
    }
}

impl eframe::App for AquaflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New").clicked() {
                        self.new_network();
                        ui.close_menu();
                    }
                    if ui.button("Open…").clicked() {
                        self.file_dialog_action = Some(FileDialogAction::Open);
                        let _ = self.file_dialog.open(DialogMode::SelectFile, true, None);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save").clicked() {
                        self.save_network();
                        ui.close_menu();
                    }
                    if ui.button("Save As…").clicked() {
                        self.file_dialog_action = Some(FileDialogAction::SaveAs);
                        self.file_dialog.save_file();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        self.confirm_close = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.tool_button(ui, "Select", Tool::Select);
                ui.separator();
                self.tool_button(ui, "Add Node", Tool::Node(NodeTool::Add));
                self.tool_button(ui, "Delete Node", Tool::Node(NodeTool::Delete));
                self.tool_button(ui, "Move Node", Tool::Node(NodeTool::Move));
                ui.separator();
                self.tool_button(ui, "Add Pipe", Tool::Pipe(PipeTool::Add));
                self.tool_button(ui, "Delete Pipe", Tool::Pipe(PipeTool::Delete));
                self.tool_button(ui, "Reconnect Pipe", Tool::Pipe(PipeTool::Reconnect));
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            // A dismissed dialog never reaches this point: cancelling is a no-op.
            match self.file_dialog_action.take() {
                Some(FileDialogAction::Open) => self.open_network(path.to_path_buf()),
                Some(FileDialogAction::SaveAs) => self.save_network_as(path.to_path_buf()),
                None => {}
            }
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_line());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.canvas.show(
                ui,
                &self.modes,
                &mut self.router,
                &mut self.store,
                &mut self.shapes,
            ) {
                self.status = message;
            }
        });

        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.confirm_close = true;
        }

        if self.confirm_close {
            egui::Window::new("Confirm exit")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Quit Aquaflow?");
                    ui.horizontal(|ui| {
                        if ui.button("Quit").clicked() {
                            self.allowed_to_close = true;
                            self.confirm_close = false;
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                        if ui.button("Cancel").clicked() {
                            self.confirm_close = false;
                        }
                    });
                });
        }
    }
}
