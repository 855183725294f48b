//! The drawing canvas: paints the shape index and feeds clicks to the router.

use aq_core::AppConfig;
use aq_core::geom::Point;
use aq_editor::{EventRouter, ModeController, NODE_RADIUS, ShapeIndex};
use aq_store::{CanvasUpdate, NetworkStore};

pub struct CanvasView {
    size: egui::Vec2,
}

impl CanvasView {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            size: egui::vec2(
                config.resolution.width as f32,
                config.resolution.height as f32,
            ),
        }
    }

    /// Returns a status message when a click changed something.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        modes: &ModeController,
        router: &mut EventRouter,
        store: &mut NetworkStore,
        shapes: &mut ShapeIndex,
    ) -> Option<String> {
        let mut message = None;

        egui::ScrollArea::both().show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(self.size, egui::Sense::click());
            let rect = response.rect;
            painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let at = Point::new(
                        (pos.x - rect.min.x) as f64,
                        (pos.y - rect.min.y) as f64,
                    );
                    let updates = router.on_primary_click(modes, store, shapes, at);
                    if !updates.is_empty() {
                        message = Some(describe(&updates));
                    }
                }
            }

            // Pipes first so node markers sit on top.
            for segment in shapes.pipes() {
                let a = rect.min + egui::vec2(segment.a.x as f32, segment.a.y as f32);
                let b = rect.min + egui::vec2(segment.b.x as f32, segment.b.y as f32);
                painter.line_segment([a, b], egui::Stroke::new(2.0, egui::Color32::LIGHT_GRAY));
            }
            for marker in shapes.nodes() {
                let center =
                    rect.min + egui::vec2(marker.center.x as f32, marker.center.y as f32);
                painter.circle_filled(
                    center,
                    NODE_RADIUS as f32,
                    egui::Color32::from_rgb(100, 170, 255),
                );
                painter.circle_stroke(
                    center,
                    NODE_RADIUS as f32,
                    egui::Stroke::new(1.0, egui::Color32::WHITE),
                );
                painter.text(
                    center + egui::vec2(NODE_RADIUS as f32 + 2.0, -(NODE_RADIUS as f32) - 2.0),
                    egui::Align2::LEFT_BOTTOM,
                    marker.id.to_string(),
                    egui::FontId::proportional(10.0),
                    egui::Color32::GRAY,
                );
            }
        });

        message
    }
}

fn describe(updates: &[CanvasUpdate]) -> String {
    if updates.first() == Some(&CanvasUpdate::Clear) {
        return "Updated layout".to_string();
    }
    match updates.first() {
        Some(CanvasUpdate::AddNode { id, .. }) => format!("Added node {id}"),
        Some(CanvasUpdate::RemoveNode { id }) => format!("Deleted node {id}"),
        Some(CanvasUpdate::AddPipe { id, .. }) => format!("Added pipe {id}"),
        Some(CanvasUpdate::RemovePipe { id }) => format!("Deleted pipe {id}"),
        _ => "Updated".to_string(),
    }
}
