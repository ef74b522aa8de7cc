use eframe::egui;

use crate::internal::scene::Scene;

/// Side-panel debug UI: frame stats, camera readout and per-light controls.
pub struct Debugger {
    smoothed_frame_time: f32,
}

impl Debugger {
    pub fn new() -> Self {
        Self {
            smoothed_frame_time: 1.0 / 60.0,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, scene: &mut Scene, frame_time: f32) {
        self.smoothed_frame_time = self.smoothed_frame_time * 0.95 + frame_time * 0.05;

        ui.heading("Model View");
        ui.label(format!(
            "{:.1} fps ({:.2} ms)",
            1.0 / self.smoothed_frame_time.max(1e-6),
            self.smoothed_frame_time * 1000.0
        ));
        ui.label(format!(
            "{} meshes, {} vertices, {} triangles",
            scene.mesh_count(),
            scene.vertex_count(),
            scene.triangle_count()
        ));

        ui.separator();

        let position = scene.camera.position();
        ui.label(format!(
            "camera: ({:.2}, {:.2}, {:.2}), distance {:.2}",
            position.x,
            position.y,
            position.z,
            scene.camera.distance()
        ));
        ui.label("drag to orbit, scroll to zoom");

        ui.separator();

        ui.checkbox(&mut scene.auto_spin, "auto rotate");

        for (i, light) in scene.lights.iter_mut().enumerate() {
            ui.collapsing(format!("point light {i}"), |ui| {
                ui.horizontal(|ui| {
                    ui.label("position");
                    ui.add(egui::DragValue::new(&mut light.position[0]).speed(0.1));
                    ui.add(egui::DragValue::new(&mut light.position[1]).speed(0.1));
                    ui.add(egui::DragValue::new(&mut light.position[2]).speed(0.1));
                });
                ui.horizontal(|ui| {
                    ui.label("color");
                    ui.color_edit_button_rgb(&mut light.color);
                });
            });
        }
    }
}
