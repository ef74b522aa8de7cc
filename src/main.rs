use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use eframe::{egui, egui_glow, glow};
use internal::scene::Scene;
use util::debugger::Debugger;

mod engine;
mod internal;
mod util;

struct ViewerApp {
    scene: Arc<Mutex<Scene>>,
    debugger: Debugger,
    last_frame: Instant,
}

impl ViewerApp {
    fn new(scene: Scene) -> Self {
        Self {
            scene: Arc::new(Mutex::new(scene)),
            debugger: Debugger::new(),
            last_frame: Instant::now(),
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        {
            let mut scene = self.scene.lock().unwrap();
            if scene.auto_spin {
                scene.spin_angle += frame_time * 0.5;
            }
        }

        egui::SidePanel::right("debugger")
            .default_width(260.0)
            .show(ctx, |ui| {
                let mut scene = self.scene.lock().unwrap();
                self.debugger.show(ui, &mut scene, frame_time);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());

                {
                    let mut scene = self.scene.lock().unwrap();
                    let drag = response.drag_delta();
                    if drag != egui::Vec2::ZERO {
                        scene.camera.orbit(drag.x * 0.01, drag.y * 0.01);
                    }
                    if response.hovered() {
                        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                        if scroll != 0.0 {
                            scene.camera.zoom(scroll * 0.01);
                        }
                    }
                }

                let scene = self.scene.clone();
                let aspect_ratio = rect.width() / rect.height().max(1.0);
                ui.painter().add(egui::PaintCallback {
                    rect,
                    callback: Arc::new(egui_glow::CallbackFn::new(move |_info, _painter| {
                        scene.lock().unwrap().draw(aspect_ratio);
                    })),
                });
            });

        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.scene.lock().unwrap().destroy();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let model_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("res/models/cube/cube.obj"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        depth_buffer: 24,
        multisampling: 4,
        ..Default::default()
    };

    eframe::run_native(
        "Model View",
        options,
        Box::new(move |cc| {
            let gl = cc
                .gl
                .clone()
                .expect("this viewer requires the glow backend");
            let scene = Scene::new(gl, &model_path).expect("failed to load scene");
            Ok(Box::new(ViewerApp::new(scene)))
        }),
    )
}
