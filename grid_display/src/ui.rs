// ui.rs - Paints the collected grid and the run summary

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use halo_life::render;

use crate::GridApp;

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Banded Game of Life");

            // Controls
            ui.horizontal(|ui| {
                if ui.button("🔁 Run again").clicked() {
                    self.run_simulation();
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            if let Some(message) = &self.last_error {
                ui.colored_label(Color32::from_rgb(220, 60, 60), message.as_str());
                return;
            }
            let Some(report) = &self.report else {
                ui.label("No run collected yet.");
                return;
            };
            let grid = &report.grid;

            ui.horizontal(|ui| {
                ui.label(format!("Generations: {}", report.generations));
                ui.label(format!("Workers: {}", report.workers));
                ui.label(format!("Time: {:.6} s", report.elapsed.as_secs_f64()));
            });

            ui.separator();

            // Square cells sized so the whole torus fits the window width
            let spacing = 0.5;
            let longest = grid.width().max(grid.height()).max(1) as f32;
            let box_size = ((ui.available_width() - 20.0) / longest - spacing).clamp(2.0, 24.0);

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * grid.width() as f32 - spacing,
                (box_size + spacing) * grid.height() as f32 - spacing,
            );

            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            // Fill background
            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            for row in 0..grid.height() {
                for col in 0..grid.width() {
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);

                    let rect = Rect::from_min_size(
                        egui::pos2(x, y),
                        Vec2::splat(box_size),
                    );

                    let cell_color = if grid.get(row, col) {
                        self.live_color
                    } else {
                        self.dead_color
                    };

                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            ui.separator();

            let live_cells = grid.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", grid.width() * grid.height() - live_cells));
                ui.label(format!("Population: {:.1}%", render::population_percent(grid)));
                ui.label(format!("Fingerprint: {:016x}", grid.fingerprint()));
            });
        });
    }
}
