use crate::simulation::params::Params;
use crate::simulation::state::Mode;
use egui_macroquad::egui;
use macroquad::prelude::*;

/// Draws the configuration screen. Returns `true` once the user starts the simulation.
pub fn draw_genesis_screen(params: &mut Params, mode: &mut Mode) -> bool {
    clear_background(LIGHTGRAY);

    let mut start_simulation = false;

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Race to the Egg - Configuration");
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("Mode:");
                    ui.radio_value(mode, Mode::Classic, "Classic");
                    ui.radio_value(mode, Mode::Attempts, "Attempts");
                    ui.radio_value(mode, Mode::Evolution, "Evolution");
                });

                ui.add_space(5.0);

                ui.collapsing("Arena", |ui| {
                    ui.add(egui::Slider::new(&mut params.width, 200.0..=1200.0).text("Width"));
                    ui.add(egui::Slider::new(&mut params.height, 200.0..=1200.0).text("Height"));
                    ui.add(
                        egui::Slider::new(&mut params.target_y, 20.0..=300.0).text("Target Height"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.restart_delay, 1..=600)
                            .text("Restart Delay (frames)"),
                    );
                });

                ui.collapsing("Classic Race", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.classic_cohort_size, 1..=5000)
                            .text("Population"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.classic_target_size, 5.0..=200.0)
                            .text("Target Size"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.classic_wiggle, 0.0..=5.0).text("Wiggle"),
                    );
                });

                ui.collapsing("Attempts", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.max_attempt_cohort, 1..=2000)
                            .text("Max Population"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.min_attempt_speed, 0.1..=3.0)
                            .text("Min Speed"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.immune_strength, 0.0..=100.0)
                            .text("Immune Strength (%)"),
                    );
                });

                ui.collapsing("Evolution", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.evolution_cohort_size, 1..=2000)
                            .text("Population"),
                    );
                    ui.add(egui::Slider::new(&mut params.num_targets, 1..=10).text("Eggs"));
                    ui.add(
                        egui::Slider::new(&mut params.evolution_target_size, 5.0..=200.0)
                            .text("Egg Size"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.mutation_rate, 0.0..=2.0)
                            .text("Mutation Rate"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.baseline_pool.avg_speed, 0.5..=10.0)
                            .text("Baseline Speed"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.baseline_pool.avg_agility, 0.1..=5.0)
                            .text("Baseline Agility"),
                    );
                });

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Start Simulation").clicked() {
                        start_simulation = true;
                    }
                    ui.label("Configure parameters above, then click to start");
                });
            });
        });
    });

    egui_macroquad::draw();

    start_simulation
}
