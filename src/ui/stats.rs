use crate::simulation::history::GenerationHistory;
use crate::simulation::params::Params;
use crate::simulation::state::{Mode, Phase, SimulationState};
use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use super::ui::UIState;

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    sim: &SimulationState,
    params: &Params,
) {
    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.heading(format!("{} Race", sim.mode.label()));
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("💾 Save Params").clicked() {
                    state.save_requested = true;
                }
                if ui.button("🔄 Reset").clicked() {
                    state.reset_requested = true;
                }
            });

            if let Some(ref msg) = state.status_message {
                ui.label(msg);
            }

            ui.separator();

            let phase = match sim.phase {
                Phase::Racing => "Racing".to_string(),
                Phase::Finished { countdown: None } => "Finished (click to restart)".to_string(),
                Phase::Finished {
                    countdown: Some(frames),
                } => format!("Finished (restart in {} frames)", frames),
            };
            ui.label(format!("Frame: {}", sim.frame));
            ui.label(format!("Phase: {}", phase));
            ui.label(format!(
                "Racing: {}/{}",
                sim.racing_count(),
                sim.agents.len()
            ));
            ui.label(format!(
                "Targets fertilized: {}/{}",
                sim.fertilized_count(),
                sim.targets.len()
            ));

            ui.separator();

            match sim.mode {
                Mode::Classic => {
                    ui.label(format!("Races run: {}", sim.attempt_count));
                }
                Mode::Attempts => draw_attempts_section(ui, state, sim),
                Mode::Evolution => draw_evolution_section(ui, sim, params),
            }
        });
}

fn draw_attempts_section(ui: &mut egui::Ui, state: &mut UIState, sim: &SimulationState) {
    ui.label(format!("Attempt: {}", sim.attempt_count));

    ui.label("Immune Strength");
    ui.add(egui::Slider::new(&mut state.immune_strength, 0.0..=100.0).text("%"));
    ui.label("(applies from the next attempt)");

    if let Some(env) = &sim.environment {
        ui.collapsing("Current Environment", |ui| {
            ui.label(format!("Population: {}", env.cohort_size));
            ui.label(format!("Immunity: {:.0}%", env.immune_strength));
            ui.label(format!("Vigor: {:.2}", env.vigor));
            ui.label(format!("Diversity: {:.2}", env.diversity));
            ui.label(format!("Target size: {:.0}", env.target_size.floor()));
        });
    }
}

fn draw_evolution_section(ui: &mut egui::Ui, sim: &SimulationState, params: &Params) {
    ui.label(format!("Generation: {}", sim.generation_count));
    ui.label(format!("Avg speed: {:.2}", sim.gene_pool.avg_speed));
    ui.label(format!("Avg agility: {:.2}", sim.gene_pool.avg_agility));
    ui.label(format!("Mutation rate: ±{:.2}", params.mutation_rate));

    let history = &sim.history;
    if let Some(latest) = history.latest() {
        ui.label(format!(
            "Last success: {}/{}",
            latest.winners, latest.targets
        ));
    }
    ui.label(format!(
        "Avg success rate: {:.0}%",
        history.avg_success_rate() * 100.0
    ));
    ui.label(format!("Extinctions: {}", history.extinction_count()));

    ui.separator();
    ui.label("Gene Pool per Generation");
    draw_gene_plot(ui, history);
}

fn draw_gene_plot(ui: &mut egui::Ui, history: &GenerationHistory) {
    if history.records.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    let speed: PlotPoints = history.speed_points().into_iter().collect();
    let agility: PlotPoints = history.agility_points().into_iter().collect();

    Plot::new("gene_pool_plot")
        .height(200.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{}: Gen {:.0}, {:.2}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(speed)
                    .color(egui::Color32::from_rgb(255, 100, 100))
                    .name("Speed"),
            );
            plot_ui.line(
                Line::new(agility)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Agility"),
            );
        });
}
