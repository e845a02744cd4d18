use crate::simulation::params::Params;
use crate::simulation::state::SimulationState;
use egui_macroquad::egui;

/// File the stats panel saves parameters to.
pub const PARAMS_FILE: &str = "conception_params.json";

pub struct UIState {
    pub stats_panel_width: f32,
    /// Immune strength slider in `[0, 100]`, read at the start of each attempt.
    pub immune_strength: f32,
    pub save_requested: bool,
    pub reset_requested: bool,
    /// Set while the pointer is over an egui panel so clicks there do not restart the race.
    pub pointer_over_ui: bool,
    pub status_message: Option<String>,
}

impl UIState {
    pub fn new(params: &Params) -> Self {
        Self {
            stats_panel_width: 300.0,
            immune_strength: params.immune_strength.clamp(0.0, 100.0),
            save_requested: false,
            reset_requested: false,
            pointer_over_ui: false,
            status_message: None,
        }
    }
}

pub fn draw_ui(state: &mut UIState, sim: &SimulationState, params: &Params) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.widgets.noninteractive.fg_stroke.color = egui::Color32::from_rgb(220, 220, 220);
        egui_ctx.set_visuals(visuals);

        super::stats::draw_stats_panel(egui_ctx, state, sim, params);
        super::events::draw_events_panel(egui_ctx, sim);

        state.pointer_over_ui = egui_ctx.is_pointer_over_area();
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
