use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use conception::simulation;
use macroquad::prelude::*;
use simulation::params::Params;
use simulation::rng::RandomSource;
use simulation::state::{FrameInput, Mode, SimulationState};
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

mod graphics;
mod ui;

/// Race to the egg.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON parameter file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Race mode preselected on the configuration screen
    #[arg(long, value_enum, default_value_t = ModeArg::Evolution)]
    mode: ModeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Classic,
    Attempts,
    Evolution,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Classic => Self::Classic,
            ModeArg::Attempts => Self::Attempts,
            ModeArg::Evolution => Self::Evolution,
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Conception".to_owned(),
        window_width: 900,
        window_height: 600,
        ..Default::default()
    }
}

fn load_params(args: &Args) -> Params {
    let mut params = match &args.config {
        Some(path) => match Params::load_from_file(path) {
            Ok(params) => {
                info!(path = %path.display(), "loaded parameters");
                params
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "falling back to default parameters");
                Params::default()
            }
        },
        None => Params::default(),
    };
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    params
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut params = load_params(&args);
    let mut mode: Mode = args.mode.into();

    let mut ui_state = ui::UIState::new(&params);
    let mut sim: Option<(SimulationState, RandomSource)> = None;

    loop {
        if sim.is_none() {
            if ui::draw_genesis_screen(&mut params, &mut mode) {
                ui_state = ui::UIState::new(&params);
                let mut rng = RandomSource::from_seed_or_entropy(params.seed);
                info!(seed = rng.seed(), mode = mode.label(), "starting simulation");
                let input = FrameInput {
                    immune_strength: ui_state.immune_strength,
                    restart: false,
                };
                let state = SimulationState::new(mode, &params, &mut rng, &input);
                sim = Some((state, rng));
            }
            next_frame().await;
            continue;
        }

        let Some((state, rng)) = sim.as_mut() else {
            continue;
        };

        let input = FrameInput {
            immune_strength: ui_state.immune_strength,
            restart: is_mouse_button_pressed(MouseButton::Left) && !ui_state.pointer_over_ui,
        };
        state.step(&params, rng, &input);

        clear_background(Color::from_rgba(0, 0, 30, 255));
        graphics::draw_targets(state, &params);
        graphics::draw_agents(state, &params);
        graphics::draw_overlay(state, &params);

        ui::draw_ui(&mut ui_state, state, &params);
        ui::process_egui();

        if ui_state.save_requested {
            ui_state.save_requested = false;
            ui_state.status_message = Some(match params.save_to_file(ui::PARAMS_FILE) {
                Ok(()) => format!("Saved to {}", ui::PARAMS_FILE),
                Err(e) => format!("Save failed: {}", e),
            });
        }

        if ui_state.reset_requested {
            ui_state.reset_requested = false;
            ui_state.status_message = None;
            info!("returning to configuration screen");
            sim = None;
        }

        next_frame().await;
    }
}
