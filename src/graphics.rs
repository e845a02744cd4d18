use crate::simulation;
use crate::simulation::agent::{Agent, ColorClass};
use crate::simulation::outcome::OutcomeType;
use crate::simulation::params::Params;
use crate::simulation::state::{Mode, Phase, SimulationState};
use macroquad::prelude::*;
use ndarray::Array1;

/// Width reserved on the right for the egui stats panel.
pub const PANEL_WIDTH: f32 = 300.0;

const EMBRYO: Color = Color::new(1.0, 0.86, 0.78, 1.0);

trait ToScreen {
    type Output;
    fn to_screen(&self, params: &Params) -> Self::Output;
}

fn screen_scale(params: &Params) -> f32 {
    let scale_x = (screen_width() - PANEL_WIDTH).max(1.0) / params.width;
    let scale_y = screen_height() / params.height;
    scale_x.min(scale_y)
}

impl ToScreen for Array1<f32> {
    type Output = Vec2;
    fn to_screen(&self, params: &Params) -> Vec2 {
        let scale = screen_scale(params);
        vec2(self[0] * scale, self[1] * scale)
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, params: &Params) -> f32 {
        self * screen_scale(params)
    }
}

fn arena_center(params: &Params) -> Vec2 {
    let scale = screen_scale(params);
    vec2(params.width * scale / 2.0, params.height * scale / 2.0)
}

fn draw_centered(text: &str, x: f32, y: f32, font_size: f32, color: Color) {
    let size = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, x - size.width / 2.0, y + size.height / 2.0, font_size, color);
}

fn agent_color(agent: &Agent) -> Color {
    match agent.color_class() {
        ColorClass::You => Color::from_rgba(0, 150, 255, 255),
        ColorClass::Culled => Color::from_rgba(100, 100, 100, 255),
        ColorClass::Winner => WHITE,
        ColorClass::Rival => match agent.genome {
            // faster genomes are drawn redder
            Some(genome) => {
                let t = ((genome.speed - 1.0) / 5.0).clamp(0.0, 1.0);
                Color::from_rgba((100.0 + t * 155.0) as u8, 50, 50, 150)
            }
            None => Color::from_rgba(255, 50, 50, 150),
        },
    }
}

pub fn draw_targets(state: &SimulationState, params: &Params) {
    for target in &state.targets {
        let pos = target.pos.to_screen(params);
        let radius = (target.capture_radius / 2.0).to_screen(params);
        let glow = 5.0_f32.to_screen(params);

        if target.fertilized {
            draw_circle(pos.x, pos.y, radius + glow, Color::from_rgba(255, 255, 100, 100));
            draw_circle(pos.x, pos.y, radius, Color::from_rgba(255, 255, 200, 255));
        } else {
            draw_circle(pos.x, pos.y, radius + glow * 2.0, Color::from_rgba(255, 200, 150, 50));
            draw_circle(pos.x, pos.y, radius + glow, Color::from_rgba(255, 200, 150, 100));
            draw_circle(pos.x, pos.y, radius, Color::from_rgba(255, 220, 200, 255));
        }
    }
}

pub fn draw_agents(state: &SimulationState, params: &Params) {
    let head = 4.0_f32.to_screen(params);
    let frame = state.frame as f32;

    for agent in &state.agents {
        if agent.off_screen {
            continue;
        }
        let color = agent_color(agent);

        // tail, tip wiggles the most
        if agent.alive && agent.trail.len() > 1 {
            let last = (agent.trail.len() - 1) as f32;
            let points: Vec<Vec2> = agent
                .trail
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let amplitude = 6.0 * (1.0 - i as f32 / last);
                    let wiggle = (frame * 0.6 + i as f32 * 0.5).sin() * amplitude;
                    let mut screen = p.to_screen(params);
                    screen.x += wiggle.to_screen(params);
                    screen
                })
                .collect();
            for pair in points.windows(2) {
                draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 2.0, color);
            }
        }

        let pos = agent.pos.to_screen(params);
        draw_circle(pos.x, pos.y, head, color);
    }

    if let Some(winner) = state.winner() {
        let pos = winner.pos.to_screen(params);
        draw_circle(pos.x, pos.y, 6.0_f32.to_screen(params), WHITE);
    }
}

pub fn draw_overlay(state: &SimulationState, params: &Params) {
    draw_corner_stats(state);

    let Phase::Finished { countdown } = state.phase else {
        return;
    };

    let scale = screen_scale(params);
    draw_rectangle(
        0.0,
        0.0,
        params.width * scale,
        params.height * scale,
        Color::from_rgba(0, 0, 0, 150),
    );

    let c = arena_center(params);
    match state.mode {
        Mode::Classic => {
            draw_centered(&result_text(state), c.x, c.y - 20.0, 24.0, WHITE);
            draw_centered(
                "Click anywhere to run the simulation again.",
                c.x,
                c.y + 40.0,
                16.0,
                WHITE,
            );
            draw_outcome_animation(state.outcome_type(), vec2(c.x, c.y + 100.0), state.frame);
        }
        Mode::Attempts if state.you_won() => {
            draw_centered(&result_text(state), c.x, c.y - 20.0, 24.0, WHITE);
            draw_centered(
                &format!(
                    "It took {} attempts for 'YOU' to be born!",
                    state.attempt_count
                ),
                c.x,
                c.y + 30.0,
                22.0,
                GREEN,
            );
            draw_centered(
                "Click anywhere to reset and start over.",
                c.x,
                c.y + 150.0,
                16.0,
                WHITE,
            );
            draw_outcome_animation(state.outcome_type(), vec2(c.x, c.y + 100.0), state.frame);
        }
        Mode::Attempts => {
            draw_centered(&result_text(state), c.x, c.y - 20.0, 24.0, WHITE);
            let reason = if state.outcome_type() == OutcomeType::PopulationLost {
                format!("Attempt {}: Population lost.", state.attempt_count)
            } else {
                format!("Attempt {}: 'You' were not born.", state.attempt_count)
            };
            draw_centered(&reason, c.x, c.y + 20.0, 18.0, Color::from_rgba(255, 100, 100, 255));
            draw_centered("Retrying automatically...", c.x, c.y + 50.0, 16.0, WHITE);
        }
        Mode::Evolution => {
            draw_centered(
                &format!("Generation {} Finished", state.generation_count),
                c.x,
                c.y - 80.0,
                24.0,
                WHITE,
            );
            draw_centered(
                &format!(
                    "Success Rate: {} / {} eggs",
                    state.fertilized_count(),
                    state.targets.len()
                ),
                c.x,
                c.y - 40.0,
                20.0,
                GREEN,
            );
            let pool = simulation::evolution::GenePool::from_winners(
                &state.winner_genomes(),
                params.baseline_pool,
            );
            draw_centered(
                &format!("Avg. Winner Speed: {:.2}", pool.avg_speed),
                c.x,
                c.y,
                18.0,
                WHITE,
            );
            draw_centered(
                &format!("Avg. Winner Agility: {:.2}", pool.avg_agility),
                c.x,
                c.y + 30.0,
                18.0,
                WHITE,
            );
            let seconds = countdown.unwrap_or(0).div_ceil(60);
            draw_centered(
                &format!("New generation in {}...", seconds),
                c.x,
                c.y + 80.0,
                16.0,
                LIGHTGRAY,
            );
        }
    }
}

fn result_text(state: &SimulationState) -> String {
    if state.outcome_type() == OutcomeType::PopulationLost {
        return "Population lost. No survivors.".to_string();
    }
    let base = if state.you_won() {
        "The 'YOU' sperm won!"
    } else {
        "Another sperm won."
    };
    match state.birth_outcome {
        Some(birth) => format!("{} {}", base, birth.headline()),
        None => base.to_string(),
    }
}

fn draw_corner_stats(state: &SimulationState) {
    let lines = match state.mode {
        Mode::Classic => vec![format!("Race: {}", state.attempt_count)],
        Mode::Attempts => {
            let mut lines = vec![format!("Attempt: {}", state.attempt_count)];
            if let Some(env) = &state.environment {
                lines.push(format!("Pop: {}", env.cohort_size));
                lines.push(format!("Immunity: {:.0}%", env.immune_strength));
                lines.push(format!("Vigor: {:.1}", env.vigor));
                lines.push(format!("Diversity: {:.1}", env.diversity));
                lines.push(format!("Target Size: {:.0}", env.target_size.floor()));
            }
            lines
        }
        Mode::Evolution => vec![
            format!("Generation: {}", state.generation_count),
            format!("Avg Speed: {:.2}", state.gene_pool.avg_speed),
            format!("Avg Agility: {:.2}", state.gene_pool.avg_agility),
        ],
    };

    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 18.0, WHITE);
    }
}

fn draw_outcome_animation(outcome: OutcomeType, at: Vec2, frame: u64) {
    let offsets: Vec<f32> = match outcome {
        OutcomeType::Single => vec![0.0],
        OutcomeType::Identical => {
            // splitting wobble
            let wobble = ((frame as f32 * 0.05).sin() + 1.0) / 2.0 * 15.0;
            vec![-wobble, wobble]
        }
        OutcomeType::Fraternal => vec![-20.0, 20.0],
        OutcomeType::Triplets => vec![-30.0, 0.0, 30.0],
        OutcomeType::None | OutcomeType::PopulationLost => Vec::new(),
    };

    for dx in offsets {
        draw_circle(at.x + dx, at.y, 15.0, EMBRYO);
    }
}
