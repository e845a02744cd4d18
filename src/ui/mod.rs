// UI module - handles all user interface rendering

mod events;
mod genesis;
mod stats;
mod ui;

pub use genesis::draw_genesis_screen;
pub use ui::{PARAMS_FILE, UIState, draw_ui, process_egui};
