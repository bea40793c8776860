//! Terminal dashboard: poll/render loop, event handling, widgets.

mod app;
mod event;
mod input;
mod render;
mod state;
mod widgets;

pub use app::App;
pub use state::{AppState, Dashboard, PollState};
