//! Terminal front end: config, effect execution, input parsing and rendering.
mod app;
mod config;
mod effects;
mod ui;

pub use app::run_app;
