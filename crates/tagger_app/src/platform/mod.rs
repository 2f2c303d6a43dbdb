//! Terminal frontend: reads user input, drives the wizard and executes its effects.
pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
pub mod ui;

pub use app::run_app;
