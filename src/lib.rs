pub mod app;
pub mod config;
pub mod effects;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
