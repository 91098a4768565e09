pub mod app;
pub mod config;
pub mod convert;
pub mod effects;
pub mod logging;
pub mod persistence;
pub mod surface;
pub mod ui;
