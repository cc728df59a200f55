pub mod bank;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod remote;
pub mod report;
pub mod scoring;
pub mod session;
pub mod source;
pub mod state;
pub mod timer;
pub mod tui;
pub mod ui;
