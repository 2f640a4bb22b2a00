//! CLI module for haggle

pub mod app;
pub mod commands;
pub mod report;

pub use app::{HaggleApp, ScenarioRun, SuiteSummary};
pub use commands::{Cli, Commands, SettingsOverrides};
