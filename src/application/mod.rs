//! Application layer: CLI commands and the URL watcher

pub mod commands;
pub mod watcher;

pub use watcher::NetworkWatcher;
