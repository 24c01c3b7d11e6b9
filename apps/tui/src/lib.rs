// Export our modules for use in the binary and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod event;
pub mod location;
pub mod mesh;
pub mod terminal;
pub mod ui;

pub use domain::{MeshPhase, Message, UserProfile};
