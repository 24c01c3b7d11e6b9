// App module for radioactive-tui
// Handles application state, collaborators and per-phase input

pub mod actions;
pub mod input;
pub mod radar;
pub mod state;

pub use actions::AppActions;
pub use input::handle_input;
pub use state::App;
