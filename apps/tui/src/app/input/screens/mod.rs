use crate::app::state::App;
use crate::domain::MeshPhase;
use crossterm::event::KeyCode;

mod chat;
mod help;
mod scanning;
mod setup;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.phase {
        MeshPhase::Setup => setup::handle_setup_input(app, key).await,
        MeshPhase::Scanning => scanning::handle_scanning_input(app, key),
        MeshPhase::Chat => chat::handle_chat_input(app, key),
    }
}
