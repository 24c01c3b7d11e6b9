use crate::app::state::App;
use crossterm::event::KeyCode;

/// The scan has no interaction; it ends on its own timer. Only quitting is
/// honored.
pub fn handle_scanning_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
