use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_chat_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.push_input(c),
        KeyCode::Backspace => {
            app.pop_input();
        }
        KeyCode::Enter => {
            // Appends the user message synchronously; the reply fetch runs
            // from the event loop afterwards. Empty input is silently
            // ignored.
            app.submit_message();
        }
        KeyCode::Esc => {
            app.running = false;
        }
        _ => {}
    }
}
