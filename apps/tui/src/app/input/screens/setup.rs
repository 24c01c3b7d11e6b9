use crate::app::state::App;
use crossterm::event::KeyCode;

pub async fn handle_setup_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.push_input(c),
        KeyCode::Backspace => {
            app.pop_input();
        }
        KeyCode::Enter => {
            // An empty nickname silently blocks inside submit_nickname; a
            // storage failure surfaces through the status line.
            app.submit_nickname().await;
        }
        KeyCode::Esc => {
            app.running = false;
        }
        _ => {}
    }
}
