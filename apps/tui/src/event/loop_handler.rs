use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fmt;
use std::io::Stdout;
use std::time::Instant;

use crate::app::{handle_input, App};
use crate::domain::today_stamp;
use crate::ui;

// States for the mesh link: at most one network job is in flight at a time,
// matching the app's cooperative single-writer model.
#[derive(Clone, Copy, PartialEq, Debug)]
enum LinkState {
    Idle,
    FetchingRoster,
    AwaitingReply,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::FetchingRoster => write!(f, "FetchingRoster"),
            Self::AwaitingReply => write!(f, "AwaitingReply"),
        }
    }
}

// Events that drive the link between the two network jobs
#[derive(Clone, Debug)]
enum LinkEvent {
    RosterRequested,
    RosterSeeded(usize),
    ReplyRequested,
    ReplyDelivered,
}

impl fmt::Display for LinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RosterRequested => write!(f, "RosterRequested"),
            Self::RosterSeeded(count) => write!(f, "RosterSeeded({count})"),
            Self::ReplyRequested => write!(f, "ReplyRequested"),
            Self::ReplyDelivered => write!(f, "ReplyDelivered"),
        }
    }
}

#[derive(Debug)]
struct LinkTransitionError {
    from: LinkState,
    event: LinkEvent,
}

impl fmt::Display for LinkTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for LinkTransitionError {}

/// Sequencer for the two mesh jobs (roster fabrication, reply fetch).
struct MeshLinkMachine {
    state: LinkState,
}

impl MeshLinkMachine {
    const fn new() -> Self {
        Self {
            state: LinkState::Idle,
        }
    }

    const fn state(&self) -> LinkState {
        self.state
    }

    // Process an event, updating the machine and the app's status line
    fn process_event(
        &mut self,
        event: &LinkEvent,
        app: &mut App,
    ) -> std::result::Result<(), LinkTransitionError> {
        let next = match (self.state, event) {
            (LinkState::Idle, LinkEvent::RosterRequested) => {
                app.status_message = "Resolving nearby signals...".to_string();
                LinkState::FetchingRoster
            }
            (LinkState::FetchingRoster, LinkEvent::RosterSeeded(count)) => {
                app.status_message = if *count == 0 {
                    "No signals nearby".to_string()
                } else {
                    format!("{count} signals nearby")
                };
                LinkState::Idle
            }
            (LinkState::Idle, LinkEvent::ReplyRequested) => LinkState::AwaitingReply,
            (LinkState::AwaitingReply, LinkEvent::ReplyDelivered) => LinkState::Idle,
            _ => {
                return Err(LinkTransitionError {
                    from: self.state,
                    event: event.clone(),
                })
            }
        };

        self.state = next;
        Ok(())
    }
}

/// Run the application in headless mode (no UI): print profile and link
/// status and exit.
pub async fn run_headless(app: &mut App, database_url: &str, json: bool) -> Result<()> {
    app.initialize(database_url).await?;

    let status = build_headless_status(app);

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("\nRadioactive Mesh Status");
        println!("=======================");
        println!("Phase: {}", status.phase);
        match (&status.nickname, &status.profile_date) {
            (Some(nickname), Some(date)) => {
                println!("Profile: {nickname} (since {date})");
            }
            _ => println!("Profile: none for today"),
        }
        println!("Location: {}", status.location);
        println!("Backend: {}", status.backend);
    }

    Ok(())
}

fn build_headless_status(app: &App) -> HeadlessStatus {
    let today = today_stamp();

    HeadlessStatus {
        phase: app.phase.label().to_string(),
        nickname: app.profile.as_ref().map(|p| p.nickname.clone()),
        profile_date: app.profile.as_ref().map(|p| p.last_login_date.clone()),
        profile_fresh: app
            .profile
            .as_ref()
            .is_some_and(|profile| profile.is_fresh(&today)),
        location: app.location.clone(),
        backend: app.actions.backend_name().to_string(),
    }
}

#[derive(serde::Serialize)]
struct HeadlessStatus {
    phase: String,
    nickname: Option<String>,
    profile_date: Option<String>,
    profile_fresh: bool,
    location: String,
    backend: String,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut link = MeshLinkMachine::new();

    loop {
        // Advance animations and the scan timers
        app.update();
        app.tick_radar(Instant::now());

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events
                }
            }
        }

        // Roster fabrication, queued by the scan-completion transition
        if app.roster_pending && link.state() == LinkState::Idle {
            if link
                .process_event(&LinkEvent::RosterRequested, app)
                .is_err()
            {
                continue;
            }

            app.load_roster().await;

            let count = app.messages.len();
            if link
                .process_event(&LinkEvent::RosterSeeded(count), app)
                .is_err()
            {
                // Non-fatal state transition error
            }

            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                // Non-fatal redraw error
            }
        }

        // Reply fetch, queued by a message submission
        if app.pending_reply.is_some() && link.state() == LinkState::Idle {
            if link.process_event(&LinkEvent::ReplyRequested, app).is_err() {
                continue;
            }

            // Show the appended user message and the typing indicator
            // before the await blocks the loop
            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                // Non-fatal redraw error
            }

            app.deliver_reply().await;

            if link
                .process_event(&LinkEvent::ReplyDelivered, app)
                .is_err()
            {
                // Non-fatal state transition error
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppActions;
    use crate::mesh::doubles::CannedMesh;

    fn test_app() -> App {
        App::new(
            AppActions::new(Box::new(CannedMesh {
                roster: Vec::new(),
                reply: "ok".to_string(),
            })),
            "loc".to_string(),
        )
    }

    #[test]
    fn link_machine_walks_the_roster_cycle() {
        let mut app = test_app();
        let mut link = MeshLinkMachine::new();

        link.process_event(&LinkEvent::RosterRequested, &mut app)
            .unwrap();
        assert_eq!(link.state(), LinkState::FetchingRoster);

        link.process_event(&LinkEvent::RosterSeeded(3), &mut app)
            .unwrap();
        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(app.status_message, "3 signals nearby");
    }

    #[test]
    fn link_machine_rejects_overlapping_jobs() {
        let mut app = test_app();
        let mut link = MeshLinkMachine::new();

        link.process_event(&LinkEvent::RosterRequested, &mut app)
            .unwrap();

        // A reply cannot start while the roster fetch is in flight
        let err = link
            .process_event(&LinkEvent::ReplyRequested, &mut app)
            .unwrap_err();
        assert!(err.to_string().contains("FetchingRoster"));
    }

    #[test]
    fn empty_roster_reads_as_no_signals() {
        let mut app = test_app();
        let mut link = MeshLinkMachine::new();

        link.process_event(&LinkEvent::RosterRequested, &mut app)
            .unwrap();
        link.process_event(&LinkEvent::RosterSeeded(0), &mut app)
            .unwrap();

        assert_eq!(app.status_message, "No signals nearby");
    }
}
