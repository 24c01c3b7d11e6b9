use std::time::Instant;

use color_eyre::Result;
use throbber_widgets_tui::ThrobberState;

use crate::app::actions::AppActions;
use crate::app::radar::RadarScan;
use crate::domain::{
    now_millis, today_stamp, valid_nickname, Message, MeshPhase, Turn, UserProfile,
    NICKNAME_MAX, PROXIMA_SENDER,
};
use crate::mesh::Participant;

/// A reply request captured at send time: the outbound text plus the history
/// as it stood before the user message was appended.
#[derive(Debug)]
pub struct PendingReply {
    pub outbound: String,
    pub history: Vec<Turn>,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub phase: MeshPhase,
    pub profile: Option<UserProfile>,
    pub location: String,
    pub messages: Vec<Message>,
    pub current_input: String,
    pub is_typing: bool,
    pub status_message: String,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub show_help: bool,
    /// Present only while scanning; dropping it tears both timers down.
    pub radar: Option<RadarScan>,
    pub roster_pending: bool,
    pub pending_reply: Option<PendingReply>,
    pub typing_throbber: ThrobberState,
    pub actions: AppActions,
    next_message_seq: u64,
}

impl App {
    pub fn new(actions: AppActions, location: String) -> Self {
        Self {
            running: true,
            phase: MeshPhase::Setup,
            profile: None,
            location,
            messages: Vec::new(),
            current_input: String::new(),
            is_typing: false,
            status_message: String::new(),
            animation_counter: 0.0,
            last_frame: Instant::now(),
            show_help: false,
            radar: None,
            roster_pending: false,
            pending_reply: None,
            typing_throbber: ThrobberState::default(),
            actions,
            next_message_seq: 0,
        }
    }

    /// Open the store and run the daily reset check. A profile dated today
    /// skips Setup and goes straight to Scanning; a stale one has already
    /// been deleted by the store.
    pub async fn initialize(&mut self, database_url: &str) -> Result<()> {
        self.actions.initialize(database_url).await?;

        if let Some(profile) = self.actions.restore_profile(&today_stamp()).await? {
            tracing::info!(nickname = %profile.nickname, "profile restored, skipping setup");
            self.profile = Some(profile);
            self.begin_scan(Instant::now());
        }

        Ok(())
    }

    /// Per-frame update: advance the sweep animation and, while PROXIMA is
    /// typing, the throbber.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Animation counter cycles between 0 and 2*PI
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.is_typing {
            self.typing_throbber.calc_next();
        }
    }

    /// Setup -> Scanning. Empty or oversized nicknames silently block
    /// submission. A storage failure is reported but does not block the
    /// mesh; the profile just lives in memory until midnight.
    pub async fn submit_nickname(&mut self) {
        if !valid_nickname(&self.current_input) {
            return;
        }

        let profile = UserProfile::for_today(self.current_input.trim());
        if let Err(e) = self.actions.persist_profile(&profile).await {
            tracing::warn!(error = %e, "profile not persisted, continuing in memory");
            self.status_message = format!("Profile not saved: {e}");
        }
        self.profile = Some(profile);
        self.current_input.clear();
        self.begin_scan(Instant::now());
    }

    pub fn begin_scan(&mut self, now: Instant) {
        self.phase = MeshPhase::Scanning;
        self.radar = Some(RadarScan::activate(now));
    }

    /// Advance the radar. On the single completing tick the app moves to
    /// Chat and queues the roster fabrication.
    pub fn tick_radar(&mut self, now: Instant) {
        if self.phase != MeshPhase::Scanning {
            return;
        }

        let completed = self
            .radar
            .as_mut()
            .is_some_and(|radar| radar.tick(now));

        if completed {
            self.complete_scan();
        }
    }

    /// Scanning -> Chat. The radar (and its timers) are dropped here.
    pub fn complete_scan(&mut self) {
        self.phase = MeshPhase::Chat;
        self.radar = None;
        self.roster_pending = true;
    }

    /// Replace the thread with the fabricated roster, one message per
    /// participant with decreasing synthetic timestamps, then sort
    /// ascending. An empty roster just means no one is nearby.
    pub fn seed_roster(&mut self, roster: Vec<Participant>) {
        let now = now_millis();

        let mut seeded: Vec<Message> = roster
            .into_iter()
            .enumerate()
            .map(|(idx, participant)| Message {
                id: format!("p-{idx}"),
                sender: participant.nickname,
                text: participant.status,
                timestamp: now - (i64::try_from(idx).unwrap_or_default() * 60_000),
                is_ai: true,
                distance: participant.distance,
            })
            .collect();

        seeded.sort_by_key(|message| message.timestamp);
        self.messages = seeded;
    }

    /// Queue the pending roster fabrication against the backend.
    pub async fn load_roster(&mut self) {
        self.roster_pending = false;
        let roster = self.actions.fabricate_roster(&self.location).await;
        self.seed_roster(roster);
    }

    /// Append the user's message synchronously and capture the reply
    /// request. Empty input silently blocks; the network part happens later
    /// via [`App::deliver_reply`].
    pub fn submit_message(&mut self) {
        let text = self.current_input.trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(profile) = &self.profile else {
            return;
        };

        // History reflects the thread before this message, matching what
        // the service expects alongside the new message.
        let history: Vec<Turn> = self.messages.iter().map(Turn::from_message).collect();

        self.next_message_seq += 1;
        self.messages.push(Message {
            id: format!("m-{}", self.next_message_seq),
            sender: profile.nickname.clone(),
            text: text.clone(),
            timestamp: now_millis(),
            is_ai: false,
            distance: 0.0,
        });

        self.current_input.clear();
        self.is_typing = true;
        self.pending_reply = Some(PendingReply {
            outbound: text,
            history,
        });
    }

    /// Resolve the captured reply request and append PROXIMA's answer. The
    /// typing flag clears whether the backend succeeded or fell back.
    pub async fn deliver_reply(&mut self) {
        let Some(pending) = self.pending_reply.take() else {
            return;
        };

        let reply = self
            .actions
            .deliver_reply(&pending.outbound, &self.location, &pending.history)
            .await;

        self.next_message_seq += 1;
        self.messages.push(Message {
            id: format!("ai-{}", self.next_message_seq),
            sender: PROXIMA_SENDER.to_string(),
            text: reply,
            timestamp: now_millis(),
            is_ai: true,
            distance: 5.0,
        });
        self.is_typing = false;
    }

    /// Push a character into the input buffer, enforcing the nickname cap
    /// during setup.
    pub fn push_input(&mut self, ch: char) {
        if self.phase == MeshPhase::Setup && self.current_input.chars().count() >= NICKNAME_MAX {
            return;
        }
        self.current_input.push(ch);
    }

    pub fn pop_input(&mut self) {
        self.current_input.pop();
    }
}
