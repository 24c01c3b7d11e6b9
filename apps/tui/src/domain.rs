use serde::{Deserialize, Serialize};

/// Storage key for the daily profile, the only persisted value.
pub const PROFILE_KEY: &str = "radioactive_profile";

/// Display name used for assistant replies in the thread.
pub const PROXIMA_SENDER: &str = "PROXIMA (Local)";

/// Nicknames are capped at 20 characters; empty ones block submission.
pub const NICKNAME_MAX: usize = 20;

/// Fixed identity palette, stored as hex so the profile survives
/// serialization unchanged.
pub const PALETTE: &[&str] = &[
    "#f87171", "#fb923c", "#fbbf24", "#4ade80", "#22d3ee", "#a78bfa", "#f472b6",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshPhase {
    Setup,
    Scanning,
    Chat,
}

impl MeshPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Scanning => "scanning",
            Self::Chat => "chat",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Scanning => "Scanning",
            Self::Chat => "Chat",
        }
    }
}

/// Day-scoped identity record. At most one is valid at a time, and only for
/// the calendar day it was created on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub nickname: String,
    /// ISO date, `YYYY-MM-DD`.
    pub last_login_date: String,
    /// Hex color from [`PALETTE`].
    pub color: String,
}

impl UserProfile {
    /// Build a profile dated today with a randomly picked palette color.
    pub fn for_today(nickname: &str) -> Self {
        use rand::seq::SliceRandom;

        let color = PALETTE
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("#4ade80");

        Self {
            nickname: nickname.to_string(),
            last_login_date: today_stamp(),
            color: color.to_string(),
        }
    }

    /// A profile is only valid on the day it was created.
    pub fn is_fresh(&self, today: &str) -> bool {
        self.last_login_date == today
    }
}

/// Today's date as `YYYY-MM-DD`, the granularity profiles live at.
pub fn today_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Current wall clock as epoch milliseconds, the message timestamp unit.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn valid_nickname(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= NICKNAME_MAX
}

/// One entry of the in-memory chat thread. Never persisted; ordering is
/// ascending by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub text: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub is_ai: bool,
    /// Simulated distance in meters. Cosmetic; never a sort key.
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// Minimal `{role, text}` form of a message, the shape replayed to the
/// content service.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn from_message(message: &Message) -> Self {
        Self {
            role: if message.is_ai {
                TurnRole::Model
            } else {
                TurnRole::User
            },
            text: message.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_bounds() {
        assert!(!valid_nickname(""));
        assert!(!valid_nickname("   "));
        assert!(valid_nickname("F"));
        assert!(valid_nickname("Fox"));
        assert!(valid_nickname(&"x".repeat(NICKNAME_MAX)));
        assert!(!valid_nickname(&"x".repeat(NICKNAME_MAX + 1)));
    }

    #[test]
    fn profile_for_today_uses_palette_and_todays_date() {
        let profile = UserProfile::for_today("Fox");
        assert_eq!(profile.nickname, "Fox");
        assert_eq!(profile.last_login_date, today_stamp());
        assert!(PALETTE.contains(&profile.color.as_str()));
        assert!(profile.is_fresh(&today_stamp()));
    }

    #[test]
    fn stale_profile_is_not_fresh() {
        let profile = UserProfile {
            nickname: "Fox".to_string(),
            last_login_date: "2001-01-01".to_string(),
            color: "#4ade80".to_string(),
        };
        assert!(!profile.is_fresh(&today_stamp()));
    }

    #[test]
    fn turn_role_follows_ai_flag() {
        let message = Message {
            id: "m-1".to_string(),
            sender: "Fox".to_string(),
            text: "hello".to_string(),
            timestamp: 0,
            is_ai: false,
            distance: 0.0,
        };
        assert_eq!(Turn::from_message(&message).role, TurnRole::User);

        let reply = Message {
            is_ai: true,
            ..message
        };
        assert_eq!(Turn::from_message(&reply).role, TurnRole::Model);
    }

    #[test]
    fn profile_round_trips_through_json() {
        let profile = UserProfile::for_today("Fox");
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
