//! Generative Content Adapter: the only part of the app that talks to the
//! outside network.
//!
//! Everything behind [`MeshBackend`] is swappable; the app owns a
//! `Box<dyn MeshBackend>` and tests substitute doubles. Backends return
//! structured errors so callers can tell "service failed" from "service
//! returned nothing"; the silent-fallback contract the UI relies on is
//! applied one level up, in `app::actions`.

pub mod api_types;
pub mod gemini;
pub mod offline;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::Turn;

pub use gemini::GeminiMesh;
pub use offline::OfflineMesh;

/// Substitute reply when the service fails in any way. The UI never sees a
/// raw error.
pub const FALLBACK_REPLY: &str = "Mesh link unstable. Check proximity...";

/// How many fictional nearby people a fabrication request asks for.
pub const ROSTER_SIZE: usize = 3;

/// Bounds for the simulated distance attached to participants, in meters.
pub const DISTANCE_MIN: f64 = 5.0;
pub const DISTANCE_MAX: f64 = 50.0;

/// A fabricated nearby person as returned by the content service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Participant {
    pub nickname: String,
    pub status: String,
    /// Meters, clamped into `DISTANCE_MIN..=DISTANCE_MAX` at the parse
    /// boundary.
    pub distance: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Service { status: u16, body: String },

    /// Covers both unparsable payloads and payloads missing required
    /// fields; treated exactly like a service failure by callers.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A content-generation backend. Two stateless operations, one trait object.
#[async_trait]
pub trait MeshBackend: Send + Sync {
    /// Fabricate a handful of fictional nearby participants for the given
    /// location string.
    async fn fabricate_participants(&self, location: &str)
        -> Result<Vec<Participant>, MeshError>;

    /// Produce PROXIMA's reply to the latest user message given the prior
    /// conversation.
    async fn fetch_reply(
        &self,
        user_message: &str,
        location: &str,
        history: &[Turn],
    ) -> Result<String, MeshError>;

    /// Human-readable backend name, surfaced in headless status output.
    fn name(&self) -> &str;
}

/// Test doubles shared by the controller and adapter tests.
#[cfg(test)]
pub mod doubles {
    use super::*;

    /// Serves a fixed roster and a fixed reply.
    pub struct CannedMesh {
        pub roster: Vec<Participant>,
        pub reply: String,
    }

    #[async_trait]
    impl MeshBackend for CannedMesh {
        async fn fabricate_participants(
            &self,
            _location: &str,
        ) -> Result<Vec<Participant>, MeshError> {
            Ok(self.roster.clone())
        }

        async fn fetch_reply(
            &self,
            _user_message: &str,
            _location: &str,
            _history: &[Turn],
        ) -> Result<String, MeshError> {
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    /// Fails every call, exercising the silent-fallback path.
    pub struct FailingMesh;

    #[async_trait]
    impl MeshBackend for FailingMesh {
        async fn fabricate_participants(
            &self,
            _location: &str,
        ) -> Result<Vec<Participant>, MeshError> {
            Err(MeshError::MalformedResponse("synthetic failure".to_string()))
        }

        async fn fetch_reply(
            &self,
            _user_message: &str,
            _location: &str,
            _history: &[Turn],
        ) -> Result<String, MeshError> {
            Err(MeshError::MalformedResponse("synthetic failure".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Records what it was asked while serving a canned reply. The log is
    /// shared so tests can keep a handle after boxing the backend.
    pub struct RecordingMesh {
        pub reply: String,
        pub seen: std::sync::Arc<std::sync::Mutex<Vec<(String, Vec<Turn>)>>>,
    }

    #[async_trait]
    impl MeshBackend for RecordingMesh {
        async fn fabricate_participants(
            &self,
            _location: &str,
        ) -> Result<Vec<Participant>, MeshError> {
            Ok(Vec::new())
        }

        async fn fetch_reply(
            &self,
            user_message: &str,
            _location: &str,
            history: &[Turn],
        ) -> Result<String, MeshError> {
            self.seen
                .lock()
                .unwrap()
                .push((user_message.to_string(), history.to_vec()));
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }
}
