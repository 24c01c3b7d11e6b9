//! Offline mesh implementation - canned participants and replies.

use async_trait::async_trait;
use rand::Rng;

use super::{MeshBackend, MeshError, Participant, DISTANCE_MAX, DISTANCE_MIN};
use crate::domain::Turn;

/// Backend used when no API key is configured (or `--offline` is passed).
///
/// Serves a fixed trio of participants with jittered distances and rotates
/// through short canned replies, so the whole session flow works without
/// credentials or network.
#[derive(Debug, Clone, Default)]
pub struct OfflineMesh;

const ROSTER: &[(&str, &str)] = &[
    ("Volt", "anyone else getting interference near the plaza?"),
    ("Drift", "coffee run. back on the mesh in five"),
    ("Echo", "new here. is this thing really radioactive?"),
];

const REPLIES: &[&str] = &[
    "Loud and clear. Mesh traffic is quiet around here today.",
    "Copy that. Keep your signal under 50m and you're golden.",
    "Fun fact: this sector's noise floor is basically zero tonight.",
    "Noted, neighbor. PROXIMA is listening.",
];

impl OfflineMesh {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MeshBackend for OfflineMesh {
    async fn fabricate_participants(
        &self,
        _location: &str,
    ) -> Result<Vec<Participant>, MeshError> {
        let mut rng = rand::thread_rng();

        Ok(ROSTER
            .iter()
            .map(|(nickname, status)| Participant {
                nickname: (*nickname).to_string(),
                status: (*status).to_string(),
                distance: rng.gen_range(DISTANCE_MIN..=DISTANCE_MAX),
            })
            .collect())
    }

    async fn fetch_reply(
        &self,
        user_message: &str,
        location: &str,
        history: &[Turn],
    ) -> Result<String, MeshError> {
        // Questions about the area get the location woven in; everything
        // else rotates through the canned lines by conversation length.
        let reply = if user_message.contains('?') {
            format!("Best I can tell from {location}: all quiet nearby.")
        } else {
            REPLIES[history.len() % REPLIES.len()].to_string()
        };

        Ok(reply)
    }

    fn name(&self) -> &str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roster_shape_and_distance_bounds() {
        let mesh = OfflineMesh::new();
        let roster = mesh.fabricate_participants("somewhere").await.unwrap();

        assert_eq!(roster.len(), 3);
        for participant in &roster {
            assert!(!participant.nickname.is_empty());
            assert!(!participant.status.is_empty());
            assert!(participant.distance >= DISTANCE_MIN);
            assert!(participant.distance <= DISTANCE_MAX);
        }
    }

    #[tokio::test]
    async fn test_questions_mention_the_location() {
        let mesh = OfflineMesh::new();
        let reply = mesh
            .fetch_reply("what's around here?", "51.5074, -0.1278", &[])
            .await
            .unwrap();

        assert!(reply.contains("51.5074, -0.1278"));
    }

    #[tokio::test]
    async fn test_statements_rotate_canned_replies() {
        let mesh = OfflineMesh::new();

        let first = mesh.fetch_reply("hello mesh", "x", &[]).await.unwrap();
        assert_eq!(first, REPLIES[0]);

        let history = vec![Turn {
            role: crate::domain::TurnRole::User,
            text: "hello mesh".to_string(),
        }];
        let second = mesh.fetch_reply("still here", "x", &history).await.unwrap();
        assert_eq!(second, REPLIES[1]);
    }
}
