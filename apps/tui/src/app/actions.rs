use color_eyre::Result;
use sqlx::SqlitePool;
use tracing::warn;

use crate::db::{create_database_pool, restore_daily_profile, save_profile};
use crate::domain::{Turn, UserProfile};
use crate::mesh::{MeshBackend, Participant, FALLBACK_REPLY};

/// The controller's collaborators: the profile store and the content
/// backend, both injected rather than reached for as globals.
///
/// The mesh methods here apply the external silent-fallback contract: the
/// backend's structured errors are logged but the caller only ever sees an
/// empty roster or the fixed fallback reply.
pub struct AppActions {
    pub db_pool: Option<SqlitePool>,
    mesh: Box<dyn MeshBackend>,
}

impl std::fmt::Debug for AppActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppActions")
            .field("backend", &self.backend_name())
            .finish_non_exhaustive()
    }
}

impl AppActions {
    pub fn new(mesh: Box<dyn MeshBackend>) -> Self {
        Self {
            db_pool: None,
            mesh,
        }
    }

    pub async fn initialize(&mut self, database_url: &str) -> Result<()> {
        self.db_pool = Some(create_database_pool(database_url).await?);
        Ok(())
    }

    pub fn backend_name(&self) -> &str {
        self.mesh.name()
    }

    /// Daily reset check against the store; stale profiles are deleted.
    pub async fn restore_profile(&self, today: &str) -> Result<Option<UserProfile>> {
        let pool = self.pool()?;
        restore_daily_profile(pool, today).await.map_err(Into::into)
    }

    pub async fn persist_profile(&self, profile: &UserProfile) -> Result<()> {
        let pool = self.pool()?;
        save_profile(pool, profile).await.map_err(Into::into)
    }

    /// Fabricate nearby participants. A failing service comes back as an
    /// empty roster; "no one nearby" is not an error signal.
    pub async fn fabricate_roster(&self, location: &str) -> Vec<Participant> {
        match self.mesh.fabricate_participants(location).await {
            Ok(roster) => roster,
            Err(e) => {
                warn!(backend = self.mesh.name(), error = %e, "fabrication failed");
                Vec::new()
            }
        }
    }

    /// Fetch PROXIMA's reply. A failing service comes back as the fixed
    /// fallback line.
    pub async fn deliver_reply(
        &self,
        user_message: &str,
        location: &str,
        history: &[Turn],
    ) -> String {
        match self.mesh.fetch_reply(user_message, location, history).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(backend = self.mesh.name(), error = %e, "reply failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    fn pool(&self) -> Result<&SqlitePool> {
        self.db_pool
            .as_ref()
            .ok_or_else(|| color_eyre::eyre::eyre!("Profile store not initialized"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::doubles::{CannedMesh, FailingMesh};

    fn canned_roster() -> Vec<Participant> {
        vec![Participant {
            nickname: "Volt".to_string(),
            status: "hi".to_string(),
            distance: 12.0,
        }]
    }

    #[tokio::test]
    async fn test_roster_passes_through_on_success() {
        let actions = AppActions::new(Box::new(CannedMesh {
            roster: canned_roster(),
            reply: "ok".to_string(),
        }));

        let roster = actions.fabricate_roster("here").await;
        assert_eq!(roster, canned_roster());
    }

    #[tokio::test]
    async fn test_failing_fabrication_becomes_empty_roster() {
        let actions = AppActions::new(Box::new(FailingMesh));
        assert!(actions.fabricate_roster("here").await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_reply_becomes_fallback_text() {
        let actions = AppActions::new(Box::new(FailingMesh));
        let reply = actions.deliver_reply("hello", "here", &[]).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }
}
