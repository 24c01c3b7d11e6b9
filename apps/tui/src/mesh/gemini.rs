//! Gemini-backed mesh implementation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::api_types::{
    parse_participants, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig,
};
use super::{MeshBackend, MeshError, Participant, ROSTER_SIZE};
use crate::domain::{Turn, TurnRole};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Content backend talking to the generative-language API.
///
/// Stateless per request; conversation context is replayed from the caller's
/// history on every call.
pub struct GeminiMesh {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiMesh {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, MeshError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint. Used by tests against a
    /// local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn fabrication_prompt(location: &str) -> String {
        format!(
            "Simulate {ROSTER_SIZE} unique people who might be nearby at this location: {location}. \
             Give them short, catchy nicknames and a short \"status\" message that sounds like \
             something someone would say in a proximity chat (casual, context-aware). \
             Format as JSON."
        )
    }

    fn persona_instruction(location: &str) -> String {
        format!(
            "You are part of a mesh-network proximity chat. The user is at {location}. \
             You are simulating a helpful \"Local Intelligence\" bot named PROXIMA. \
             Keep responses extremely short (max 2 sentences), punchy, and helpful. \
             If they ask about the area, give them a cool fact. \
             If they are just chatting, be their proximity buddy."
        )
    }

    /// Make a `generateContent` request against the API.
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, MeshError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "content service error");
            return Err(MeshError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| MeshError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl MeshBackend for GeminiMesh {
    async fn fabricate_participants(
        &self,
        location: &str,
    ) -> Result<Vec<Participant>, MeshError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(Self::fabrication_prompt(location))],
            system_instruction: None,
            generation_config: Some(GenerationConfig::participant_json()),
        };

        let response = self.generate(&request).await?;
        parse_participants(response.first_text()?)
    }

    async fn fetch_reply(
        &self,
        user_message: &str,
        location: &str,
        history: &[Turn],
    ) -> Result<String, MeshError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => Content::user(turn.text.clone()),
                TurnRole::Model => Content::model(turn.text.clone()),
            })
            .collect();
        contents.push(Content::user(user_message));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(Self::persona_instruction(location))),
            generation_config: None,
        };

        let response = self.generate(&request).await?;
        let text = response.first_text()?.trim();

        if text.is_empty() {
            return Err(MeshError::MalformedResponse("empty reply text".to_string()));
        }

        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": text } ] } }
            ]
        })
    }

    fn mesh_against(server: &MockServer) -> GeminiMesh {
        GeminiMesh::new("test-key", "gemini-3-flash-preview")
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn fabricates_participants_from_structured_output() {
        let server = MockServer::start().await;
        let roster = r#"[
            {"nickname": "Volt", "status": "anyone at the fountain?", "distance": 12},
            {"nickname": "Drift", "status": "signal's strong today", "distance": 900},
            {"nickname": "Echo", "status": "just passing through", "distance": 31}
        ]"#;

        Mock::given(method("POST"))
            .and(path("/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(roster)))
            .mount(&server)
            .await;

        let mesh = mesh_against(&server);
        let participants = mesh.fabricate_participants("51.5074, -0.1278").await.unwrap();

        assert_eq!(participants.len(), 3);
        assert_eq!(participants[0].nickname, "Volt");
        // Out-of-range distance clamped at the parse boundary
        assert!((participants[1].distance - crate::mesh::DISTANCE_MAX).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn service_errors_surface_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
            .mount(&server)
            .await;

        let mesh = mesh_against(&server);
        let err = mesh.fabricate_participants("somewhere").await.unwrap_err();

        assert!(matches!(err, MeshError::Service { status: 429, .. }));
    }

    #[tokio::test]
    async fn reply_replays_history_and_returns_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-3-flash-preview:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "contents": [
                    { "role": "user", "parts": [ { "text": "any good coffee?" } ] },
                    { "role": "model", "parts": [ { "text": "Two blocks east." } ] },
                    { "role": "user", "parts": [ { "text": "thanks!" } ] }
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(candidate_body("Anytime, neighbor.")),
            )
            .mount(&server)
            .await;

        let mesh = mesh_against(&server);
        let history = vec![
            Turn {
                role: TurnRole::User,
                text: "any good coffee?".to_string(),
            },
            Turn {
                role: TurnRole::Model,
                text: "Two blocks east.".to_string(),
            },
        ];

        let reply = mesh
            .fetch_reply("thanks!", "51.5074, -0.1278", &history)
            .await
            .unwrap();
        assert_eq!(reply, "Anytime, neighbor.");
    }

    #[tokio::test]
    async fn candidate_free_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let mesh = mesh_against(&server);
        let err = mesh.fetch_reply("hello", "somewhere", &[]).await.unwrap_err();

        assert!(matches!(err, MeshError::MalformedResponse(_)));
    }
}
