//! Gemini `generateContent` request and response types.

use serde::{Deserialize, Serialize};

use super::{MeshError, Participant, DISTANCE_MAX, DISTANCE_MIN};

/// One content block: a role plus text parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"; absent on system instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role("user", text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::with_role("model", text)
    }

    /// System instructions carry no role.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }

    fn with_role(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// Structured output: JSON constrained to the participant array schema.
    pub fn participant_json() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(participant_schema()),
        }
    }
}

/// Schema for the fabrication response: exactly the `{nickname, status,
/// distance}` objects the service must emit.
fn participant_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "nickname": { "type": "STRING" },
                "status": { "type": "STRING" },
                "distance": {
                    "type": "NUMBER",
                    "description": "Distance in meters (between 5 and 50)"
                }
            },
            "required": ["nickname", "status", "distance"]
        }
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate part, the only piece this app reads.
    pub fn first_text(&self) -> Result<&str, MeshError> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
            .ok_or_else(|| MeshError::MalformedResponse("no candidate text".to_string()))
    }
}

/// Parse the structured fabrication payload, validating defensively.
///
/// Missing fields or non-JSON text are a malformed response (same fallback
/// path as a network failure). Out-of-range distances are clamped rather
/// than rejected.
pub fn parse_participants(text: &str) -> Result<Vec<Participant>, MeshError> {
    let mut participants: Vec<Participant> = serde_json::from_str(text)
        .map_err(|e| MeshError::MalformedResponse(e.to_string()))?;

    for participant in &mut participants {
        participant.distance = participant.distance.clamp(DISTANCE_MIN, DISTANCE_MAX);
    }

    Ok(participants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_valid_roster() {
        let text = r#"[
            {"nickname": "Volt", "status": "anyone else hear that hum?", "distance": 12.5},
            {"nickname": "Drift", "status": "coffee run, back in 5", "distance": 40}
        ]"#;

        let roster = parse_participants(text).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].nickname, "Volt");
        assert!((roster[1].distance - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clamps_out_of_range_distances() {
        let text = r#"[
            {"nickname": "Near", "status": "hi", "distance": 0.5},
            {"nickname": "Far", "status": "yo", "distance": 900}
        ]"#;

        let roster = parse_participants(text).unwrap();
        assert!((roster[0].distance - DISTANCE_MIN).abs() < f64::EPSILON);
        assert!((roster[1].distance - DISTANCE_MAX).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_fields_are_malformed() {
        let text = r#"[{"nickname": "Ghost", "distance": 10}]"#;
        assert!(matches!(
            parse_participants(text),
            Err(MeshError::MalformedResponse(_))
        ));
    }

    #[test]
    fn non_json_text_is_malformed() {
        assert!(matches!(
            parse_participants("three people are nearby"),
            Err(MeshError::MalformedResponse(_))
        ));
    }

    #[test]
    fn first_text_walks_the_candidate_shape() {
        let raw = r#"{
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": "hello" } ] } }
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text().unwrap(), "hello");
    }

    #[test]
    fn empty_candidates_are_malformed() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            response.first_text(),
            Err(MeshError::MalformedResponse(_))
        ));
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hi")],
            system_instruction: Some(Content::system("be brief")),
            generation_config: Some(GenerationConfig::participant_json()),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["contents"][0]["role"], "user");
    }
}
