//! Wire types for backend responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Response body of the action endpoints (start, stop, register, train, mark).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// The server message, or `None` when absent or empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Face count as reported by `/status`.
///
/// Usually a whole count, but any JSON number or a string is shown as-is
/// rather than failing the whole status decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaceCount {
    Count(u64),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for FaceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceCount::Count(n) => write!(f, "{n}"),
            FaceCount::Number(n) => write!(f, "{n}"),
            FaceCount::Text(s) => f.write_str(s),
        }
    }
}

/// Response body of GET /status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub faces: Option<FaceCount>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_backend_payload() {
        let json = r#"{"name": "Alice", "faces": 1, "status": "Recognized: Alice"}"#;
        let status: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.name.as_deref(), Some("Alice"));
        assert_eq!(status.faces, Some(FaceCount::Count(1)));
        assert_eq!(status.status.as_deref(), Some("Recognized: Alice"));
    }

    #[test]
    fn status_accepts_textual_face_count() {
        let status: StatusResponse = serde_json::from_str(r#"{"faces": "2"}"#).unwrap();
        assert_eq!(status.faces, Some(FaceCount::Text("2".into())));
        assert_eq!(status.faces.unwrap().to_string(), "2");
        assert!(status.name.is_none());
        assert!(status.status.is_none());
    }

    #[test]
    fn status_keeps_fields_with_float_face_count() {
        let json = r#"{"name": "Alice", "faces": 1.0, "status": "Recognized: Alice"}"#;
        let status: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.name.as_deref(), Some("Alice"));
        assert_eq!(status.status.as_deref(), Some("Recognized: Alice"));
        assert!(matches!(status.faces, Some(FaceCount::Number(_))));
        assert_eq!(status.faces.unwrap().to_string(), "1.0");
    }

    #[test]
    fn status_accepts_negative_face_count() {
        let status: StatusResponse =
            serde_json::from_str(r#"{"name": "Unknown", "faces": -1}"#).unwrap();
        assert_eq!(status.name.as_deref(), Some("Unknown"));
        assert_eq!(status.faces.unwrap().to_string(), "-1");
    }

    #[test]
    fn action_missing_fields_default() {
        let resp: ActionResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
        assert!(resp.message().is_none());
    }

    #[test]
    fn empty_message_treated_as_absent() {
        let resp: ActionResponse =
            serde_json::from_str(r#"{"success": true, "message": ""}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message().is_none());
    }

    #[test]
    fn action_serializes_without_null_message() {
        let json = serde_json::to_value(ActionResponse {
            success: true,
            message: None,
        })
        .unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("message").is_none());
    }
}
