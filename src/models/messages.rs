use serde::{Deserialize, Serialize};

use crate::models::SearchResultBatch;

/// Messages posted by the recognition/translation bridge.
///
/// Only `keywords` feeds the results panel. The remaining kinds share the
/// same channel and are acknowledged without touching panel state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BroadcastMessage {
    Keywords(SearchResultBatch),
    Recognized(RecognizedText),
    Translated(TranslatedText),
    Status(StatusUpdate),
    Error(BridgeError),
}

impl BroadcastMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            BroadcastMessage::Keywords(_) => "keywords",
            BroadcastMessage::Recognized(_) => "recognized",
            BroadcastMessage::Translated(_) => "translated",
            BroadcastMessage::Status(_) => "status",
            BroadcastMessage::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pair_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedText {
    pub text: String,
    #[serde(default)]
    pub source_text: Option<String>,
    #[serde(default)]
    pub pair_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeError {
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keywords_message_carries_batch() {
        let message: BroadcastMessage = serde_json::from_value(json!({
            "type": "keywords",
            "keywords": ["東京", "tower"],
            "articles": [{ "link": "https://a.example", "title": "A", "snippet": "a" }],
            "pairId": "2024-05-01T10:00:00"
        }))
        .unwrap();

        match message {
            BroadcastMessage::Keywords(batch) => {
                assert_eq!(batch.keywords, vec!["東京", "tower"]);
                assert_eq!(batch.articles.len(), 1);
                assert!(batch.images.is_empty());
                assert_eq!(batch.pair_id.as_deref(), Some("2024-05-01T10:00:00"));
            }
            other => panic!("unexpected message kind {}", other.kind()),
        }
    }

    #[test]
    fn status_message_is_parsed() {
        let message: BroadcastMessage = serde_json::from_value(json!({
            "type": "status",
            "status": "running",
            "message": "listening"
        }))
        .unwrap();
        assert_eq!(message.kind(), "status");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result = serde_json::from_value::<BroadcastMessage>(json!({
            "type": "subtitle",
            "text": "hello"
        }));
        assert!(result.is_err());
    }
}
