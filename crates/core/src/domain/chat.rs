use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub message: String,
    #[serde(default)]
    pub raw: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_tolerates_missing_fields() {
        let reply: ChatReply = serde_json::from_value(json!({})).unwrap();
        assert!(reply.message.is_empty());
        assert!(reply.raw.is_null());

        let reply: ChatReply =
            serde_json::from_value(json!({"message": "손절 기준을 먼저 정해보세요", "raw": {"a": 1}}))
                .unwrap();
        assert_eq!(reply.message, "손절 기준을 먼저 정해보세요");
    }
}
