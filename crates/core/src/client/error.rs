use crate::client::Endpoint;
use reqwest::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub endpoint: Endpoint,
    pub status: StatusCode,
    pub status_text: String,
    pub body: Option<String>,
}

impl ApiError {
    pub fn new(endpoint: Endpoint, status: StatusCode, body: String) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        Self {
            endpoint,
            status,
            status_text,
            body: (!body.is_empty()).then_some(body),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error: {}", self.status_text)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_status_text() {
        let err = ApiError::new(Endpoint::Quiz, StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(err.to_string(), "API error: Bad Gateway");
        assert!(err.body.is_none());
    }

    #[test]
    fn unknown_status_falls_back_to_code() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = ApiError::new(Endpoint::Chat, status, "{\"detail\":\"x\"}".to_string());
        assert_eq!(err.to_string(), "API error: 599");
        assert!(err.body.is_some());
    }
}
