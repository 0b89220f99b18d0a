pub mod client;
pub mod domain;
pub mod picker;
pub mod state;
pub mod time;
pub mod view;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: Option<String>,
        pub api_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let api_timeout_secs = match std::env::var("API_TIMEOUT_SECS") {
                Ok(s) => Some(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("API_TIMEOUT_SECS must be an integer (got {s})"))?,
                ),
                Err(_) => None,
            };

            Ok(Self {
                api_base_url: std::env::var("API_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                api_timeout_secs,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn api_base_url(&self) -> &str {
            self.api_base_url
                .as_deref()
                .unwrap_or(DEFAULT_API_BASE_URL)
        }

        pub fn api_timeout(&self) -> Option<Duration> {
            self.api_timeout_secs.map(Duration::from_secs)
        }
    }

}
