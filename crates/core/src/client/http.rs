use crate::client::error::ApiError;
use crate::client::{Endpoint, JournalApi};
use crate::config::Settings;
use crate::domain::analysis::AnalysisResult;
use crate::domain::chat::{ChatMessage, ChatReply};
use crate::domain::date_range::split_period;
use crate::domain::form::{InvestmentFormData, PositionStatus, StockDetail};
use crate::domain::quiz::{normalize_quizzes, Quiz};
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpJournalClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpJournalClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(settings.api_base_url(), settings.api_timeout())
    }

    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build journal api http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> anyhow::Result<Value> {
        let url = self.url(endpoint);
        let t0 = std::time::Instant::now();

        let res = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("failed to read response body from {url}"))?;

        tracing::debug!(
            endpoint = endpoint.path(),
            %status,
            elapsed_ms = t0.elapsed().as_millis(),
            "journal api response"
        );

        if !status.is_success() {
            return Err(ApiError::new(endpoint, status, text).into());
        }

        serde_json::from_str::<Value>(&text)
            .with_context(|| format!("{} response is not valid JSON: {text}", endpoint.path()))
    }
}

#[async_trait::async_trait]
impl JournalApi for HttpJournalClient {
    async fn analyze(&self, form: &InvestmentFormData) -> anyhow::Result<AnalysisResult> {
        let body = AnalyzeRequest::from_form(form);
        tracing::info!(
            stock = body.layer1_stock,
            stocks = form.stocks.len(),
            position_status = body.position_status,
            "requesting analysis"
        );
        let raw = self.post_json(Endpoint::Analyze, &body).await?;
        Ok(AnalysisResult::from_value(raw))
    }

    async fn chat(&self, history: &[ChatMessage], message: &str) -> anyhow::Result<ChatReply> {
        let body = ChatRequest { history, message };
        let raw = self.post_json(Endpoint::Chat, &body).await?;
        serde_json::from_value::<ChatReply>(raw).context("failed to decode chat response")
    }

    async fn generate_quiz(&self, analysis: &AnalysisResult) -> anyhow::Result<Vec<Quiz>> {
        let body = QuizRequest {
            learning_pattern_analysis: analysis.learning_pattern_value(),
        };
        let raw = self.post_json(Endpoint::Quiz, &body).await?;
        let quizzes = normalize_quizzes(&raw);
        tracing::info!(quizzes = quizzes.len(), "quiz generated");
        Ok(quizzes)
    }
}

/// Body of `POST /v1/analyze`. Only the latest ticker drives the analysis;
/// the whole list travels in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub layer1_stock: &'a str,
    pub layer2_buy_date: String,
    pub layer2_sell_date: String,
    pub position_status: &'static str,
    pub layer3_decision_basis: String,
    pub metadata: AnalyzeMetadata<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeMetadata<'a> {
    pub stocks: &'a [StockDetail],
}

impl<'a> AnalyzeRequest<'a> {
    pub fn from_form(form: &'a InvestmentFormData) -> Self {
        let latest = form.latest_stock();

        let (buy, sell) = match latest {
            Some(stock) if stock.uses_custom_period() && !stock.custom_period.is_empty() => {
                split_period(&stock.custom_period)
            }
            _ => (String::new(), String::new()),
        };

        Self {
            layer1_stock: latest.map(|s| s.name.as_str()).unwrap_or(""),
            layer2_buy_date: buy,
            layer2_sell_date: sell,
            position_status: latest
                .map(|s| s.status)
                .unwrap_or(PositionStatus::Holding)
                .as_str(),
            layer3_decision_basis: form.decision_basis.join(", "),
            metadata: AnalyzeMetadata {
                stocks: &form.stocks,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    history: &'a [ChatMessage],
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct QuizRequest {
    learning_pattern_analysis: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{CUSTOM_PERIOD, TRADE_PERIODS};
    use serde_json::json;

    #[test]
    fn analyze_body_derives_dates_from_custom_range() {
        let mut first = StockDetail::new("테슬라");
        first.period = TRADE_PERIODS[0].to_string();
        let mut latest = StockDetail::new("삼성전자");
        latest.status = PositionStatus::Sold;
        latest.period = CUSTOM_PERIOD.to_string();
        latest.custom_period = "2025-01-03 ~ 2025-01-10".to_string();

        let form = InvestmentFormData {
            stocks: vec![first, latest],
            decision_basis: vec!["뉴스·기사".to_string(), "직감".to_string()],
        };

        let body = serde_json::to_value(AnalyzeRequest::from_form(&form)).unwrap();
        assert_eq!(body["layer1_stock"], "삼성전자");
        assert_eq!(body["layer2_buy_date"], "2025-01-03");
        assert_eq!(body["layer2_sell_date"], "2025-01-10");
        assert_eq!(body["position_status"], "sold");
        assert_eq!(body["layer3_decision_basis"], "뉴스·기사, 직감");
        assert_eq!(body["metadata"]["stocks"].as_array().unwrap().len(), 2);
        assert_eq!(body["metadata"]["stocks"][1]["customPeriod"], "2025-01-03 ~ 2025-01-10");
    }

    #[test]
    fn preset_period_sends_empty_dates() {
        let mut stock = StockDetail::new("카카오");
        stock.period = TRADE_PERIODS[1].to_string();
        // Stale text from a previously shown editor is ignored.
        stock.custom_period = "2025-01-03 ~ 2025-01-10".to_string();
        let form = InvestmentFormData {
            stocks: vec![stock],
            decision_basis: vec![],
        };

        let body = AnalyzeRequest::from_form(&form);
        assert_eq!(body.layer2_buy_date, "");
        assert_eq!(body.layer2_sell_date, "");
        assert_eq!(body.layer3_decision_basis, "");
    }

    #[test]
    fn empty_form_defaults_to_holding() {
        let form = InvestmentFormData::default();
        let body = serde_json::to_value(AnalyzeRequest::from_form(&form)).unwrap();
        assert_eq!(
            body,
            json!({
                "layer1_stock": "",
                "layer2_buy_date": "",
                "layer2_sell_date": "",
                "position_status": "holding",
                "layer3_decision_basis": "",
                "metadata": {"stocks": []},
            })
        );
    }

    #[test]
    fn free_text_period_goes_to_buy_date() {
        let mut stock = StockDetail::new("카카오");
        stock.period = CUSTOM_PERIOD.to_string();
        stock.custom_period = "2024년 여름".to_string();
        let form = InvestmentFormData {
            stocks: vec![stock],
            decision_basis: vec![],
        };
        let body = AnalyzeRequest::from_form(&form);
        assert_eq!(body.layer2_buy_date, "2024년 여름");
        assert_eq!(body.layer2_sell_date, "");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = HttpJournalClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(Endpoint::Quiz), "http://localhost:8000/v1/quiz");
    }
}
