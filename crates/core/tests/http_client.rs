use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use wildcard_core::client::{ApiError, Endpoint, HttpJournalClient, JournalApi};
use wildcard_core::domain::analysis::AnalysisResult;
use wildcard_core::domain::chat::ChatMessage;
use wildcard_core::domain::form::InvestmentFormData;
use wildcard_core::domain::quiz::QuizKind;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn analyze(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(body);
    Json(json!({
        "request_id": "req-1",
        "learning_pattern_analysis": {
            "investor_character": {"type": "바겐 헌터", "description": "d", "behavioral_bias": "anchoring_effect"}
        },
    }))
}

async fn chat(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    let message = body["message"].as_str().unwrap_or_default().to_string();
    seen.lock().unwrap().push(body);
    Json(json!({"message": format!("re: {message}")}))
}

async fn quiz(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(body);
    Json(json!({
        "quiz_set": {
            "quizzes": [
                {"question": "q1", "quiz_type": "multiple_choice", "options": ["a", "b"], "correct_answer_index": 1},
                {"question": "q2", "quiz_type": "reflection", "options": [{"text": "x", "solution": "s"}]},
            ]
        }
    }))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn ok_backend() -> (HttpJournalClient, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v1/analyze", post(analyze))
        .route("/v1/chat", post(chat))
        .route("/v1/quiz", post(quiz))
        .with_state(seen.clone());
    let client = HttpJournalClient::new(&spawn(app).await, None).unwrap();
    (client, seen)
}

async fn failing_backend(status: StatusCode, body: &'static str) -> HttpJournalClient {
    let app = Router::new()
        .route("/v1/analyze", post(move || async move { (status, body) }))
        .route("/v1/chat", post(move || async move { (status, body) }))
        .route("/v1/quiz", post(move || async move { (status, body) }));
    HttpJournalClient::new(&spawn(app).await, None).unwrap()
}

#[tokio::test]
async fn analyze_posts_latest_ticker_and_returns_raw_json() {
    let (client, seen) = ok_backend().await;

    let result = client
        .analyze(&InvestmentFormData::quick_sample())
        .await
        .unwrap();
    assert_eq!(result.request_id(), Some("req-1"));
    assert_eq!(
        result.learning_pattern().investor_character.unwrap().kind,
        "바겐 헌터"
    );

    let body = seen.lock().unwrap().remove(0);
    assert_eq!(body["layer1_stock"], "삼성전자");
    assert_eq!(body["layer2_buy_date"], "2025-01-03");
    assert_eq!(body["layer2_sell_date"], "2025-02-10");
    assert_eq!(body["position_status"], "holding");
    assert_eq!(body["metadata"]["stocks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn chat_forwards_history_and_message() {
    let (client, seen) = ok_backend().await;

    let history = vec![ChatMessage::user("안녕"), ChatMessage::assistant("반가워요")];
    let reply = client.chat(&history, "손절 기준은?").await.unwrap();
    assert_eq!(reply.message, "re: 손절 기준은?");

    let body = seen.lock().unwrap().remove(0);
    assert_eq!(body["history"][1]["role"], "assistant");
    assert_eq!(body["message"], "손절 기준은?");
}

#[tokio::test]
async fn quiz_sends_pattern_analysis_and_normalizes_reply() {
    let (client, seen) = ok_backend().await;

    let analysis = AnalysisResult::from_value(json!({"learning_pattern_analysis": {"k": 1}}));
    let quizzes = client.generate_quiz(&analysis).await.unwrap();

    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[0].kind, QuizKind::Standard);
    assert_eq!(quizzes[0].options[1].text, "b");
    assert_eq!(quizzes[0].correct_answer_index, Some(1));
    assert_eq!(quizzes[1].kind, QuizKind::Personality);
    assert_eq!(quizzes[1].options[0].solution.as_deref(), Some("s"));
    assert_eq!(quizzes[1].correct_answer_index, None);

    // Without the sub-object an empty one is sent.
    client
        .generate_quiz(&AnalysisResult::from_value(json!({})))
        .await
        .unwrap();
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], json!({"learning_pattern_analysis": {"k": 1}}));
    assert_eq!(seen[1], json!({"learning_pattern_analysis": {}}));
}

#[tokio::test]
async fn non_success_status_fails_every_endpoint() {
    for (status, body, text) in [
        (StatusCode::SERVICE_UNAVAILABLE, "", "Service Unavailable"),
        (StatusCode::BAD_REQUEST, r#"{"detail":"bad form"}"#, "Bad Request"),
    ] {
        let client = failing_backend(status, body).await;
        let analysis = AnalysisResult::from_value(json!({}));

        let errors = [
            client
                .analyze(&InvestmentFormData::default())
                .await
                .unwrap_err(),
            client.chat(&[], "hi").await.unwrap_err(),
            client.generate_quiz(&analysis).await.unwrap_err(),
        ];

        for (err, endpoint) in errors
            .iter()
            .zip([Endpoint::Analyze, Endpoint::Chat, Endpoint::Quiz])
        {
            assert_eq!(err.to_string(), format!("API error: {text}"));
            let api = err.downcast_ref::<ApiError>().unwrap();
            assert_eq!(api.endpoint, endpoint);
            assert_eq!(api.status.as_u16(), status.as_u16());
            assert_eq!(api.body.as_deref(), (!body.is_empty()).then_some(body));
        }
    }
}

#[tokio::test]
async fn unreachable_backend_is_an_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpJournalClient::new(&format!("http://{addr}"), None).unwrap();
    let err = client
        .analyze(&InvestmentFormData::default())
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ApiError>().is_none());
    assert!(format!("{err:#}").contains("/v1/analyze"));
}
