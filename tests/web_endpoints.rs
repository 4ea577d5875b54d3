use actix_web::{http::StatusCode, test, web, App};
use std::sync::Arc;

use dialogue_agent::knowledge;
use dialogue_agent::web::{configure, AppState, AskResponse, SessionResponse};
use dialogue_agent::{
    Agent, KeywordIntentRecognizer, LexiconSentiment, PreferenceStore, RuleBasedExtractor,
    WeatherProvider, WeatherResult,
};

struct MildEverywhere;

#[async_trait::async_trait]
impl WeatherProvider for MildEverywhere {
    async fn fetch(&self, city: &str) -> WeatherResult {
        WeatherResult {
            city: city.to_string(),
            temperature: "18.0°C".to_string(),
            conditions: "scattered clouds".to_string(),
        }
    }
}

fn state(prefs_path: &std::path::Path) -> web::Data<AppState> {
    let agent = Agent::new(
        Arc::new(KeywordIntentRecognizer::default()),
        Arc::new(RuleBasedExtractor::new()),
        Arc::new(LexiconSentiment::default()),
        Arc::new(MildEverywhere),
    );
    web::Data::new(AppState::new(agent, PreferenceStore::new(prefs_path)))
}

fn ask(session_id: Option<uuid::Uuid>, text: &str) -> serde_json::Value {
    serde_json::json!({ "session_id": session_id, "user_input": text })
}

#[actix_web::test]
async fn first_session_welcomes_and_persists_flag() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("user_data.json");
    let data = state(&prefs_path);
    let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

    let req = test::TestRequest::post().uri("/session").to_request();
    let body: SessionResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.response.starts_with(knowledge::WELCOME_LINES[0]));
    assert!(data.preferences.load().has_been_welcomed);

    let req = test::TestRequest::post().uri("/session").to_request();
    let body: SessionResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.response.ends_with(knowledge::RETURNING_USER_PROMPT));
}

#[actix_web::test]
async fn ask_keeps_context_within_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let data = state(&dir.path().join("user_data.json"));
    let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/ask")
        .set_json(ask(None, "What's the weather?"))
        .to_request();
    let first: AskResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first.response, knowledge::WEATHER_PROMPT);
    assert!(!first.ended);

    let req = test::TestRequest::post()
        .uri("/ask")
        .set_json(ask(Some(first.session_id), "Rome"))
        .to_request();
    let second: AskResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second.session_id, first.session_id);
    assert_eq!(second.response, "Got it, the weather in Rome is 18.0°C and scattered clouds.");

    // A different conversation does not see the pending prompt.
    let req = test::TestRequest::post()
        .uri("/ask")
        .set_json(ask(None, "Rome"))
        .to_request();
    let other: AskResponse = test::call_and_read_body_json(&app, req).await;
    assert_ne!(other.session_id, first.session_id);
    assert_eq!(other.response, knowledge::LOW_CONFIDENCE_RESPONSE);

    let req = test::TestRequest::get()
        .uri(&format!("/session/{}/history", first.session_id))
        .to_request();
    let history: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let lines = history.as_array().unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["sender"], "You");
    assert_eq!(lines[3]["sender"], "Agent");
}

#[actix_web::test]
async fn preferred_city_is_saved_and_exit_closes_session() {
    let dir = tempfile::tempdir().unwrap();
    let data = state(&dir.path().join("user_data.json"));
    let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/ask")
        .set_json(ask(None, "Remember my city is Vienna"))
        .to_request();
    let reply: AskResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reply.response, "Okay, I've set your preferred weather city to Vienna.");
    assert_eq!(
        data.preferences.load().preferred_weather_city.as_deref(),
        Some("Vienna")
    );

    let req = test::TestRequest::post()
        .uri("/ask")
        .set_json(ask(Some(reply.session_id), "bye"))
        .to_request();
    let bye: AskResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bye.response, knowledge::GOODBYE_RESPONSE);
    assert!(bye.ended);

    let req = test::TestRequest::get()
        .uri(&format!("/session/{}/history", reply.session_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn failed_preference_save_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let data = state(&dir.path().join("missing").join("user_data.json"));
    let app = test::init_service(App::new().app_data(data).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/ask")
        .set_json(ask(None, "my city is Quito"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn index_serves_chat_page() {
    let dir = tempfile::tempdir().unwrap();
    let data = state(&dir.path().join("user_data.json"));
    let app = test::init_service(App::new().app_data(data).configure(configure)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("AI Assistant Prototype"));
}
