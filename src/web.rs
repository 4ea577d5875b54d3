use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::Agent;
use crate::conversation::Intent;
use crate::preferences::PreferenceStore;
use crate::session::SessionStore;

const AGENT: &str = "Agent";
const USER: &str = "You";

pub struct AppState {
    pub agent: Agent,
    pub sessions: SessionStore,
    pub preferences: PreferenceStore,
}

impl AppState {
    pub fn new(agent: Agent, preferences: PreferenceStore) -> Self {
        Self {
            agent,
            sessions: SessionStore::new(),
            preferences,
        }
    }
}

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub user_input: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AskResponse {
    pub session_id: Uuid,
    pub response: String,
    pub ended: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub response: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

fn save_failed(e: crate::error::AgentError) -> HttpResponse {
    log::error!("{}", e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Could not save your preferences.".to_string(),
    })
}

#[post("/session")]
async fn open_session(data: web::Data<AppState>) -> impl Responder {
    let mut prefs = data.preferences.load();
    let was_welcomed = prefs.has_been_welcomed;
    let greeting = data.agent.opening_message(&mut prefs);
    if prefs.has_been_welcomed != was_welcomed {
        if let Err(e) = data.preferences.save(&prefs) {
            return save_failed(e);
        }
    }

    let (session_id, handle) = data.sessions.open();
    handle.lock().await.record(AGENT, &greeting);
    HttpResponse::Ok().json(SessionResponse {
        session_id,
        response: greeting,
    })
}

#[post("/ask")]
async fn ask_endpoint(req: web::Json<AskRequest>, data: web::Data<AppState>) -> impl Responder {
    let (session_id, handle) = data.sessions.get_or_open(req.session_id);
    let mut session = handle.lock().await;

    let mut prefs = data.preferences.load();
    let before = prefs.clone();
    session.record(USER, &req.user_input);
    let outcome = data
        .agent
        .handle_turn(&mut session.context, &mut prefs, &req.user_input)
        .await;
    session.record(AGENT, &outcome.response);
    drop(session);

    if prefs != before {
        if let Err(e) = data.preferences.save(&prefs) {
            return save_failed(e);
        }
    }

    let ended = outcome.intent == Intent::Exit;
    if ended {
        data.sessions.close(&session_id);
    }
    HttpResponse::Ok().json(AskResponse {
        session_id,
        response: outcome.response,
        ended,
    })
}

#[get("/session/{id}/history")]
async fn history(path: web::Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    match data.sessions.get(&path.into_inner()) {
        Some(handle) => {
            let session = handle.lock().await;
            HttpResponse::Ok().json(&session.history)
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Unknown session.".to_string(),
        }),
    }
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("index.html"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(open_session)
        .service(ask_endpoint)
        .service(history);
}
