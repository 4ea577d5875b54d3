use actix_web::{web, App, HttpServer};
use anyhow::Result;
use std::time::Duration;

use dialogue_agent::web::{configure, AppState};
use dialogue_agent::{Agent, PreferenceStore, Settings};

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load("Config")?;
    let agent = Agent::from_settings(&settings)?;
    let preferences = PreferenceStore::new(&settings.data.preferences_file);
    log::info!("Preferences stored at {:?}", preferences.path());

    let data = web::Data::new(AppState::new(agent, preferences));

    let idle = Duration::from_secs(settings.server.session_idle_secs);
    let pruner = data.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            pruner.sessions.prune_idle(idle);
        }
    });

    let host = settings.server.host.clone();
    let port = settings.server.port;
    log::info!("Starting server at http://{}:{}", host, port);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .bind((host, port))?
        .run()
        .await?;
    Ok(())
}
