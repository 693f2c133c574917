mod card;
mod config;
mod job_controller;
mod services;

use crate::card::text::FontSource;
use crate::config::ServerConfig;
use crate::job_controller::state::JobsState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env();

    let font = FontSource::load(&config.fonts_dir).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("cannot start without a card font: {e}"),
        )
    })?;
    let font = web::Data::new(font);

    // Initialize the job registry and its updater task.
    let (jobs_state, rx) = JobsState::new();
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(font.clone())
            .service(services::cards::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
