mod auth;
mod config;
mod db;
mod error;
mod ingest;
mod job_controller;
mod services;
mod suggestions;

use crate::config::Config;
use crate::db::Database;
use crate::job_controller::state::{start_job_updater, JobsState};
use crate::suggestions::{HeuristicSuggestions, SuggestionService};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded frontend; unknown paths get `index.html` so the
/// client-side router can handle `/dashboards/...` and `/share/...`.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("invalid configuration: {}", e);
        io::Error::other(e.to_string())
    })?;
    let database = Database::open(&config.db_path).map_err(|e| {
        error!("cannot open database {}: {}", config.db_path.display(), e);
        io::Error::other(e.to_string())
    })?;
    info!("database ready at {}", config.db_path.display());

    let url = config.url();
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let (jobs_state, rx) = JobsState::new(config.job_retention);
    tokio::spawn(start_job_updater(jobs_state.clone(), rx));

    let suggestions: Arc<dyn SuggestionService> = Arc::new(HeuristicSuggestions);
    let bind = (config.host.clone(), config.port);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(config.json_limit_bytes))
            .app_data(web::Data::new(database.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::from(suggestions.clone()))
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind)?
    .run()
    .await
}
