//! Shared setup for handler tests.

use crate::auth::USER_HEADER;
use crate::config::Config;
use crate::db::testing::{temp_database, TestDatabase};
use crate::db::Database;
use crate::job_controller::state::{start_job_updater, JobsState};
use crate::services;
use crate::suggestions::{HeuristicSuggestions, SuggestionService};
use actix_web::test::TestRequest;
use actix_web::web;
use std::sync::Arc;

pub struct TestState {
    pub db: TestDatabase,
    pub jobs: JobsState,
    pub config: Config,
}

impl TestState {
    /// Fresh database, default config and a running job updater.
    pub fn new() -> Self {
        let config = Config::from_lookup(|_| None).expect("default config");
        let (jobs, rx) = JobsState::new(config.job_retention);
        tokio::spawn(start_job_updater(jobs.clone(), rx));
        TestState {
            db: temp_database(),
            jobs,
            config,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db.database
    }

    /// Registers app data and routes, as `main` does.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let suggestions: Arc<dyn SuggestionService> = Arc::new(HeuristicSuggestions);
        cfg.app_data(services::json_config(self.config.json_limit_bytes))
            .app_data(web::Data::new(self.db.database.clone()))
            .app_data(web::Data::new(self.jobs.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::from(suggestions));
        services::configure(cfg);
    }
}

/// A request already carrying the user header.
pub fn as_user(request: TestRequest, user: &str) -> TestRequest {
    request.insert_header((USER_HEADER, user))
}
