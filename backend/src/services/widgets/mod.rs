//! # Widget Service Module
//!
//! Routes under `/api/widgets`. A widget is reachable by whoever can reach
//! its dashboard, and editable by whoever can edit it.
//!
//! ## Registered Routes
//!
//! * **`POST /`**: adds a widget, snapshotting up to 100 source rows into
//!   its config (`create`).
//! * **`GET /{id}`**, **`PATCH /{id}`**, **`DELETE /{id}`** (`get`, `update`,
//!   `delete`).
//! * **`GET /{id}/render`**: resolved, composed and dispatched chart
//!   description for one layer (`render`).
//! * **`GET /{id}/export.csv`**: the displayed rows as CSV (`export`).

mod create;
mod delete;
mod export;
mod get;
mod render;
mod update;

use crate::error::ApiError;
use actix_web::web::{delete, get, patch, post, scope};
use actix_web::Scope;
use common::chart::ChartSpec;
use common::model::widget::WidgetLayer;
use common::model::widget_config::{ChartType, WidgetConfig};

const API_PATH: &str = "/api/widgets";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", patch().to(update::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/render", get().to(render::process))
        .route("/{id}/export.csv", get().to(export::process))
}

/// Strict config checks for the widget and for each layer's effective
/// config. Unknown chart types pass; they render as a placeholder.
pub(crate) fn validate_widget(
    chart_type: &ChartType,
    config: &WidgetConfig,
    layers: Option<&[WidgetLayer]>,
) -> Result<(), ApiError> {
    ChartSpec::validate(chart_type, config)?;
    for layer in layers.unwrap_or_default() {
        let effective = match &layer.config {
            Some(overlay) => config.merged_with(overlay),
            None => config.clone(),
        };
        ChartSpec::validate(&layer.chart_type, &effective)?;
    }
    Ok(())
}
