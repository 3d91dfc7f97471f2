//! Shared model and rendering core for the dashboard builder.
//!
//! The `model` and `requests` modules describe what travels between the
//! backend and the browser. The `chart` module is the pure rendering core:
//! it turns a widget plus its already-loaded data sources into a chart
//! description, and it is compiled into both the server and the wasm
//! frontend so both sides agree on every fallback rule.

pub mod chart;
pub mod export;
pub mod jobs;
pub mod model;
pub mod requests;
