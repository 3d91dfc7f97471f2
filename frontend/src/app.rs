//! Top-level component: picks the page from the browser location.
//!
//! - `/dashboards/{id}?user={user}` shows a dashboard as that user.
//! - `/share/{token}` shows a published dashboard without a user.

use crate::components::dashboard::{DashboardPage, DashboardTarget};
use yew::{html, Component, Context, Html};

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Dashboard { id: String, user: Option<String> },
    Shared { token: String },
    NotFound,
}

impl Route {
    pub fn parse(path: &str, query: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["dashboards", id] => Route::Dashboard {
                id: id.to_string(),
                user: query_param(query, "user"),
            },
            ["share", token] => Route::Shared {
                token: token.to_string(),
            },
            _ => Route::NotFound,
        }
    }

    fn current() -> Route {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Route::NotFound;
        };
        let path = location.pathname().unwrap_or_default();
        let query = location.search().unwrap_or_default();
        Route::parse(&path, &query)
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode(value))
        .filter(|value| !value.is_empty())
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    js_sys::decode_uri_component(&value)
        .ok()
        .and_then(|decoded| decoded.as_string())
        .unwrap_or(value)
}

pub struct App {
    route: Route,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            route: Route::current(),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match &self.route {
            Route::Dashboard { id, user: Some(user) } => html! {
                <DashboardPage target={DashboardTarget::Owned { id: id.clone(), user: user.clone() }} />
            },
            Route::Dashboard { user: None, .. } => html! {
                <div class="banner">{ "Add ?user=<your id> to the address to open this dashboard." }</div>
            },
            Route::Shared { token } => html! {
                <DashboardPage target={DashboardTarget::Shared { token: token.clone() }} />
            },
            Route::NotFound => html! {
                <div class="banner">{ "Open /dashboards/{id}?user={user} or a /share/{token} link." }</div>
            },
        }
    }
}
