use crate::app::App;

mod api;
mod app;
mod components;
mod dashboard_grid;

fn main() {
    yew::Renderer::<App>::new().render();
}
