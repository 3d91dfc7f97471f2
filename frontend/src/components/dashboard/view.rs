use super::state::DashboardPage;
use crate::components::widget::WidgetCard;
use crate::dashboard_grid::{DashboardGrid, DEFAULT_COLUMNS};
use common::chart::RenderOptions;
use std::rc::Rc;
use yew::prelude::*;

pub fn view(page: &DashboardPage, ctx: &Context<DashboardPage>) -> Html {
    if let Some(error) = &page.error {
        return html! { <div class="banner">{ format!("Could not load the dashboard: {}", error) }</div> };
    }
    let Some(loaded) = &page.loaded else {
        return html! { <div class="banner">{ "Loading…" }</div> };
    };

    let dashboard = &loaded.dashboard;
    let columns = dashboard.preferences.columns.unwrap_or(DEFAULT_COLUMNS);
    let options = Rc::new(RenderOptions::from_preferences(&dashboard.preferences));
    let user: Option<AttrValue> = ctx.props().target.user().map(|u| AttrValue::from(u.to_string()));

    html! {
        <div class="dashboard">
            <div class="dashboard-header">
                <h1>{ &dashboard.title }</h1>
                if let Some(description) = &dashboard.description {
                    <p>{ description }</p>
                }
            </div>
            if loaded.widgets.is_empty() {
                <div class="banner">{ "This dashboard has no widgets yet." }</div>
            }
            <DashboardGrid columns={columns}>
                { for loaded.widgets.iter().map(|widget| {
                    let sources: Vec<_> = loaded
                        .sources
                        .iter()
                        .filter(|s| widget.data_source_id.as_deref() == Some(s.id.as_str()))
                        .cloned()
                        .collect();
                    html! {
                        <WidgetCard
                            key={widget.id.clone()}
                            widget={Rc::new(widget.clone())}
                            sources={Rc::new(sources)}
                            options={options.clone()}
                            columns={columns}
                            user={user.clone()}
                        />
                    }
                }) }
            </DashboardGrid>
        </div>
    }
}
