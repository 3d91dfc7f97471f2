//! Dashboard page: loads a dashboard and its widgets, then lays the widget
//! cards out on the grid by their stored positions.

use crate::api;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod view;

pub use messages::Msg;
pub use props::{DashboardProps, DashboardTarget};
pub use state::DashboardPage;

impl Component for DashboardPage {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        DashboardPage::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => {
                self.loading = true;
                let link = ctx.link().clone();
                let target = ctx.props().target.clone();
                spawn_local(async move {
                    let result = match &target {
                        DashboardTarget::Owned { id, user } => api::load_dashboard(id, user).await,
                        DashboardTarget::Shared { token } => api::load_shared(token).await,
                    };
                    link.send_message(Msg::Loaded(result));
                });
                true
            }
            Msg::Loaded(Ok(loaded)) => {
                gloo_console::log!(format!(
                    "dashboard {} loaded with {} widgets",
                    loaded.dashboard.id,
                    loaded.widgets.len()
                ));
                self.loading = false;
                self.error = None;
                self.loaded = Some(loaded);
                true
            }
            Msg::Loaded(Err(e)) => {
                gloo_console::error!(format!("dashboard failed to load: {}", e));
                self.loading = false;
                self.error = Some(e);
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props() != old_props {
            ctx.link().send_message(Msg::Load);
        }
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
