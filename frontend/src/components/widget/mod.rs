//! Widget card: one widget on the dashboard grid.
//!
//! The card resolves its rows once (inline data first, then its data
//! source, capped for display) and renders the selected layer from them.
//! Layer tabs appear when the widget has more than one layer; the chosen
//! layer is saved back for signed-in viewers.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::WidgetCardProps;
pub use state::WidgetCard;

impl Component for WidgetCard {
    type Message = Msg;
    type Properties = WidgetCardProps;

    fn create(ctx: &Context<Self>) -> Self {
        WidgetCard::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.widget != old_props.widget || props.sources != old_props.sources {
            self.refresh(props);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
