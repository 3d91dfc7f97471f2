use super::messages::Msg;
use super::state::WidgetCard;
use crate::components::chart::chart_view;
use crate::dashboard_grid::placement_style;
use yew::prelude::*;

pub fn view(card: &WidgetCard, ctx: &Context<WidgetCard>) -> Html {
    let props = ctx.props();
    let widget = &props.widget;
    let link = ctx.link();
    let composed = card.composed(props);
    let rendered = composed.render(card.active_layer, &props.options);
    let position = widget.position;
    let style = placement_style(position.x, position.y, position.w, position.h, props.columns);
    let has_rows = !card.resolution.rows.is_empty();

    html! {
        <div class="widget-card" style={style}>
            <header>
                <h2>{ &widget.title }</h2>
                <button
                    title="Download CSV"
                    disabled={!has_rows}
                    onclick={link.callback(|_| Msg::DownloadCsv)}
                >
                    { "CSV" }
                </button>
            </header>
            if composed.layers().len() > 1 {
                <div class="layer-tabs">
                    { for composed.layers().iter().map(|layer| {
                        let index = layer.index;
                        let class = classes!((index == rendered.index).then_some("active"));
                        html! {
                            <button class={class} onclick={link.callback(move |_| Msg::SelectLayer(index))}>
                                { &layer.label }
                            </button>
                        }
                    }) }
                </div>
            }
            <div class="widget-body">
                { chart_view(&rendered.render) }
            </div>
            if card.resolution.truncated {
                <p class="insight">{ "Showing the first rows of a larger data source." }</p>
            }
            if let Some(insight) = &widget.ai_insights {
                <p class="insight">{ insight }</p>
            }
        </div>
    }
}
