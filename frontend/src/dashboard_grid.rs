use yew::{html, Children, Component, Context, Html, Properties};

/// Default column count when the dashboard does not set one.
pub const DEFAULT_COLUMNS: u32 = 12;
/// Height of one grid row in pixels.
const ROW_HEIGHT_PX: u32 = 80;

#[derive(Properties, PartialEq)]
pub struct DashboardGridProps {
    pub columns: u32,
    pub children: Children,
}

/// CSS grid the widget cards place themselves on.
pub struct DashboardGrid;

impl Component for DashboardGrid {
    type Message = ();
    type Properties = DashboardGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        DashboardGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, 1fr);
             grid-auto-rows: {}px;
             gap: 12px;
             padding: 16px 24px;",
            props.columns.max(1),
            ROW_HEIGHT_PX
        );

        html! {
            <div style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}

/// Inline style placing a card at its stored position. Grid lines are
/// 1-based; widths are clipped to the column count.
pub fn placement_style(x: u32, y: u32, w: u32, h: u32, columns: u32) -> String {
    let columns = columns.max(1);
    let column = x.min(columns - 1) + 1;
    let span = w.max(1).min(columns + 1 - column);
    format!(
        "grid-column: {} / span {}; grid-row: {} / span {};",
        column,
        span,
        y + 1,
        h.max(1)
    )
}
