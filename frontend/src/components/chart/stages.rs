use super::{format_value, svg, HEIGHT, WIDTH};
use common::chart::render::FunnelRender;
use yew::prelude::*;

const MARGIN: f64 = 8.0;
const GAP: f64 = 4.0;

/// Funnel stages as centered bars, widest value full width.
pub fn view(chart: &FunnelRender) -> Html {
    let count = chart.stages.len().max(1) as f64;
    let widest = chart
        .stages
        .iter()
        .map(|s| s.value)
        .fold(0.0_f64, f64::max);
    let height = (HEIGHT - 2.0 * MARGIN - GAP * (count - 1.0)) / count;
    let usable = WIDTH - 2.0 * MARGIN;

    svg(html! {
        <g font-size="11">
            { for chart.stages.iter().enumerate().map(|(i, stage)| {
                let width = if widest > 0.0 { usable * (stage.value.max(0.0) / widest) } else { 0.0 };
                let x = (WIDTH - width) / 2.0;
                let y = MARGIN + i as f64 * (height + GAP);
                html! {
                    <g>
                        <rect x={x.to_string()} y={y.to_string()} width={width.to_string()}
                              height={height.to_string()} fill={stage.color.clone()} rx="3">
                            <title>{ format!("{}: {}", stage.label, format_value(stage.value)) }</title>
                        </rect>
                        <text x={(WIDTH / 2.0).to_string()} y={(y + height / 2.0 + 4.0).to_string()}
                              text-anchor="middle" fill="#111827">
                            { format!("{} ({})", stage.label, format_value(stage.value)) }
                        </text>
                    </g>
                }
            }) }
        </g>
    })
}
