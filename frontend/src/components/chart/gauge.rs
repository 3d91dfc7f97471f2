use super::geometry::arc_path;
use super::{format_value, svg, HEIGHT, WIDTH};
use common::chart::render::GaugeRender;
use std::f64::consts::FRAC_PI_2;
use yew::prelude::*;

const OUTER: f64 = 150.0;
const INNER: f64 = 105.0;

/// Half ring from the left (min) over the top to the right (max).
pub fn view(chart: &GaugeRender) -> Html {
    let cx = WIDTH / 2.0;
    let cy = HEIGHT - 40.0;
    let start = -FRAC_PI_2;
    let filled = start + chart.percent.clamp(0.0, 100.0) / 100.0 * 2.0 * FRAC_PI_2;

    svg(html! {
        <>
            <path d={arc_path(cx, cy, OUTER, INNER, start, FRAC_PI_2)} fill={chart.track_color.clone()} />
            if chart.percent > 0.0 {
                <path d={arc_path(cx, cy, OUTER, INNER, start, filled)} fill={chart.color.clone()}>
                    <title>{ format!("{:.0}%", chart.percent) }</title>
                </path>
            }
            <text x={cx.to_string()} y={(cy - 10.0).to_string()} font-size="32" font-weight="600"
                  text-anchor="middle" fill="#111827">
                { format_value(chart.value) }
            </text>
            <g font-size="11" fill="#6b7280" text-anchor="middle">
                <text x={(cx - (OUTER + INNER) / 2.0).to_string()} y={(cy + 16.0).to_string()}>{ format_value(chart.min) }</text>
                <text x={(cx + (OUTER + INNER) / 2.0).to_string()} y={(cy + 16.0).to_string()}>{ format_value(chart.max) }</text>
            </g>
        </>
    })
}
