use super::geometry::arc_path;
use super::{format_value, svg, HEIGHT, WIDTH};
use common::chart::render::PieRender;
use std::f64::consts::PI;
use yew::prelude::*;

const MARGIN: f64 = 10.0;

pub fn view(chart: &PieRender) -> Html {
    let total: f64 = chart.slices.iter().map(|s| s.value.max(0.0)).sum();
    let half = HEIGHT / 2.0 - MARGIN;
    let cx = if chart.show_legend { HEIGHT / 2.0 + MARGIN } else { WIDTH / 2.0 };
    let cy = HEIGHT / 2.0;
    let outer = half * f64::from(chart.outer_radius);
    let inner = half * f64::from(chart.inner_radius);

    let mut start = 0.0;
    let wedges: Vec<Html> = chart
        .slices
        .iter()
        .filter(|slice| slice.value > 0.0 && total > 0.0)
        .map(|slice| {
            let share = slice.value / total;
            let end = start + share * 2.0 * PI;
            let path = arc_path(cx, cy, outer, inner, start, end);
            start = end;
            html! {
                <path d={path} fill={slice.color.clone()} stroke="white" stroke-width="1"
                      stroke-linejoin={if chart.corner_radius > 0.0 { "round" } else { "miter" }}>
                    <title>{ format!("{}: {} ({:.1}%)", slice.label, format_value(slice.value), share * 100.0) }</title>
                </path>
            }
        })
        .collect();

    svg(html! {
        <>
            { for wedges }
            if chart.show_legend {
                <g font-size="11" fill="#374151">
                    { for chart.slices.iter().enumerate().map(|(i, slice)| {
                        let y = MARGIN + 16.0 * i as f64;
                        let x = HEIGHT + 2.0 * MARGIN;
                        html! {
                            <g>
                                <rect x={x.to_string()} y={y.to_string()} width="10" height="10" fill={slice.color.clone()} />
                                <text x={(x + 14.0).to_string()} y={(y + 9.0).to_string()}>{ &slice.label }</text>
                            </g>
                        }
                    }) }
                </g>
            }
        </>
    })
}
