use super::geometry::polar;
use super::{format_value, svg, HEIGHT, WIDTH};
use common::chart::render::RadarRender;
use std::f64::consts::PI;
use yew::prelude::*;

const RADIUS: f64 = 90.0;
const RINGS: usize = 4;

pub fn view(chart: &RadarRender) -> Html {
    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0 + 6.0);
    let count = chart.axes.len().max(1);
    let angle = |i: usize| 2.0 * PI * i as f64 / count as f64;
    let max = if chart.max > 0.0 { chart.max } else { 1.0 };

    let ring = |fraction: f64| -> String {
        (0..count)
            .map(|i| {
                let (x, y) = polar(cx, cy, RADIUS * fraction, angle(i));
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    };
    let shape: String = chart
        .axes
        .iter()
        .enumerate()
        .map(|(i, axis)| {
            let (x, y) = polar(cx, cy, RADIUS * (axis.value.max(0.0) / max), angle(i));
            format!("{:.2},{:.2}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    svg(html! {
        <>
            <g fill="none" stroke="#e5e7eb">
                { for (1..=RINGS).map(|r| html! { <polygon points={ring(r as f64 / RINGS as f64)} /> }) }
            </g>
            <g font-size="10" fill="#6b7280" text-anchor="middle">
                { for chart.axes.iter().enumerate().map(|(i, axis)| {
                    let (x, y) = polar(cx, cy, RADIUS + 14.0, angle(i));
                    html! {
                        <text x={x.to_string()} y={(y + 3.0).to_string()}>
                            { &axis.label }
                            <title>{ format!("{}: {}", axis.label, format_value(axis.value)) }</title>
                        </text>
                    }
                }) }
            </g>
            <polygon points={shape} fill={chart.color.clone()} fill-opacity="0.35"
                     stroke={chart.color.clone()} stroke-width="2" />
            if chart.show_legend {
                <text x="8" y="14" font-size="11" fill="#374151">{ &chart.value_key }</text>
            }
        </>
    })
}
