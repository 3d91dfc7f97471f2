//! SVG drawing of render descriptions.
//!
//! Every chart draws into a fixed `viewBox` and scales with its card.
//! Hover text uses SVG `<title>` elements.

mod cartesian;
mod geometry;
mod gauge;
mod pie;
mod radar;
mod stages;
mod table;

use common::chart::render::{ChartRender, StatRender};
use num_format::{Locale, ToFormattedString};
use yew::prelude::*;

pub(crate) const WIDTH: f64 = 400.0;
pub(crate) const HEIGHT: f64 = 240.0;

pub fn chart_view(render: &ChartRender) -> Html {
    match render {
        ChartRender::Empty { message } => placeholder(message),
        ChartRender::Unsupported { chart_type, message } => {
            placeholder(&format!("{}: {}", message, chart_type))
        }
        ChartRender::Cartesian(chart) => cartesian::view(chart),
        ChartRender::Pie(chart) => pie::view(chart),
        ChartRender::Gauge(chart) => gauge::view(chart),
        ChartRender::Funnel(chart) => stages::view(chart),
        ChartRender::Radar(chart) => radar::view(chart),
        ChartRender::Stat(stat) => stat_view(stat),
        ChartRender::Table(chart) => table::view(chart),
    }
}

fn placeholder(message: &str) -> Html {
    html! { <div class="placeholder">{ message }</div> }
}

fn stat_view(stat: &StatRender) -> Html {
    html! {
        <div class="stat">
            <div class="stat-value" style={format!("color: {}", stat.color)}>{ &stat.value }</div>
            if let Some(label) = &stat.label {
                <div class="stat-label">{ label }</div>
            }
        </div>
    }
}

fn svg(children: Html) -> Html {
    html! {
        <svg viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)} preserveAspectRatio="xMidYMid meet">
            { children }
        </svg>
    }
}

/// Axis and tooltip number text: grouped integers, otherwise two decimals.
pub(crate) fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_formatted_string(&Locale::en)
    } else {
        format!("{:.2}", value)
    }
}
