use super::geometry::{scale, ticks};
use super::{format_value, svg, HEIGHT, WIDTH};
use common::chart::render::{CartesianKind, CartesianPoint, CartesianRender, AREA_FILL_OPACITY};
use common::chart::value::display;
use common::model::widget::{Annotation, ReferenceAxis, ReferenceLine};
use yew::prelude::*;

const LEFT: f64 = 48.0;
const RIGHT: f64 = 12.0;
const TOP: f64 = 20.0;
const BOTTOM: f64 = 28.0;
const TICKS: usize = 5;
/// Category labels shown along the x axis at most.
const MAX_X_LABELS: usize = 12;

struct Frame {
    count: usize,
    y_domain: (f64, f64),
}

impl Frame {
    fn new(chart: &CartesianRender) -> Self {
        let (mut min, mut max) = (chart.y_min, chart.y_max);
        if max <= min {
            min -= 1.0;
            max += 1.0;
        }
        Self {
            count: chart.points.len().max(1),
            y_domain: (min, max),
        }
    }

    fn band(&self) -> f64 {
        (WIDTH - LEFT - RIGHT) / self.count as f64
    }

    /// Center of category `index`.
    fn x(&self, index: f64) -> f64 {
        LEFT + self.band() * (index + 0.5)
    }

    fn y(&self, value: f64) -> f64 {
        scale(value, self.y_domain, (HEIGHT - BOTTOM, TOP))
    }
}

pub fn view(chart: &CartesianRender) -> Html {
    let frame = Frame::new(chart);
    svg(html! {
        <>
            { grid(chart, &frame) }
            { series(chart, &frame) }
            { x_labels(chart, &frame) }
            { for chart.reference_lines.iter().map(|line| reference_line(line, &frame)) }
            { for chart.annotations.iter().filter_map(|note| annotation(note, chart, &frame)) }
            if chart.show_legend {
                { legend(chart) }
            }
        </>
    })
}

fn grid(chart: &CartesianRender, frame: &Frame) -> Html {
    let (min, max) = frame.y_domain;
    html! {
        <g class="axis" font-size="10" fill="#6b7280">
            { for ticks(min, max, TICKS).into_iter().map(|tick| {
                let y = frame.y(tick);
                html! {
                    <g>
                        if chart.show_grid {
                            <line x1={LEFT.to_string()} x2={(WIDTH - RIGHT).to_string()}
                                  y1={y.to_string()} y2={y.to_string()} stroke="#e5e7eb" />
                        }
                        <text x={(LEFT - 6.0).to_string()} y={(y + 3.0).to_string()} text-anchor="end">
                            { format_value(tick) }
                        </text>
                    </g>
                }
            }) }
            <line x1={LEFT.to_string()} x2={(WIDTH - RIGHT).to_string()}
                  y1={(HEIGHT - BOTTOM).to_string()} y2={(HEIGHT - BOTTOM).to_string()} stroke="#9ca3af" />
        </g>
    }
}

fn tooltip(chart: &CartesianRender, point: &CartesianPoint) -> String {
    match point.value {
        Some(value) => format!("{}: {} {}", point.category, format_value(value), chart.y_key),
        None => format!("{}: no value", point.category),
    }
}

fn series(chart: &CartesianRender, frame: &Frame) -> Html {
    match chart.chart {
        CartesianKind::Bar => bars(chart, frame),
        CartesianKind::Line => lines(chart, frame, None),
        CartesianKind::Area => lines(chart, frame, chart.fill_opacity.or(Some(AREA_FILL_OPACITY))),
        CartesianKind::Scatter => dots(chart, frame),
    }
}

fn bars(chart: &CartesianRender, frame: &Frame) -> Html {
    let width = frame.band() * 0.7;
    let baseline = frame.y(0.0_f64.clamp(frame.y_domain.0, frame.y_domain.1));
    html! {
        <g>
            { for chart.points.iter().enumerate().filter_map(|(i, point)| {
                let value = point.value?;
                let top = frame.y(value);
                let (y, height) = if top < baseline { (top, baseline - top) } else { (baseline, top - baseline) };
                Some(html! {
                    <rect x={(frame.x(i as f64) - width / 2.0).to_string()} y={y.to_string()}
                          width={width.to_string()} height={height.to_string()} fill={chart.color.clone()}>
                        <title>{ tooltip(chart, point) }</title>
                    </rect>
                })
            }) }
        </g>
    }
}

/// Runs of consecutive points with values; missing values split the line.
fn segments(chart: &CartesianRender, frame: &Frame) -> Vec<Vec<(f64, f64)>> {
    let mut runs = vec![Vec::new()];
    for (i, point) in chart.points.iter().enumerate() {
        match point.value {
            Some(value) => {
                if let Some(run) = runs.last_mut() {
                    run.push((frame.x(i as f64), frame.y(value)));
                }
            }
            None => runs.push(Vec::new()),
        }
    }
    runs.retain(|run| !run.is_empty());
    runs
}

fn lines(chart: &CartesianRender, frame: &Frame, fill_opacity: Option<f32>) -> Html {
    let baseline = frame.y(frame.y_domain.0.max(0.0).min(frame.y_domain.1));
    let runs = segments(chart, frame);
    html! {
        <g>
            { for runs.iter().map(|run| {
                let points: Vec<String> = run.iter().map(|(x, y)| format!("{:.2},{:.2}", x, y)).collect();
                let area = fill_opacity.map(|opacity| {
                    let (first_x, _) = run[0];
                    let (last_x, _) = run[run.len() - 1];
                    let polygon = format!(
                        "{:.2},{:.2} {} {:.2},{:.2}",
                        first_x, baseline, points.join(" "), last_x, baseline
                    );
                    html! { <polygon points={polygon} fill={chart.color.clone()} fill-opacity={opacity.to_string()} /> }
                });
                html! {
                    <>
                        { area.unwrap_or_default() }
                        <polyline points={points.join(" ")} fill="none" stroke={chart.color.clone()} stroke-width="2" />
                    </>
                }
            }) }
            { dots(chart, frame) }
        </g>
    }
}

fn dots(chart: &CartesianRender, frame: &Frame) -> Html {
    let radius = if chart.chart == CartesianKind::Scatter { 4 } else { 3 };
    html! {
        <g>
            { for chart.points.iter().enumerate().filter_map(|(i, point)| {
                let value = point.value?;
                Some(html! {
                    <circle cx={frame.x(i as f64).to_string()} cy={frame.y(value).to_string()}
                            r={radius.to_string()} fill={chart.color.clone()}>
                        <title>{ tooltip(chart, point) }</title>
                    </circle>
                })
            }) }
        </g>
    }
}

fn x_labels(chart: &CartesianRender, frame: &Frame) -> Html {
    let every = chart.points.len().div_ceil(MAX_X_LABELS).max(1);
    html! {
        <g font-size="10" fill="#6b7280" text-anchor="middle">
            { for chart.points.iter().enumerate().step_by(every).map(|(i, point)| html! {
                <text x={frame.x(i as f64).to_string()} y={(HEIGHT - BOTTOM + 14.0).to_string()}>
                    { &point.category }
                </text>
            }) }
        </g>
    }
}

fn reference_line(line: &ReferenceLine, frame: &Frame) -> Html {
    let color = line.color.clone().unwrap_or_else(|| "#ef4444".to_string());
    let label = line.label.clone().unwrap_or_default();
    match line.axis {
        ReferenceAxis::Y => {
            let y = frame.y(line.value);
            html! {
                <g>
                    <line x1={LEFT.to_string()} x2={(WIDTH - RIGHT).to_string()} y1={y.to_string()} y2={y.to_string()}
                          stroke={color.clone()} stroke-dasharray="4 3" />
                    <text x={(WIDTH - RIGHT).to_string()} y={(y - 4.0).to_string()} font-size="10"
                          text-anchor="end" fill={color}>{ label }</text>
                </g>
            }
        }
        // X reference values are category positions.
        ReferenceAxis::X => {
            let x = frame.x(line.value);
            html! {
                <g>
                    <line x1={x.to_string()} x2={x.to_string()} y1={TOP.to_string()} y2={(HEIGHT - BOTTOM).to_string()}
                          stroke={color.clone()} stroke-dasharray="4 3" />
                    <text x={(x + 4.0).to_string()} y={(TOP + 10.0).to_string()} font-size="10" fill={color}>{ label }</text>
                </g>
            }
        }
    }
}

/// Places a note on its category; the point's value is used when the note
/// has no `y`. Notes on unknown categories are skipped.
fn annotation(note: &Annotation, chart: &CartesianRender, frame: &Frame) -> Option<Html> {
    let category = display(&note.x);
    let index = chart.points.iter().position(|p| p.category == category)?;
    let value = note.y.or(chart.points[index].value)?;
    let (x, y) = (frame.x(index as f64), frame.y(value));
    Some(html! {
        <g font-size="10" fill="#111827">
            <circle cx={x.to_string()} cy={y.to_string()} r="2" />
            <text x={x.to_string()} y={(y - 8.0).to_string()} text-anchor="middle">{ &note.text }</text>
        </g>
    })
}

fn legend(chart: &CartesianRender) -> Html {
    html! {
        <g font-size="10">
            <rect x={LEFT.to_string()} y="4" width="10" height="10" fill={chart.color.clone()} />
            <text x={(LEFT + 14.0).to_string()} y="13" fill="#374151">{ &chart.y_key }</text>
        </g>
    }
}
