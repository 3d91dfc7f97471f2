use common::chart::render::TableRender;
use yew::prelude::*;

pub fn view(chart: &TableRender) -> Html {
    html! {
        <div class="table-wrap">
            <table class="data-table">
                <thead>
                    <tr>{ for chart.columns.iter().map(|c| html! { <th>{ c }</th> }) }</tr>
                </thead>
                <tbody>
                    { for chart.rows.iter().map(|row| html! {
                        <tr>{ for row.iter().map(|cell| html! { <td>{ cell }</td> }) }</tr>
                    }) }
                </tbody>
            </table>
            if chart.total_rows > chart.rows.len() {
                <p class="insight">{ format!("Showing {} of {} rows.", chart.rows.len(), chart.total_rows) }</p>
            }
        </div>
    }
}
