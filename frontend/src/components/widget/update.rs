use super::helpers::download_csv;
use super::messages::Msg;
use super::state::WidgetCard;
use crate::api;
use common::export::{export_file_name, rows_to_csv};
use yew::platform::spawn_local;
use yew::prelude::*;

pub fn update(card: &mut WidgetCard, ctx: &Context<WidgetCard>, msg: Msg) -> bool {
    let props = ctx.props();
    match msg {
        Msg::SelectLayer(index) => {
            let index = card.composed(props).clamp_index(index);
            if index == card.active_layer {
                return false;
            }
            card.active_layer = index;
            if let Some(user) = props.user.clone() {
                let link = ctx.link().clone();
                let widget_id = props.widget.id.clone();
                spawn_local(async move {
                    let saved = api::save_active_layer(&widget_id, &user, index).await;
                    link.send_message(Msg::LayerSaved(saved));
                });
            }
            true
        }
        Msg::LayerSaved(Ok(widget)) => {
            gloo_console::log!(format!(
                "widget {} now opens on layer {}",
                widget.id, widget.active_layer
            ));
            false
        }
        Msg::LayerSaved(Err(e)) => {
            // The choice still applies for this session.
            gloo_console::warn!(format!("could not save the layer choice: {}", e));
            false
        }
        Msg::DownloadCsv => {
            let csv = rows_to_csv(&card.resolution.rows);
            if let Err(e) = download_csv(&export_file_name(&props.widget.title), &csv) {
                gloo_console::error!("csv download failed", e);
            }
            false
        }
    }
}
