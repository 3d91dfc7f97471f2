use common::model::widget::Widget;

pub enum Msg {
    SelectLayer(usize),
    LayerSaved(Result<Widget, String>),
    DownloadCsv,
}
