use common::chart::RenderOptions;
use common::model::datasource::DataSource;
use common::model::widget::Widget;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WidgetCardProps {
    pub widget: Rc<Widget>,
    /// The widget's own data source, when it has one and it was readable.
    pub sources: Rc<Vec<DataSource>>,
    pub options: Rc<RenderOptions>,
    /// Dashboard column count, to clip the card's placement.
    pub columns: u32,
    /// Viewing user. Layer changes are saved only when set.
    #[prop_or_default]
    pub user: Option<AttrValue>,
}
