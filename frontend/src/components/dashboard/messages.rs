use crate::api::LoadedDashboard;

pub enum Msg {
    Load,
    Loaded(Result<LoadedDashboard, String>),
}
