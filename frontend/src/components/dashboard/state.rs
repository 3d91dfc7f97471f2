use crate::api::LoadedDashboard;

pub struct DashboardPage {
    pub loaded: Option<LoadedDashboard>,
    pub error: Option<String>,
    pub loading: bool,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            loaded: None,
            error: None,
            loading: true,
        }
    }
}
