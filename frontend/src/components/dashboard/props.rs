use yew::prelude::*;

/// Which dashboard to show and as whom.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardTarget {
    Owned { id: String, user: String },
    Shared { token: String },
}

impl DashboardTarget {
    /// The viewing user; `None` on shared links.
    pub fn user(&self) -> Option<&str> {
        match self {
            DashboardTarget::Owned { user, .. } => Some(user),
            DashboardTarget::Shared { .. } => None,
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct DashboardProps {
    pub target: DashboardTarget,
}
