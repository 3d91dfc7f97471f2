pub mod chart;
pub mod dashboard;
pub mod widget;
