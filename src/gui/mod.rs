//! GUI module - User interface components

mod app;
mod chart_view;
mod control_panel;
mod login;
mod summary_view;
mod table_view;

pub use app::DashboardApp;
pub use chart_view::ChartView;
pub use control_panel::{ControlPanel, ControlPanelAction, FilterInputs};
pub use login::LoginView;
pub use summary_view::SummaryView;
pub use table_view::TableView;
