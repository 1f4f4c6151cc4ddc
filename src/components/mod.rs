mod app;
mod experiment_log_panel;
mod mobile_summary;
mod nav_bar;
mod readings_display;
mod titration_controls;
mod vessel_view;

pub use app::TitrationLab;
pub use experiment_log_panel::{timestamp, ExperimentLogPanel};
pub use mobile_summary::MobileSummaryBar;
pub use nav_bar::NavBar;
pub use readings_display::ReadingsDisplay;
pub use titration_controls::TitrationControls;
pub use vessel_view::{VesselFrame, VesselView};
