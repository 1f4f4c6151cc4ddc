//! Titration model: chemistry, vessels and the timed session that drives them.
//!
//! Everything in here is plain Rust with no DOM access, so it runs under
//! `cargo test` on the host. The browser layer lives in `components`.

pub mod chemistry;
pub mod clock;
pub mod config;
pub mod experiment_log;
pub mod presenter;
pub mod session;
pub mod vessel;


pub use chemistry::{
    classify_state, compute_ph, effective_acid_concentration, indicator_blend_color,
    indicator_progress, Rgb, TitrationState, INDICATOR_END_PH, INDICATOR_START_PH,
};
pub use clock::{Clock, ManualClock, PerformanceClock};
pub use config::TitrationConfig;
pub use experiment_log::{ExperimentLog, ExperimentLogPayload, LabItem};
pub use presenter::{
    dispatch, fmt_number, parse_amount, sanitize_amount_input, IndicatorLabel, PanelAction,
    ReadingsView,
};
pub use session::{DisplaySnapshot, SessionPhase, SolutionState, TitrationSession};
pub use vessel::{Burette, Flask, Stopcock};
