//! The titration run: solution state, the four operator actions and their timing.
//!
//! Chemistry is applied synchronously by every action. Only the flask fill is spread
//! over time, and the burette's drip is purely visual. Nothing here schedules
//! callbacks: the host calls [`TitrationSession::tick`] once per frame and the session
//! works out what is due from its [`Clock`].
//!
//! Timed work (the fill ramp, drip-stop timers) is stamped with the session
//! generation it was created under. `reset` and `dispose` move to a new generation,
//! which turns anything left over from before into a no-op.

use log::{debug, info};

use super::chemistry::{classify_state, compute_ph, indicator_blend_color, Rgb};
use super::clock::Clock;
use super::config::TitrationConfig;
use super::vessel::{Burette, Flask};
use crate::error::ConfigError;

/// Requests at or below this volume (mL) do nothing.
const MIN_EFFECTIVE_ML: f64 = 1e-4;

/// Volumes of the current run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionState {
    /// Acid solution in the flask.
    pub flask_volume_ml: f64,
    /// Base delivered from the burette into the flask.
    pub delivered_base_ml: f64,
    /// Base dispensed so far; bounded by the burette's usable capacity.
    pub total_dispensed_ml: f64,
}

impl SolutionState {
    fn clear(&mut self) {
        self.flask_volume_ml = 0.0;
        self.delivered_base_ml = 0.0;
        self.total_dispensed_ml = 0.0;
    }
}

/// Read-only view of the run handed to the UI after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    /// Titrant concentration (mol/L).
    pub cb_molar: f64,
    pub va_ml: f64,
    pub vb_ml: f64,
    pub ph: f64,
    pub state_label: String,
    pub filled_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Filling,
}

#[derive(Debug, Clone)]
struct FillRamp {
    generation: u64,
    baseline_ml: f64,
    delta_ml: f64,
    started_at: f64,
    duration_s: f64,
}

impl FillRamp {
    fn progress(&self, now: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_s).clamp(0.0, 1.0)
    }
}

/// One Add NaOH press still draining from the burette.
#[derive(Debug, Clone)]
struct Drip {
    generation: u64,
    drip_id: u64,
    rate_ml_per_s: f64,
    due_at: f64,
}

type SnapshotListener = Box<dyn FnMut(&DisplaySnapshot)>;

/// One titration experiment.
pub struct TitrationSession<C: Clock> {
    config: TitrationConfig,
    clock: C,
    solution: SolutionState,
    flask: Flask,
    burette: Burette,
    color: Rgb,
    ramp: Option<FillRamp>,
    drips: Vec<Drip>,
    generation: u64,
    next_drip_id: u64,
    drained_until: f64,
    disposed: bool,
    listener: Option<SnapshotListener>,
}

impl<C: Clock> TitrationSession<C> {
    pub fn new(config: TitrationConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let clear = config.clear_color;
        let flask = Flask::new(config.flask_capacity_ml, clear);
        let burette = Burette::new(config.burette_capacity_ml, config.burette_initial_ml, clear);
        let now = clock.now_seconds();
        Ok(Self {
            config,
            clock,
            solution: SolutionState::default(),
            flask,
            burette,
            color: clear,
            ramp: None,
            drips: Vec::new(),
            generation: 0,
            next_drip_id: 0,
            drained_until: now,
            disposed: false,
            listener: None,
        })
    }

    /// Receive a snapshot after every state change. Replaces any previous listener.
    pub fn on_snapshot(&mut self, listener: impl FnMut(&DisplaySnapshot) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn config(&self) -> &TitrationConfig {
        &self.config
    }

    pub fn solution(&self) -> &SolutionState {
        &self.solution
    }

    pub fn flask(&self) -> &Flask {
        &self.flask
    }

    pub fn burette(&self) -> &Burette {
        &self.burette
    }

    /// Tint currently shown in both vessels.
    pub fn display_color(&self) -> Rgb {
        self.color
    }

    pub fn phase(&self) -> SessionPhase {
        if self.ramp.is_some() {
            SessionPhase::Filling
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn ph(&self) -> f64 {
        compute_ph(
            &self.config,
            self.solution.flask_volume_ml,
            self.solution.delivered_base_ml,
        )
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        let va = self.solution.flask_volume_ml;
        let ph = self.ph();
        let min_liquid = self.config.min_liquid_to_allow_base_ml;
        let state_label = if va < min_liquid {
            format!("add ≥ {} mL (diluted acid)", min_liquid)
        } else {
            classify_state(ph).to_string()
        };
        DisplaySnapshot {
            cb_molar: self.config.base_concentration,
            va_ml: va,
            vb_ml: self.solution.delivered_base_ml,
            ph,
            state_label,
            filled_text: format!(
                "Filled: {:.1} / {} mL",
                va, self.config.flask_capacity_ml
            ),
        }
    }

    /// Start pouring `requested_ml` of water into the flask at the configured rate.
    ///
    /// The request is clamped to the flask's free space. A fill already under way is
    /// cancelled and the new one starts from wherever that one had got to. Emits one
    /// snapshot straight away (volume unchanged) so listeners see the phase change.
    pub fn start_fill(&mut self, requested_ml: f64) {
        if self.disposed {
            return;
        }
        let free_ml = self.config.flask_capacity_ml - self.solution.flask_volume_ml;
        let delta = sanitize(requested_ml).min(free_ml).max(0.0);
        if delta <= MIN_EFFECTIVE_ML {
            debug!("fill of {} mL ignored, flask has {:.1} mL free", requested_ml, free_ml);
            return;
        }

        if self.ramp.take().is_some() {
            debug!("fill restarted at {:.2} mL", self.solution.flask_volume_ml);
        }
        self.ramp = Some(FillRamp {
            generation: self.generation,
            baseline_ml: self.solution.flask_volume_ml,
            delta_ml: delta,
            started_at: self.clock.now_seconds(),
            duration_s: delta / self.config.fill_rate_ml_per_s,
        });
        self.emit();
    }

    /// Freeze the flask at its current volume. Safe to call when nothing is filling.
    pub fn stop_fill(&mut self) {
        if self.disposed {
            return;
        }
        if self.ramp.take().is_some() {
            debug!("fill stopped at {:.2} mL", self.solution.flask_volume_ml);
        }
        self.emit();
    }

    /// Deliver `requested_ml` of NaOH.
    ///
    /// Volumes, pH and colour change right away; the burette then drips for the
    /// configured duration for show. Refused while the flask is nearly empty, and
    /// clamped so the run never dispenses more than the burette's usable volume.
    /// Overlapping drips add their flow rates, so the burette always drains exactly
    /// what was delivered.
    pub fn add_naoh(&mut self, requested_ml: f64) {
        if self.disposed {
            return;
        }
        if self.solution.flask_volume_ml < self.config.min_liquid_to_allow_base_ml {
            debug!(
                "NaOH refused, flask holds only {:.2} mL",
                self.solution.flask_volume_ml
            );
            return;
        }
        let available = self.config.max_add_ml - self.solution.total_dispensed_ml;
        let delta = sanitize(requested_ml).min(available).max(0.0);
        if delta <= MIN_EFFECTIVE_ML {
            debug!("NaOH of {} mL ignored, {:.2} mL left to dispense", requested_ml, available);
            return;
        }

        let now = self.clock.now_seconds();
        self.drain_until(now);
        let drip_id = self.next_drip_id;
        self.next_drip_id += 1;
        self.drips.push(Drip {
            generation: self.generation,
            drip_id,
            rate_ml_per_s: delta / self.config.drip_duration_s,
            due_at: now + self.config.drip_duration_s,
        });
        self.apply_drip_flow();

        self.solution.total_dispensed_ml += delta;
        self.solution.delivered_base_ml += delta;
        self.apply_chemistry();
        self.emit();
    }

    /// Empty everything and start the run over.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        self.ramp = None;
        self.generation += 1;

        let now = self.clock.now_seconds();
        self.drain_until(now);
        self.burette.refill();

        self.solution.clear();
        let clear = self.config.clear_color;
        self.color = clear;
        self.flask.set_level(0.0);
        self.flask.set_color(clear);
        self.burette.set_color(clear);

        info!("titration reset (generation {})", self.generation);
        self.emit();
    }

    /// Advance timed work to the clock's current time. Call once per frame.
    pub fn tick(&mut self) {
        if self.disposed {
            return;
        }
        let now = self.clock.now_seconds();
        self.advance_fill(now);
        self.fire_drip_stops(now);
        self.drain_until(now);
    }

    /// Tear the session down. Every later call is ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.generation += 1;
        self.ramp = None;
        self.drips.clear();
        self.burette.stop_drip();
        self.listener = None;
        debug!("titration session disposed");
    }

    fn advance_fill(&mut self, now: f64) {
        let Some(ramp) = self.ramp.take() else {
            return;
        };
        if ramp.generation != self.generation {
            debug!("discarding fill ramp from generation {}", ramp.generation);
            return;
        }

        let t = ramp.progress(now);
        let va = (ramp.baseline_ml + ramp.delta_ml * t).min(self.config.flask_capacity_ml);
        self.solution.flask_volume_ml = va;
        self.flask.set_level(va);
        self.apply_chemistry();
        self.emit();

        if t < 1.0 {
            self.ramp = Some(ramp);
        }
    }

    /// End every drip due by `now`, earliest first. The burette drains at the
    /// combined rate up to each due time before that drip's share is removed.
    fn fire_drip_stops(&mut self, now: f64) {
        while let Some(index) = self.next_due_drip(now) {
            let drip = self.drips.swap_remove(index);
            if drip.generation != self.generation {
                debug!("discarding drip {} from generation {}", drip.drip_id, drip.generation);
                continue;
            }
            self.drain_until(drip.due_at);
            self.apply_drip_flow();
        }
    }

    fn next_due_drip(&self, now: f64) -> Option<usize> {
        self.drips
            .iter()
            .enumerate()
            .filter(|(_, drip)| drip.due_at <= now)
            .min_by(|(_, a), (_, b)| a.due_at.total_cmp(&b.due_at))
            .map(|(index, _)| index)
    }

    /// Burette flow is the sum of this generation's running drips.
    fn apply_drip_flow(&mut self) {
        let rate: f64 = self
            .drips
            .iter()
            .filter(|drip| drip.generation == self.generation)
            .map(|drip| drip.rate_ml_per_s)
            .sum();
        if rate > 0.0 {
            self.burette.start_drip(rate);
        } else {
            self.burette.stop_drip();
        }
    }

    fn drain_until(&mut self, t: f64) {
        if t > self.drained_until {
            self.burette.drain_tick(t - self.drained_until);
            self.drained_until = t;
        }
    }

    fn apply_chemistry(&mut self) {
        let color = indicator_blend_color(&self.config, self.ph(), self.config.clear_color);
        self.color = color;
        // Both vessels share the solution colour.
        self.flask.set_color(color);
        self.burette.set_color(color);
    }

    fn emit(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(listener) = self.listener.as_mut() {
            listener(&snapshot);
        }
    }
}

fn sanitize(ml: f64) -> f64 {
    if ml.is_nan() {
        0.0
    } else {
        ml
    }
}
