//! Containers of the titration rig.
//!
//! Each vessel keeps only what its renderer needs (fill level, tint, flow) and knows
//! nothing about chemistry. The session decides what goes in and what colour it is.

use super::chemistry::Rgb;

/// Erlenmeyer flask receiving water and titrant.
#[derive(Debug, Clone, PartialEq)]
pub struct Flask {
    capacity_ml: f64,
    fill_max_height: f64,
    level_ml: f64,
    color: Rgb,
}

impl Flask {
    /// Default rendered height of a full flask, in scene units.
    pub const FILL_MAX_HEIGHT: f64 = 0.3;

    pub fn new(capacity_ml: f64, color: Rgb) -> Self {
        Self {
            capacity_ml,
            fill_max_height: Self::FILL_MAX_HEIGHT,
            level_ml: 0.0,
            color,
        }
    }

    pub fn capacity_ml(&self) -> f64 {
        self.capacity_ml
    }

    /// Set the fill level, clamped to `[0, capacity]`. Colour is untouched.
    pub fn set_level(&mut self, ml: f64) {
        self.level_ml = if ml.is_nan() {
            0.0
        } else {
            ml.clamp(0.0, self.capacity_ml)
        };
    }

    pub fn level_ml(&self) -> f64 {
        self.level_ml
    }

    /// Height of the liquid surface above the flask base.
    pub fn surface_height(&self) -> f64 {
        (self.level_ml / self.capacity_ml).clamp(0.0, 1.0) * self.fill_max_height
    }

    pub fn fill_max_height(&self) -> f64 {
        self.fill_max_height
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Two-position valve at the bottom of the burette.
///
/// The angle swings towards its target over time; flow itself is never gated on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stopcock {
    angle_deg: f64,
    target_deg: f64,
}

impl Stopcock {
    pub const CLOSED_DEG: f64 = 0.0;
    pub const OPEN_DEG: f64 = 90.0;
    /// Swing speed; a full quarter turn takes one second.
    pub const DEG_PER_SECOND: f64 = 90.0;

    pub fn closed() -> Self {
        Self {
            angle_deg: Self::CLOSED_DEG,
            target_deg: Self::CLOSED_DEG,
        }
    }

    pub fn open(&mut self) {
        self.target_deg = Self::OPEN_DEG;
    }

    pub fn close(&mut self) {
        self.target_deg = Self::CLOSED_DEG;
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// 0 when closed, 1 when fully open.
    pub fn aperture(&self) -> f64 {
        ((self.angle_deg - Self::CLOSED_DEG) / (Self::OPEN_DEG - Self::CLOSED_DEG)).clamp(0.0, 1.0)
    }

    pub fn is_moving(&self) -> bool {
        self.angle_deg != self.target_deg
    }

    fn advance(&mut self, dt_s: f64) {
        let step = Self::DEG_PER_SECOND * dt_s;
        let diff = self.target_deg - self.angle_deg;
        self.angle_deg = if diff.abs() <= step {
            self.target_deg
        } else {
            self.angle_deg + step.copysign(diff)
        };
    }
}

/// Graduated burette dispensing titrant through its stopcock.
#[derive(Debug, Clone, PartialEq)]
pub struct Burette {
    capacity_ml: f64,
    initial_ml: f64,
    remaining_ml: f64,
    flow_ml_per_s: f64,
    color: Rgb,
    stopcock: Stopcock,
}

impl Burette {
    /// Particles per second emitted per mL/s of flow.
    const PARTICLES_PER_ML: f64 = 120.0;
    const MAX_EMIT_RATE: f64 = 800.0;

    /// A burette of `capacity_ml` holding `initial_ml` (never more than capacity).
    pub fn new(capacity_ml: f64, initial_ml: f64, color: Rgb) -> Self {
        let initial_ml = initial_ml.min(capacity_ml);
        Self {
            capacity_ml,
            initial_ml,
            remaining_ml: initial_ml,
            flow_ml_per_s: 0.0,
            color,
            stopcock: Stopcock::closed(),
        }
    }

    pub fn capacity_ml(&self) -> f64 {
        self.capacity_ml
    }

    pub fn remaining_ml(&self) -> f64 {
        self.remaining_ml
    }

    /// Level shown on the burette scale.
    pub fn level_ml(&self) -> f64 {
        self.remaining_ml
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_ml <= 0.0
    }

    pub fn flow_rate(&self) -> f64 {
        self.flow_ml_per_s
    }

    pub fn is_flowing(&self) -> bool {
        self.flow_ml_per_s > 0.0
    }

    /// 0 stops the flow, anything positive starts or continues it.
    pub fn set_flow_rate(&mut self, ml_per_s: f64) {
        self.flow_ml_per_s = if ml_per_s > 0.0 { ml_per_s } else { 0.0 };
    }

    /// Drip particle emission rate matching the current flow.
    pub fn emit_rate(&self) -> f64 {
        (self.flow_ml_per_s * Self::PARTICLES_PER_ML).clamp(0.0, Self::MAX_EMIT_RATE)
    }

    /// Open the stopcock and start flowing at `ml_per_s`.
    pub fn start_drip(&mut self, ml_per_s: f64) {
        self.stopcock.open();
        self.set_flow_rate(ml_per_s);
    }

    /// Stop flowing and close the stopcock.
    pub fn stop_drip(&mut self) {
        self.set_flow_rate(0.0);
        self.stopcock.close();
    }

    /// Drain for `dt_s` seconds of flow.
    ///
    /// Ticks may arrive at any spacing; the volume drained over a run of ticks is
    /// `rate * elapsed` whatever the granularity, until the burette runs dry and the
    /// flow is forced off.
    pub fn drain_tick(&mut self, dt_s: f64) {
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return;
        }
        self.stopcock.advance(dt_s);

        if !self.is_flowing() {
            return;
        }
        if self.remaining_ml > 0.0 {
            self.remaining_ml = (self.remaining_ml - self.flow_ml_per_s * dt_s).max(0.0);
        }
        if self.is_empty() {
            self.set_flow_rate(0.0);
        }
    }

    /// Back to the initial contents with the valve shut.
    pub fn refill(&mut self) {
        self.stop_drip();
        self.remaining_ml = self.initial_ml;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn stopcock(&self) -> &Stopcock {
        &self.stopcock
    }
}
