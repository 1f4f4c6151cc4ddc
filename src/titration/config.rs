use super::chemistry::{Rgb, INDICATOR_END_PH, INDICATOR_START_PH};
use crate::error::ConfigError;

/// Fixed parameters of one titration run.
///
/// The defaults are the values the lab ships with: 0.10 M NaOH titrated into a
/// 0.050 M acid stock, a 100 mL flask and a 50 mL burette that never shows more
/// than 49 mL.
#[derive(Debug, Clone, PartialEq)]
pub struct TitrationConfig {
    /// Titrant (NaOH) concentration in mol/L.
    pub base_concentration: f64,
    /// Nominal acid stock concentration in mol/L.
    pub acid_stock_concentration: f64,
    /// Dilution softening constant (mL) of the effective acid concentration curve.
    pub acid_mixing_k: f64,
    pub flask_capacity_ml: f64,
    /// Base is refused until the flask holds at least this much.
    pub min_liquid_to_allow_base_ml: f64,
    /// Cap on the total base dispensed in one run.
    pub max_add_ml: f64,
    pub burette_capacity_ml: f64,
    /// Burette contents at start and after reset.
    pub burette_initial_ml: f64,
    pub fill_rate_ml_per_s: f64,
    /// How long the burette drips for each NaOH addition.
    pub drip_duration_s: f64,
    /// Colour of the solution while the indicator is colourless.
    pub clear_color: Rgb,
    /// Fully developed phenolphthalein colour.
    pub indicator_color: Rgb,
    pub indicator_start_ph: f64,
    pub indicator_end_ph: f64,
}

impl Default for TitrationConfig {
    fn default() -> Self {
        Self {
            base_concentration: 0.10,
            acid_stock_concentration: 0.050,
            acid_mixing_k: 20.0,
            flask_capacity_ml: 100.0,
            min_liquid_to_allow_base_ml: 1.0,
            max_add_ml: 49.0,
            burette_capacity_ml: 50.0,
            burette_initial_ml: 49.0,
            fill_rate_ml_per_s: 20.0,
            drip_duration_s: 2.0,
            clear_color: Rgb::from_bytes(0x87, 0xce, 0xeb),
            indicator_color: Rgb::from_bytes(249, 6, 160),
            indicator_start_ph: INDICATOR_START_PH,
            indicator_end_ph: INDICATOR_END_PH,
        }
    }
}

impl TitrationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("base_concentration", self.base_concentration),
            ("acid_stock_concentration", self.acid_stock_concentration),
            ("acid_mixing_k", self.acid_mixing_k),
            ("flask_capacity_ml", self.flask_capacity_ml),
            ("min_liquid_to_allow_base_ml", self.min_liquid_to_allow_base_ml),
            ("max_add_ml", self.max_add_ml),
            ("burette_capacity_ml", self.burette_capacity_ml),
            ("burette_initial_ml", self.burette_initial_ml),
            ("fill_rate_ml_per_s", self.fill_rate_ml_per_s),
            ("drip_duration_s", self.drip_duration_s),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(self.indicator_start_ph < self.indicator_end_ph) {
            return Err(ConfigError::EmptyIndicatorWindow {
                start: self.indicator_start_ph,
                end: self.indicator_end_ph,
            });
        }

        if self.burette_initial_ml > self.burette_capacity_ml {
            return Err(ConfigError::BuretteOverfilled {
                initial_ml: self.burette_initial_ml,
                capacity_ml: self.burette_capacity_ml,
            });
        }

        Ok(())
    }

    /// Build a config with both colours given as hex strings.
    pub fn with_colors(mut self, clear_hex: &str, indicator_hex: &str) -> Result<Self, ConfigError> {
        self.clear_color = Rgb::from_hex(clear_hex)?;
        self.indicator_color = Rgb::from_hex(indicator_hex)?;
        Ok(self)
    }
}
