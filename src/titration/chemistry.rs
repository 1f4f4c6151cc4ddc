use std::fmt;

use super::TitrationConfig;
use crate::error::ConfigError;

/// pH at which phenolphthalein starts turning pink.
pub const INDICATOR_START_PH: f64 = 8.2;
/// pH at which phenolphthalein is fully pink.
pub const INDICATOR_END_PH: f64 = 10.0;

/// Floor for concentrations fed to `log10`.
const LOG_FLOOR: f64 = 1e-15;
/// Floor for the total solution volume (mL).
const MIN_TOTAL_VOLUME_ML: f64 = 1e-12;
/// Mole difference treated as exact equivalence.
const EQUIVALENCE_TOLERANCE: f64 = 1e-12;
/// Half-width of the pH band reported as neutral.
const NEUTRAL_BAND: f64 = 0.05;

/// An sRGB colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ConfigError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ConfigError::InvalidColor(hex.to_string()))
        };
        Ok(Self::from_bytes(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Lowercase `#rrggbb`, each channel rounded and clamped to a byte.
    pub fn to_hex(&self) -> String {
        let byte = |x: f64| (x * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Linear interpolation towards `target`; `t` is not clamped here.
    pub fn lerp(&self, target: Rgb, t: f64) -> Rgb {
        Rgb::new(
            self.r + (target.r - self.r) * t,
            self.g + (target.g - self.g) * t,
            self.b + (target.b - self.b) * t,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Effective acid concentration (mol/L) for `va_ml` of acid in the flask.
///
/// A small volume is treated as mostly diluted by what is already in the flask, so
/// the concentration climbs towards the stock value only as the volume grows:
///
/// ```text
/// Ca_eff = Ca_stock * Va / (Va + K)
/// ```
///
/// This curve is part of the lab's contract, not an attempt at real dilution physics.
pub fn effective_acid_concentration(config: &TitrationConfig, va_ml: f64) -> f64 {
    if va_ml <= 0.0 {
        return 0.0;
    }
    config.acid_stock_concentration * (va_ml / (va_ml + config.acid_mixing_k))
}

/// pH of `va_ml` acid solution after `vb_ml` of base has been delivered.
///
/// Strong acid / strong base stoichiometry on the effective acid concentration:
/// excess H+ gives `-log10([H+])`, excess OH- gives `14 - pOH`, and equal moles
/// (including the empty flask) gives exactly 7. The result is always finite and
/// within `[0, 14]`.
pub fn compute_ph(config: &TitrationConfig, va_ml: f64, vb_ml: f64) -> f64 {
    let ca_eff = effective_acid_concentration(config, va_ml);
    let na = ca_eff * va_ml;
    let nb = config.base_concentration * vb_ml;
    let total_ml = (va_ml + vb_ml).max(MIN_TOTAL_VOLUME_ML);

    if nb < na - LOG_FLOOR {
        let h = (na - nb) / total_ml;
        clamp_ph(-h.max(LOG_FLOOR).log10())
    } else if (nb - na).abs() <= EQUIVALENCE_TOLERANCE {
        7.0
    } else {
        let oh = (nb - na) / total_ml;
        let poh = -oh.max(LOG_FLOOR).log10();
        clamp_ph(14.0 - poh)
    }
}

fn clamp_ph(ph: f64) -> f64 {
    if ph.is_finite() {
        ph.clamp(0.0, 14.0)
    } else {
        7.0
    }
}

/// Progress through the phenolphthalein window: 0 below `start`, 1 above `end`.
pub fn indicator_progress(config: &TitrationConfig, ph: f64) -> f64 {
    let span = config.indicator_end_ph - config.indicator_start_ph;
    ((ph - config.indicator_start_ph) / span).clamp(0.0, 1.0)
}

/// Tint of the solution: `base` below the indicator window, the indicator pink above
/// it, linear in between.
pub fn indicator_blend_color(config: &TitrationConfig, ph: f64, base: Rgb) -> Rgb {
    base.lerp(config.indicator_color, indicator_progress(config, ph))
}

/// Coarse reading of the solution shown to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitrationState {
    Equivalence,
    Acidic,
    NearEndpoint,
    Basic,
}

impl TitrationState {
    /// Classify a pH. The neutral band wins over the acidic range it sits inside.
    pub fn classify(ph: f64) -> Self {
        if (ph - 7.0).abs() < NEUTRAL_BAND {
            TitrationState::Equivalence
        } else if ph < INDICATOR_START_PH {
            TitrationState::Acidic
        } else if ph < INDICATOR_END_PH {
            TitrationState::NearEndpoint
        } else {
            TitrationState::Basic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TitrationState::Equivalence => "Equivalence (Neutral)",
            TitrationState::Acidic => "Acidic (Clear)",
            TitrationState::NearEndpoint => "Near Endpoint (Faint Pink)",
            TitrationState::Basic => "Basic (Pink)",
        }
    }
}

/// Label for `ph`, see [`TitrationState::classify`].
pub fn classify_state(ph: f64) -> &'static str {
    TitrationState::classify(ph).label()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TitrationConfig {
        TitrationConfig::default()
    }

    #[test]
    fn test_effective_concentration_curve() {
        let cfg = config();
        assert_eq!(effective_acid_concentration(&cfg, 0.0), 0.0);
        assert_eq!(effective_acid_concentration(&cfg, -3.0), 0.0);
        // Va == K gives half the stock concentration
        assert!((effective_acid_concentration(&cfg, 20.0) - 0.025).abs() < 1e-12);
        // Approaches stock for large volumes, never exceeds it
        let big = effective_acid_concentration(&cfg, 1e6);
        assert!(big < 0.050 && big > 0.0499);
    }

    #[test]
    fn test_ph_empty_flask_is_neutral() {
        assert_eq!(compute_ph(&config(), 0.0, 0.0), 7.0);
    }

    #[test]
    fn test_ph_exact_equivalence() {
        let cfg = config();
        let va = 10.0;
        let na = effective_acid_concentration(&cfg, va) * va;
        let vb = na / cfg.base_concentration;
        assert_eq!(compute_ph(&cfg, va, vb), 7.0);
    }

    #[test]
    fn test_ph_acid_excess_known_value() {
        let cfg = config();
        // Ca_eff(20) = 0.025 M, na = 0.5 mmol in 20 mL → [H+] = 0.025
        let ph = compute_ph(&cfg, 20.0, 0.0);
        assert!((ph - (-(0.025_f64).log10())).abs() < 1e-9, "pH = {}", ph);
        assert!(ph < 2.0);
    }

    #[test]
    fn test_ph_base_excess_known_value() {
        let cfg = config();
        // Base only: [OH-] = 0.1 M → pOH = 1 → pH = 13
        let ph = compute_ph(&cfg, 0.0, 5.0);
        assert!((ph - 13.0).abs() < 1e-9, "pH = {}", ph);
    }

    #[test]
    fn test_ph_bounds_over_grid() {
        let cfg = config();
        let volumes = [0.0, 1e-9, 0.001, 0.5, 1.0, 3.3, 10.0, 49.0, 100.0, 1e6];
        for &va in &volumes {
            for &vb in &volumes {
                let ph = compute_ph(&cfg, va, vb);
                assert!(ph.is_finite(), "pH({}, {}) not finite", va, vb);
                assert!((0.0..=14.0).contains(&ph), "pH({}, {}) = {}", va, vb, ph);
            }
        }
    }

    #[test]
    fn test_ph_rises_monotonically_with_base() {
        let cfg = config();
        let mut prev = compute_ph(&cfg, 50.0, 0.0);
        for step in 1..=490 {
            let ph = compute_ph(&cfg, 50.0, step as f64 * 0.1);
            assert!(ph >= prev - 1e-12, "pH dropped at Vb = {}", step as f64 * 0.1);
            prev = ph;
        }
    }

    #[test]
    fn test_hex_round_trip_and_case() {
        let c = Rgb::from_hex("#87CEEB").unwrap();
        assert_eq!(c.to_hex(), "#87ceeb");
        assert_eq!(Rgb::from_hex("f906a0").unwrap().to_hex(), "#f906a0");
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert!(Rgb::from_hex("#87CEE").is_err());
        assert!(Rgb::from_hex("#zzzzzz").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn test_indicator_clear_below_window() {
        let cfg = config();
        let base = cfg.clear_color;
        for ph in [0.0, 3.0, 7.0, 8.0, 8.2] {
            assert_eq!(indicator_blend_color(&cfg, ph, base), base, "pH {}", ph);
        }
    }

    #[test]
    fn test_indicator_pink_above_window() {
        let cfg = config();
        for ph in [10.0, 11.5, 14.0] {
            let c = indicator_blend_color(&cfg, ph, cfg.clear_color);
            assert_eq!(c.to_hex(), "#f906a0", "pH {}", ph);
        }
    }

    #[test]
    fn test_indicator_midpoint() {
        let cfg = config();
        let c = indicator_blend_color(&cfg, 9.1, cfg.clear_color);
        // midpoint of #87ceeb and #f906a0 is about (192, 106, 197.5)
        assert!((c.r * 255.0 - 192.0).abs() < 0.5);
        assert!((c.g * 255.0 - 106.0).abs() < 0.5);
        assert!((c.b * 255.0 - 197.5).abs() < 0.5);
        assert!((indicator_progress(&cfg, 9.1) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_classification_bands() {
        assert_eq!(classify_state(2.0), "Acidic (Clear)");
        assert_eq!(classify_state(8.2), "Near Endpoint (Faint Pink)");
        assert_eq!(classify_state(9.99), "Near Endpoint (Faint Pink)");
        assert_eq!(classify_state(10.0), "Basic (Pink)");
        assert_eq!(classify_state(13.0), "Basic (Pink)");
    }

    #[test]
    fn test_classification_equivalence_wins() {
        assert_eq!(classify_state(7.0), "Equivalence (Neutral)");
        assert_eq!(classify_state(6.96), "Equivalence (Neutral)");
        assert_eq!(classify_state(7.04), "Equivalence (Neutral)");
        assert_eq!(classify_state(6.9), "Acidic (Clear)");
    }
}
