use super::chemistry::{INDICATOR_END_PH, INDICATOR_START_PH};
use super::clock::Clock;
use super::session::{DisplaySnapshot, TitrationSession};
use crate::error::InputError;

/// What the phenolphthalein looks like to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorLabel {
    Clear,
    FaintPink,
    Pink,
}

impl IndicatorLabel {
    pub fn from_ph(ph: f64) -> Self {
        if ph.is_nan() || ph < INDICATOR_START_PH {
            IndicatorLabel::Clear
        } else if ph < INDICATOR_END_PH {
            IndicatorLabel::FaintPink
        } else {
            IndicatorLabel::Pink
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorLabel::Clear => "Clear",
            IndicatorLabel::FaintPink => "Faint Pink",
            IndicatorLabel::Pink => "Pink",
        }
    }
}

/// Display strings for the readings panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingsView {
    pub cb: String,
    pub va: String,
    pub vb: String,
    pub ph: String,
    pub state: String,
    pub indicator: IndicatorLabel,
    pub filled: String,
}

impl ReadingsView {
    pub fn from_snapshot(snapshot: &DisplaySnapshot) -> Self {
        Self {
            cb: format!("{} M", fmt_number(snapshot.cb_molar, 3)),
            va: format!("{} mL", fmt_number(snapshot.va_ml, 1)),
            vb: format!("{} mL", fmt_number(snapshot.vb_ml, 2)),
            ph: fmt_number(snapshot.ph, 2),
            state: format!("State: {}", snapshot.state_label),
            indicator: IndicatorLabel::from_ph(snapshot.ph),
            filled: snapshot.filled_text.clone(),
        }
    }
}

/// Fixed-point formatting that leaves non-finite values readable.
pub fn fmt_number(value: f64, digits: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", digits, value)
    } else {
        value.to_string()
    }
}

/// Drop everything but digits and dots, as the amount fields do while typing.
pub fn sanitize_amount_input(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Parse an amount field into a positive volume.
///
/// Only the leading decimal number counts, so `"1.2.3"` reads as 1.2.
pub fn parse_amount(raw: &str) -> Result<f64, InputError> {
    let cleaned = sanitize_amount_input(raw);
    if cleaned.is_empty() {
        return Err(InputError::Empty);
    }

    let mut seen_dot = false;
    let end = cleaned
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' {
                if seen_dot {
                    return true;
                }
                seen_dot = true;
            }
            false
        })
        .map(|(i, _)| i)
        .unwrap_or(cleaned.len());

    let value: f64 = cleaned[..end]
        .parse()
        .map_err(|_| InputError::NotANumber(raw.to_string()))?;
    if !(value.is_finite() && value > 0.0) {
        return Err(InputError::NotPositive(value));
    }
    Ok(value)
}

/// A button press on the titration panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Fill(f64),
    StopFill,
    AddNaOh(f64),
    Reset,
}

/// Hand a panel action to the session.
pub fn dispatch<C: Clock>(session: &mut TitrationSession<C>, action: PanelAction) {
    match action {
        PanelAction::Fill(ml) => session.start_fill(ml),
        PanelAction::StopFill => session.stop_fill(),
        PanelAction::AddNaOh(ml) => session.add_naoh(ml),
        PanelAction::Reset => session.reset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::titration::{ManualClock, TitrationConfig};

    fn snapshot(ph: f64) -> DisplaySnapshot {
        DisplaySnapshot {
            cb_molar: 0.1,
            va_ml: 25.04,
            vb_ml: 3.456,
            ph,
            state_label: "Acidic (Clear)".to_string(),
            filled_text: "Filled: 25.0 / 100 mL".to_string(),
        }
    }

    #[test]
    fn test_readings_formatting() {
        let view = ReadingsView::from_snapshot(&snapshot(2.3456));
        assert_eq!(view.cb, "0.100 M");
        assert_eq!(view.va, "25.0 mL");
        assert_eq!(view.vb, "3.46 mL");
        assert_eq!(view.ph, "2.35");
        assert_eq!(view.state, "State: Acidic (Clear)");
        assert_eq!(view.indicator, IndicatorLabel::Clear);
        assert_eq!(view.filled, "Filled: 25.0 / 100 mL");
    }

    #[test]
    fn test_indicator_label_bands() {
        assert_eq!(IndicatorLabel::from_ph(f64::NAN), IndicatorLabel::Clear);
        assert_eq!(IndicatorLabel::from_ph(8.19), IndicatorLabel::Clear);
        assert_eq!(IndicatorLabel::from_ph(8.2), IndicatorLabel::FaintPink);
        assert_eq!(IndicatorLabel::from_ph(10.0), IndicatorLabel::Pink);
        assert_eq!(IndicatorLabel::FaintPink.as_str(), "Faint Pink");
    }

    #[test]
    fn test_fmt_number_non_finite() {
        assert_eq!(fmt_number(f64::NAN, 2), "NaN");
        assert_eq!(fmt_number(1.0 / 3.0, 2), "0.33");
    }

    #[test]
    fn test_sanitize_strips_everything_else() {
        assert_eq!(sanitize_amount_input(" 12,5 mL"), "125");
        assert_eq!(sanitize_amount_input("-3.5"), "3.5");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10"), Ok(10.0));
        assert_eq!(parse_amount("1.0"), Ok(1.0));
        assert_eq!(parse_amount(".5"), Ok(0.5));
        assert_eq!(parse_amount("1.2.3"), Ok(1.2));
        assert_eq!(parse_amount("4 mL"), Ok(4.0));
    }

    #[test]
    fn test_parse_amount_rejections() {
        assert_eq!(parse_amount(""), Err(InputError::Empty));
        assert_eq!(parse_amount("abc"), Err(InputError::Empty));
        assert_eq!(parse_amount("0"), Err(InputError::NotPositive(0.0)));
        assert_eq!(parse_amount("0.000"), Err(InputError::NotPositive(0.0)));
        assert!(matches!(parse_amount("."), Err(InputError::NotANumber(_))));
    }

    #[test]
    fn test_dispatch_routes_actions() {
        let clock = ManualClock::new(0.0);
        let mut session = TitrationSession::new(TitrationConfig::default(), clock.clone()).unwrap();

        dispatch(&mut session, PanelAction::Fill(10.0));
        clock.advance(1.0);
        session.tick();
        assert_eq!(session.solution().flask_volume_ml, 10.0);

        dispatch(&mut session, PanelAction::AddNaOh(1.0));
        assert_eq!(session.solution().delivered_base_ml, 1.0);

        dispatch(&mut session, PanelAction::Fill(10.0));
        clock.advance(0.25);
        session.tick();
        dispatch(&mut session, PanelAction::StopFill);
        assert_eq!(session.solution().flask_volume_ml, 15.0);

        dispatch(&mut session, PanelAction::Reset);
        assert_eq!(session.solution().flask_volume_ml, 0.0);
    }
}
