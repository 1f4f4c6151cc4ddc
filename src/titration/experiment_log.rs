use serde::{Deserialize, Serialize};

use super::config::TitrationConfig;
use super::presenter::{fmt_number, IndicatorLabel, PanelAction};
use super::session::DisplaySnapshot;

/// One line of the materials or tools list handed in with a finished experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabItem {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

impl LabItem {
    fn new(name: &str, amount: impl Into<String>, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: amount.into(),
            unit: unit.to_string(),
        }
    }
}

/// Everything submitted when the student finishes the experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentLogPayload {
    pub log: String,
    pub materials: Vec<LabItem>,
    pub tools: Vec<LabItem>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Observed {
    va: f64,
    vb: f64,
    ph: f64,
    indicator: IndicatorLabel,
}

impl Observed {
    fn of(snapshot: &DisplaySnapshot) -> Self {
        Self {
            va: snapshot.va_ml,
            vb: snapshot.vb_ml,
            ph: snapshot.ph,
            indicator: IndicatorLabel::from_ph(snapshot.ph),
        }
    }
}

/// Timestamped lab notebook kept in memory until the experiment is finished.
///
/// Timestamps are supplied by the caller so the log itself stays deterministic.
#[derive(Debug, Clone)]
pub struct ExperimentLog {
    lines: Vec<String>,
    initial_va: Option<f64>,
    cb: f64,
    last: Option<Observed>,
    burette_capacity_ml: f64,
    flask_capacity_ml: f64,
}

impl ExperimentLog {
    /// Empty notebook for a bench built from `config`.
    pub fn new(config: &TitrationConfig) -> Self {
        Self {
            lines: Vec::new(),
            initial_va: None,
            cb: config.base_concentration,
            last: None,
            burette_capacity_ml: config.burette_capacity_ml,
            flask_capacity_ml: config.flask_capacity_ml,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_started(&self) -> bool {
        self.last.is_some()
    }

    fn append(&mut self, timestamp: &str, message: String) {
        self.lines.push(format!("[{}] {}", timestamp, message));
    }

    /// Record the starting state, materials and tools. Only the first call counts.
    pub fn start(&mut self, timestamp: &str, snapshot: &DisplaySnapshot) {
        if self.is_started() {
            return;
        }
        let observed = Observed::of(snapshot);
        self.initial_va = Some(snapshot.va_ml);
        self.cb = snapshot.cb_molar;
        self.last = Some(observed);

        self.append(
            timestamp,
            format!(
                "INITIAL STATE → Va={} mL, Vb={} mL, pH={}, indicator=Phenolphthalein({}), Cb={} M",
                fmt_number(snapshot.va_ml, 1),
                fmt_number(snapshot.vb_ml, 2),
                fmt_number(snapshot.ph, 2),
                observed.indicator.as_str(),
                fmt_number(snapshot.cb_molar, 3),
            ),
        );
        self.append(
            timestamp,
            format!(
                "MATERIALS SNAPSHOT → Acid in flask ({} mL), NaOH {} M in burette, \
                 Phenolphthalein (2–3 drops), Distilled water (as needed)",
                fmt_number(snapshot.va_ml, 1),
                fmt_number(snapshot.cb_molar, 2),
            ),
        );
        self.append(
            timestamp,
            format!(
                "TOOLS SNAPSHOT → Burette ({} mL), Erlenmeyer flask ({} mL), Stand & Clamp",
                self.burette_capacity_ml, self.flask_capacity_ml,
            ),
        );
    }

    /// Log what changed since the previous snapshot.
    pub fn observe(&mut self, timestamp: &str, snapshot: &DisplaySnapshot) {
        let Some(prev) = self.last else {
            self.start(timestamp, snapshot);
            return;
        };
        let now = Observed::of(snapshot);

        if now.ph != prev.ph {
            self.append(
                timestamp,
                format!("PH_CHANGE → {} → {}", fmt_number(prev.ph, 2), fmt_number(now.ph, 2)),
            );
        }
        if now.indicator != prev.indicator {
            self.append(
                timestamp,
                format!(
                    "INDICATOR_CHANGE → {} → {}",
                    prev.indicator.as_str(),
                    now.indicator.as_str()
                ),
            );
        }
        if now.va != prev.va {
            self.append(
                timestamp,
                format!(
                    "VOLUME_CHANGE_FLASK → Va: {} mL → {} mL",
                    fmt_number(prev.va, 1),
                    fmt_number(now.va, 1)
                ),
            );
        }
        if now.vb != prev.vb {
            self.append(
                timestamp,
                format!(
                    "VOLUME_CHANGE_BURETTE_DELIVERED → Vb: {} mL → {} mL",
                    fmt_number(prev.vb, 2),
                    fmt_number(now.vb, 2)
                ),
            );
        }
        self.last = Some(now);
    }

    /// Log a button press. Actions the panel would reject are not recorded.
    pub fn record_action(&mut self, timestamp: &str, action: PanelAction) {
        let message = match action {
            PanelAction::Fill(ml) => {
                format!("ACTION → FILL_FLASK +{} mL (distilled water)", fmt_number(ml, 2))
            }
            PanelAction::StopFill => "ACTION → STOP_FILL".to_string(),
            PanelAction::AddNaOh(ml) => format!(
                "ACTION → ADD_NAOH +{} mL (Cb={} M)",
                fmt_number(ml, 2),
                fmt_number(self.cb, 3)
            ),
            PanelAction::Reset => "ACTION → RESET_TITRATION".to_string(),
        };
        self.append(timestamp, message);
    }

    /// Closing line written when the payload is exported.
    pub fn record_finish(&mut self, timestamp: &str) {
        self.append(timestamp, "ACTION → FINISH_EXPERIMENT (log exported)".to_string());
    }

    pub fn payload(&self) -> ExperimentLogPayload {
        let initial_va = self.initial_va.unwrap_or(0.0);
        ExperimentLogPayload {
            log: self.lines.join("\n"),
            materials: vec![
                LabItem::new("Acid solution (in flask)", fmt_number(initial_va, 1), "mL"),
                LabItem::new("Sodium hydroxide (NaOH)", fmt_number(self.cb, 2), "M"),
                LabItem::new("Phenolphthalein indicator", "2-3", "drops"),
                LabItem::new("Distilled water", "", "mL"),
            ],
            tools: vec![
                LabItem::new("Burette", self.burette_capacity_ml.to_string(), "mL"),
                LabItem::new("Erlenmeyer flask", self.flask_capacity_ml.to_string(), "mL"),
                LabItem::new("Stand & Clamp", "1", "set"),
            ],
        }
    }

    pub fn payload_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2025-01-01T00:00:00.000Z";

    fn notebook() -> ExperimentLog {
        ExperimentLog::new(&TitrationConfig::default())
    }

    fn snap(va: f64, vb: f64, ph: f64) -> DisplaySnapshot {
        DisplaySnapshot {
            cb_molar: 0.1,
            va_ml: va,
            vb_ml: vb,
            ph,
            state_label: String::new(),
            filled_text: String::new(),
        }
    }

    #[test]
    fn test_start_writes_three_header_lines_once() {
        let mut log = notebook();
        log.start(TS, &snap(0.0, 0.0, 7.0));
        log.start(TS, &snap(5.0, 0.0, 2.0));
        assert_eq!(log.lines().len(), 3);
        assert_eq!(
            log.lines()[0],
            "[2025-01-01T00:00:00.000Z] INITIAL STATE → Va=0.0 mL, Vb=0.00 mL, pH=7.00, \
             indicator=Phenolphthalein(Clear), Cb=0.100 M"
        );
        assert!(log.lines()[2].ends_with(
            "TOOLS SNAPSHOT → Burette (50 mL), Erlenmeyer flask (100 mL), Stand & Clamp"
        ));
    }

    #[test]
    fn test_tools_follow_configured_glassware() {
        let config = TitrationConfig {
            burette_capacity_ml: 25.0,
            flask_capacity_ml: 250.0,
            ..Default::default()
        };
        let mut log = ExperimentLog::new(&config);
        log.start(TS, &snap(0.0, 0.0, 7.0));
        assert!(log.lines()[2].contains("Burette (25 mL), Erlenmeyer flask (250 mL)"));

        let payload = log.payload();
        assert_eq!(payload.tools[0].amount, "25");
        assert_eq!(payload.tools[1].amount, "250");
    }

    #[test]
    fn test_observe_logs_each_change() {
        let mut log = notebook();
        log.start(TS, &snap(20.0, 0.0, 1.6));
        log.observe(TS, &snap(20.0, 6.0, 11.6));
        let tail: Vec<_> = log.lines()[3..].iter().map(|l| l[27..].to_string()).collect();
        assert_eq!(
            tail,
            vec![
                "PH_CHANGE → 1.60 → 11.60",
                "INDICATOR_CHANGE → Clear → Pink",
                "VOLUME_CHANGE_BURETTE_DELIVERED → Vb: 0.00 mL → 6.00 mL",
            ]
        );
    }

    #[test]
    fn test_observe_unchanged_snapshot_logs_nothing() {
        let mut log = notebook();
        log.start(TS, &snap(10.0, 1.0, 2.0));
        log.observe(TS, &snap(10.0, 1.0, 2.0));
        assert_eq!(log.lines().len(), 3);
    }

    #[test]
    fn test_observe_before_start_starts() {
        let mut log = notebook();
        log.observe(TS, &snap(0.0, 0.0, 7.0));
        assert!(log.is_started());
        assert_eq!(log.lines().len(), 3);
    }

    #[test]
    fn test_record_actions() {
        let mut log = notebook();
        log.start(TS, &snap(0.0, 0.0, 7.0));
        log.record_action(TS, PanelAction::Fill(10.0));
        log.record_action(TS, PanelAction::AddNaOh(1.0));
        log.record_action(TS, PanelAction::StopFill);
        log.record_action(TS, PanelAction::Reset);
        let tail: Vec<_> = log.lines()[3..].iter().map(|l| l[27..].to_string()).collect();
        assert_eq!(
            tail,
            vec![
                "ACTION → FILL_FLASK +10.00 mL (distilled water)",
                "ACTION → ADD_NAOH +1.00 mL (Cb=0.100 M)",
                "ACTION → STOP_FILL",
                "ACTION → RESET_TITRATION",
            ]
        );
    }

    #[test]
    fn test_record_finish_is_last_line() {
        let mut log = notebook();
        log.start(TS, &snap(10.0, 0.0, 1.8));
        log.record_finish(TS);
        assert!(log
            .payload()
            .log
            .ends_with("ACTION → FINISH_EXPERIMENT (log exported)"));
    }

    #[test]
    fn test_payload_lists_materials_and_tools() {
        let mut log = notebook();
        log.start(TS, &snap(12.5, 0.0, 1.8));
        let payload = log.payload();
        assert_eq!(payload.materials[0].amount, "12.5");
        assert_eq!(payload.materials[1].amount, "0.10");
        assert_eq!(payload.tools.len(), 3);
        assert_eq!(payload.log.lines().count(), 3);

        let json = log.payload_json().unwrap();
        let back: ExperimentLogPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
