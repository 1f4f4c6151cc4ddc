use crate::titration::{Clock, SessionPhase, TitrationSession};
use leptos::*;

// SVG layout, in viewBox units.
const BURETTE_X: f64 = 110.0;
const BURETTE_WIDTH: f64 = 20.0;
const BURETTE_TOP: f64 = 20.0;
const BURETTE_HEIGHT: f64 = 200.0;
const STOPCOCK_Y: f64 = 232.0;
const FLASK_TOP: f64 = 290.0;
const FLASK_BOTTOM: f64 = 390.0;

/// Everything the vessel drawing needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselFrame {
    pub flask_fill: f64,
    pub burette_fill: f64,
    pub burette_capacity_ml: f64,
    pub stopcock_angle_deg: f64,
    pub stopcock_aperture: f64,
    pub emit_rate: f64,
    pub color_hex: String,
    pub filling: bool,
}

impl VesselFrame {
    pub fn capture<C: Clock>(session: &TitrationSession<C>) -> Self {
        let flask = session.flask();
        let burette = session.burette();
        Self {
            flask_fill: fraction(flask.surface_height(), flask.fill_max_height()),
            burette_fill: fraction(burette.level_ml(), burette.capacity_ml()),
            burette_capacity_ml: burette.capacity_ml(),
            stopcock_angle_deg: burette.stopcock().angle_deg(),
            stopcock_aperture: burette.stopcock().aperture(),
            emit_rate: burette.emit_rate(),
            color_hex: session.display_color().to_hex(),
            filling: session.phase() == SessionPhase::Filling,
        }
    }

    pub fn is_dripping(&self) -> bool {
        self.emit_rate > 0.0
    }

    /// Drops drawn under the tip; more flow shows more drops.
    pub fn drop_count(&self) -> usize {
        if !self.is_dripping() {
            return 0;
        }
        ((self.emit_rate / 200.0).ceil() as usize).clamp(1, 4)
    }
}

fn fraction(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Top edge and height of a liquid column filling `fill` of a region that spans
/// `top..bottom` and fills from the bottom.
pub fn liquid_rect(fill: f64, top: f64, bottom: f64) -> (f64, f64) {
    let height = (bottom - top) * fill.clamp(0.0, 1.0);
    (bottom - height, height)
}

/// Burette graduations as `(y, label)`. Every millilitre gets a tick and every
/// fifth one a label; the scale reads 0 at the top.
pub fn burette_ticks(capacity_ml: f64) -> Vec<(f64, Option<String>)> {
    if capacity_ml <= 0.0 {
        return Vec::new();
    }
    let whole = capacity_ml.floor() as u32;
    (0..=whole)
        .map(|ml| {
            let y = BURETTE_TOP + BURETTE_HEIGHT * f64::from(ml) / capacity_ml;
            let label = (ml % 5 == 0).then(|| ml.to_string());
            (y, label)
        })
        .collect()
}

#[component]
pub fn VesselView(frame: ReadSignal<VesselFrame>) -> impl IntoView {
    let ticks = move || {
        burette_ticks(frame.with(|f| f.burette_capacity_ml))
            .into_iter()
            .map(|(y, label)| {
                let long = label.is_some();
                view! {
                    <line
                        x1=BURETTE_X
                        y1=y
                        x2={BURETTE_X + if long { 8.0 } else { 4.0 }}
                        y2=y
                        class="burette-tick"
                    />
                    {label.map(|text| view! {
                        <text x={BURETTE_X - 4.0} y={y + 3.0} class="axis-label burette-label">{text}</text>
                    })}
                }
            })
            .collect_view()
    };

    let burette_liquid = move || {
        liquid_rect(
            frame.with(|f| f.burette_fill),
            BURETTE_TOP,
            BURETTE_TOP + BURETTE_HEIGHT,
        )
    };
    let flask_liquid = move || liquid_rect(frame.with(|f| f.flask_fill), FLASK_TOP, FLASK_BOTTOM);
    let color = move || frame.with(|f| f.color_hex.clone());

    let drops = move || {
        let count = frame.with(VesselFrame::drop_count);
        (0..count)
            .map(|i| {
                view! {
                    <circle
                        class="drop"
                        cx={BURETTE_X + BURETTE_WIDTH / 2.0}
                        cy={STOPCOCK_Y + 18.0 + 12.0 * i as f64}
                        r="2.5"
                        fill=color
                        style=format!("animation-delay: {}ms", i * 120)
                    />
                }
            })
            .collect_view()
    };

    view! {
        <div class="vessel-view">
            <svg viewBox="0 0 240 400" class="vessel-svg">
                <defs>
                    <clipPath id="flask-clip">
                        <path d="M100 250 L140 250 L140 290 L190 390 L50 390 L100 290 Z"/>
                    </clipPath>
                </defs>

                // Stand
                <rect x="20" y="10" width="6" height="385" class="stand"/>
                <rect x="10" y="392" width="220" height="6" class="stand"/>
                <rect x="26" y="120" width="84" height="5" class="stand clamp"/>

                // Burette
                <rect
                    class="liquid"
                    x=BURETTE_X
                    y=move || burette_liquid().0
                    width=BURETTE_WIDTH
                    height=move || burette_liquid().1
                    fill=color
                />
                <rect
                    class="glass"
                    x=BURETTE_X
                    y=BURETTE_TOP
                    width=BURETTE_WIDTH
                    height=BURETTE_HEIGHT
                />
                {ticks}
                <path
                    class="glass"
                    d=format!(
                        "M{} {} L{} {} L{} {} L{} {} Z",
                        BURETTE_X, BURETTE_TOP + BURETTE_HEIGHT,
                        BURETTE_X + BURETTE_WIDTH, BURETTE_TOP + BURETTE_HEIGHT,
                        BURETTE_X + BURETTE_WIDTH / 2.0 + 2.0, STOPCOCK_Y + 12.0,
                        BURETTE_X + BURETTE_WIDTH / 2.0 - 2.0, STOPCOCK_Y + 12.0,
                    )
                />

                // Stopcock handle turns with the valve
                <g
                    class="stopcock"
                    class:open=move || frame.with(|f| f.stopcock_aperture > 0.0)
                    transform=move || format!(
                        "rotate({:.1} {} {})",
                        frame.with(|f| f.stopcock_angle_deg),
                        BURETTE_X + BURETTE_WIDTH / 2.0,
                        STOPCOCK_Y,
                    )
                >
                    <rect
                        x={BURETTE_X - 6.0}
                        y={STOPCOCK_Y - 3.0}
                        width={BURETTE_WIDTH + 12.0}
                        height="6"
                        rx="2"
                    />
                </g>

                {drops}

                // Erlenmeyer flask
                <rect
                    class="liquid"
                    clip-path="url(#flask-clip)"
                    x="50"
                    y=move || flask_liquid().0
                    width="140"
                    height=move || flask_liquid().1
                    fill=color
                />
                <path
                    class="glass"
                    class:filling=move || frame.with(|f| f.filling)
                    d="M100 250 L140 250 L140 290 L190 390 L50 390 L100 290 Z"
                />
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::titration::{ManualClock, TitrationConfig};

    #[test]
    fn test_liquid_rect_fills_from_bottom() {
        assert_eq!(liquid_rect(0.0, 100.0, 300.0), (300.0, 0.0));
        assert_eq!(liquid_rect(0.5, 100.0, 300.0), (200.0, 100.0));
        assert_eq!(liquid_rect(2.0, 100.0, 300.0), (100.0, 200.0));
    }

    #[test]
    fn test_burette_ticks() {
        let ticks = burette_ticks(50.0);
        assert_eq!(ticks.len(), 51);
        assert_eq!(ticks[0], (BURETTE_TOP, Some("0".to_string())));
        assert_eq!(ticks[5].1.as_deref(), Some("5"));
        assert!(ticks[7].1.is_none());
        assert!((ticks[50].0 - (BURETTE_TOP + BURETTE_HEIGHT)).abs() < 1e-9);
        assert!(burette_ticks(0.0).is_empty());
    }

    #[test]
    fn test_capture_fresh_session() {
        let session = TitrationSession::new(TitrationConfig::default(), ManualClock::new(0.0)).unwrap();
        let frame = VesselFrame::capture(&session);
        assert_eq!(frame.flask_fill, 0.0);
        assert!((frame.burette_fill - 0.98).abs() < 1e-12);
        assert_eq!(frame.color_hex, "#87ceeb");
        assert!(!frame.is_dripping());
        assert_eq!(frame.drop_count(), 0);
        assert!(!frame.filling);
    }

    #[test]
    fn test_capture_while_dripping() {
        let clock = ManualClock::new(0.0);
        let mut session = TitrationSession::new(TitrationConfig::default(), clock.clone()).unwrap();
        session.start_fill(20.0);
        assert!(VesselFrame::capture(&session).filling);
        clock.advance(1.0);
        session.tick();
        session.add_naoh(4.0);

        let frame = VesselFrame::capture(&session);
        assert!((frame.flask_fill - 0.2).abs() < 1e-12);
        let flask = session.flask();
        let surface = frame.flask_fill * flask.fill_max_height();
        assert!((surface - flask.surface_height()).abs() < 1e-12);
        // 2 mL/s * 120 = 240 particles/s
        assert_eq!(frame.emit_rate, 240.0);
        assert_eq!(frame.drop_count(), 2);
    }
}
