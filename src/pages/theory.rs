use crate::titration::{
    compute_ph, effective_acid_concentration, fmt_number, TitrationConfig, INDICATOR_END_PH,
    INDICATOR_START_PH,
};
use leptos::*;
use leptos_router::A;

/// Worked example rows: pH of 20 mL of acid after each NaOH volume.
fn curve_rows(config: &TitrationConfig, va_ml: f64, vb_points: &[f64]) -> Vec<(String, String)> {
    vb_points
        .iter()
        .map(|&vb| (fmt_number(vb, 2), fmt_number(compute_ph(config, va_ml, vb), 2)))
        .collect()
}

fn dilution_formula(config: &TitrationConfig) -> String {
    format!(
        "Ca = Ca,stock \u{00b7} Va / (Va + K)    K = {} mL",
        config.acid_mixing_k
    )
}

#[component]
pub fn TheoryPage() -> impl IntoView {
    let config = TitrationConfig::default();
    let va = 20.0;
    let ca = effective_acid_concentration(&config, va);
    let equivalence_ml = ca * va / config.base_concentration;
    let rows = curve_rows(&config, va, &[0.0, 2.0, 4.0, 4.9, equivalence_ml, 5.1, 6.0, 10.0]);

    view! {
        <main class="container theory-page">
            <header>
                <h1>"Theory"</h1>
                <p class="tagline">"The chemistry behind the bench"</p>
            </header>

            <nav class="back-nav">
                <A href="/">"< Back to the titration"</A>
            </nav>

            <section class="theory-section">
                <h2>"Diluted acid"</h2>
                <p>
                    "The acid in the flask is a stock solution of "
                    {format!("{} M", fmt_number(config.acid_stock_concentration, 3))}
                    " that has been diluted. The model folds that into an effective concentration "
                    "which grows with the volume poured in:"
                </p>
                <pre class="formula">{dilution_formula(&config)}</pre>
                <p>
                    {format!(
                        "With {} mL in the flask Ca is {} M, so the flask holds {} mmol of acid.",
                        fmt_number(va, 0),
                        fmt_number(ca, 4),
                        fmt_number(ca * va, 3),
                    )}
                </p>
            </section>

            <section class="theory-section">
                <h2>"Neutralisation"</h2>
                <p>
                    "Each millilitre of NaOH delivers Cb \u{00b7} Vb millimoles of hydroxide. "
                    "Whichever side is in excess sets the pH over the total volume:"
                </p>
                <pre class="formula">
                    "acid excess:  pH = \u{2212}log10((na \u{2212} nb) / Vtotal)\n"
                    "base excess:  pH = 14 + log10((nb \u{2212} na) / Vtotal)\n"
                    "equal:        pH = 7"
                </pre>
                <p>
                    {format!(
                        "Equivalence for this flask is at {} mL of {} M NaOH.",
                        fmt_number(equivalence_ml, 2),
                        fmt_number(config.base_concentration, 2),
                    )}
                </p>
                <table class="curve-table">
                    <thead>
                        <tr><th>"Vb (mL)"</th><th>"pH"</th></tr>
                    </thead>
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|(vb, ph)| view! { <tr><td>{vb}</td><td>{ph}</td></tr> })
                            .collect_view()}
                    </tbody>
                </table>
            </section>

            <section class="theory-section">
                <h2>"Phenolphthalein"</h2>
                <p>
                    {format!(
                        "The indicator is colourless below pH {} and fully pink from pH {}. ",
                        INDICATOR_START_PH, INDICATOR_END_PH,
                    )}
                    "In between the colour is blended linearly, which is why the first faint, "
                    "lasting pink marks the endpoint."
                </p>
            </section>

            <nav class="back-nav bottom">
                <A href="/">"< Back to the titration"</A>
            </nav>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_rows_cross_equivalence() {
        let config = TitrationConfig::default();
        let rows = curve_rows(&config, 20.0, &[0.0, 5.0, 10.0]);
        assert_eq!(rows[1], ("5.00".to_string(), "7.00".to_string()));
        let before: f64 = rows[0].1.parse().unwrap();
        let after: f64 = rows[2].1.parse().unwrap();
        assert!(before < 7.0 && after > 7.0, "got {} and {}", before, after);
    }

    #[test]
    fn test_dilution_formula_uses_configured_k() {
        assert!(dilution_formula(&TitrationConfig::default()).ends_with("K = 20 mL"));
        let config = TitrationConfig {
            acid_mixing_k: 12.5,
            ..Default::default()
        };
        assert!(dilution_formula(&config).ends_with("K = 12.5 mL"));
    }
}
