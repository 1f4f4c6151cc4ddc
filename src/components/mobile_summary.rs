use crate::titration::{fmt_number, DisplaySnapshot, IndicatorLabel};
use leptos::*;

#[component]
pub fn MobileSummaryBar(snapshot: ReadSignal<DisplaySnapshot>) -> impl IntoView {
    let indicator = create_memo(move |_| snapshot.with(|s| IndicatorLabel::from_ph(s.ph)));

    view! {
        <div class="mobile-summary">
            <div class="summary-content">
                <div class="summary-item">
                    <span class="summary-value">{move || snapshot.with(|s| fmt_number(s.ph, 2))}</span>
                    <span class="summary-label">"pH"</span>
                </div>
                <div class="summary-item">
                    <span class="summary-value">{move || snapshot.with(|s| format!("{} mL", fmt_number(s.vb_ml, 2)))}</span>
                    <span class="summary-label">"NaOH added"</span>
                </div>
                <div class="summary-item">
                    <span
                        class="summary-value"
                        class:pink=move || indicator.get() != IndicatorLabel::Clear
                    >
                        {move || indicator.get().as_str()}
                    </span>
                    <span class="summary-label">"Indicator"</span>
                </div>
            </div>
        </div>
    }
}
