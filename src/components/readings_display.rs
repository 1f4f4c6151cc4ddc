use crate::titration::{DisplaySnapshot, IndicatorLabel, ReadingsView};
use leptos::*;

fn indicator_class(label: IndicatorLabel) -> &'static str {
    match label {
        IndicatorLabel::Clear => "indicator clear",
        IndicatorLabel::FaintPink => "indicator faint-pink",
        IndicatorLabel::Pink => "indicator pink",
    }
}

#[component]
pub fn ReadingsDisplay(snapshot: ReadSignal<DisplaySnapshot>) -> impl IntoView {
    let view_model = create_memo(move |_| snapshot.with(ReadingsView::from_snapshot));

    view! {
        <div class="readings">
            <div class="metrics">
                <div class="metric highlight">
                    <span class="metric-value">{move || view_model.with(|v| v.ph.clone())}</span>
                    <span class="metric-label">"pH"</span>
                </div>
                <div class="metric">
                    <span class="metric-value">{move || view_model.with(|v| v.va.clone())}</span>
                    <span class="metric-label">"Va (flask)"</span>
                </div>
                <div class="metric">
                    <span class="metric-value">{move || view_model.with(|v| v.vb.clone())}</span>
                    <span class="metric-label">"Vb (delivered)"</span>
                </div>
                <div class="metric">
                    <span class="metric-value">{move || view_model.with(|v| v.cb.clone())}</span>
                    <span class="metric-label">"Cb (NaOH)"</span>
                </div>
            </div>
            <p class="state-label">{move || view_model.with(|v| v.state.clone())}</p>
            <p class=move || view_model.with(|v| indicator_class(v.indicator))>
                "Indicator: " {move || view_model.with(|v| v.indicator.as_str())}
            </p>
        </div>
    }
}
