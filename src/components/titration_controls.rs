use crate::titration::{parse_amount, sanitize_amount_input, DisplaySnapshot, PanelAction};
use leptos::*;
use log::debug;

#[component]
pub fn TitrationControls(
    fill_input: ReadSignal<String>,
    set_fill_input: WriteSignal<String>,
    add_input: ReadSignal<String>,
    set_add_input: WriteSignal<String>,
    snapshot: ReadSignal<DisplaySnapshot>,
    min_liquid_ml: f64,
    on_action: Callback<PanelAction>,
) -> impl IntoView {
    let fill_error = create_memo(move |_| parse_amount(&fill_input.get()).err().map(|e| e.to_string()));
    let add_error = create_memo(move |_| parse_amount(&add_input.get()).err().map(|e| e.to_string()));
    let flask_too_empty = create_memo(move |_| snapshot.with(|s| s.va_ml < min_liquid_ml));

    let fill = move |_| match parse_amount(&fill_input.get_untracked()) {
        Ok(ml) => on_action.call(PanelAction::Fill(ml)),
        Err(e) => debug!("fill ignored: {}", e),
    };
    let add = move |_| match parse_amount(&add_input.get_untracked()) {
        Ok(ml) => on_action.call(PanelAction::AddNaOh(ml)),
        Err(e) => debug!("NaOH ignored: {}", e),
    };

    view! {
        <div class="controls">
            <h3>"Flask"</h3>

            <div class="control-group">
                <label for="fill-amount">"Distilled water (mL)"</label>
                <div class="input-row">
                    <input
                        type="text"
                        id="fill-amount"
                        inputmode="decimal"
                        prop:value=move || fill_input.get()
                        on:input=move |ev| set_fill_input.set(sanitize_amount_input(&event_target_value(&ev)))
                    />
                    <button
                        class="action-button"
                        disabled=move || fill_error.get().is_some()
                        on:click=fill
                    >
                        "Fill"
                    </button>
                    <button
                        class="action-button secondary"
                        on:click=move |_| on_action.call(PanelAction::StopFill)
                    >
                        "Stop"
                    </button>
                </div>
                <p class="input-error">{move || fill_error.get()}</p>
                <p class="fill-status">{move || snapshot.with(|s| s.filled_text.clone())}</p>
            </div>

            <h3>"Burette"</h3>

            <div class="control-group">
                <label for="add-amount">"NaOH to add (mL)"</label>
                <div class="input-row">
                    <input
                        type="text"
                        id="add-amount"
                        inputmode="decimal"
                        prop:value=move || add_input.get()
                        on:input=move |ev| set_add_input.set(sanitize_amount_input(&event_target_value(&ev)))
                    />
                    <button
                        class="action-button"
                        disabled=move || add_error.get().is_some() || flask_too_empty.get()
                        on:click=add
                    >
                        "Add NaOH"
                    </button>
                </div>
                <p class="input-error">{move || add_error.get()}</p>
                <Show when=move || flask_too_empty.get()>
                    <p class="hint">{format!("Fill at least {} mL before adding base.", min_liquid_ml)}</p>
                </Show>
            </div>

            <button
                class="reset-button"
                on:click=move |_| on_action.call(PanelAction::Reset)
            >
                "Reset titration"
            </button>
        </div>
    }
}
