use crate::titration::ExperimentLog;
use leptos::*;
use log::warn;

/// Current time as an ISO-8601 string, the experiment log's timestamp format.
pub fn timestamp() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

#[component]
pub fn ExperimentLogPanel(notebook: RwSignal<ExperimentLog>) -> impl IntoView {
    let (payload_json, set_payload_json) = create_signal(None::<String>);

    let finish = move |_| {
        notebook.update(|l| l.record_finish(&timestamp()));
        match notebook.with_untracked(ExperimentLog::payload_json) {
            Ok(json) => set_payload_json.set(Some(json)),
            Err(e) => warn!("could not serialize experiment log: {}", e),
        }
    };

    view! {
        <section class="experiment-log">
            <div class="control-group-header">
                <h3>"Lab notebook"</h3>
                <button class="action-button" on:click=finish>"Finish experiment"</button>
            </div>
            <pre class="log-lines">
                {move || notebook.with(|l| l.lines().join("\n"))}
            </pre>
            {move || payload_json.get().map(|json| view! {
                <div class="payload">
                    <h4>"Submission payload"</h4>
                    <textarea readonly rows="12" prop:value=json></textarea>
                </div>
            })}
        </section>
    }
}
