use std::cell::RefCell;
use std::rc::Rc;

use crate::components::{
    timestamp, ExperimentLogPanel, MobileSummaryBar, ReadingsDisplay, TitrationControls,
    VesselFrame, VesselView,
};
use crate::frame_loop::FrameLoop;
use crate::storage::{load_panel_settings, save_panel_settings, StoredPanelSettings};
use crate::titration::{
    dispatch, ExperimentLog, PanelAction, PerformanceClock, TitrationConfig, TitrationSession,
};
use leptos::*;
use log::info;

type SharedSession = Rc<RefCell<TitrationSession<PerformanceClock>>>;

/// The titration bench. Errors building the session surface through the
/// root `ErrorBoundary`.
#[component]
pub fn TitrationLab() -> impl IntoView {
    TitrationSession::new(TitrationConfig::default(), PerformanceClock).map(lab_bench)
}

fn lab_bench(session: TitrationSession<PerformanceClock>) -> View {
    // Panel inputs (initialized from storage)
    let saved = load_panel_settings();
    let (fill_input, set_fill_input) = create_signal(saved.fill_ml);
    let (add_input, set_add_input) = create_signal(saved.add_ml);

    create_effect(move |_| {
        save_panel_settings(&StoredPanelSettings {
            fill_ml: fill_input.get(),
            add_ml: add_input.get(),
        });
    });

    let min_liquid_ml = session.config().min_liquid_to_allow_base_ml;
    let (snapshot, set_snapshot) = create_signal(session.snapshot());
    let (frame, set_frame) = create_signal(VesselFrame::capture(&session));
    let notebook = create_rw_signal(ExperimentLog::new(session.config()));
    notebook.update(|l| l.start(&timestamp(), &snapshot.get_untracked()));

    let session: SharedSession = Rc::new(RefCell::new(session));

    // Snapshot listeners run while the session is borrowed, so nothing that
    // reacts to `snapshot` may touch the session.
    session
        .borrow_mut()
        .on_snapshot(move |s| set_snapshot.set(s.clone()));

    create_effect(move |_| {
        let current = snapshot.get();
        notebook.update(|l| l.observe(&timestamp(), &current));
    });

    let frame_loop = {
        let session = Rc::clone(&session);
        FrameLoop::start(move || {
            let Ok(mut session) = session.try_borrow_mut() else {
                return;
            };
            session.tick();
            let next = VesselFrame::capture(&session);
            drop(session);
            if frame.with_untracked(|f| *f != next) {
                set_frame.set(next);
            }
        })
    };

    let on_action = {
        let session = Rc::clone(&session);
        Callback::new(move |action: PanelAction| {
            notebook.update(|l| l.record_action(&timestamp(), action));
            dispatch(&mut session.borrow_mut(), action);
        })
    };

    {
        let session = Rc::clone(&session);
        on_cleanup(move || {
            frame_loop.stop();
            session.borrow_mut().dispose();
            info!("titration bench closed");
        });
    }

    view! {
        <main class="container">
            <header>
                <h1>"Acid-Base Titration"</h1>
                <p class="tagline">"Neutralise diluted acid with 0.1 M NaOH and watch for the pink endpoint"</p>
            </header>

            <section class="interactive">
                <div class="model-container">
                    <TitrationControls
                        fill_input=fill_input
                        set_fill_input=set_fill_input
                        add_input=add_input
                        set_add_input=set_add_input
                        snapshot=snapshot
                        min_liquid_ml=min_liquid_ml
                        on_action=on_action
                    />
                    <VesselView frame=frame/>
                    <ReadingsDisplay snapshot=snapshot/>
                </div>
            </section>

            <ExperimentLogPanel notebook=notebook/>

            <section class="explanation">
                <h2>"What to look for"</h2>
                <div class="physics-cards">
                    <div class="card">
                        <h3>"Dilution"</h3>
                        <p>
                            "The acid is poured in already diluted, so a small volume is weaker "
                            "than the stock solution. Filling more of the flask brings the "
                            "concentration closer to 0.05 M."
                        </p>
                    </div>
                    <div class="card">
                        <h3>"Equivalence"</h3>
                        <p>
                            "When the moles of NaOH delivered match the moles of acid in the flask, "
                            "the solution is neutral. One more drop tips it sharply basic."
                        </p>
                    </div>
                    <div class="card">
                        <h3>"Phenolphthalein"</h3>
                        <p>
                            "The indicator stays clear below pH 8.2 and turns fully pink by pH 10. "
                            "A faint, lasting pink is the endpoint you are looking for."
                        </p>
                    </div>
                </div>
            </section>

            <footer>
                <p class="disclaimer">
                    "Simplified model: strong monoprotic acid against NaOH, no activity "
                    "corrections or water autoionization."
                </p>
            </footer>

            <MobileSummaryBar snapshot=snapshot/>
        </main>
    }
    .into_view()
}

