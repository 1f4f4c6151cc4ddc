pub mod components;
pub mod error;
pub mod frame_loop;
pub mod logging;
pub mod pages;
pub mod storage;
pub mod titration;

use components::{NavBar, TitrationLab};
use leptos::*;
use leptos_router::*;
use pages::{AboutPage, NotFoundPage, TheoryPage};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

/// Workaround for Leptos 0.6 router not re-rendering on browser back/forward.
///
/// On `popstate` the router updates its location signal but `<Routes>` does not
/// always re-evaluate, so reload the page at the new URL instead. Panel inputs
/// survive through localStorage; the lab notebook does not.
fn setup_popstate_reload() {
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }) as Box<dyn Fn(web_sys::Event)>);

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Root component with routing
#[component]
fn Root() -> impl IntoView {
    view! {
        <ErrorBoundary fallback=|errors| view! {
            <main class="container">
                <div class="error-container">
                    <h2>"Something went wrong"</h2>
                    <p>"The lab could not be set up. Try refreshing the page or resetting the saved inputs."</p>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect_view()
                        }
                    </ul>
                    <button on:click=move |_| {
                        storage::clear_panel_settings();
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }>"Reset & Reload"</button>
                </div>
            </main>
        }>
            <Router>
                <NavBar/>
                <Routes>
                    <Route path="/" view=TitrationLab/>
                    <Route path="/about" view=AboutPage/>
                    <Route path="/theory" view=TheoryPage/>
                    <Route path="/*" view=NotFoundPage/>
                </Routes>
            </Router>
        </ErrorBoundary>
    }
}

/// Mount the application to the DOM
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    setup_popstate_reload();
    mount_to_body(Root);
}
