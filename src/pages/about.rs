use leptos::*;
use leptos_router::A;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <main class="container about-page">
            <header>
                <h1>"Virtual Lab"</h1>
                <p class="tagline">"About this bench"</p>
            </header>

            <nav class="back-nav">
                <A href="/">"< Back to the titration"</A>
            </nav>

            <section class="about-section">
                <h2>"What it is"</h2>
                <p>
                    "A browser bench for the classic acid\u{2013}base titration: pour diluted acid "
                    "into an Erlenmeyer flask, deliver sodium hydroxide from a 50 mL burette and "
                    "watch phenolphthalein turn pink as the solution passes equivalence."
                </p>
                <p>
                    "Volumes, pH and colour respond the moment you act. The burette animation "
                    "is only for show; the chemistry never waits for it."
                </p>
            </section>

            <section class="about-section">
                <h2>"How it runs"</h2>
                <p>
                    "Everything runs client-side in your browser using Rust compiled to WASM. "
                    "No servers and no accounts. The lab notebook stays in memory until you "
                    "finish the experiment and copy out its JSON."
                </p>
                <p>
                    "Curious about the numbers? Read the "
                    <A href="/theory">"chemistry behind the model"</A>
                    " or head back to the "
                    <A href="/">"bench"</A>
                    " to run a titration yourself."
                </p>
            </section>

            <section class="about-section">
                <h2>"Limits"</h2>
                <ul>
                    <li>"One strong monoprotic acid and one strong base; no buffers or weak acids"</li>
                    <li>"No water autoionization, so the curve is idealised right at equivalence"</li>
                    <li>"The burette holds 49 mL of titrant per run; reset to refill it"</li>
                </ul>
            </section>

            <nav class="back-nav bottom">
                <A href="/">"< Back to the titration"</A>
            </nav>
        </main>
    }
}
