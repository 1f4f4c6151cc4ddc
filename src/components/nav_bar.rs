use leptos::*;
use leptos_router::{use_location, A};

const NAV_LINKS: [(&str, &str); 3] = [("/", "Titration"), ("/theory", "Theory"), ("/about", "About")];

/// Home matches only itself; other links also match their sub-pages.
fn is_active(current: &str, href: &str) -> bool {
    current == href || (href != "/" && current.starts_with(href))
}

#[component]
pub fn NavBar() -> impl IntoView {
    let location = use_location();

    let links = NAV_LINKS
        .into_iter()
        .map(|(href, label)| {
            let class = move || {
                if location.pathname.with(|p| is_active(p, href)) {
                    "nav-link active"
                } else {
                    "nav-link"
                }
            };
            view! { <A href=href class=class>{label}</A> }
        })
        .collect_view();

    view! {
        <nav class="site-nav">
            <div class="site-nav-inner">
                <A href="/" class="nav-brand">"Virtual Lab"</A>
                <div class="nav-links">{links}</div>
            </div>
        </nav>
    }
}
