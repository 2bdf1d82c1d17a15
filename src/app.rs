use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::site_nav::SiteNav;
use crate::config::AppConfig;
use crate::pages::calculator::CalculatorPage;
use crate::pages::insights::InsightsPage;
use crate::pages::results::ResultsPage;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(config);

    view! {
        <Router>
            <div class="app-layout">
                <SiteNav />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=CalculatorPage />
                        <Route path=path!("/results") view=ResultsPage />
                        <Route path=path!("/insights") view=InsightsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
