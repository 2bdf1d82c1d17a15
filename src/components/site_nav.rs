use leptos::prelude::*;

#[component]
pub fn SiteNav() -> impl IntoView {
    view! {
        <nav class="site-nav">
            <div class="nav-header">
                <a href="/" class="nav-title">"CarbonLens"</a>
                <p class="nav-subtitle">"Product Carbon Footprint Calculator"</p>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Calculator"</a>
                </li>
                <li class="nav-item">
                    <a href="/results/" class="nav-link">"Results"</a>
                </li>
                <li class="nav-item">
                    <a href="/insights/" class="nav-link">"Model Insights"</a>
                </li>
            </ul>
        </nav>
    }
}
