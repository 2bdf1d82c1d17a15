use leptos::prelude::*;
use tracing::info;

use crate::config::AppConfig;
use crate::dom::DomSurface;
use crate::results::{self, ids};
use crate::scroll;
use crate::transfer::{BrowserSession, TransferStore};

#[component]
fn BreakdownRow(
    label: &'static str,
    percent_id: &'static str,
    bar_id: &'static str,
    co2_id: &'static str,
    bar_class: &'static str,
) -> impl IntoView {
    view! {
        <div class="breakdown-item">
            <div class="breakdown-header">
                <span class="breakdown-label">{label}</span>
                <span id=percent_id class="breakdown-percent">"0%"</span>
            </div>
            <div class="breakdown-track">
                <div id=bar_id class=format!("breakdown-bar {}", bar_class) style="width: 0%"></div>
            </div>
            <span id=co2_id class="breakdown-co2"></span>
        </div>
    }
}

#[component]
fn StatCard(id: &'static str, caption: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span id=id class="stat-value">"0"</span>
            <span class="stat-caption">{caption}</span>
        </div>
    }
}

#[component]
pub fn ResultsPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();

    Effect::new(move |_| {
        let Some(surface) = DomSurface::current() else {
            return;
        };
        let store = TransferStore::new(BrowserSession, config.transfer_key.clone());
        match store.read() {
            Some(result) => results::render(&result, &surface),
            None => info!("No prediction to show"),
        }
        scroll::install(&surface);
    });

    view! {
        <div class="page results-page">
            <div id=ids::EMPTY_STATE class="empty-state fade-in">
                <h2>"No results yet"</h2>
                <p class="page-description">"Run the calculator to see your product's footprint."</p>
                <a href="/" class="btn btn-primary">"Go to calculator"</a>
            </div>

            <div id=ids::RESULTS_CONTAINER class="results-container hidden">
                <section class="headline slide-up">
                    <h2>"Estimated footprint"</h2>
                    <div id=ids::CO2_VALUE class="co2-value">"0.00 kg"</div>
                    <p id=ids::EQUIVALENCY_TEXT class="equivalency-text"></p>
                </section>

                <section class="stats">
                    <StatCard id=ids::TREES_NEEDED caption="trees needed for a year" />
                    <StatCard id=ids::VEGAN_DAYS caption="days of vegan diet" />
                    <StatCard id=ids::CAR_KM caption="km driven by car" />
                </section>

                <section class="breakdown animate-on-scroll">
                    <h3>"Where the emissions come from"</h3>
                    <div class="breakdown-summary">
                        <span class="summary-label">"Total"</span>
                        <span id=ids::TOTAL_EMISSIONS class="summary-value"></span>
                        <span id=ids::CONFIDENCE_RANGE class="summary-range"></span>
                    </div>
                    <BreakdownRow
                        label="Materials"
                        percent_id=ids::MATERIAL_PERCENT
                        bar_id=ids::MATERIAL_BAR
                        co2_id=ids::MATERIAL_CO2
                        bar_class="bar-materials"
                    />
                    <BreakdownRow
                        label="Manufacturing"
                        percent_id=ids::MFG_PERCENT
                        bar_id=ids::MFG_BAR
                        co2_id=ids::MFG_CO2
                        bar_class="bar-manufacturing"
                    />
                    <BreakdownRow
                        label="Transport"
                        percent_id=ids::TRANSPORT_PERCENT
                        bar_id=ids::TRANSPORT_BAR
                        co2_id=ids::TRANSPORT_CO2
                        bar_class="bar-transport"
                    />
                    <div class="chart-container scale-up">
                        <canvas id=ids::BREAKDOWN_CHART></canvas>
                    </div>
                </section>

                <section class="compensation animate-on-scroll">
                    <h3>"How to compensate"</h3>
                    <div class="compensation-item">
                        <span id=ids::TREES_COMPENSATION class="compensation-value"></span>
                        <span class="compensation-caption">"trees planted"</span>
                    </div>
                    <div class="compensation-item">
                        <span id=ids::VEGAN_COMPENSATION class="compensation-value"></span>
                        <span class="compensation-caption">"days without meat"</span>
                    </div>
                    <div class="compensation-item">
                        <span id=ids::RECYCLE_COMPENSATION class="compensation-value"></span>
                        <span class="compensation-caption">"kg of material recycled"</span>
                    </div>
                    <p class="compensation-detail">
                        <span id=ids::TREES_PER_YEAR class="compensation-figure"></span>
                        " trees absorbing CO₂ for a year · "
                        <span id=ids::REC_CREDITS class="compensation-figure"></span>
                        " renewable energy credits"
                    </p>
                    <p id=ids::COMPENSATION_MESSAGE class="compensation-message"></p>
                </section>

                <section class="everyday scroll-fade-in">
                    <h3>"In everyday terms"</h3>
                    <p>
                        <span id=ids::SMARTPHONE_CHARGES class="everyday-value"></span>
                        " smartphone charges"
                    </p>
                    <p>
                        <span id=ids::WASHING_LOADS class="everyday-value"></span>
                        " loads of laundry"
                    </p>
                </section>

                <a href="/" class="btn btn-secondary">"Calculate another product"</a>
            </div>
        </div>
    }
}
