use leptos::prelude::*;
use tracing::{debug, info};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::config::AppConfig;
use crate::dom::DomSurface;
use crate::insights::{self, ids, Formula, METHODOLOGY};
use crate::plan;
use crate::scroll;

#[component]
fn FormulaCard(formula: &'static Formula) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);

    view! {
        <div
            class="formula-card"
            class:expanded=move || expanded.get()
            on:click=move |_| set_expanded.update(|open| *open = !*open)
        >
            <div class="formula-header">
                <span class="formula-title">{formula.title}</span>
                <span class="formula-toggle">{move || if expanded.get() { "\u{2212}" } else { "+" }}</span>
            </div>
            <div class="formula-details">
                <div class="formula-code">{formula.expression}</div>
                <p>{formula.note}</p>
            </div>
        </div>
    }
}

#[component]
fn Metric(id: &'static str, label: &'static str, caption: &'static str) -> impl IntoView {
    view! {
        <div class="metric">
            <div class="metric-row">
                <span>{label}</span>
                <span id=id class="metric-counter">"0"</span>
            </div>
            <small class="metric-caption">{caption}</small>
        </div>
    }
}

#[component]
pub fn InsightsPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let (status, set_status) = signal("Loading model information...");

    Effect::new(move |_| {
        let config = config.clone();
        spawn_local(async move {
            let Some(surface) = DomSurface::current() else {
                return;
            };
            match api::fetch_model_info(&config).await {
                Ok(Some(model)) => {
                    let applied = plan::perform(insights::plan(&model), &surface);
                    info!("Rendered model insights ({} updates)", applied);
                }
                Ok(None) => set_status.set("Model information not available."),
                Err(e) => {
                    debug!("Model info unavailable: {}", e);
                    set_status.set("Model information not available.");
                }
            }
        });
        if let Some(surface) = DomSurface::current() {
            scroll::install(&surface);
        }
    });

    view! {
        <div class="page insights-page">
            <div class="page-header scroll-fade-in">
                <h2>"Model Insights & Methodology"</h2>
                <p class="page-description">
                    "How the Random Forest model estimates a product's footprint from emission factors."
                </p>
                <div class="pipeline">
                    <span class="pipeline-step">"Data Input"</span>
                    <span class="pipeline-arrow">"\u{2192}"</span>
                    <span class="pipeline-step">"Feature Eng."</span>
                    <span class="pipeline-arrow">"\u{2192}"</span>
                    <span class="pipeline-step">"Random Forest"</span>
                    <span class="pipeline-arrow">"\u{2192}"</span>
                    <span class="pipeline-step">"Prediction"</span>
                    <span class="pipeline-arrow">"\u{2192}"</span>
                    <span class="pipeline-step">"Offset Plan"</span>
                </div>
            </div>

            <section class="glass-card scroll-scale">
                <h3>"Model Performance"</h3>
                <p id=ids::UNAVAILABLE class="text-muted">{move || status.get()}</p>
                <div id=ids::PERFORMANCE class="performance hidden">
                    <div class="accuracy">
                        <span id=ids::R2_VALUE class="accuracy-value">"0"</span>
                        <span class="accuracy-label">"R² Score"</span>
                        <div class="accuracy-track">
                            <div id=ids::R2_BAR class="accuracy-bar" style="width: 0%"></div>
                        </div>
                    </div>
                    <Metric id=ids::RMSE_VALUE label="RMSE" caption="Root Mean Squared Error (kg CO₂e)" />
                    <Metric id=ids::MAE_VALUE label="MAE" caption="Mean Absolute Error (kg CO₂e)" />
                    <Metric id=ids::SAMPLES_VALUE label="Training Samples" caption="Synthetic dataset size" />
                    <Metric id=ids::FEATURE_COUNT label="Features" caption="Model inputs" />
                </div>
            </section>

            <section class="glass-card scroll-fade-in">
                <h3>"Calculation Methodology"</h3>
                <p class="text-muted">"Click each section to expand the formula details."</p>
                {METHODOLOGY.iter().map(|formula| view! { <FormulaCard formula=formula /> }).collect_view()}
            </section>
        </div>
    }
}
