use std::rc::Rc;

use leptos::prelude::*;
use tracing::error;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpPredictApi;
use crate::components::material_select::MaterialSelect;
use crate::components::model_badge::ModelBadge;
use crate::config::AppConfig;
use crate::dom::DomSurface;
use crate::model::{FormFields, FormInput, TRANSPORT_MODES};
use crate::scroll;
use crate::submit::{BrowserHost, SubmissionController, FORM_ID, LOADING_ID};
use crate::transfer::{BrowserSession, TransferStore};

type PageController = SubmissionController<HttpPredictApi, BrowserSession, BrowserHost>;

const CALCULATOR_SECTION_ID: &str = "calculator";

fn build_controller(config: &AppConfig) -> Option<Rc<PageController>> {
    let surface = DomSurface::current()?;
    let api = match HttpPredictApi::for_page(config) {
        Ok(api) => api,
        Err(e) => {
            error!("Prediction endpoint unavailable, form disabled: {}", e);
            return None;
        }
    };
    Some(Rc::new(SubmissionController::new(
        api,
        TransferStore::new(BrowserSession, config.transfer_key.clone()),
        BrowserHost::new(surface),
        config.results_path.clone(),
        config.csrf_cookie.clone(),
    )))
}

#[component]
pub fn CalculatorPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let controller = build_controller(&config);

    let (product_name, set_product_name) = signal(String::new());
    let (material, set_material) = signal(String::new());
    let (weight, set_weight) = signal(String::new());
    let (transport_mode, set_transport_mode) = signal(String::new());
    let (distance, set_distance) = signal(String::new());

    Effect::new(move |_| {
        if let Some(surface) = DomSurface::current() {
            scroll::install(&surface);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(controller) = controller.clone() else {
            return;
        };
        let input = FormInput::from_fields(&FormFields {
            product_name: product_name.get_untracked(),
            material: material.get_untracked(),
            weight: weight.get_untracked(),
            transport_mode: transport_mode.get_untracked(),
            distance: distance.get_untracked(),
        });
        spawn_local(async move {
            controller.submit(input).await;
        });
    };

    let start = move |_| {
        if let Some(surface) = DomSurface::current() {
            surface.scroll_to(CALCULATOR_SECTION_ID);
        }
    };

    view! {
        <div class="page calculator-page">
            <section class="hero fade-in">
                <h2>"What does your product cost the planet?"</h2>
                <p class="page-description">
                    "Estimate the CO₂ footprint of a product from its material, weight and how it travels."
                </p>
                <button class="btn btn-primary" on:click=start>"Start"</button>
                <ModelBadge />
            </section>

            <section id=CALCULATOR_SECTION_ID class="calculator-section scroll-fade-in">
                <form id=FORM_ID class="calculator-form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="productName">"Product name"</label>
                        <input
                            id="productName"
                            type="text"
                            class="input"
                            placeholder="e.g. Cotton T-Shirt"
                            prop:value=move || product_name.get()
                            on:input=move |ev| set_product_name.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="material">"Material"</label>
                        <MaterialSelect value=material on_select=set_material />
                    </div>

                    <div class="form-group">
                        <label for="weight">"Weight (kg)"</label>
                        <input
                            id="weight"
                            type="number"
                            step="any"
                            min="0"
                            class="input"
                            prop:value=move || weight.get()
                            on:input=move |ev| set_weight.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="transportMode">"Transport mode"</label>
                        <select
                            id="transportMode"
                            class="input input-select"
                            prop:value=move || transport_mode.get()
                            on:change=move |ev| set_transport_mode.set(event_target_value(&ev))
                        >
                            <option value="">"Select transport"</option>
                            {TRANSPORT_MODES
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="distance">"Distance (km)"</label>
                        <input
                            id="distance"
                            type="number"
                            step="any"
                            min="0"
                            class="input"
                            prop:value=move || distance.get()
                            on:input=move |ev| set_distance.set(event_target_value(&ev))
                        />
                    </div>

                    <button type="submit" class="btn btn-primary btn-submit">
                        "Calculate footprint"
                    </button>
                </form>

                <div id=LOADING_ID class="loading-state hidden">
                    <div class="spinner"></div>
                    <p>"Calculating your footprint..."</p>
                </div>
            </section>
        </div>
    }
}
