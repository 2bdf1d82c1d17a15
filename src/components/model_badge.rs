use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::config::AppConfig;
use crate::model::ModelInfo;

/// One-line summary of the prediction model's accuracy figures.
pub fn model_summary(info: &ModelInfo) -> String {
    format!(
        "R² {:.2} · RMSE {:.2} kg · MAE {:.2} kg",
        info.r2_score, info.rmse, info.mae
    )
}

/// Accuracy of the prediction model, shown once the service reports it.
/// Renders nothing when the model-info endpoint is unavailable.
#[component]
pub fn ModelBadge() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let (info, set_info) = signal::<Option<ModelInfo>>(None);

    Effect::new(move |_| {
        let config = config.clone();
        spawn_local(async move {
            match api::fetch_model_info(&config).await {
                Ok(found) => set_info.set(found),
                Err(e) => debug!("Model info unavailable: {}", e),
            }
        });
    });

    move || {
        info.get().map(|info| {
            let features = info.feature_names.len();
            view! {
                <div class="model-badge">
                    <span class="model-badge-icon">"\u{2713}"</span>
                    <span class="model-badge-label">"Model accuracy"</span>
                    <span class="model-badge-detail">{model_summary(&info)}</span>
                    <span class="model-badge-features">{format!("{} features", features)}</span>
                </div>
            }
        })
    }
}
