//! Model insights page: accuracy figures counted up from the model-info
//! endpoint, plus the calculation methodology.

use crate::animate::CountUp;
use crate::dom::HIDDEN_CLASS;
use crate::model::ModelInfo;
use crate::plan::{Action, RenderPlan};

pub mod ids {
    pub const PERFORMANCE: &str = "modelPerformance";
    pub const UNAVAILABLE: &str = "modelUnavailable";
    pub const R2_VALUE: &str = "r2Value";
    pub const R2_BAR: &str = "r2Bar";
    pub const RMSE_VALUE: &str = "rmseValue";
    pub const MAE_VALUE: &str = "maeValue";
    pub const SAMPLES_VALUE: &str = "trainingSamples";
    pub const FEATURE_COUNT: &str = "featureCount";
}

pub const COUNTER_MS: u32 = 2000;
pub const R2_BAR_DELAY_MS: u32 = 300;

/// Size of the synthetic dataset the model was trained on.
pub const TRAINING_SAMPLES: f64 = 5000.0;

pub struct Formula {
    pub title: &'static str,
    pub expression: &'static str,
    pub note: &'static str,
}

pub static METHODOLOGY: [Formula; 3] = [
    Formula {
        title: "1. Material Emissions",
        expression: "CO₂ = Weight (kg) × Material Factor (kg CO₂e/kg)",
        note: "Based on IPCC 2006 Guidelines.",
    },
    Formula {
        title: "2. Manufacturing Emissions",
        expression: "CO₂ = Weight × Intensity Factor × 1.4",
        note: "Intensity: Low (0.5), Medium (1.5), High (3.5).",
    },
    Formula {
        title: "3. Transport Emissions",
        expression: "CO₂ = Weight × (Distance / 1000) × Transport Factor",
        note: "Standard logistical emission factors.",
    },
];

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn plan(info: &ModelInfo) -> RenderPlan {
    let mut plan = RenderPlan::new();
    plan.now(ids::UNAVAILABLE, Action::AddClass(HIDDEN_CLASS))
        .now(ids::PERFORMANCE, Action::RemoveClass(HIDDEN_CLASS))
        .now(
            ids::R2_VALUE,
            Action::CountUp(CountUp::new(0.0, info.r2_score, COUNTER_MS).with_decimals(4)),
        )
        .after(
            R2_BAR_DELAY_MS,
            ids::R2_BAR,
            Action::SetWidth(round_to(info.r2_score.clamp(0.0, 1.0) * 100.0, 2)),
        )
        .now(
            ids::RMSE_VALUE,
            Action::CountUp(CountUp::new(0.0, round_to(info.rmse, 2), COUNTER_MS).with_decimals(2)),
        )
        .now(
            ids::MAE_VALUE,
            Action::CountUp(CountUp::new(0.0, round_to(info.mae, 2), COUNTER_MS).with_decimals(2)),
        )
        .now(
            ids::SAMPLES_VALUE,
            Action::CountUp(CountUp::new(0.0, TRAINING_SAMPLES, COUNTER_MS)),
        );

    if !info.feature_names.is_empty() {
        plan.now(
            ids::FEATURE_COUNT,
            Action::SetText(info.feature_names.len().to_string()),
        );
    }
    plan
}
