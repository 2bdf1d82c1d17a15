//! Results page rendering: turns a [`PredictionResult`] into a [`RenderPlan`]
//! over the page's named elements, then plays it and draws the chart.

use tracing::{info, warn};

use crate::animate::CountUp;
use crate::chart;
use crate::dom::{DomSurface, HIDDEN_CLASS};
use crate::format::{self, group_thousands, rounded};
use crate::model::{Breakdown, Compensation, Equivalency, PredictionResult};
use crate::plan::{self, Action, RenderPlan};

pub mod ids {
    pub const EMPTY_STATE: &str = "emptyState";
    pub const RESULTS_CONTAINER: &str = "resultsContainer";
    pub const CO2_VALUE: &str = "co2Value";
    pub const EQUIVALENCY_TEXT: &str = "equivalencyText";
    pub const TOTAL_EMISSIONS: &str = "totalEmissions";
    pub const CONFIDENCE_RANGE: &str = "confidenceRange";

    pub const MATERIAL_PERCENT: &str = "materialPercent";
    pub const MFG_PERCENT: &str = "mfgPercent";
    pub const TRANSPORT_PERCENT: &str = "transportPercent";
    pub const MATERIAL_BAR: &str = "materialBar";
    pub const MFG_BAR: &str = "mfgBar";
    pub const TRANSPORT_BAR: &str = "transportBar";
    pub const MATERIAL_CO2: &str = "materialCo2";
    pub const MFG_CO2: &str = "mfgCo2";
    pub const TRANSPORT_CO2: &str = "transportCo2";

    pub const TREES_NEEDED: &str = "treesNeeded";
    pub const VEGAN_DAYS: &str = "veganDays";
    pub const CAR_KM: &str = "carKm";
    pub const TREES_COMPENSATION: &str = "treesCompensation";
    pub const VEGAN_COMPENSATION: &str = "veganCompensation";
    pub const RECYCLE_COMPENSATION: &str = "recycleCompensation";
    pub const COMPENSATION_MESSAGE: &str = "compensationMessage";
    pub const TREES_PER_YEAR: &str = "treesPerYear";
    pub const REC_CREDITS: &str = "recCredits";
    pub const SMARTPHONE_CHARGES: &str = "smartphoneCharges";
    pub const WASHING_LOADS: &str = "washingLoads";

    pub const BREAKDOWN_CHART: &str = "breakdownChart";
}

pub const HEADLINE_MS: u32 = 2000;
pub const STAT_MS: u32 = 1500;
pub const TOTAL_DELAY_MS: u32 = 500;
pub const BAR_DELAY_MS: u32 = 300;
pub const TREES_DELAY_MS: u32 = 800;
pub const VEGAN_DELAY_MS: u32 = 1000;
pub const RECYCLE_DELAY_MS: u32 = 1200;

/// kg of material per tree-equivalent.
const MATERIAL_KG_PER_TREE: f64 = 20.0;
/// kg of CO2 saved per kg recycled.
const CO2_SAVED_PER_RECYCLED_KG: f64 = 0.8;

/// Rough kg of recycled material matching the tree offset. A heuristic, not a
/// measured factor.
pub fn recycled_equivalent_kg(trees_display: f64) -> f64 {
    format::round_half_up(trees_display * MATERIAL_KG_PER_TREE / CO2_SAVED_PER_RECYCLED_KG)
}

pub fn plan(result: &PredictionResult) -> RenderPlan {
    let mut plan = RenderPlan::new();

    plan.now(ids::EMPTY_STATE, Action::AddClass(HIDDEN_CLASS))
        .now(ids::RESULTS_CONTAINER, Action::RemoveClass(HIDDEN_CLASS))
        .now(
            ids::CO2_VALUE,
            Action::CountUp(CountUp::new(0.0, result.co2_kg, HEADLINE_MS).with_suffix(" kg")),
        )
        .now(
            ids::EQUIVALENCY_TEXT,
            Action::SetText(format!("≈ {}", result.equivalency.display)),
        )
        .after(
            TOTAL_DELAY_MS,
            ids::TOTAL_EMISSIONS,
            Action::SetText(format!("{} kg CO₂e", result.co2_kg)),
        );

    if let Some(ci) = &result.confidence_interval {
        plan.after(
            TOTAL_DELAY_MS,
            ids::CONFIDENCE_RANGE,
            Action::SetText(format!("{} – {} kg CO₂e", ci.lower, ci.upper)),
        );
    }

    plan_breakdown(&mut plan, &result.breakdown);
    plan_compensation(&mut plan, &result.compensation, &result.equivalency);
    plan
}

fn plan_breakdown(plan: &mut RenderPlan, breakdown: &Breakdown) {
    let rows = [
        (
            ids::MATERIAL_PERCENT,
            ids::MATERIAL_BAR,
            ids::MATERIAL_CO2,
            breakdown.materials_percent,
            breakdown.material_co2,
        ),
        (
            ids::MFG_PERCENT,
            ids::MFG_BAR,
            ids::MFG_CO2,
            breakdown.manufacturing_percent,
            breakdown.manufacturing_co2,
        ),
        (
            ids::TRANSPORT_PERCENT,
            ids::TRANSPORT_BAR,
            ids::TRANSPORT_CO2,
            breakdown.transport_percent,
            breakdown.transport_co2,
        ),
    ];

    for (caption, bar, co2_caption, percent, co2) in rows {
        plan.now(caption, Action::SetText(format::percent(percent)));
        // Delayed so the bar's CSS width transition is visible.
        plan.after(BAR_DELAY_MS, bar, Action::SetWidth(percent));
        if let Some(kg) = co2 {
            plan.now(co2_caption, Action::SetText(format::kg(kg)));
        }
    }
}

fn plan_compensation(plan: &mut RenderPlan, compensation: &Compensation, equivalency: &Equivalency) {
    plan.now(
        ids::TREES_NEEDED,
        Action::CountUp(CountUp::new(0.0, compensation.trees_display, STAT_MS)),
    )
    .now(
        ids::VEGAN_DAYS,
        Action::CountUp(CountUp::new(0.0, compensation.days_vegan, STAT_MS)),
    )
    .now(
        ids::CAR_KM,
        Action::CountUp(CountUp::new(0.0, equivalency.car_km, STAT_MS)),
    )
    .after(
        TREES_DELAY_MS,
        ids::TREES_COMPENSATION,
        Action::SetText(format!("{}", compensation.trees_display)),
    )
    .after(
        VEGAN_DELAY_MS,
        ids::VEGAN_COMPENSATION,
        Action::SetText(rounded(compensation.days_vegan)),
    )
    .after(
        RECYCLE_DELAY_MS,
        ids::RECYCLE_COMPENSATION,
        Action::SetText(format!("{}", recycled_equivalent_kg(compensation.trees_display))),
    );

    if let Some(trees) = compensation.trees_per_year {
        plan.now(ids::TREES_PER_YEAR, Action::SetText(format!("{}", trees)));
    }
    if let Some(credits) = compensation.rec_credits {
        plan.now(ids::REC_CREDITS, Action::SetText(format!("{}", credits)));
    }
    if let Some(message) = &compensation.message {
        plan.now(ids::COMPENSATION_MESSAGE, Action::SetText(message.clone()));
    }
    if let Some(charges) = equivalency.smartphone_charges {
        plan.now(ids::SMARTPHONE_CHARGES, Action::SetText(group_thousands(charges.trunc())));
    }
    if let Some(loads) = equivalency.washing_loads {
        plan.now(ids::WASHING_LOADS, Action::SetText(format!("{}", loads)));
    }
}

/// Render a transferred result into the current page.
pub fn render(result: &PredictionResult, surface: &DomSurface) {
    // Unhides the container and writes the captions before the chart is built.
    let applied = plan::perform(plan(result), surface);
    info!("Rendered prediction of {} kg CO2e ({} updates)", result.co2_kg, applied);

    if let Err(e) = chart::render_breakdown(surface, &result.breakdown) {
        warn!("Breakdown chart not drawn: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementHandle;
    use crate::model::sample_body;
    use crate::testing::FakeSurface;

    const ALL_IDS: [&str; 27] = [
        ids::EMPTY_STATE,
        ids::RESULTS_CONTAINER,
        ids::CO2_VALUE,
        ids::EQUIVALENCY_TEXT,
        ids::TOTAL_EMISSIONS,
        ids::CONFIDENCE_RANGE,
        ids::MATERIAL_PERCENT,
        ids::MFG_PERCENT,
        ids::TRANSPORT_PERCENT,
        ids::MATERIAL_BAR,
        ids::MFG_BAR,
        ids::TRANSPORT_BAR,
        ids::MATERIAL_CO2,
        ids::MFG_CO2,
        ids::TRANSPORT_CO2,
        ids::TREES_NEEDED,
        ids::VEGAN_DAYS,
        ids::CAR_KM,
        ids::TREES_COMPENSATION,
        ids::VEGAN_COMPENSATION,
        ids::RECYCLE_COMPENSATION,
        ids::COMPENSATION_MESSAGE,
        ids::TREES_PER_YEAR,
        ids::REC_CREDITS,
        ids::SMARTPHONE_CHARGES,
        ids::WASHING_LOADS,
        ids::BREAKDOWN_CHART,
    ];

    fn sample() -> PredictionResult {
        serde_json::from_value(sample_body()).unwrap()
    }

    fn results_page() -> FakeSurface {
        let surface = FakeSurface::with_ids(&ALL_IDS);
        surface.get(ids::RESULTS_CONTAINER).add_class(HIDDEN_CLASS);
        surface
    }

    fn text(surface: &FakeSurface, id: &str) -> Option<String> {
        surface.get(id).text()
    }

    #[test]
    fn test_recycle_derivation() {
        assert_eq!(recycled_equivalent_kg(4.0), 100.0);
        assert_eq!(recycled_equivalent_kg(1.0), 25.0);
        assert_eq!(recycled_equivalent_kg(3.0), 75.0);
    }

    #[test]
    fn test_full_render_fills_every_target() {
        let surface = results_page();
        plan::settle(plan(&sample()), &surface);

        assert!(surface.get(ids::EMPTY_STATE).classes().contains(&"hidden".to_string()));
        assert!(surface.get(ids::RESULTS_CONTAINER).classes().is_empty());
        assert_eq!(text(&surface, ids::CO2_VALUE).as_deref(), Some("12.35 kg"));
        assert_eq!(
            text(&surface, ids::EQUIVALENCY_TEXT).as_deref(),
            Some("≈ Driving a car for 49.4 km")
        );
        assert_eq!(text(&surface, ids::TOTAL_EMISSIONS).as_deref(), Some("12.35 kg CO₂e"));
        assert_eq!(
            text(&surface, ids::CONFIDENCE_RANGE).as_deref(),
            Some("11.36 – 13.34 kg CO₂e")
        );

        assert_eq!(text(&surface, ids::MATERIAL_PERCENT).as_deref(), Some("62.4%"));
        assert_eq!(text(&surface, ids::MFG_PERCENT).as_deref(), Some("30.1%"));
        assert_eq!(text(&surface, ids::TRANSPORT_PERCENT).as_deref(), Some("7.5%"));
        assert_eq!(surface.get(ids::MATERIAL_BAR).style("width").as_deref(), Some("62.4%"));
        assert_eq!(surface.get(ids::MFG_BAR).style("width").as_deref(), Some("30.1%"));
        assert_eq!(surface.get(ids::TRANSPORT_BAR).style("width").as_deref(), Some("7.5%"));
        assert_eq!(text(&surface, ids::MATERIAL_CO2).as_deref(), Some("2.75 kg"));

        assert_eq!(text(&surface, ids::TREES_NEEDED).as_deref(), Some("4"));
        assert_eq!(text(&surface, ids::VEGAN_DAYS).as_deref(), Some("4.90"));
        assert_eq!(text(&surface, ids::CAR_KM).as_deref(), Some("49.40"));
        assert_eq!(text(&surface, ids::TREES_COMPENSATION).as_deref(), Some("4"));
        assert_eq!(text(&surface, ids::VEGAN_COMPENSATION).as_deref(), Some("5"));
        assert_eq!(text(&surface, ids::RECYCLE_COMPENSATION).as_deref(), Some("100"));
        assert_eq!(
            text(&surface, ids::COMPENSATION_MESSAGE).as_deref(),
            Some("Plant 4 trees to offset this footprint")
        );
        assert_eq!(text(&surface, ids::TREES_PER_YEAR).as_deref(), Some("0.62"));
        assert_eq!(text(&surface, ids::REC_CREDITS).as_deref(), Some("0.012"));
        assert_eq!(text(&surface, ids::SMARTPHONE_CHARGES).as_deref(), Some("1,543"));
        assert_eq!(text(&surface, ids::WASHING_LOADS).as_deref(), Some("20.6"));
    }

    #[test]
    fn test_missing_target_does_not_affect_other_fields() {
        let ids_without_trees: Vec<&str> = ALL_IDS
            .iter()
            .copied()
            .filter(|id| *id != ids::TREES_NEEDED)
            .collect();
        let surface = FakeSurface::with_ids(&ids_without_trees);

        let applied = plan::settle(plan(&sample()), &surface);

        assert_eq!(applied, plan(&sample()).steps().len() - 1);
        assert_eq!(text(&surface, ids::VEGAN_DAYS).as_deref(), Some("4.90"));
        assert_eq!(text(&surface, ids::CAR_KM).as_deref(), Some("49.40"));
        assert_eq!(text(&surface, ids::TREES_COMPENSATION).as_deref(), Some("4"));
        assert_eq!(text(&surface, ids::CO2_VALUE).as_deref(), Some("12.35 kg"));
    }

    #[test]
    fn test_container_shown_and_captions_written_before_chart() {
        let surface = results_page();

        let deferred = plan::apply_immediate_for_test(plan(&sample()), &surface);

        assert!(!surface.get(ids::RESULTS_CONTAINER).has_class(HIDDEN_CLASS));
        assert!(surface.get(ids::EMPTY_STATE).has_class(HIDDEN_CLASS));
        assert_eq!(text(&surface, ids::MATERIAL_PERCENT).as_deref(), Some("62.4%"));
        assert_eq!(text(&surface, ids::MFG_PERCENT).as_deref(), Some("30.1%"));
        assert_eq!(text(&surface, ids::TRANSPORT_PERCENT).as_deref(), Some("7.5%"));
        assert_eq!(
            text(&surface, ids::EQUIVALENCY_TEXT).as_deref(),
            Some("≈ Driving a car for 49.4 km")
        );
        assert!(deferred.iter().all(|step| step.delay_ms > 0
            || matches!(step.action, Action::CountUp(_))));
        assert!(deferred.iter().any(|step| step.target == ids::CO2_VALUE));
    }

    #[test]
    fn test_bare_page_renders_nothing_without_panicking() {
        let surface = FakeSurface::default();
        assert_eq!(plan::settle(plan(&sample()), &surface), 0);
    }

    #[test]
    fn test_staggered_delays() {
        let plan = plan(&sample());
        let delay = |id| plan.step_for(id).map(|s| s.delay_ms);

        assert_eq!(delay(ids::MATERIAL_PERCENT), Some(0));
        assert_eq!(delay(ids::MATERIAL_BAR), Some(BAR_DELAY_MS));
        assert_eq!(delay(ids::TOTAL_EMISSIONS), Some(500));
        assert_eq!(delay(ids::TREES_COMPENSATION), Some(800));
        assert_eq!(delay(ids::VEGAN_COMPENSATION), Some(1000));
        assert_eq!(delay(ids::RECYCLE_COMPENSATION), Some(1200));
    }

    #[test]
    fn test_animation_durations() {
        let plan = plan(&sample());
        match &plan.step_for(ids::CO2_VALUE).unwrap().action {
            Action::CountUp(anim) => {
                assert_eq!(anim.duration_ms, 2000);
                assert_eq!(anim.suffix, " kg");
                assert_eq!(anim.start, 0.0);
            }
            other => panic!("unexpected action {:?}", other),
        }
        match &plan.step_for(ids::CAR_KM).unwrap().action {
            Action::CountUp(anim) => {
                assert_eq!(anim.duration_ms, 1500);
                assert_eq!(anim.end, 49.4);
                assert_eq!(anim.suffix, "");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_optional_captions_are_not_planned_when_absent() {
        let mut result = sample();
        result.confidence_interval = None;
        result.compensation.message = None;
        result.equivalency.smartphone_charges = None;
        result.compensation.trees_per_year = None;
        result.compensation.rec_credits = None;
        let plan = plan(&result);
        assert!(plan.step_for(ids::CONFIDENCE_RANGE).is_none());
        assert!(plan.step_for(ids::COMPENSATION_MESSAGE).is_none());
        assert!(plan.step_for(ids::SMARTPHONE_CHARGES).is_none());
        assert!(plan.step_for(ids::TREES_PER_YEAR).is_none());
        assert!(plan.step_for(ids::REC_CREDITS).is_none());
    }
}
