//! Emissions breakdown donut chart, drawn by the page's Chart.js.

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::dom::DomSurface;
use crate::error::{js_error_text, ChartError};
use crate::model::Breakdown;
use crate::results::ids;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(context: &JsValue, config: &JsValue) -> Result<ChartJs, JsValue>;
}

pub const LABELS: [&str; 3] = ["Materials", "Manufacturing", "Transport"];
const SEGMENT_RGB: [(u8, u8, u8); 3] = [(100, 255, 180), (139, 92, 246), (255, 140, 80)];

// -- Chart.js configuration shape --

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
    pub hover_offset: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: &'static str,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub color: &'static str,
    pub font: Font,
    pub padding: u32,
    pub use_point_style: bool,
    pub point_style: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<&'static str>,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<&'static str>,
}

/// Tooltip styling. The `label` callback is attached separately since it is a
/// JavaScript function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub background_color: &'static str,
    pub padding: u32,
    pub title_font: Font,
    pub body_font: Font,
    pub border_color: &'static str,
    pub border_width: u32,
}

fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

pub fn breakdown_config(breakdown: &Breakdown) -> ChartConfig {
    ChartConfig {
        kind: "doughnut",
        data: ChartData {
            labels: LABELS.to_vec(),
            datasets: vec![Dataset {
                data: breakdown.percentages().to_vec(),
                background_color: SEGMENT_RGB.iter().map(|c| rgba(*c, 0.9)).collect(),
                border_color: SEGMENT_RGB.iter().map(|c| rgba(*c, 1.0)).collect(),
                border_width: 3,
                hover_offset: 15,
            }],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: true,
            plugins: Plugins {
                legend: Legend {
                    position: "bottom",
                    labels: LegendLabels {
                        color: "#f5f5f5",
                        font: Font {
                            family: Some("'Inter', sans-serif"),
                            size: 14,
                            weight: Some("500"),
                        },
                        padding: 20,
                        use_point_style: true,
                        point_style: "circle",
                    },
                },
                tooltip: Tooltip {
                    background_color: "rgba(15, 15, 30, 0.95)",
                    padding: 16,
                    title_font: Font {
                        family: None,
                        size: 15,
                        weight: Some("bold"),
                    },
                    body_font: Font {
                        family: None,
                        size: 14,
                        weight: None,
                    },
                    border_color: "rgba(100, 255, 180, 0.3)",
                    border_width: 1,
                },
            },
        },
    }
}

/// Tooltip line for one segment, e.g. `Materials: 62.4%`.
pub fn tooltip_label(label: &str, value: f64) -> String {
    format!("{}: {:.1}%", label, value)
}

fn label_callback() -> JsValue {
    Closure::<dyn Fn(JsValue) -> JsValue>::new(|context: JsValue| {
        let label = Reflect::get(&context, &"label".into())
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let value = Reflect::get(&context, &"parsed".into())
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        JsValue::from_str(&tooltip_label(&label, value))
    })
    .into_js_value()
}

fn to_js(config: &ChartConfig) -> Result<JsValue, ChartError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let value = config
        .serialize(&serializer)
        .map_err(|e| ChartError::Config(e.to_string()))?;

    let tooltip = Reflect::get(&value, &"options".into())
        .and_then(|o| Reflect::get(&o, &"plugins".into()))
        .and_then(|p| Reflect::get(&p, &"tooltip".into()))
        .map_err(|e| ChartError::Config(js_error_text(&e)))?;
    let callbacks = Object::new();
    Reflect::set(&callbacks, &"label".into(), &label_callback())
        .and_then(|_| Reflect::set(&tooltip, &"callbacks".into(), &callbacks))
        .map_err(|e| ChartError::Config(js_error_text(&e)))?;

    Ok(value)
}

/// Draw the breakdown into `#breakdownChart`. Pages without the canvas are a no-op.
pub fn render_breakdown(surface: &DomSurface, breakdown: &Breakdown) -> Result<(), ChartError> {
    let Some(canvas) = surface.canvas(ids::BREAKDOWN_CHART).bound() else {
        tracing::debug!("No #{} canvas; chart skipped", ids::BREAKDOWN_CHART);
        return Ok(());
    };

    let context = canvas
        .get_context("2d")
        .map_err(|e| ChartError::Library(js_error_text(&e)))?
        .ok_or(ChartError::ContextUnavailable)?;

    let config = to_js(&breakdown_config(breakdown))?;
    ChartJs::new(&context, &config)
        .map_err(|e| ChartError::Library(js_error_text(&e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown() -> Breakdown {
        Breakdown {
            materials_percent: 62.4,
            manufacturing_percent: 30.1,
            transport_percent: 7.5,
            material_co2: None,
            manufacturing_co2: None,
            transport_co2: None,
        }
    }

    #[test]
    fn test_config_shape_matches_chartjs() {
        let json = serde_json::to_value(breakdown_config(&breakdown())).unwrap();

        assert_eq!(json["type"], "doughnut");
        assert_eq!(
            json["data"]["labels"],
            serde_json::json!(["Materials", "Manufacturing", "Transport"])
        );
        let dataset = &json["data"]["datasets"][0];
        assert_eq!(dataset["data"], serde_json::json!([62.4, 30.1, 7.5]));
        assert_eq!(dataset["backgroundColor"][0], "rgba(100, 255, 180, 0.9)");
        assert_eq!(dataset["borderColor"][1], "rgba(139, 92, 246, 1)");
        assert_eq!(dataset["borderWidth"], 3);
        assert_eq!(dataset["hoverOffset"], 15);
        assert_eq!(json["options"]["maintainAspectRatio"], true);
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "bottom");
        assert_eq!(
            json["options"]["plugins"]["legend"]["labels"]["usePointStyle"],
            true
        );
    }

    #[test]
    fn test_unset_font_fields_are_omitted() {
        let json = serde_json::to_value(breakdown_config(&breakdown())).unwrap();
        let body_font = json["options"]["plugins"]["tooltip"]["bodyFont"]
            .as_object()
            .unwrap();
        assert_eq!(body_font.len(), 1);
        assert_eq!(body_font["size"], 14);
    }

    #[test]
    fn test_tooltip_label_one_decimal() {
        assert_eq!(tooltip_label("Materials", 62.4), "Materials: 62.4%");
        assert_eq!(tooltip_label("Transport", 7.0), "Transport: 7.0%");
        assert_eq!(tooltip_label("Manufacturing", 30.06), "Manufacturing: 30.1%");
    }
}
