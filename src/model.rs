use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SubmitError;
use crate::format::parse_leading_number;

/// JavaScript truthiness of a JSON value.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `success` flags are read the way the browser reads them, so `1` and `"ok"`
/// count as success everywhere.
fn deserialize_truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Value::deserialize(deserializer).map(|v| truthy(&v))
}

// -- Calculator input --

/// Manufacturing intensity sent with every request. The form does not expose
/// it, so requests always carry `MEDIUM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ManufacturingIntensity {
    Low,
    Medium,
    High,
}

pub const TRANSPORT_MODES: [(&str, &str); 4] = [
    ("AIR", "Air freight"),
    ("SEA", "Sea freight"),
    ("ROAD", "Road"),
    ("RAIL", "Rail"),
];

/// Materials the prediction service knows about; used when the catalog
/// endpoint cannot be reached.
pub const FALLBACK_MATERIALS: [&str; 35] = [
    "Cotton", "Polyester", "Wool", "Leather", "Steel", "Aluminum", "Plastic", "Glass", "Paper",
    "Wood", "Beef", "Lamb", "Pork", "Chicken", "Turkey", "Fish_Farmed", "Fish_Wild", "Shrimp",
    "Milk", "Cheese", "Eggs", "Butter", "Tofu", "Lentils", "Beans", "Nuts", "Rice", "Wheat",
    "Oats", "Corn", "Tomatoes", "Potatoes", "Lettuce", "Apples", "Bananas",
];

/// Raw field values as typed into the calculator form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub product_name: String,
    pub material: String,
    pub weight: String,
    pub transport_mode: String,
    pub distance: String,
}

/// Request body for `POST /api/predict/`. Numbers that did not parse are sent
/// as `null`; the key is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormInput {
    pub product_name: String,
    pub material: String,
    pub weight_kg: Option<f64>,
    pub transport_mode: String,
    pub transport_distance_km: Option<f64>,
    pub manufacturing_intensity: ManufacturingIntensity,
}

impl FormInput {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            product_name: fields.product_name.clone(),
            material: fields.material.clone(),
            weight_kg: parse_leading_number(&fields.weight),
            transport_mode: fields.transport_mode.clone(),
            transport_distance_km: parse_leading_number(&fields.distance),
            manufacturing_intensity: ManufacturingIntensity::Medium,
        }
    }

    /// Material and transport mode must be chosen before anything is sent.
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.material.is_empty() || self.transport_mode.is_empty() {
            return Err(SubmitError::Validation);
        }
        Ok(())
    }
}

// -- Prediction response --

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Equivalency {
    pub display: String,
    pub car_km: f64,
    pub smartphone_charges: Option<f64>,
    pub washing_loads: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Breakdown {
    pub materials_percent: f64,
    pub manufacturing_percent: f64,
    pub transport_percent: f64,
    pub material_co2: Option<f64>,
    pub manufacturing_co2: Option<f64>,
    pub transport_co2: Option<f64>,
}

impl Breakdown {
    pub fn percentages(&self) -> [f64; 3] {
        [
            self.materials_percent,
            self.manufacturing_percent,
            self.transport_percent,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Compensation {
    pub trees_display: f64,
    pub days_vegan: f64,
    pub trees_per_year: Option<f64>,
    pub rec_credits: Option<f64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// A successful estimate as transferred to the results page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub success: bool,
    pub error: Option<String>,
    pub co2_kg: f64,
    pub equivalency: Equivalency,
    pub breakdown: Breakdown,
    pub compensation: Compensation,
    pub confidence_interval: Option<ConfidenceInterval>,
}

impl PredictionResult {
    /// Shape checks serde cannot express. A payload failing these is treated
    /// the same as a missing one.
    pub fn check(&self) -> Result<(), String> {
        if self.co2_kg < 0.0 {
            return Err(format!("negative co2_kg {}", self.co2_kg));
        }
        for value in self.breakdown.percentages() {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("breakdown percentage {} out of range", value));
            }
        }
        if self.compensation.trees_display < 0.0 || self.compensation.days_vegan < 0.0 {
            return Err("negative compensation figure".to_string());
        }
        Ok(())
    }
}

// -- Auxiliary endpoints --

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialsResponse {
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub success: bool,
    #[serde(default)]
    pub materials: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
    #[serde(default)]
    pub feature_names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfoResponse {
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub success: bool,
    pub model_info: Option<ModelInfo>,
}

#[cfg(test)]
pub(crate) fn sample_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "co2_kg": 12.35,
        "breakdown": {
            "materials_percent": 62.4,
            "manufacturing_percent": 30.1,
            "transport_percent": 7.5,
            "material_co2": 2.75,
            "manufacturing_co2": 1.05,
            "transport_co2": 0.38
        },
        "compensation": {
            "trees_per_year": 0.62,
            "trees_display": 4,
            "rec_credits": 0.012,
            "days_vegan": 4.9,
            "message": "Plant 4 trees to offset this footprint"
        },
        "equivalency": {
            "car_km": 49.4,
            "smartphone_charges": 1543,
            "washing_loads": 20.6,
            "display": "Driving a car for 49.4 km"
        },
        "confidence_interval": {"lower": 11.36, "upper": 13.34}
    })
}
