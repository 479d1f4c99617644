use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A numeric form input: a JSON number, the raw text a widget holds, or
/// anything else, which never parses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Raw form state, one field per widget.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldBag {
    #[serde(deserialize_with = "or_default")]
    pub student_name: String,
    pub student_age: Option<NumericInput>,
    #[serde(deserialize_with = "or_default")]
    pub year_group_custom: String,
    #[serde(deserialize_with = "or_default")]
    pub year_group_select: String,

    pub max_budget: Option<NumericInput>,
    pub budget_buffer_percent: Option<NumericInput>,
    pub budget_buffer_aed: Option<NumericInput>,
    #[serde(deserialize_with = "string_items")]
    pub curriculum: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub strict_curriculum: bool,
    #[serde(deserialize_with = "or_default")]
    pub min_rating: String,
    pub commute_max: Option<NumericInput>,
    pub commute_speed: Option<NumericInput>,
    pub home_lat: Option<NumericInput>,
    pub home_lon: Option<NumericInput>,
    #[serde(deserialize_with = "or_default")]
    pub location_map: String,

    #[serde(deserialize_with = "or_default")]
    pub must_arabic: bool,
    #[serde(deserialize_with = "or_default")]
    pub must_bus: bool,
    #[serde(deserialize_with = "or_default")]
    pub must_mixed: bool,
    #[serde(deserialize_with = "or_default")]
    pub must_dubai: bool,

    #[serde(deserialize_with = "or_default")]
    pub weights: PriorityWeights,
    #[serde(deserialize_with = "or_default")]
    pub strict_fees: bool,
    #[serde(deserialize_with = "or_default")]
    pub strict_distance: bool,

    pub ensure_budget: Option<NumericInput>,
    pub ensure_stretch: Option<NumericInput>,
    pub ensure_closest: Option<NumericInput>,
    pub ensure_arabic: Option<NumericInput>,

    pub max_curriculum: Option<NumericInput>,
    pub max_location: Option<NumericInput>,
    pub max_fee: Option<NumericInput>,
    pub max_rating: Option<NumericInput>,
}

/// Slider values for the eleven ranked priorities.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub overall_quality: Option<NumericInput>,
    pub fees: Option<NumericInput>,
    pub distance: Option<NumericInput>,
    pub wellbeing: Option<NumericInput>,
    pub arabic: Option<NumericInput>,
    pub math: Option<NumericInput>,
    #[serde(rename = "inclusion_SEND", alias = "inclusion")]
    pub inclusion_send: Option<NumericInput>,
    pub leadership: Option<NumericInput>,
    pub curriculum_fit: Option<NumericInput>,
    pub recency: Option<NumericInput>,
    pub confidence: Option<NumericInput>,
}

impl PriorityWeights {
    /// Priority keys paired with their inputs, in profile order.
    pub fn entries(&self) -> [(&'static str, Option<&NumericInput>); 11] {
        [
            ("overall_quality", self.overall_quality.as_ref()),
            ("fees", self.fees.as_ref()),
            ("distance", self.distance.as_ref()),
            ("wellbeing", self.wellbeing.as_ref()),
            ("arabic", self.arabic.as_ref()),
            ("math", self.math.as_ref()),
            ("inclusion_SEND", self.inclusion_send.as_ref()),
            ("leadership", self.leadership.as_ref()),
            ("curriculum_fit", self.curriculum_fit.as_ref()),
            ("recency", self.recency.as_ref()),
            ("confidence", self.confidence.as_ref()),
        ]
    }
}

/// Wrong-typed or `null` values fall back to the field's default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the string entries of a list; anything else reads as an empty list.
fn string_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(ToOwned::to_owned))
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}
