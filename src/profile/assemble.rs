use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use crate::model::{FieldBag, NumericInput};

use super::prune::prune_empty;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// Builds the canonical profile for one snapshot of form state.
pub fn assemble_profile(fields: &FieldBag) -> Value {
    let profile = json!({
        "student": student_section(fields),
        "preferences": preferences_section(fields),
        "must_have": {
            "must_offer_arabic": fields.must_arabic,
            "must_have_bus": fields.must_bus,
            "must_be_mixed_or_girls_only": fields.must_mixed,
            "must_be_in_dubai_only": fields.must_dubai,
        },
        "priorities": priorities_section(fields),
        "diversity": diversity_section(fields),
    });

    prune_empty(profile)
}

/// Numeric policy for ordinary fields: unparseable input means "not specified".
pub fn absent_unless_given(input: Option<&NumericInput>) -> Option<f64> {
    match input? {
        NumericInput::Number(value) => Some(*value).filter(|value| value.is_finite()),
        NumericInput::Text(text) => parse_numeric_prefix(text),
        NumericInput::Other(_) => None,
    }
}

/// Numeric policy for diversity quotas: unparseable input means zero.
pub fn zero_unless_given(input: Option<&NumericInput>) -> f64 {
    absent_unless_given(input).unwrap_or(0.0)
}

/// Parses the longest leading decimal literal, ignoring trailing text.
fn parse_numeric_prefix(text: &str) -> Option<f64> {
    let matched = NUMERIC_PREFIX.find(text)?;
    matched
        .as_str()
        .trim_start()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Integral values serialize as JSON integers.
pub fn number_value(value: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn optional_number(value: Option<f64>) -> Value {
    value.map(number_value).unwrap_or(Value::Null)
}

fn optional_text(text: &str) -> Value {
    if text.is_empty() {
        Value::Null
    } else {
        Value::String(text.to_string())
    }
}

fn student_section(fields: &FieldBag) -> Value {
    let custom = fields.year_group_custom.trim();
    let year_group = if custom.is_empty() {
        fields.year_group_select.trim()
    } else {
        custom
    };

    json!({
        "name": optional_text(fields.student_name.trim()),
        "age": optional_number(absent_unless_given(fields.student_age.as_ref())),
        "year_group": optional_text(year_group),
    })
}

fn preferences_section(fields: &FieldBag) -> Value {
    let mut preferences = Map::new();
    let mut put = |key: &str, value: Value| {
        preferences.insert(key.to_string(), value);
    };

    put(
        "max_budget_aed",
        optional_number(absent_unless_given(fields.max_budget.as_ref())),
    );
    put(
        "budget_buffer_percent",
        optional_number(absent_unless_given(fields.budget_buffer_percent.as_ref())),
    );
    put(
        "budget_buffer_aed",
        optional_number(absent_unless_given(fields.budget_buffer_aed.as_ref())),
    );
    put("curriculum_preference", json!(fields.curriculum));
    put("strict_curriculum", Value::Bool(fields.strict_curriculum));
    put("min_overall_rating", optional_text(&fields.min_rating));
    put(
        "commute_max_minutes",
        optional_number(absent_unless_given(fields.commute_max.as_ref())),
    );
    put(
        "commute_speed_kmph",
        optional_number(absent_unless_given(fields.commute_speed.as_ref())),
    );
    put("location_center", location_center(fields));
    put("freshness_important", Value::Bool(true));
    if let Some(map) = location_map(&fields.location_map) {
        put("location_map", map);
    }

    Value::Object(preferences)
}

/// Both coordinates or nothing; zero counts as missing.
fn location_center(fields: &FieldBag) -> Value {
    let lat = absent_unless_given(fields.home_lat.as_ref()).filter(|value| *value != 0.0);
    let lon = absent_unless_given(fields.home_lon.as_ref()).filter(|value| *value != 0.0);

    match (lat, lon) {
        (Some(lat), Some(lon)) => json!({
            "lat": number_value(lat),
            "lon": number_value(lon),
        }),
        _ => Value::Null,
    }
}

fn location_map(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    serde_json::from_str::<Value>(text).ok().filter(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn priorities_section(fields: &FieldBag) -> Value {
    let mut priorities = Map::new();
    for (key, input) in fields.weights.entries() {
        let strict = match key {
            "fees" => fields.strict_fees,
            "distance" => fields.strict_distance,
            _ => false,
        };
        priorities.insert(
            key.to_string(),
            json!({
                "weight": optional_number(absent_unless_given(input)),
                "strict": strict,
            }),
        );
    }
    Value::Object(priorities)
}

fn diversity_section(fields: &FieldBag) -> Value {
    json!({
        "ensure": {
            "budget_friendly": number_value(zero_unless_given(fields.ensure_budget.as_ref())),
            "stretch": number_value(zero_unless_given(fields.ensure_stretch.as_ref())),
            "closest": number_value(zero_unless_given(fields.ensure_closest.as_ref())),
            "arabic_fit": number_value(zero_unless_given(fields.ensure_arabic.as_ref())),
        },
        "max_share": {
            "curriculum": optional_number(absent_unless_given(fields.max_curriculum.as_ref())),
            "location": optional_number(absent_unless_given(fields.max_location.as_ref())),
            "fee_band": optional_number(absent_unless_given(fields.max_fee.as_ref())),
            "rating_band": optional_number(absent_unless_given(fields.max_rating.as_ref())),
        },
    })
}
