use serde_json::{Map, Value};

/// Recursively drops `null`, `""`, `[]` and `{}` from `value`.
///
/// Children are cleaned before their parent is tested, so a container whose
/// entries all prune away is itself removed. Numbers and booleans always
/// survive, `0` and `false` included. The root is cleaned but never removed.
pub fn prune_empty(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(prune_array(items)),
        Value::Object(entries) => Value::Object(prune_object(entries)),
        scalar => scalar,
    }
}

pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn prune_array(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .filter(|item| !is_blank_scalar(item))
        .map(prune_empty)
        .filter(|item| !is_empty(item))
        .collect()
}

fn prune_object(entries: Map<String, Value>) -> Map<String, Value> {
    let mut cleaned = Map::with_capacity(entries.len());
    for (key, value) in entries {
        let value = prune_empty(value);
        if !is_empty(&value) {
            cleaned.insert(key, value);
        }
    }
    cleaned
}

fn is_blank_scalar(value: &Value) -> bool {
    matches!(value, Value::Null) || matches!(value, Value::String(text) if text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn removes_null_and_empty_leaves() {
        let cleaned = prune_empty(json!({"a": null, "b": "", "c": 1, "d": "x"}));
        assert_eq!(cleaned, json!({"c": 1, "d": "x"}));
    }

    #[test]
    fn keeps_zero_and_false() {
        let cleaned = prune_empty(json!({"zero": 0, "no": false, "gone": null}));
        assert_eq!(cleaned, json!({"zero": 0, "no": false}));
    }

    #[test]
    fn removes_containers_that_become_empty() {
        let cleaned = prune_empty(json!({
            "section": {"inner": {"x": null}, "list": [null, ""]},
            "kept": {"y": 2}
        }));
        assert_eq!(cleaned, json!({"kept": {"y": 2}}));
    }

    #[test]
    fn drops_empty_containers_inside_arrays() {
        let cleaned = prune_empty(json!({"list": [[null], {}, {"a": ""}, "v", 0]}));
        assert_eq!(cleaned, json!({"list": ["v", 0]}));
    }

    #[test]
    fn whitespace_strings_are_not_empty() {
        let cleaned = prune_empty(json!({"space": " "}));
        assert_eq!(cleaned, json!({"space": " "}));
    }

    #[test]
    fn preserves_surviving_key_order() {
        let cleaned = prune_empty(json!({"z": 1, "drop": null, "a": 2, "m": 3}));
        let keys = cleaned
            .as_object()
            .expect("object")
            .keys()
            .cloned()
            .collect::<Vec<String>>();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn root_is_never_removed() {
        assert_eq!(prune_empty(json!({"a": null})), json!({}));
        assert_eq!(prune_empty(json!(null)), json!(null));
    }

    #[test]
    fn pruning_is_idempotent() {
        let input = json!({
            "a": {"b": [1, null, {"c": ""}, {"d": [[], 4]}]},
            "e": "",
            "f": {"g": false}
        });
        let once = prune_empty(input);
        let twice = prune_empty(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn output_has_no_empty_nodes() {
        fn assert_no_empty(value: &Value) {
            assert!(!is_empty(value), "empty node survived: {value}");
            match value {
                Value::Array(items) => items.iter().for_each(assert_no_empty),
                Value::Object(entries) => entries.values().for_each(assert_no_empty),
                _ => {}
            }
        }

        let cleaned = prune_empty(json!({
            "a": [null, "", [], {}, [[""]], {"x": {"y": null}}, 7],
            "b": {"c": {"d": {}}},
            "e": true
        }));
        assert_eq!(cleaned, json!({"a": [7], "e": true}));
        assert_no_empty(&cleaned);
    }
}
