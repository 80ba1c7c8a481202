//! Merging an override document into a base document

use super::Document;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Objects present on both sides merge key by key, recursively.
    /// Any other pairing is replaced by the override value.
    #[default]
    Deep,
    /// Every top-level key of the override replaces the base value whole.
    Shallow,
}

/// Merge `overrides` into `base` in place.
///
/// Keys only present in `base` are kept. Arrays are never concatenated.
pub fn merge(base: &mut Document, overrides: Document, strategy: MergeStrategy) {
    for (key, value) in overrides {
        match strategy {
            MergeStrategy::Shallow => {
                base.insert(key, value);
            }
            MergeStrategy::Deep => match value {
                Value::Object(incoming) => match base.get_mut(&key) {
                    Some(Value::Object(existing)) => merge(existing, incoming, strategy),
                    _ => {
                        base.insert(key, Value::Object(incoming));
                    }
                },
                value => {
                    base.insert(key, value);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture is not an object: {other}"),
        }
    }

    #[test]
    fn test_override_wins_and_defaults_survive() {
        let mut base = doc(json!({"name": "app", "debug": false}));
        merge(&mut base, doc(json!({"debug": true, "extra": 1})), MergeStrategy::Deep);
        assert_eq!(Value::Object(base), json!({"name": "app", "debug": true, "extra": 1}));
    }

    #[test]
    fn test_deep_merges_nested_objects() {
        let mut base = doc(json!({
            "http": {"enable": false, "port": 7071, "tls": {"enable": false, "cert": "a.pem"}}
        }));
        let overrides = doc(json!({"http": {"enable": true, "tls": {"enable": true}}}));

        merge(&mut base, overrides, MergeStrategy::Deep);
        assert_eq!(
            Value::Object(base),
            json!({"http": {"enable": true, "port": 7071, "tls": {"enable": true, "cert": "a.pem"}}})
        );
    }

    #[test]
    fn test_shallow_replaces_nested_objects() {
        let mut base = doc(json!({"http": {"enable": false, "port": 7071}}));
        merge(&mut base, doc(json!({"http": {"enable": true}})), MergeStrategy::Shallow);
        assert_eq!(Value::Object(base), json!({"http": {"enable": true}}));
    }

    #[test]
    fn test_arrays_and_type_changes_are_replaced() {
        let mut base = doc(json!({"hosts": ["a", "b"], "static": {"dir": "public"}}));
        merge(&mut base, doc(json!({"hosts": ["c"], "static": "off"})), MergeStrategy::Deep);
        assert_eq!(Value::Object(base), json!({"hosts": ["c"], "static": "off"}));
    }

    #[test]
    fn test_null_override_replaces_value() {
        let mut base = doc(json!({"proxy": {"url": "http://x"}}));
        merge(&mut base, doc(json!({"proxy": null})), MergeStrategy::Deep);
        assert_eq!(Value::Object(base), json!({"proxy": null}));
    }
}
