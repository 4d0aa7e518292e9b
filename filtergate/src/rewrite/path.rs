//! Nested-path writer for dotted-path rewrite rules.

use serde_json::{Map, Value};

/// Write `value` into `target` at a `.`-separated path, creating
/// intermediate objects as needed.
///
/// Existing intermediate objects are descended into, so sibling keys are
/// preserved; a non-object value standing where an intermediate object is
/// needed is overwritten. The final segment always overwrites.
///
/// # Example
///
/// ```
/// use filtergate::set_nested_value;
/// use serde_json::{Map, json};
///
/// let mut doc = Map::new();
/// set_nested_value(&mut doc, "author.name", json!("John"));
/// set_nested_value(&mut doc, "author.email", json!("john@example.com"));
/// assert_eq!(
///     serde_json::Value::Object(doc),
///     json!({ "author": { "name": "John", "email": "john@example.com" } })
/// );
/// ```
pub fn set_nested_value(target: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    // split() yields at least one segment, even for ""
    let Some(last) = segments.pop() else { return };

    let mut current = target;
    for segment in segments {
        let slot = current
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else { return };
        current = next;
    }
    current.insert(last.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_value(map: Map<String, Value>) -> Value {
        Value::Object(map)
    }

    #[test]
    fn test_single_segment() {
        let mut doc = Map::new();
        set_nested_value(&mut doc, "name", json!("x"));
        assert_eq!(as_value(doc), json!({ "name": "x" }));
    }

    #[test]
    fn test_creates_intermediate_objects() {
        let mut doc = Map::new();
        set_nested_value(&mut doc, "a.b.c", json!(1));
        assert_eq!(as_value(doc), json!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn test_preserves_siblings() {
        let mut doc = Map::new();
        set_nested_value(&mut doc, "author.name", json!("John"));
        set_nested_value(&mut doc, "author.email", json!("j@x"));
        set_nested_value(&mut doc, "title", json!("t"));
        assert_eq!(
            as_value(doc),
            json!({
                "author": { "name": "John", "email": "j@x" },
                "title": "t"
            })
        );
    }

    #[test]
    fn test_overwrites_non_object_intermediate() {
        let mut doc = Map::new();
        set_nested_value(&mut doc, "a", json!(42));
        set_nested_value(&mut doc, "a.b", json!("deep"));
        assert_eq!(as_value(doc), json!({ "a": { "b": "deep" } }));
    }

    #[test]
    fn test_final_segment_overwrites() {
        let mut doc = Map::new();
        set_nested_value(&mut doc, "a.b", json!(1));
        set_nested_value(&mut doc, "a.b", json!(2));
        assert_eq!(as_value(doc), json!({ "a": { "b": 2 } }));
    }

    #[test]
    fn test_operand_written_undecomposed() {
        let mut doc = Map::new();
        set_nested_value(&mut doc, "author.name", json!({ "$in": ["a", "b"] }));
        assert_eq!(
            as_value(doc),
            json!({ "author": { "name": { "$in": ["a", "b"] } } })
        );
    }
}
