//! Output rewriting for accepted filter documents.
//!
//! Rewriting runs only after validation accepts a document, and only when
//! some registered field declares a rewrite rule. It recurses through
//! `$and`/`$or`/`$not`, applies each field's rule at the level where the
//! condition appears, and copies unruled conditions through unchanged.

mod path;

pub use path::set_nested_value;

use crate::schema::{FilterSchema, Rewrite, RewriteContext};
use crate::validate::Operator;
use serde_json::{Map, Value};

/// Rewrite one validated document level, recursing into combinators.
pub(crate) fn rewrite_document(
    schema: &FilterSchema,
    doc: &Map<String, Value>,
) -> Map<String, Value> {
    let mut out = Map::new();

    for (key, entry) in doc {
        match key.as_str() {
            "$and" | "$or" => {
                // Validation guarantees an array of documents
                if let Some(branches) = entry.as_array() {
                    let rewritten = branches
                        .iter()
                        .map(|branch| match branch {
                            Value::Object(inner) => {
                                Value::Object(rewrite_document(schema, inner))
                            },
                            other => other.clone(),
                        })
                        .collect();
                    out.insert(key.clone(), Value::Array(rewritten));
                }
            },
            "$not" => {
                if let Value::Object(inner) = entry {
                    out.insert(key.clone(), Value::Object(rewrite_document(schema, inner)));
                }
            },
            _ => match schema.compiled_field(key).and_then(|f| f.def.rewrite()) {
                Some(Rewrite::DottedPath(destination)) => {
                    // The condition value moves to the destination
                    // un-decomposed, operator object and all
                    set_nested_value(&mut out, destination, entry.clone());
                },
                Some(Rewrite::Callback(callback)) => {
                    for (operator, value) in operator_pairs(entry) {
                        let context = RewriteContext::new(key, operator, &value);
                        let partial = callback.as_ref()(&context);
                        for (out_key, out_value) in partial {
                            out.insert(out_key, out_value);
                        }
                    }
                },
                None => {
                    out.insert(key.clone(), entry.clone());
                },
            },
        }
    }

    out
}

/// Decompose a validated condition into `(operator, value)` pairs for a
/// callback rule.
///
/// A bare literal (or `null`) is one implicit-equality pair carrying the
/// literal itself. An operator object yields one pair per entry, each
/// carrying a single-entry object under the canonical `$`-prefixed symbol
/// so the operator survives the rewrite. An empty operator object yields no
/// pairs.
fn operator_pairs(condition: &Value) -> Vec<(Operator, Value)> {
    match condition {
        Value::Object(operators) => operators
            .iter()
            .filter_map(|(symbol, operand)| {
                // Validation only admits known symbols here
                let op = Operator::parse(symbol)?;
                let mut single = Map::new();
                single.insert(op.as_str().to_string(), operand.clone());
                Some((op, Value::Object(single)))
            })
            .collect(),
        literal => vec![(Operator::Eq, literal.clone())],
    }
}
