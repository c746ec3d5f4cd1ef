//! Query evaluation.
//!
//! Expressions are compiled and run by the `jmespath` crate. Every compile or
//! search error is folded into [`Outcome::Failure`]: while the user is typing,
//! most expressions are incomplete and that is not worth reporting.
//!
//! The engine keeps objects in sorted maps, so a search result loses the key
//! order of the document. [`KeyOrder`] remembers the key order of every object
//! in the document and puts result objects back into it.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};
use tracing::trace;

/// Result of one evaluation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The expression evaluated; the value may be `null`.
    Success(JsonValue),
    /// The expression is not currently evaluable.
    Failure,
}

/// Something that can evaluate expression text against a document.
pub trait QueryEngine {
    fn evaluate(&self, expression: &str, document: &JsonValue) -> Outcome;
}

/// JMESPath evaluation with document key order restored on the results.
#[derive(Debug, Default)]
pub struct JmesPathEngine {
    order: KeyOrder,
}

impl JmesPathEngine {
    /// Create an engine that restores key order from `document`.
    pub fn for_document(document: &JsonValue) -> Self {
        Self {
            order: KeyOrder::from_document(document),
        }
    }
}

impl QueryEngine for JmesPathEngine {
    fn evaluate(&self, expression: &str, document: &JsonValue) -> Outcome {
        let compiled = match jmespath::compile(expression) {
            Ok(compiled) => compiled,
            Err(err) => {
                trace!(%err, "expression does not compile");
                return Outcome::Failure;
            }
        };

        let found = match compiled.search(document) {
            Ok(found) => found,
            Err(err) => {
                trace!(%err, "search failed");
                return Outcome::Failure;
            }
        };

        match serde_json::to_value(&*found) {
            Ok(value) => Outcome::Success(self.order.restore(value)),
            Err(err) => {
                trace!(%err, "result is not representable as JSON");
                Outcome::Failure
            }
        }
    }
}

/// Key order of the objects in a document, indexed by their key set.
///
/// When two objects share a key set but not an order, the first one found in
/// a depth-first walk wins. A result object can therefore come out in the
/// order of an earlier object rather than its own: `[1]` on
/// `[{"b":1,"a":2},{"a":3,"b":4}]` renders `b` before `a`.
#[derive(Debug, Default)]
pub struct KeyOrder {
    by_key_set: HashMap<Vec<String>, Vec<String>>,
}

impl KeyOrder {
    pub fn from_document(document: &JsonValue) -> Self {
        let mut order = Self::default();
        order.collect(document);
        order
    }

    fn collect(&mut self, value: &JsonValue) {
        match value {
            JsonValue::Object(map) => {
                let keys: Vec<String> = map.keys().cloned().collect();
                let mut sorted = keys.clone();
                sorted.sort();
                self.by_key_set.entry(sorted).or_insert(keys);
                for child in map.values() {
                    self.collect(child);
                }
            }
            JsonValue::Array(items) => {
                for item in items {
                    self.collect(item);
                }
            }
            _ => {}
        }
    }

    /// Reorder every object in `value` whose key set appears in the document.
    pub fn restore(&self, value: JsonValue) -> JsonValue {
        match value {
            JsonValue::Object(mut map) => {
                let mut sorted: Vec<String> = map.keys().cloned().collect();
                sorted.sort();
                let order = self.by_key_set.get(&sorted).unwrap_or(&sorted);

                let mut restored = Map::with_capacity(map.len());
                for key in order {
                    if let Some(child) = map.remove(key) {
                        restored.insert(key.clone(), self.restore(child));
                    }
                }
                JsonValue::Object(restored)
            }
            JsonValue::Array(items) => {
                JsonValue::Array(items.into_iter().map(|item| self.restore(item)).collect())
            }
            other => other,
        }
    }
}
