use serde_json::{Map, Value};

/// Field → expected value filter used by queries.
///
/// Matching is exact, never a substring or pattern match:
/// - every filter key must exist in the record with a matching value;
/// - nested objects match partially (the record object may carry extra keys);
/// - arrays match when every filter element matches some record element;
/// - numbers compare by value, so `1` matches `1.0`;
/// - everything else compares with plain equality.
///
/// The empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Map<String, Value>,
}

impl Filter {
    /// Filter that matches every record.
    pub fn any() -> Self {
        Filter::default()
    }

    /// Add an expected field value.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Shorthand for `Filter::any().field("level", level)`.
    pub fn level(level: &str) -> Self {
        Filter::any().field("level", level)
    }

    /// Build a filter from a JSON object; `None` for any other JSON value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Filter { fields }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `record` (a serialized log record) satisfies the filter.
    pub fn matches(&self, record: &Value) -> bool {
        let Value::Object(record) = record else {
            return self.fields.is_empty();
        };
        object_matches(record, &self.fields)
    }
}

fn object_matches(target: &Map<String, Value>, pattern: &Map<String, Value>) -> bool {
    pattern.iter().all(|(key, expected)| {
        target
            .get(key)
            .is_some_and(|actual| value_matches(actual, expected))
    })
}

fn value_matches(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => object_matches(actual, expected),
        (Value::Array(actual), Value::Array(expected)) => expected
            .iter()
            .all(|e| actual.iter().any(|a| value_matches(a, e))),
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        _ => actual == expected,
    }
}
