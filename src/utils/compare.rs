// src/utils/compare.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Custom total order for a field's values, e.g. kitchen status
/// `active < pending < suspended`. Lower ranks sort first; values missing
/// from the table sort after every ranked value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTable {
    ranks: HashMap<String, u32>,
}

impl RankTable {
    /// Rank values in the order given, starting at 1.
    pub fn ordered<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        let ranks = values
            .into_iter()
            .zip(1u32..)
            .map(|(value, rank)| (value.into().to_lowercase(), rank))
            .collect();
        Self { ranks }
    }

    pub fn with_rank(mut self, value: impl Into<String>, rank: u32) -> Self {
        self.ranks.insert(value.into().to_lowercase(), rank);
        self
    }

    pub fn rank_of(&self, value: &Value) -> u32 {
        super::fields::as_text(value)
            .and_then(|text| self.ranks.get(&text.to_lowercase()).copied())
            .unwrap_or(u32::MAX)
    }

    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        self.rank_of(a).cmp(&self.rank_of(b))
    }
}

// Mixed-type comparisons fall back to a fixed kind order.
fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

/// Natural order for field values: numbers numerically, strings without
/// regard to case, `false < true`. Equal-looking values compare `Equal` so a
/// stable sort keeps their input order.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strings_ignore_case() {
        assert_eq!(compare_values(&json!("apple"), &json!("Banana")), Ordering::Less);
        assert_eq!(compare_values(&json!("Zaika"), &json!("zaika")), Ordering::Equal);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(compare_values(&json!(9), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!(2.5), &json!(2)), Ordering::Greater);
    }

    #[test]
    fn test_rank_table_order() {
        let status = RankTable::ordered(["active", "pending", "suspended"]);
        assert_eq!(status.compare(&json!("active"), &json!("suspended")), Ordering::Less);
        assert_eq!(status.compare(&json!("Pending"), &json!("pending")), Ordering::Equal);
        assert_eq!(status.rank_of(&json!("archived")), u32::MAX);
        assert_eq!(status.with_rank("archived", 0).rank_of(&json!("archived")), 0);
    }
}
