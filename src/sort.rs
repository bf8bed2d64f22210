use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::debug;

use crate::utils::compare::{compare_values, RankTable};
use crate::utils::fields::{as_number, lookup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Clicking the active column header flips its direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// A column a list page allows sorting on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortField {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<RankTable>,
    #[serde(default)]
    pub numeric: bool,
}

impl SortField {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), rank: None, numeric: false }
    }

    pub fn ranked(key: impl Into<String>, rank: RankTable) -> Self {
        Self { key: key.into(), rank: Some(rank), numeric: false }
    }

    /// Amount columns: `"90"` sorts before `"450"`.
    pub fn numeric(key: impl Into<String>) -> Self {
        Self { key: key.into(), rank: None, numeric: true }
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        if let Some(rank) = &self.rank {
            return rank.compare(a, b);
        }
        if self.numeric {
            // values that do not parse keep the natural order
            if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
                return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            }
        }
        compare_values(a, b)
    }
}

fn present<'a>(item: &'a Value, key: &str) -> Option<&'a Value> {
    lookup(item, key).filter(|v| !v.is_null())
}

/// Stable sort on a declared column.
///
/// Records missing the column go last in either direction. An unknown or
/// absent key returns the records in their input order.
pub fn sort_items(
    items: &[Value],
    sort_key: Option<&str>,
    direction: SortDirection,
    sortable_fields: &[SortField],
) -> Vec<Value> {
    let mut sorted = items.to_vec();

    let Some(key) = sort_key.filter(|k| !k.is_empty()) else {
        return sorted;
    };
    let Some(field) = sortable_fields.iter().find(|f| f.key == key) else {
        debug!("Ignoring unknown sort key '{}'", key);
        return sorted;
    };

    sorted.sort_by(|a, b| {
        match (present(a, key), present(b, key)) {
            (Some(x), Some(y)) => {
                let ordering = field.compare(x, y);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted
}
