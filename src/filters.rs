use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::sort::SortDirection;
use crate::utils::fields::{as_number, as_text, lookup};

/// Value the admin picked for one filter control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Exact(String),
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<String>,
    },
}

impl FilterValue {
    /// Unselected controls (blank, or the "all" option) impose nothing.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Exact(value) => {
                let value = value.trim();
                !value.is_empty() && !value.eq_ignore_ascii_case("all")
            }
            FilterValue::Range { from, to } => {
                let set = |bound: &Option<String>| bound.as_deref().is_some_and(|b| !b.trim().is_empty());
                set(from) || set(to)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Equality after normalizing numbers and strings.
    Exact,
    /// Case-insensitive containment; lets admins type partial IDs.
    Substring,
    /// Inclusive calendar-date range.
    DateRange,
    /// Inclusive numeric range.
    NumberRange,
}

/// A filter control a list page declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    pub key: String,
    pub kind: FilterKind,
}

impl FilterField {
    pub fn new(key: impl Into<String>, kind: FilterKind) -> Self {
        Self { key: key.into(), kind }
    }

    pub fn exact(key: impl Into<String>) -> Self {
        Self::new(key, FilterKind::Exact)
    }

    pub fn substring(key: impl Into<String>) -> Self {
        Self::new(key, FilterKind::Substring)
    }

    pub fn date_range(key: impl Into<String>) -> Self {
        Self::new(key, FilterKind::DateRange)
    }

    pub fn number_range(key: impl Into<String>) -> Self {
        Self::new(key, FilterKind::NumberRange)
    }

    pub fn matches(&self, item: &Value, value: &FilterValue) -> bool {
        let field = lookup(item, &self.key);
        match (self.kind, value) {
            (FilterKind::Exact, FilterValue::Exact(expected)) => {
                field.is_some_and(|actual| scalar_equals(actual, expected.trim()))
            }
            (FilterKind::Substring, FilterValue::Exact(fragment)) => field
                .and_then(as_text)
                .is_some_and(|text| text.to_lowercase().contains(&fragment.trim().to_lowercase())),
            (FilterKind::DateRange, FilterValue::Exact(day)) => {
                within(field.and_then(as_date), parse_date(day), parse_date(day))
            }
            (FilterKind::DateRange, FilterValue::Range { from, to }) => within(
                field.and_then(as_date),
                from.as_deref().and_then(parse_date),
                to.as_deref().and_then(parse_date),
            ),
            (FilterKind::NumberRange, FilterValue::Exact(n)) => {
                let n = n.trim().parse::<f64>().ok();
                within(field.and_then(as_number), n, n)
            }
            (FilterKind::NumberRange, FilterValue::Range { from, to }) => within(
                field.and_then(as_number),
                from.as_deref().and_then(|b| b.trim().parse().ok()),
                to.as_deref().and_then(|b| b.trim().parse().ok()),
            ),
            // A range aimed at a choice control is stale UI state.
            (FilterKind::Exact | FilterKind::Substring, FilterValue::Range { .. }) => true,
        }
    }
}

fn scalar_equals(actual: &Value, expected: &str) -> bool {
    if let (Value::Number(n), Ok(wanted)) = (actual, expected.parse::<f64>()) {
        return n.as_f64() == Some(wanted);
    }
    as_text(actual).is_some_and(|text| text == expected)
}

// Bounds that failed to parse are dropped; with no usable bound the filter
// is ignored rather than hiding every row.
fn within<T: PartialOrd>(value: Option<T>, from: Option<T>, to: Option<T>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    from.map_or(true, |from| value >= from) && to.map_or(true, |to| value <= to)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok().map(|dt| dt.date()))
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok().map(|dt| dt.date()))
}

fn as_date(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_date)
}

/// Search, filter, sort and paging state of a list page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filters: BTreeMap<String, FilterValue>,
    #[serde(default)]
    pub sort_key: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), FilterValue::Exact(value.into()));
        self
    }

    pub fn range(mut self, key: impl Into<String>, from: Option<&str>, to: Option<&str>) -> Self {
        self.filters.insert(
            key.into(),
            FilterValue::Range {
                from: from.map(str::to_string),
                to: to.map(str::to_string),
            },
        );
        self
    }

    pub fn sort_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.sort_direction = direction;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Encode back into a query string, e.g. to keep paging links
    /// carrying the current filters.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        let mut push = |key: &str, value: &str| {
            params.push(format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)));
        };

        if !self.search.trim().is_empty() {
            push("search", &self.search);
        }
        for (key, value) in &self.filters {
            match value {
                FilterValue::Exact(v) => push(key, v),
                FilterValue::Range { from, to } => {
                    if let Some(from) = from {
                        push(&format!("{}_from", key), from);
                    }
                    if let Some(to) = to {
                        push(&format!("{}_to", key), to);
                    }
                }
            }
        }
        if let Some(sort_key) = &self.sort_key {
            match self.sort_direction {
                SortDirection::Asc => push("sort", sort_key),
                SortDirection::Desc => push("sort", &format!("-{}", sort_key)),
            }
        }
        if let Some(page) = self.page.filter(|p| *p > 1) {
            push("page", &page.to_string());
        }
        if let Some(per_page) = self.per_page {
            push("per_page", &per_page.to_string());
        }

        params.join("&")
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

fn set_bound(filters: &mut BTreeMap<String, FilterValue>, field: &str, lower: bool, value: String) {
    let entry = filters
        .entry(field.to_string())
        .or_insert(FilterValue::Range { from: None, to: None });
    if let FilterValue::Range { from, to } = entry {
        if lower {
            *from = Some(value);
        } else {
            *to = Some(value);
        }
    }
}

/// Build a [`ListQuery`] from a URL query string.
///
/// `search` (or `q`) is the free-text term, `sort=-field` sorts descending,
/// `<field>_from`/`_to` and `<field>_min`/`_max` build ranges, and any other
/// non-empty pair becomes an exact filter. Unparseable paging is dropped.
///
/// Without the page's filter declarations every suffixed key is read as a
/// range bound, so an exact filter named like `deliver_to` comes back as a
/// range on `deliver`. Use [`parse_query_for`] when the fields are known.
pub fn parse_query(query: &str) -> ListQuery {
    parse_with(query, |_, _| true)
}

/// Like [`parse_query`], but a suffixed key only becomes a range bound when
/// its base field is declared as a date or number range and the full key is
/// not itself a declared filter.
pub fn parse_query_for(query: &str, declared_fields: &[FilterField]) -> ListQuery {
    parse_with(query, |key: &str, field: &str| {
        let declared = |name: &str| declared_fields.iter().find(|f| f.key == name);
        declared(key).is_none()
            && declared(field).is_some_and(|f| matches!(f.kind, FilterKind::DateRange | FilterKind::NumberRange))
    })
}

fn parse_with<F>(query: &str, is_range_bound: F) -> ListQuery
where
    F: Fn(&str, &str) -> bool,
{
    let query = query.trim_start_matches('?');
    let params: Vec<(&str, &str)> = querystring::querify(query);

    let mut list_query = ListQuery::default();

    for (key, raw_value) in params {
        let key = decode(key);
        let value = decode(raw_value);
        match key.as_str() {
            "search" | "q" => list_query.search = value,
            "page" => list_query.page = value.parse().ok().filter(|p| *p >= 1),
            "per_page" => list_query.per_page = value.parse().ok().filter(|p| *p >= 1),
            "sort" => {
                let (field, direction) = match value.strip_prefix('-') {
                    Some(field) => (field.to_string(), SortDirection::Desc),
                    None => (value.clone(), SortDirection::Asc),
                };
                if !field.is_empty() {
                    list_query.sort_key = Some(field);
                    list_query.sort_direction = direction;
                }
            }
            "sort_by" => list_query.sort_key = Some(value).filter(|v| !v.is_empty()),
            "order" | "sort_order" => {
                list_query.sort_direction = value.parse().unwrap_or_default();
            }
            _ if value.is_empty() => {}
            _ => {
                let bound = [("_from", true), ("_min", true), ("_to", false), ("_max", false)]
                    .into_iter()
                    .find_map(|(suffix, lower)| key.strip_suffix(suffix).map(|field| (field, lower)));
                match bound {
                    Some((field, lower)) if !field.is_empty() && is_range_bound(key.as_str(), field) => {
                        set_bound(&mut list_query.filters, field, lower, value)
                    }
                    _ => {
                        list_query.filters.insert(key, FilterValue::Exact(value));
                    }
                }
            }
        }
    }

    debug!("Parsed list query: {:?}", list_query);
    list_query
}

/// Keep records where any searchable field contains the term, ignoring case.
pub fn apply_text_search(items: &[Value], term: &str, searchable_fields: &[String]) -> Vec<Value> {
    if term.trim().is_empty() {
        return items.to_vec();
    }
    let needle = term.to_lowercase();

    items
        .iter()
        .filter(|item| {
            searchable_fields.iter().any(|field| {
                lookup(item, field)
                    .and_then(as_text)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

/// Apply every active filter whose key the page declares; undeclared keys
/// are ignored.
pub fn apply_field_filters(
    items: &[Value],
    filters: &BTreeMap<String, FilterValue>,
    declared_fields: &[FilterField],
) -> Vec<Value> {
    for key in filters.keys() {
        if !declared_fields.iter().any(|field| &field.key == key) {
            debug!("Ignoring undeclared filter '{}'", key);
        }
    }

    let active: Vec<(&FilterField, &FilterValue)> = declared_fields
        .iter()
        .filter_map(|field| {
            filters
                .get(&field.key)
                .filter(|value| value.is_active())
                .map(|value| (field, value))
        })
        .collect();

    if active.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| active.iter().all(|(field, value)| field.matches(item, value)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kitchens() -> Vec<Value> {
        vec![
            json!({"id": 101, "name": "Zaika House", "owner": "Ahmed Khan", "status": "active", "city": "Lahore", "rating": 4.5, "joined": "2024-01-15"}),
            json!({"id": 102, "name": "Biryani Bay", "owner": "Sara Ali", "status": "pending", "city": "Karachi", "rating": 3.9, "joined": "2024-03-02"}),
            json!({"id": 2101, "name": "Chai Corner", "owner": "Usman Tariq", "status": "active", "city": "Karachi", "rating": 4.8, "joined": "2024-06-20T10:30:00Z"}),
        ]
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn names(items: &[Value]) -> Vec<&str> {
        items.iter().map(|i| i["name"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_text_search_is_case_insensitive() {
        let people = vec![json!({"name": "Ahmed Khan"}), json!({"name": "Sara Ali"})];
        let found = apply_text_search(&people, "ali", &fields(&["name"]));
        assert_eq!(names(&found), vec!["Sara Ali"]);
    }

    #[test]
    fn test_text_search_any_field() {
        let found = apply_text_search(&kitchens(), "TARIQ", &fields(&["name", "owner"]));
        assert_eq!(names(&found), vec!["Chai Corner"]);
    }

    #[test]
    fn test_blank_search_and_filters_keep_everything() {
        let items = kitchens();
        assert_eq!(apply_text_search(&items, "   ", &fields(&["name"])), items);

        let declared = vec![FilterField::exact("status"), FilterField::exact("city")];
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), FilterValue::Exact(String::new()));
        filters.insert("city".to_string(), FilterValue::Exact("all".to_string()));
        assert_eq!(apply_field_filters(&items, &filters, &declared), items);
        assert_eq!(apply_field_filters(&items, &BTreeMap::new(), &declared), items);
    }

    #[test]
    fn test_exact_filters_combine() {
        let declared = vec![FilterField::exact("status"), FilterField::exact("city")];
        let query = ListQuery::new().filter("status", "active").filter("city", "Karachi");
        let found = apply_field_filters(&kitchens(), &query.filters, &declared);
        assert_eq!(names(&found), vec!["Chai Corner"]);
    }

    #[test]
    fn test_id_filter_matches_partial_ids() {
        let declared = vec![FilterField::substring("id")];
        let query = ListQuery::new().filter("id", "10");
        let found = apply_field_filters(&kitchens(), &query.filters, &declared);
        assert_eq!(names(&found), vec!["Zaika House", "Biryani Bay", "Chai Corner"]);

        let query = ListQuery::new().filter("id", "210");
        let found = apply_field_filters(&kitchens(), &query.filters, &declared);
        assert_eq!(names(&found), vec!["Chai Corner"]);
    }

    #[test]
    fn test_exact_filter_normalizes_numbers() {
        let declared = vec![FilterField::exact("id")];
        let query = ListQuery::new().filter("id", "102");
        let found = apply_field_filters(&kitchens(), &query.filters, &declared);
        assert_eq!(names(&found), vec!["Biryani Bay"]);
    }

    #[test]
    fn test_undeclared_filter_is_ignored() {
        let declared = vec![FilterField::exact("status")];
        let query = ListQuery::new().filter("cuisine", "Sindhi");
        assert_eq!(apply_field_filters(&kitchens(), &query.filters, &declared).len(), 3);
    }

    #[test]
    fn test_date_and_number_ranges() {
        let declared = vec![FilterField::date_range("joined"), FilterField::number_range("rating")];

        let query = ListQuery::new().range("joined", Some("2024-03-01"), Some("2024-12-31"));
        let found = apply_field_filters(&kitchens(), &query.filters, &declared);
        assert_eq!(names(&found), vec!["Biryani Bay", "Chai Corner"]);

        let query = ListQuery::new().range("rating", Some("4"), None);
        let found = apply_field_filters(&kitchens(), &query.filters, &declared);
        assert_eq!(names(&found), vec!["Zaika House", "Chai Corner"]);

        let query = ListQuery::new().range("rating", Some("not a number"), None);
        assert_eq!(apply_field_filters(&kitchens(), &query.filters, &declared).len(), 3);
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("?search=sara+ali&status=active&city=&created_at_from=2024-01-01&total_max=500&sort=-name&page=2&per_page=20");
        assert_eq!(query.search, "sara ali");
        assert_eq!(query.filters.get("status"), Some(&FilterValue::Exact("active".to_string())));
        assert!(!query.filters.contains_key("city"));
        assert_eq!(
            query.filters.get("created_at"),
            Some(&FilterValue::Range { from: Some("2024-01-01".to_string()), to: None })
        );
        assert_eq!(
            query.filters.get("total"),
            Some(&FilterValue::Range { from: None, to: Some("500".to_string()) })
        );
        assert_eq!(query.sort_key.as_deref(), Some("name"));
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(query.page, Some(2));
        assert_eq!(query.per_page, Some(20));
    }

    #[test]
    fn test_parse_query_tolerates_garbage_paging() {
        let query = parse_query("page=abc&per_page=0&sort_by=status&order=DESC");
        assert_eq!(query.page, None);
        assert_eq!(query.per_page, None);
        assert_eq!(query.sort_key.as_deref(), Some("status"));
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_query_string_round_trip() {
        let query = ListQuery::new()
            .search("chai & co")
            .filter("status", "active")
            .range("joined", Some("2024-01-01"), None)
            .sort_by("rating", SortDirection::Desc)
            .page(3);
        let encoded = query.to_query_string();
        assert_eq!(
            encoded,
            "search=chai%20%26%20co&joined_from=2024-01-01&status=active&sort=-rating&page=3"
        );
        assert_eq!(parse_query(&encoded), query);
    }

    #[test]
    fn test_declared_fields_decide_range_suffixes() {
        let declared = vec![
            FilterField::exact("deliver_to"),
            FilterField::date_range("joined"),
            FilterField::number_range("rating"),
        ];

        let query = ListQuery::new()
            .filter("deliver_to", "Lahore")
            .range("joined", Some("2024-01-01"), Some("2024-06-30"))
            .range("rating", None, Some("4.5"));
        assert_eq!(parse_query_for(&query.to_query_string(), &declared), query);

        // a suffix on an undeclared or non-range base stays an exact filter
        let query = parse_query_for("city_to=Multan&rating_min=4", &declared);
        assert_eq!(query.filters.get("city_to"), Some(&FilterValue::Exact("Multan".to_string())));
        assert_eq!(
            query.filters.get("rating"),
            Some(&FilterValue::Range { from: Some("4".to_string()), to: None })
        );

        assert!(parse_query("deliver_to=Lahore").filters.contains_key("deliver"));
    }
}
