// src/utils/rbac.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Field consulted by [`filter_by_permission`] when the caller does not name one.
pub const DEFAULT_PERMISSION_FIELD: &str = "permission";

/// Permissions granted to the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet {
    names: HashSet<String>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Sorted names, for stable display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        let mut names: Vec<String> = set.names.into_iter().collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Any,
    All,
}

/// A gate over one permission or a combination of several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRequirement", into = "RawRequirement")]
pub enum Requirement {
    Single(String),
    Combined { names: Vec<String>, mode: Mode },
}

// Wire shape: `"edit_kitchen"`, `["a", "b"]` or `{"names": [...], "mode": "all"}`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Single(String),
    List(Vec<String>),
    Combined {
        names: Vec<String>,
        #[serde(default)]
        mode: Mode,
    },
}

impl From<RawRequirement> for Requirement {
    fn from(raw: RawRequirement) -> Self {
        match raw {
            RawRequirement::Single(name) => Requirement::Single(name),
            RawRequirement::List(names) => Requirement::any(names),
            RawRequirement::Combined { names, mode } => Requirement::Combined { names, mode },
        }
    }
}

impl From<Requirement> for RawRequirement {
    fn from(requirement: Requirement) -> Self {
        match requirement {
            Requirement::Single(name) => RawRequirement::Single(name),
            Requirement::Combined { names, mode: Mode::Any } => RawRequirement::List(names),
            Requirement::Combined { names, mode } => RawRequirement::Combined { names, mode },
        }
    }
}

impl Requirement {
    pub fn single(name: impl Into<String>) -> Self {
        Requirement::Single(name.into())
    }

    pub fn any<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Requirement::Combined {
            names: names.into_iter().map(Into::into).collect(),
            mode: Mode::Any,
        }
    }

    pub fn all<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Requirement::Combined {
            names: names.into_iter().map(Into::into).collect(),
            mode: Mode::All,
        }
    }

    /// An empty requirement restricts nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Requirement::Single(name) => name.is_empty(),
            Requirement::Combined { names, .. } => names.is_empty(),
        }
    }

    /// Read a requirement stored on a record.
    ///
    /// `Ok(None)` means the record is ungated (missing or null field).
    /// An error means the field holds something that is not a requirement.
    pub fn from_value(value: Option<&Value>) -> Result<Option<Self>, serde_json::Error> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Requirement::deserialize(value).map(Some),
        }
    }
}

/// Decide whether `requirement` is satisfied by `permissions`.
///
/// The emptiness of the requirement is checked before the emptiness of the
/// set: an ungated capability is visible even to a session with no grants.
pub fn has_permission(permissions: &PermissionSet, requirement: Option<&Requirement>) -> bool {
    let requirement = match requirement {
        Some(requirement) if !requirement.is_empty() => requirement,
        _ => return true,
    };

    if permissions.is_empty() {
        return false;
    }

    match requirement {
        Requirement::Single(name) => permissions.contains(name),
        Requirement::Combined { names, mode: Mode::All } => {
            names.iter().all(|name| permissions.contains(name))
        }
        Requirement::Combined { names, mode: Mode::Any } => {
            names.iter().any(|name| permissions.contains(name))
        }
    }
}

/// Keep the records whose `field` requirement is satisfied.
///
/// Anything other than a JSON array yields an empty list. A record whose
/// field holds a malformed requirement is dropped.
pub fn filter_by_permission(items: &Value, permissions: &PermissionSet, field: &str) -> Vec<Value> {
    let Some(items) = items.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| match Requirement::from_value(item.get(field)) {
            Ok(requirement) => has_permission(permissions, requirement.as_ref()),
            Err(_) => {
                tracing::debug!("Dropping record with malformed '{}' requirement", field);
                false
            }
        })
        .cloned()
        .collect()
}

/// Typed items that may be gated behind a requirement.
pub trait Gated {
    fn requirement(&self) -> Option<&Requirement>;

    fn is_permitted(&self, permissions: &PermissionSet) -> bool {
        has_permission(permissions, self.requirement())
    }
}

pub fn filter_gated<T: Gated + Clone>(items: &[T], permissions: &PermissionSet) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.is_permitted(permissions))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serde_test::{assert_tokens, Token};

    fn set(names: &[&str]) -> PermissionSet {
        names.iter().copied().collect()
    }

    #[test]
    fn test_empty_set_denies_any_real_requirement() {
        let empty = PermissionSet::new();
        assert!(!has_permission(&empty, Some(&Requirement::single("view_kitchens"))));
        assert!(!has_permission(&empty, Some(&Requirement::any(["a", "b"]))));
        assert!(!has_permission(&empty, Some(&Requirement::all(["a"]))));
    }

    #[test]
    fn test_empty_requirement_always_passes() {
        let empty = PermissionSet::new();
        let some = set(&["view_kitchens"]);
        for permissions in [&empty, &some] {
            assert!(has_permission(permissions, None));
            assert!(has_permission(permissions, Some(&Requirement::single(""))));
            assert!(has_permission(permissions, Some(&Requirement::any(Vec::<String>::new()))));
            assert!(has_permission(permissions, Some(&Requirement::all(Vec::<String>::new()))));
        }
    }

    #[test]
    fn test_single_requirement() {
        let permissions = set(&["edit_kitchen"]);
        assert!(has_permission(&permissions, Some(&Requirement::single("edit_kitchen"))));
        assert!(!has_permission(&permissions, Some(&Requirement::single("delete_kitchen"))));
    }

    #[test]
    fn test_all_mode_needs_every_name() {
        let requirement = Requirement::all(["a", "b"]);
        assert!(has_permission(&set(&["a", "b", "c"]), Some(&requirement)));
        assert!(!has_permission(&set(&["a", "c"]), Some(&requirement)));
        assert!(!has_permission(&set(&["b"]), Some(&requirement)));
    }

    #[test]
    fn test_any_mode_needs_one_name() {
        let requirement = Requirement::any(["a", "b"]);
        assert!(has_permission(&set(&["a"]), Some(&requirement)));
        assert!(has_permission(&set(&["b"]), Some(&requirement)));
        assert!(!has_permission(&set(&["c"]), Some(&requirement)));
    }

    #[test]
    fn test_requirement_from_value_shapes() {
        assert_eq!(Requirement::from_value(None).unwrap(), None);
        assert_eq!(Requirement::from_value(Some(&Value::Null)).unwrap(), None);
        assert_eq!(
            Requirement::from_value(Some(&json!("edit_dish"))).unwrap(),
            Some(Requirement::single("edit_dish"))
        );
        assert_eq!(
            Requirement::from_value(Some(&json!(["a", "b"]))).unwrap(),
            Some(Requirement::any(["a", "b"]))
        );
        assert_eq!(
            Requirement::from_value(Some(&json!({"names": ["a"], "mode": "all"}))).unwrap(),
            Some(Requirement::all(["a"]))
        );
        assert!(Requirement::from_value(Some(&json!(42))).is_err());
    }

    #[test]
    fn test_mode_tokens() {
        assert_tokens(&Mode::Any, &[Token::UnitVariant { name: "Mode", variant: "any" }]);
        assert_tokens(&Mode::All, &[Token::UnitVariant { name: "Mode", variant: "all" }]);
    }

    #[test]
    fn test_filter_by_permission() {
        let items = json!([
            {"label": "Dashboard"},
            {"label": "Kitchens", "permission": "view_kitchens"},
            {"label": "Roles", "permission": ["manage_roles", "view_roles"]},
            {"label": "Broken", "permission": 7},
            {"label": "Orders", "permission": null}
        ]);
        let permissions = set(&["view_roles"]);

        let visible = filter_by_permission(&items, &permissions, DEFAULT_PERMISSION_FIELD);
        let labels: Vec<&str> = visible.iter().map(|i| i["label"].as_str().unwrap()).collect();
        assert_eq!(labels, vec!["Dashboard", "Roles", "Orders"]);
    }

    #[test]
    fn test_filter_by_permission_is_idempotent() {
        let items = json!([
            {"id": 1, "gate": "approve_dish"},
            {"id": 2, "gate": "reject_dish"},
            {"id": 3}
        ]);
        let permissions = set(&["approve_dish"]);

        let once = filter_by_permission(&items, &permissions, "gate");
        let twice = filter_by_permission(&Value::Array(once.clone()), &permissions, "gate");
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_filter_by_permission_non_list_is_empty() {
        let permissions = set(&["a"]);
        assert!(filter_by_permission(&json!({"permission": "a"}), &permissions, "permission").is_empty());
        assert!(filter_by_permission(&Value::Null, &permissions, "permission").is_empty());
    }

    #[test]
    fn test_permission_set_serializes_sorted() {
        let permissions = set(&["b", "a"]);
        assert_eq!(serde_json::to_value(&permissions).unwrap(), json!(["a", "b"]));
        let parsed: PermissionSet = serde_json::from_value(json!(["x", "x", "y"])).unwrap();
        assert_eq!(parsed.len(), 2);
    }
}
