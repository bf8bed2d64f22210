// riwayat/src/menu.rs

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::utils::rbac::{filter_gated, Gated, PermissionSet, Requirement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub path: String,
    pub children: Option<Vec<MenuItem>>,
    pub icon: Option<String>,
    pub order: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<Requirement>,
}

impl Gated for MenuItem {
    fn requirement(&self) -> Option<&Requirement> {
        self.permission.as_ref()
    }
}

impl MenuItem {
    pub fn page(title: &str, path: &str, icon: &str, order: usize, permission: Option<Requirement>) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
            children: None,
            icon: Some(icon.to_string()),
            order: Some(order),
            permission,
        }
    }
}

/// Sidebar entries that are not list resources.
pub static STATIC_MENUS: Lazy<Vec<MenuItem>> = Lazy::new(|| {
    vec![
        MenuItem::page("Dashboard", "/dashboard", "home", 0, None),
        MenuItem::page(
            "Feedback",
            "/feedback",
            "message-circle",
            40,
            Some(Requirement::any(["view_feedback", "moderate_feedback"])),
        ),
        MenuItem::page(
            "Roles & Permissions",
            "/roles",
            "shield",
            90,
            Some(Requirement::any(["manage_roles", "manage_permissions"])),
        ),
    ]
});

/// Menu entries the session may see. Groups are gated themselves and
/// disappear once none of their children survive.
pub fn visible_menus(menus: &[MenuItem], permissions: &PermissionSet) -> Vec<MenuItem> {
    filter_gated(menus, permissions)
        .into_iter()
        .filter_map(|mut item| match item.children.take() {
            Some(children) => {
                let children = visible_menus(&children, permissions);
                if children.is_empty() {
                    None
                } else {
                    item.children = Some(children);
                    Some(item)
                }
            }
            None => Some(item),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    List,
    View,
    Create,
    Edit,
    Delete,
    Approve,
    Reject,
    Suspend,
}

impl MenuAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAction::List => "list",
            MenuAction::View => "view",
            MenuAction::Create => "create",
            MenuAction::Edit => "edit",
            MenuAction::Delete => "delete",
            MenuAction::Approve => "approve",
            MenuAction::Reject => "reject",
            MenuAction::Suspend => "suspend",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::List => "List",
            MenuAction::View => "View",
            MenuAction::Create => "Add New",
            MenuAction::Edit => "Edit",
            MenuAction::Delete => "Delete",
            MenuAction::Approve => "Approve",
            MenuAction::Reject => "Reject",
            MenuAction::Suspend => "Suspend",
        }
    }

    /// Grant that unlocks this action, e.g. `edit_kitchen`; listing needs
    /// `view_kitchens`.
    pub fn permission_name(&self, singular: &str, plural: &str) -> String {
        match self {
            MenuAction::List => format!("view_{}", plural),
            other => format!("{}_{}", other.as_str(), singular),
        }
    }

    pub fn to_path(&self, base_path: &str) -> String {
        match self {
            MenuAction::List => base_path.to_string(),
            MenuAction::Create => format!("{}/create", base_path),
            MenuAction::View => format!("{}/{{id}}", base_path),
            MenuAction::Edit => format!("{}/{{id}}/edit", base_path),
            MenuAction::Delete => base_path.to_string(),
            MenuAction::Approve => format!("{}/{{id}}/approve", base_path),
            MenuAction::Reject => format!("{}/{{id}}/reject", base_path),
            MenuAction::Suspend => format!("{}/{{id}}/suspend", base_path),
        }
    }
}

/// A button rendered on a list row or page header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowAction {
    pub action: MenuAction,
    pub label: String,
    pub path: String,
    pub permission: Requirement,
}

impl Gated for RowAction {
    fn requirement(&self) -> Option<&Requirement> {
        Some(&self.permission)
    }
}
