// riwayat/src/registry.rs
use crate::error::RiwayatError;
use crate::menu::{visible_menus, MenuItem, STATIC_MENUS};
use crate::models::builtin_resources;
use crate::resource::ResourceConfig;
use crate::utils::rbac::PermissionSet;
use lazy_static::lazy_static;
use log::debug;
use std::collections::BTreeMap;

lazy_static! {
    static ref RESOURCE_REGISTRY: Vec<ResourceConfig> = builtin_resources();
}

pub fn all_resources() -> &'static [ResourceConfig] {
    &RESOURCE_REGISTRY
}

pub fn find_resource(name: &str) -> Result<&'static ResourceConfig, RiwayatError> {
    RESOURCE_REGISTRY
        .iter()
        .find(|resource| resource.name().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| RiwayatError::UnknownResource(name.to_string()))
}

/// Get count of registered resources
pub fn resource_count() -> usize {
    RESOURCE_REGISTRY.len()
}

/// Collect the sidebar: static pages plus every resource, with resources
/// sharing a `menu_group` nested under one parent entry.
pub fn get_registered_menus() -> Vec<MenuItem> {
    let mut grouped_menus: BTreeMap<String, Vec<MenuItem>> = BTreeMap::new();
    let mut final_menus: Vec<MenuItem> = STATIC_MENUS.clone();

    for resource in RESOURCE_REGISTRY.iter() {
        let menu_item = resource.menu_item();
        match resource.menu_group() {
            Some(group_name) => grouped_menus
                .entry(group_name.to_string())
                .or_default()
                .push(menu_item),
            None => final_menus.push(menu_item),
        }
    }

    for (group_name, mut children) in grouped_menus {
        children.sort_by_key(|child| child.order);
        // A group sorts with its first child.
        let order = children.first().and_then(|child| child.order);
        final_menus.push(MenuItem {
            title: group_name,
            path: String::new(),
            children: Some(children),
            icon: Some("folder".to_string()),
            order,
            permission: None,
        });
    }

    final_menus.sort_by(|a, b| match (a.order, b.order) {
        (Some(a_order), Some(b_order)) => a_order.cmp(&b_order),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    });

    final_menus
}

/// Sidebar as the given session sees it.
pub fn menus_for(permissions: &PermissionSet) -> Vec<MenuItem> {
    let menus = visible_menus(&get_registered_menus(), permissions);
    debug!("{} top-level menu entries visible", menus.len());
    menus
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(menus: &[MenuItem]) -> Vec<&str> {
        menus.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_find_resource() {
        assert_eq!(find_resource("Kitchens").unwrap().name(), "kitchens");
        assert!(matches!(
            find_resource("riders"),
            Err(RiwayatError::UnknownResource(name)) if name == "riders"
        ));
        assert_eq!(resource_count(), all_resources().len());
    }

    #[test]
    fn test_registered_menus_grouped_and_ordered() {
        let menus = get_registered_menus();
        assert_eq!(
            titles(&menus),
            vec!["Dashboard", "Partners", "Catalogue", "Orders", "Feedback", "Roles & Permissions"]
        );
        let partners = menus[1].children.as_ref().unwrap();
        assert_eq!(titles(partners), vec!["Kitchens", "Customers", "Applications"]);
        assert_eq!(partners[2].path, "/onboarding/applications");
    }

    #[test]
    fn test_menus_for_session() {
        let permissions: PermissionSet = ["view_customers", "view_orders"].into_iter().collect();
        let menus = menus_for(&permissions);
        assert_eq!(titles(&menus), vec!["Dashboard", "Partners", "Orders"]);
        assert_eq!(titles(menus[1].children.as_ref().unwrap()), vec!["Customers"]);

        assert_eq!(titles(&menus_for(&PermissionSet::new())), vec!["Dashboard"]);
    }
}
