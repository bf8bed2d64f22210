// riwayat/src/lib.rs

pub mod configs;
pub mod error;
pub mod filters;
pub mod helpers;
pub mod menu;
pub mod models;
pub mod pagination;
pub mod registry;
pub mod resource;
pub mod sort;
pub mod utils;

// Export configuration
pub use configs::initializer::{get_riwayat_config, setup_riwayat_logging, RiwayatConfig};

pub use error::RiwayatError;

// Permission evaluation
pub use utils::{
    auth::AuthState,
    rbac::{filter_by_permission, filter_gated, has_permission, Gated, Mode, PermissionSet, Requirement},
    structs::Session,
};

// List pipeline
pub use filters::{apply_field_filters, apply_text_search, parse_query, parse_query_for, FilterField, FilterKind, FilterValue, ListQuery};
pub use pagination::{advance_page, compute_page_window, page_window, PageDirection, PageToken, PageWindow};
pub use resource::{ListOptions, ListView, ResourceConfig};
pub use sort::{sort_items, SortDirection, SortField};

pub use registry::{find_resource, get_registered_menus, menus_for};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub mod prelude {
    pub use crate::{
        has_permission,
        filter_by_permission,
        find_resource,
        parse_query,
        ListOptions,
        ListQuery,
        PermissionSet,
        Requirement,
        ResourceConfig,
        RiwayatConfig,
        SortDirection,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "riwayat-admin");
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let permissions: PermissionSet = ["view_kitchens"].into_iter().collect();
        let kitchens = find_resource("kitchens").unwrap();
        assert!(has_permission(&permissions, Some(&kitchens.list_requirement())));

        let query = parse_query("sort=-name");
        assert_eq!(query.sort_direction, SortDirection::Desc);
        let _options = ListOptions::from(&RiwayatConfig::default());
    }
}
