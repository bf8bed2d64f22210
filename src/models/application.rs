// src/models/application.rs
use crate::filters::FilterField;
use crate::menu::MenuAction;
use crate::resource::ResourceConfig;
use crate::sort::SortDirection;
use crate::utils::compare::RankTable;

/// Kitchen onboarding applications awaiting review.
pub fn resource() -> ResourceConfig {
    ResourceConfig::new("applications", "application")
        .base_path("/onboarding/applications")
        .menu(Some("Partners"), "clipboard-check", 12)
        .columns(&["id", "kitchen_name", "owner", "city", "submitted_at", "status"])
        .searchable(&["kitchen_name", "owner", "email"])
        .filter(FilterField::exact("status"))
        .filter(FilterField::exact("city"))
        .filter(FilterField::date_range("submitted_at"))
        .sortable("kitchen_name")
        .sortable("submitted_at")
        .ranked("status", RankTable::ordered(["pending", "under_review", "approved", "rejected"]))
        .default_sort("submitted_at", SortDirection::Desc)
        .actions(&[MenuAction::View, MenuAction::Approve, MenuAction::Reject])
}
