// src/models/kitchen.rs
use crate::filters::FilterField;
use crate::menu::MenuAction;
use crate::resource::ResourceConfig;
use crate::sort::SortDirection;
use crate::utils::compare::RankTable;

pub fn status_rank() -> RankTable {
    RankTable::ordered(["active", "pending", "suspended"])
}

/// Partner kitchens. The ID filter matches partial IDs since admins type
/// fragments of them.
pub fn resource() -> ResourceConfig {
    ResourceConfig::new("kitchens", "kitchen")
        .menu(Some("Partners"), "chef-hat", 10)
        .columns(&["id", "name", "owner", "city", "cuisine", "rating", "status"])
        .searchable(&["name", "owner"])
        .filter(FilterField::substring("id"))
        .filter(FilterField::exact("status"))
        .filter(FilterField::exact("city"))
        .filter(FilterField::exact("cuisine"))
        .sortable("id")
        .sortable("name")
        .numeric("rating")
        .ranked("status", status_rank())
        .default_sort("name", SortDirection::Asc)
        .actions(&[
            MenuAction::View,
            MenuAction::Edit,
            MenuAction::Suspend,
            MenuAction::Delete,
        ])
}
