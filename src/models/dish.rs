// src/models/dish.rs
use crate::filters::FilterField;
use crate::menu::MenuAction;
use crate::resource::ResourceConfig;
use crate::utils::compare::RankTable;

pub fn resource() -> ResourceConfig {
    ResourceConfig::new("dishes", "dish")
        .menu(Some("Catalogue"), "utensils", 20)
        .columns(&["id", "name", "kitchen_name", "category", "price", "status"])
        .searchable(&["name", "kitchen_name"])
        .filter(FilterField::exact("status"))
        .filter(FilterField::exact("category"))
        .filter(FilterField::substring("kitchen_id"))
        .filter(FilterField::number_range("price"))
        .sortable("name")
        .numeric("price")
        .ranked("status", RankTable::ordered(["approved", "pending", "rejected"]))
        .actions(&[
            MenuAction::View,
            MenuAction::Approve,
            MenuAction::Reject,
            MenuAction::Delete,
        ])
}
