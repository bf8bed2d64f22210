// src/models/customer.rs
use crate::filters::FilterField;
use crate::menu::MenuAction;
use crate::resource::ResourceConfig;
use crate::utils::compare::RankTable;

pub fn resource() -> ResourceConfig {
    ResourceConfig::new("customers", "customer")
        .menu(Some("Partners"), "users", 11)
        .columns(&["id", "name", "email", "phone", "city", "joined_at", "status"])
        .searchable(&["name", "email", "phone"])
        .filter(FilterField::exact("status"))
        .filter(FilterField::exact("city"))
        .filter(FilterField::date_range("joined_at"))
        .sortable("name")
        .sortable("joined_at")
        .ranked("status", RankTable::ordered(["active", "inactive", "blocked"]))
        .actions(&[MenuAction::View, MenuAction::Edit, MenuAction::Suspend])
}
