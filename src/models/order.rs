// src/models/order.rs
use crate::filters::FilterField;
use crate::menu::MenuAction;
use crate::resource::ResourceConfig;
use crate::sort::SortDirection;
use crate::utils::compare::RankTable;

pub fn status_rank() -> RankTable {
    RankTable::ordered(["pending", "preparing", "out_for_delivery", "delivered", "cancelled"])
}

pub fn resource() -> ResourceConfig {
    ResourceConfig::new("orders", "order")
        .menu(None, "shopping-bag", 30)
        .columns(&["id", "customer_name", "kitchen_name", "dish_name", "total", "created_at", "status"])
        .searchable(&["customer_name", "phone", "kitchen_name", "dish_name"])
        .filter(FilterField::exact("status"))
        .filter(FilterField::substring("kitchen_id"))
        .filter(FilterField::date_range("created_at"))
        .filter(FilterField::number_range("total"))
        .sortable("id")
        .numeric("total")
        .sortable("created_at")
        .ranked("status", status_rank())
        .default_sort("created_at", SortDirection::Desc)
        .actions(&[MenuAction::View, MenuAction::Edit])
}
