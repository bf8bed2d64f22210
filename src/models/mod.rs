pub mod application;
pub mod customer;
pub mod dish;
pub mod kitchen;
pub mod order;

use crate::resource::ResourceConfig;

/// List pages the portal ships with, in sidebar order.
pub fn builtin_resources() -> Vec<ResourceConfig> {
    vec![
        kitchen::resource(),
        dish::resource(),
        order::resource(),
        customer::resource(),
        application::resource(),
    ]
}
