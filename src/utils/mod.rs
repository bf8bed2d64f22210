pub mod auth;
pub mod compare;
pub mod fields;
pub mod rbac;
pub mod structs;
