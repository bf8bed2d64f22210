pub mod downloads;
pub mod fixture_helper;
