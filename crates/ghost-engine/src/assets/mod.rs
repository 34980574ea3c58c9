pub mod join;
pub mod manifest;
pub mod registry;
