//! Endpoint handlers, one module per resource.

pub mod health;
pub mod page;
pub mod records;
pub mod rules;
pub mod summary;
pub mod symptoms;
