//! Live adapters for real external interactions.

pub mod entity_data;
pub mod filesystem;
