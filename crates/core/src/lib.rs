//! Domain types and pure logic for the Guard Tower monitoring backend.
//!
//! This crate has no internal dependencies and no I/O: everything here is a
//! plain function of its inputs so the storage layer, the view mirror, and
//! any future CLI tooling can share it.
//!
//! - `types` - identifier/timestamp aliases and the small closed enums
//! - `model` - entity structs and create/update DTOs
//! - `filter` - the structured log filter and its evaluation
//! - `retention` - retention periods and cutoff math
//! - `score` - the 0-100 endpoint security score
//! - `report` - security report assembly over a time window

pub mod filter;
pub mod model;
pub mod report;
pub mod retention;
pub mod score;
pub mod types;
