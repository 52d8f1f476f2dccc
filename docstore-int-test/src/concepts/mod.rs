//! Application-level "concept" modules used as test scaffolding.

pub mod sessions;
pub mod users;
