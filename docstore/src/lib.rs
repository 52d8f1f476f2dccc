//! # docstore - Embedded Document Store
//!
//! docstore is a lightweight embedded document store for Rust. It wraps a
//! pluggable backing store with lifecycle-tracked collections: every stored
//! document carries a store-assigned id, a creation timestamp, and a
//! modification timestamp, and callers can never forge any of the three.
//!
//! ## Key Features
//!
//! - **Embedded**: no separate server process required
//! - **Lifecycle tracking**: `_id`, `_created`, `_modified` are owned by the
//!   store; creation stamps both timestamps, partial updates refresh
//!   `_modified`
//! - **Filters**: fluent query filters with logical combinators
//! - **Typed repositories**: schema-parameterized access on top of raw
//!   document collections
//! - **Pluggable storage**: backing stores implement a narrow
//!   insert/find/replace/update/delete/count boundary; an in-memory reference
//!   backend is included
//! - **Clean API**: PIMPL pattern provides stable, encapsulated interfaces
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstore::doc;
//! use docstore::doc_store::DocStore;
//! use docstore::filter::field;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Open an in-memory database
//! let db = DocStore::builder().open()?;
//!
//! // Construct a collection wrapper (one per name)
//! let users = db.collection("users")?;
//!
//! // Create a document; the store assigns id and timestamps
//! let id = users.create_one(doc! { name: "alice" })?;
//!
//! // Query it back
//! let alice = users.read_one(field("name").eq("alice"), &Default::default())?;
//!
//! db.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Document collections, documents, options, and results
//! - [`common`] - Common types, constants, and utilities
//! - [`doc_store`] - The database facade
//! - [`doc_store_builder`] - Database builder for initialization
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters
//! - [`repository`] - Type-safe object repositories
//! - [`store`] - Storage backend abstractions and the in-memory backend

use crate::collection::snowflake::SnowflakeIdGenerator;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod doc_store;
pub mod doc_store_builder;
pub mod errors;
pub mod filter;
pub mod repository;
pub mod store;

pub(crate) static ID_GENERATOR: LazyLock<SnowflakeIdGenerator> =
    LazyLock::new(SnowflakeIdGenerator::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_generator_initializes() {
        let id = ID_GENERATOR.get_id();
        assert!(id > 0);
    }
}
