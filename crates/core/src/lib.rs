//! Electron Core - Shared types library.
//!
//! This crate provides the types shared by the Electron components:
//! - `storefront` - REST backend over the storefront's document collections
//! - `cli` - Command-line tools for seeding and inspecting the store
//!
//! # Architecture
//!
//! The core crate contains only types and pure translation functions - no
//! I/O, no database connections, no HTTP. Store predicates are built as
//! plain `bson` documents so any store implementation can consume them.
//!
//! # Modules
//!
//! - [`types`] - Collection registry, document ids, filters, pagination and
//!   acknowledgements

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
