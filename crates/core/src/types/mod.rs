//! Core types for the Electron storefront.
//!
//! This module provides the collection registry, identifiers, the product
//! filter translator, the pagination resolver and mutation acknowledgements.

pub mod ack;
pub mod collection;
pub mod document;
pub mod filter;
pub mod id;
pub mod page;

pub use ack::{CountResponse, DeleteAck, InsertAck, UpdateAck};
pub use collection::{Collection, Operation, UnknownCollection};
pub use document::{DocumentError, bson_to_json, document_from_json, document_to_json};
pub use filter::{ProductFilter, ProductQuery, contains_ignore_case};
pub use id::{DocumentId, ID_FIELD, IdError};
pub use page::{DEFAULT_PAGE_SIZE, MAX_WINDOW, PageRequest, Pagination};
