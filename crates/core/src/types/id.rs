//! Store-assigned document identifiers.
//!
//! Documents are keyed by the store's native 12-byte object id. Path
//! parameters arrive as strings and must be parsed into a [`DocumentId`]
//! before any store operation is attempted.

use core::fmt;
use core::str::FromStr;

use bson::{Document, doc, oid::ObjectId};

/// Field holding the primary identifier of every document.
pub const ID_FIELD: &str = "_id";

/// Errors that can occur when parsing a [`DocumentId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("document id cannot be empty")]
    Empty,
    /// The input is not a 24 character hexadecimal object id.
    #[error("invalid document id '{0}': expected 24 hexadecimal characters")]
    Malformed(String),
}

/// A type-safe wrapper around the store's object id.
///
/// ## Examples
///
/// ```
/// use electron_core::DocumentId;
///
/// assert!(DocumentId::parse("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
///
/// assert!(DocumentId::parse("").is_err());
/// assert!(DocumentId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a `DocumentId` from its hexadecimal representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not exactly 24
    /// hexadecimal characters.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| IdError::Malformed(s.to_owned()))
    }

    /// Returns the underlying object id.
    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }

    /// Returns the lowercase hexadecimal representation.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Builds the `{ "_id": <id> }` predicate selecting this document.
    #[must_use]
    pub fn filter(&self) -> Document {
        doc! { ID_FIELD: self.0 }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ObjectId> for DocumentId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl From<DocumentId> for ObjectId {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
