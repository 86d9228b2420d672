//! Registry of the storefront's document collections.
//!
//! Every collection is served by the same generic CRUD surface; the registry
//! records the store-side name, the HTTP path and which operations a
//! collection exposes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a name does not match any known collection.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown collection '{0}'")]
pub struct UnknownCollection(pub String);

/// An operation a collection may expose over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /{path}`
    List,
    /// `POST /{path}`
    Create,
    /// `PUT /{path}/{id}`
    Update,
    /// `DELETE /{path}/{id}`
    Delete,
}

const FULL_CRUD: &[Operation] = &[
    Operation::List,
    Operation::Create,
    Operation::Update,
    Operation::Delete,
];
const NO_UPDATE: &[Operation] = &[Operation::List, Operation::Create, Operation::Delete];
const APPEND_ONLY: &[Operation] = &[Operation::List, Operation::Create];

/// A named group of documents of one logical entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Products,
    Users,
    Testimonials,
    BlogPosts,
    FeaturedCategories,
    SpecialOffers,
    NewsLetter,
    FeaturedBrands,
}

impl Collection {
    /// All collections, in routing order.
    pub const ALL: [Self; 8] = [
        Self::Products,
        Self::Users,
        Self::Testimonials,
        Self::BlogPosts,
        Self::FeaturedCategories,
        Self::SpecialOffers,
        Self::NewsLetter,
        Self::FeaturedBrands,
    ];

    /// Name of the collection inside the document store.
    ///
    /// `Products` is capitalised in the production database; the other
    /// collections are camelCase.
    #[must_use]
    pub const fn store_name(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Users => "users",
            Self::Testimonials => "testimonials",
            Self::BlogPosts => "blogPosts",
            Self::FeaturedCategories => "featuredCategories",
            Self::SpecialOffers => "specialOffers",
            Self::NewsLetter => "newsLetter",
            Self::FeaturedBrands => "featuredBrands",
        }
    }

    /// HTTP path the collection is mounted at.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "/products",
            Self::Users => "/users",
            Self::Testimonials => "/testimonials",
            Self::BlogPosts => "/blogPosts",
            Self::FeaturedCategories => "/featuredCategories",
            Self::SpecialOffers => "/specialOffers",
            Self::NewsLetter => "/newsLetter",
            Self::FeaturedBrands => "/featuredBrands",
        }
    }

    /// Operations exposed for this collection.
    #[must_use]
    pub const fn operations(self) -> &'static [Operation] {
        match self {
            Self::Products | Self::FeaturedCategories | Self::SpecialOffers => FULL_CRUD,
            Self::Users | Self::Testimonials | Self::BlogPosts | Self::FeaturedBrands => NO_UPDATE,
            Self::NewsLetter => APPEND_ONLY,
        }
    }

    /// Whether the collection exposes `operation`.
    #[must_use]
    pub fn supports(self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_name())
    }
}

impl FromStr for Collection {
    type Err = UnknownCollection;

    /// Accepts either the store name or the path segment, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|c| {
                c.store_name().eq_ignore_ascii_case(needle)
                    || c.path().trim_start_matches('/').eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownCollection(s.to_owned()))
    }
}
