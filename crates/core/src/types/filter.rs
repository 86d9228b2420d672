//! Product listing filters.
//!
//! [`ProductQuery`] is the raw query string of `GET /products`. It splits
//! into a [`ProductFilter`], which translates into a store predicate, and a
//! [`PageRequest`] consumed by the pagination resolver.
//!
//! # Translation rules
//!
//! - `arrival`, `brand`, `productType`: exact match
//! - `bestSeller`: `true` only for the literal string `"true"`, `false` for
//!   anything else
//! - `name`: case-insensitive substring match; the input is matched
//!   literally, pattern metacharacters are escaped
//! - absent or empty parameters impose no constraint

use bson::{Document, doc};
use serde::Deserialize;

use super::page::PageRequest;

/// Product document field names.
pub mod fields {
    pub const ARRIVAL: &str = "arrival";
    pub const BEST_SELLER: &str = "bestSeller";
    pub const BRAND: &str = "brand";
    pub const PRODUCT_TYPE: &str = "productType";
    pub const NAME: &str = "name";
}

/// Query parameters accepted by the product listing endpoint.
///
/// Every value is kept as the raw string the client sent; coercion happens
/// in [`ProductQuery::filter`] and [`ProductQuery::page`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub arrival: Option<String>,
    pub best_seller: Option<String>,
    pub brand: Option<String>,
    pub product_type: Option<String>,
    pub name: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

impl ProductQuery {
    /// Extract the filtering part of the query.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            arrival: present(self.arrival.as_deref()),
            best_seller: present(self.best_seller.as_deref()).map(|v| v == "true"),
            brand: present(self.brand.as_deref()),
            product_type: present(self.product_type.as_deref()),
            name: present(self.name.as_deref()),
        }
    }

    /// Extract the pagination part of the query.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.size.as_deref())
    }
}

/// Typed product filter. `None` fields are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub arrival: Option<String>,
    pub best_seller: Option<bool>,
    pub brand: Option<String>,
    pub product_type: Option<String>,
    pub name: Option<String>,
}

impl ProductFilter {
    /// Returns true when no field is constrained.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.arrival.is_none()
            && self.best_seller.is_none()
            && self.brand.is_none()
            && self.product_type.is_none()
            && self.name.is_none()
    }

    /// Translate into a store predicate.
    ///
    /// An empty filter yields an empty document, which matches everything.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(arrival) = &self.arrival {
            filter.insert(fields::ARRIVAL, arrival.as_str());
        }
        if let Some(best_seller) = self.best_seller {
            filter.insert(fields::BEST_SELLER, best_seller);
        }
        if let Some(brand) = &self.brand {
            filter.insert(fields::BRAND, brand.as_str());
        }
        if let Some(product_type) = &self.product_type {
            filter.insert(fields::PRODUCT_TYPE, product_type.as_str());
        }
        if let Some(name) = &self.name {
            filter.insert(fields::NAME, contains_ignore_case(name));
        }

        filter
    }
}

/// Build a case-insensitive, unanchored substring predicate for `needle`.
#[must_use]
pub fn contains_ignore_case(needle: &str) -> Document {
    doc! { "$regex": regex::escape(needle), "$options": "i" }
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}
