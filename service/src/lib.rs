//! Service contains the business logic of the storefront.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod aggregator;
pub mod command;
pub mod domain;
pub mod infra;
pub mod query;

use std::sync::Arc;

#[cfg(doc)]
use infra::{Catalog, Storage};

#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use wiremock as _;

pub use self::{aggregator::Aggregator, command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of remote listings to request from the [`Catalog`].
    pub page_size: u16,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<S, C> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Storage`] of this [`Service`].
    storage: S,

    /// [`Catalog`] of this [`Service`].
    catalog: C,

    /// [`Aggregator`] of the [`Listing`]s.
    ///
    /// [`Listing`]: domain::Listing
    aggregator: Arc<Aggregator>,
}

impl<S, C> Service<S, C> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, storage: S, catalog: C) -> Self {
        Self {
            config,
            storage,
            catalog,
            aggregator: Arc::new(Aggregator::new()),
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns [`Catalog`] of this [`Service`].
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns [`Aggregator`] of this [`Service`].
    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}
