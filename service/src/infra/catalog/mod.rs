//! [`Catalog`]-related implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(doc)]
use common::operations::{By, Select};

#[cfg(doc)]
use crate::domain::Listing;

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote product catalog operation.
///
/// Backends implement [`Select`]ing a [`Vec`] of [`Listing`]s [`By`] a
/// [`Page`].
pub use common::Handler as Catalog;

/// Page of a [`Catalog`] to fetch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Page {
    /// Maximum number of [`Listing`]s on this [`Page`].
    pub limit: u16,

    /// Number of [`Listing`]s to skip before this [`Page`].
    pub skip: u32,
}

impl Page {
    /// Creates the first [`Page`] with the provided `limit`.
    #[must_use]
    pub const fn first(limit: u16) -> Self {
        Self { limit, skip: 0 }
    }
}

/// [`Catalog`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request to the [`Catalog`] failed.
    #[cfg(feature = "http")]
    #[display("request failed: {_0}")]
    Network(reqwest::Error),

    /// [`Catalog`] responded with a non-success status.
    #[display("responded with `{_0}` status")]
    #[from(ignore)]
    Status(#[error(not(source))] u16),

    /// [`Catalog`] response cannot be decoded.
    #[display("malformed response: {_0}")]
    MalformedResponse(serde_json::Error),

    /// [`Catalog`] URL cannot be built.
    #[display("invalid base URL")]
    InvalidUrl,
}
