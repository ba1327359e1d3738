//! [`Storage`]-related implementations.

#[cfg(feature = "fs")]
pub mod json_file;
pub mod memory;

use std::io;

use derive_more::{Display, Error as StdError};
use serde::{de::DeserializeOwned, Serialize};

#[cfg(doc)]
use common::operations::{Delete, Put, Select};

#[cfg(feature = "fs")]
pub use self::json_file::JsonFile;
pub use self::memory::Memory;

/// Key-value storage operation.
///
/// Backends implement [`Select`], [`Put`] and [`Delete`] of every [`Record`].
pub use common::Handler as Storage;

/// Typed record kept in a [`Storage`] under a fixed key.
pub trait Record: Copy {
    /// Key the [`Record::Value`] is kept under.
    const KEY: &'static str;

    /// Value of this [`Record`].
    type Value: Serialize + DeserializeOwned;
}

pub mod record {
    //! [`Record`]s of the storefront.

    use crate::domain::{Credential, Listing, Session};

    use super::Record;

    /// The single registered [`Credential`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct RegisteredUser;

    impl Record for RegisteredUser {
        const KEY: &'static str = "registeredUser";
        type Value = Credential;
    }

    /// [`Session`] of the currently signed in user.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct CurrentUser;

    impl Record for CurrentUser {
        const KEY: &'static str = "currentUser";
        type Value = Session;
    }

    /// [`Listing`]s posted by the user, newest first.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct UserAds;

    impl Record for UserAds {
        const KEY: &'static str = "userAds";
        type Value = Vec<Listing>;
    }
}

/// [`Storage`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Failed to access the underlying medium.
    #[display("failed to access `{key}` record: {source}")]
    Io {
        /// Key of the accessed [`Record`].
        #[error(not(source))]
        key: &'static str,

        /// Underlying error.
        source: io::Error,
    },

    /// Stored value cannot be decoded or encoded.
    #[display("malformed `{key}` record: {source}")]
    Malformed {
        /// Key of the malformed [`Record`].
        #[error(not(source))]
        key: &'static str,

        /// Underlying error.
        source: serde_json::Error,
    },
}

impl Error {
    /// Indicates whether this [`Error`] is caused by a malformed stored value.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Decodes the raw stored value of the `R`ecord.
///
/// # Errors
///
/// With an [`Error::Malformed`] if the `raw` value is not a valid
/// [`Record::Value`].
pub(crate) fn decode<R: Record>(raw: &str) -> Result<R::Value, Error> {
    serde_json::from_str(raw).map_err(|source| Error::Malformed {
        key: R::KEY,
        source,
    })
}

/// Encodes the `value` of the `R`ecord for storing.
///
/// # Errors
///
/// With an [`Error::Malformed`] if the `value` cannot be represented as JSON.
pub(crate) fn encode<R: Record>(value: &R::Value) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|source| Error::Malformed {
        key: R::KEY,
        source,
    })
}
