//! [`Query`] collection related to the current [`Session`].

#[cfg(doc)]
use crate::{domain::Session, Query};
use crate::infra::storage::record;

use super::StorageQuery;

/// Queries the current [`Session`], if any.
pub type Current = StorageQuery<record::CurrentUser>;
