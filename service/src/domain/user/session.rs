//! [`Session`] definitions.

use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::user::Credential;
use crate::domain::user::{Email, Name};

/// Session of the currently signed in user.
///
/// Exists only while a [`Credential`] holder is signed in.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    /// [`Email`] of the signed in user.
    pub email: Email,

    /// [`Name`] of the signed in user.
    pub name: Name,
}
