//! Storefront user definitions.

pub mod session;

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Debug, Display};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};

pub use self::session::Session;

/// Registered credential of the single storefront account.
///
/// Only one [`Credential`] is retained at a time: registering again replaces
/// the previous one.
///
/// The [`Password`] is kept as is, because the storefront only simulates
/// authentication. This shape must never be reused for real accounts.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Credential {
    /// [`Email`] the account was registered with.
    pub email: Email,

    /// [`Name`] derived from the [`Email`].
    pub name: Name,

    /// [`Password`] of the account.
    pub password: Password,
}

impl Credential {
    /// Creates a new [`Credential`], deriving its [`Name`] from the `email`.
    #[must_use]
    pub fn new(email: Email, password: Password) -> Self {
        Self {
            name: Name::from_email(&email),
            email,
            password,
        }
    }

    /// Checks whether the provided `email` and `password` exactly match this
    /// [`Credential`].
    #[must_use]
    pub fn matches(&self, email: &Email, password: &Password) -> bool {
        self.email == *email && self.password == *password
    }

    /// Returns the [`Session`] this [`Credential`] signs in with.
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Email address of a user.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] out of the `address` as entered, if it's valid.
    ///
    /// Surrounding whitespace is not stripped, so it makes the `address`
    /// invalid.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref();
        Self::check(address).then(|| Self(address.to_owned()))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: &str) -> bool {
        /// Regular expression checking [`Email`] format: a non-empty local
        /// part and a non-empty domain, separated by a single `@`.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid regex")
        });

        address.len() <= 320 && REGEX.is_match(address)
    }

    /// Returns the local part of this [`Email`] (before the `@`).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Display name of a user.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Derives a [`Name`] from the local part of the provided [`Email`].
    #[must_use]
    pub fn from_email(email: &Email) -> Self {
        Self(email.local_part().to_owned())
    }
}

/// Password of a user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[debug("Password(*)")]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    ///
    /// Surrounding whitespace is significant and kept as is.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        !password.is_empty() && password.len() <= 128
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
