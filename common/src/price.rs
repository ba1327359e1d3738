//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Non-negative price of a listing.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative() || amount.is_zero())
            .then(|| Self(amount.normalize()))
    }

    /// Returns a [`fmt::Display`]able of this [`Price`] in the provided
    /// [`Currency`].
    #[must_use]
    pub fn in_currency(self, currency: Currency) -> impl fmt::Display {
        InCurrency {
            price: self,
            currency,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(amount) = self;
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(integer) => write!(f, "{integer}"),
            None => write!(f, "{amount}"),
        }
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

impl TryFrom<Decimal> for Price {
    type Error = &'static str;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("negative amount")
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

define_kind! {
    #[doc = "Currency a [`Price`] is displayed in."]
    enum Currency {
        #[doc = "Pakistani Rupee."]
        Pkr = 1,

        #[doc = "US Dollar."]
        Usd = 2,

        #[doc = "Euro."]
        Eur = 3,
    }
}

/// [`Price`] displayed with its [`Currency`] code, like `PKR 50`.
struct InCurrency {
    /// Displayed [`Price`].
    price: Price,

    /// [`Currency`] of the [`Price`].
    currency: Currency,
}

impl fmt::Display for InCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.price)
    }
}
