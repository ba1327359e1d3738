//! [`Command`] definition.

pub mod post_listing;
pub mod refresh_listings;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    post_listing::PostListing, refresh_listings::RefreshListings,
    sign_in::SignIn, sign_out::SignOut, sign_up::SignUp,
};
