//! Domain definitions.

pub mod listing;
pub mod user;

pub use self::{
    listing::Listing,
    user::{Credential, Session},
};
