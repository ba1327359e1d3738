//! [`Command`] for posting a new user [`Listing`].

use std::time::Duration;

use common::{
    operations::{Put, Select},
    DateTime, Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{listing, Listing, Session},
    infra::{
        storage::{self, record},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for posting a new user [`Listing`].
///
/// Fields are accepted as entered and trimmed before validation. The posted
/// [`Listing`] is prepended to the stored ones.
#[derive(Clone, Debug)]
pub struct PostListing {
    /// Title of a new [`Listing`].
    pub title: String,

    /// Description of a new [`Listing`].
    pub description: String,

    /// Price of a new [`Listing`].
    pub price: String,

    /// Image URL of a new [`Listing`].
    pub image_url: String,
}

impl<S, C> Command<PostListing> for Service<S, C>
where
    S: Storage<
            Select<record::CurrentUser>,
            Ok = Option<Session>,
            Err = Traced<storage::Error>,
        > + Storage<
            Select<record::UserAds>,
            Ok = Option<Vec<Listing>>,
            Err = Traced<storage::Error>,
        > + Storage<
            Put<record::UserAds, Vec<Listing>>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: PostListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let PostListing {
            title,
            description,
            price,
            image_url,
        } = cmd;

        let session = self
            .storage()
            .execute(Select(record::CurrentUser))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::Unauthenticated))?;

        let (title, description, price, image_url) =
            (title.trim(), description.trim(), price.trim(), image_url.trim());
        if [title, description, price, image_url]
            .iter()
            .any(|f| f.is_empty())
        {
            return Err(tracerr::new!(E::MissingRequiredField));
        }

        let title = listing::Title::new(title)
            .ok_or_else(|| tracerr::new!(E::InvalidField("title")))?;
        let description = listing::Description::new(description)
            .ok_or_else(|| tracerr::new!(E::InvalidField("description")))?;
        let image_url = listing::ImageUrl::new(image_url)
            .ok_or_else(|| tracerr::new!(E::InvalidField("image URL")))?;
        let price = price
            .parse::<Price>()
            .map_err(|_| tracerr::new!(E::InvalidPrice(price.to_owned())))?;

        let mut ads = self
            .storage()
            .execute(Select(record::UserAds))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .unwrap_or_default();

        let mut posted_at = DateTime::now();
        while ads.iter().any(|ad| ad.id == listing::Id::local(posted_at)) {
            posted_at = posted_at + Duration::from_millis(1);
        }
        let listing = Listing {
            id: listing::Id::local(posted_at),
            title,
            description,
            price,
            thumbnail: image_url.clone(),
            images: vec![image_url],
            brand: None,
            category: None,
        };
        ads.insert(0, listing.clone());

        self.storage()
            .execute(Put(record::UserAds, ads))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(
            id = %listing.id,
            by = %session.name,
            "listing posted",
        );
        Ok(listing)
    }
}

/// Error of [`PostListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    #[from]
    Storage(storage::Error),

    /// No user is signed in.
    #[display("Not signed in")]
    Unauthenticated,

    /// At least one of the fields is empty.
    #[display("All fields (Title, Description, Price, Image URL) are required")]
    MissingRequiredField,

    /// Provided price is not a non-negative decimal.
    #[display("`{_0}` is not a valid price")]
    InvalidPrice(#[error(not(source))] String),

    /// Provided field has an invalid value.
    #[display("Invalid {_0}")]
    InvalidField(#[error(not(source))] &'static str),
}
