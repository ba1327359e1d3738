//! [`Command`] for refreshing the aggregated [`Listing`]s.

use std::convert::Infallible;

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::Aggregator;
use crate::{
    domain::Listing,
    infra::{
        catalog::{self, Page},
        storage::{self, record},
        Catalog, Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for rebuilding the [`Aggregator`] index out of the stored user
/// [`Listing`]s and the first [`Page`] of the [`Catalog`].
///
/// Returns the merged [`Listing`]s, local ones first.
#[derive(Clone, Copy, Debug)]
pub struct RefreshListings;

impl<S, C> Command<RefreshListings> for Service<S, C>
where
    S: Storage<
        Select<record::UserAds>,
        Ok = Option<Vec<Listing>>,
        Err = Traced<storage::Error>,
    >,
    C: Catalog<
        Select<By<Vec<Listing>, Page>>,
        Ok = Vec<Listing>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Infallible;

    async fn execute(&self, _: RefreshListings) -> Result<Self::Ok, Self::Err> {
        let page = Page::first(self.config().page_size);
        Ok(self
            .aggregator()
            .refresh(self.storage(), self.catalog(), page)
            .await)
    }
}
