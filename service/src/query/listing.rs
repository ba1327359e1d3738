//! [`Query`] collection related to [`Listing`]s.

use std::convert::Infallible;

use crate::{
    domain::{listing, Listing},
    Service,
};

use super::Query;

/// Queries a [`Listing`] of the latest aggregation by its [`listing::Id`].
#[derive(Clone, Debug)]
pub struct ById(pub listing::Id);

impl<S, C> Query<ById> for Service<S, C> {
    type Ok = Option<Listing>;
    type Err = Infallible;

    async fn execute(&self, ById(id): ById) -> Result<Self::Ok, Self::Err> {
        Ok(self.aggregator().lookup(&id))
    }
}

/// Queries all the [`Listing`]s of the latest aggregation, in their display
/// order.
#[derive(Clone, Copy, Debug)]
pub struct All;

impl<S, C> Query<All> for Service<S, C> {
    type Ok = Vec<Listing>;
    type Err = Infallible;

    async fn execute(&self, _: All) -> Result<Self::Ok, Self::Err> {
        Ok(self.aggregator().listings())
    }
}
