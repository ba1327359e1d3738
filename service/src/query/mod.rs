//! [`Query`] definition.

pub mod listing;
pub mod session;

use common::operations::Select;
use tracerr::Traced;

use crate::{
    infra::{
        storage::{self, Record},
        Storage,
    },
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a [`Record`] from a [`Storage`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct StorageQuery<R>(R);

impl<R: Record + Default> Default for StorageQuery<R> {
    fn default() -> Self {
        Self(R::default())
    }
}

impl<S, C, R> Query<StorageQuery<R>> for Service<S, C>
where
    R: Record,
    S: Storage<Select<R>, Ok = Option<R::Value>, Err = Traced<storage::Error>>,
{
    type Ok = Option<R::Value>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        StorageQuery(record): StorageQuery<R>,
    ) -> Result<Self::Ok, Self::Err> {
        self.storage()
            .execute(Select(record))
            .await
            .map_err(tracerr::wrap!())
    }
}
