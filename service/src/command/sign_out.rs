//! [`Command`] for ending the current [`Session`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Session;
use crate::{
    infra::{
        storage::{self, record},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for ending the current [`Session`].
///
/// Succeeds even if there is no [`Session`].
#[derive(Clone, Copy, Debug)]
pub struct SignOut;

impl<S, C> Command<SignOut> for Service<S, C>
where
    S: Storage<
        Delete<record::CurrentUser>,
        Ok = (),
        Err = Traced<storage::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: SignOut) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.storage()
            .execute(Delete(record::CurrentUser))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("user signed out");
        Ok(())
    }
}

/// Error of [`SignOut`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    #[from]
    Storage(storage::Error),
}
