//! [`Command`] for signing in with the registered [`Credential`].

use common::operations::{Put, Select};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, Credential, Session},
    infra::{
        storage::{self, record},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for signing in with the registered [`Credential`].
///
/// Leaves the current [`Session`] untouched on failure.
#[derive(Clone, Debug)]
pub struct SignIn {
    /// [`user::Email`] to sign in with.
    pub email: user::Email,

    /// [`user::Password`] to sign in with.
    pub password: SecretBox<user::Password>,
}

impl<S, C> Command<SignIn> for Service<S, C>
where
    S: Storage<
            Select<record::RegisteredUser>,
            Ok = Option<Credential>,
            Err = Traced<storage::Error>,
        > + Storage<
            Put<record::CurrentUser, Session>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SignIn) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SignIn { email, password } = cmd;

        let credential = self
            .storage()
            .execute(Select(record::RegisteredUser))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|c| c.matches(&email, password.expose_secret()))
            .ok_or_else(|| {
                log::debug!("sign in rejected");
                tracerr::new!(E::InvalidCredentials)
            })?;

        let session = credential.session();
        self.storage()
            .execute(Put(record::CurrentUser, session.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(name = %session.name, "user signed in");
        Ok(session)
    }
}

/// Error of [`SignIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    #[from]
    Storage(storage::Error),

    /// No registered [`Credential`] matches the provided ones.
    #[display("Invalid credentials or user not registered")]
    InvalidCredentials,
}
