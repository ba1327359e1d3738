//! [`Command`] for registering a new [`Credential`].

use common::operations::Put;
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, Credential},
    infra::{
        storage::{self, record},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Credential`].
///
/// Replaces any previously registered [`Credential`]. Doesn't sign in.
#[derive(Clone, Debug)]
pub struct SignUp {
    /// [`user::Email`] to register.
    pub email: user::Email,

    /// [`user::Password`] to register.
    pub password: SecretBox<user::Password>,
}

impl<S, C> Command<SignUp> for Service<S, C>
where
    S: Storage<
        Put<record::RegisteredUser, Credential>,
        Ok = (),
        Err = Traced<storage::Error>,
    >,
{
    type Ok = Credential;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SignUp) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SignUp { email, password } = cmd;

        let credential =
            Credential::new(email, password.expose_secret().clone());
        self.storage()
            .execute(Put(record::RegisteredUser, credential.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(name = %credential.name, "user registered");
        Ok(credential)
    }
}

/// Error of [`SignUp`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    #[from]
    Storage(storage::Error),
}
