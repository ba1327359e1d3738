//! Session controller.

use service::{
    domain::{user, Session},
    query, Query,
};
use tracerr::Traced;
use tracing as log;

use crate::view::{AuthControls, Profile};

/// State of the current user session.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SessionState {
    /// A user is signed in.
    Authenticated {
        /// [`user::Name`] of the signed in user.
        name: user::Name,

        /// [`user::Email`] of the signed in user.
        email: user::Email,
    },

    /// Nobody is signed in.
    #[default]
    Anonymous,
}

impl SessionState {
    /// Indicates whether the sell action is available.
    #[must_use]
    pub fn sell_enabled(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        session.map_or(Self::Anonymous, |Session { email, name }| {
            Self::Authenticated { name, email }
        })
    }
}

/// Derives the [`SessionState`] from the stored [`Session`].
///
/// An unreadable [`Session`] is treated as [`SessionState::Anonymous`].
pub async fn derive_state<Svc>(service: &Svc) -> SessionState
where
    Svc: Query<
        query::session::Current,
        Ok = Option<Session>,
        Err = Traced<service::infra::storage::Error>,
    >,
{
    service
        .execute(query::session::Current::default())
        .await
        .unwrap_or_else(|e| {
            log::warn!("ignoring unreadable session: {e}");
            None
        })
        .into()
}

/// Projects the provided [`SessionState`] into [`AuthControls`].
#[must_use]
pub fn controls(state: &SessionState) -> AuthControls {
    match state {
        SessionState::Authenticated { name, email } => AuthControls {
            profile: Some(Profile {
                greeting: format!("Hello, {name}"),
                email: format!("({email})"),
            }),
            sell_enabled: true,
        },
        SessionState::Anonymous => AuthControls {
            profile: None,
            sell_enabled: false,
        },
    }
}
