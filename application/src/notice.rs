//! [`Notice`]-related definitions.

use std::fmt;

use itertools::Itertools as _;
use service::infra::storage;
use tracerr::{Trace, Traced};

/// Defines a new notice type.
#[macro_export]
macro_rules! define_notice {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Notice type.
        #[derive(Clone, Copy, Debug, ::derive_more::Display)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Notice {
            fn from(notice: $name) -> Self {
                match notice {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_owned(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Blocking message shown to the user.
#[derive(Clone, Debug)]
pub struct Notice {
    /// [`Notice`] code.
    pub code: Code,

    /// Human-readable message of this [`Notice`].
    pub message: String,

    /// Backtrace of the error this [`Notice`] originates from, if any.
    pub backtrace: Option<Trace>,
}

impl Notice {
    /// Code of [`Notice::internal()`]s.
    pub const INTERNAL: Code = "INTERNAL";

    /// Creates a new [`Notice`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: Self::INTERNAL,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            message,
            backtrace,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// [`Notice`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Notice`]s.
pub trait AsNotice {
    /// Tries to convert the type into a [`Notice`].
    ///
    /// [`None`] is returned if the type has no user-facing representation.
    fn try_as_notice(&self) -> Option<Notice>;

    /// Converts the type into a [`Notice`].
    fn as_notice(&self) -> Notice
    where
        Self: fmt::Display,
    {
        self.try_as_notice()
            .unwrap_or_else(|| Notice::internal(&self))
    }

    /// Converts the type into a [`Notice`] by consuming it.
    fn into_notice(self) -> Notice
    where
        Self: fmt::Display + Sized,
    {
        self.as_notice()
    }
}

impl<E: AsNotice> AsNotice for Traced<E> {
    fn try_as_notice(&self) -> Option<Notice> {
        let mut notice = self.as_ref().try_as_notice()?;
        notice.backtrace = Some(self.trace().clone());
        Some(notice)
    }
}

impl AsNotice for storage::Error {
    fn try_as_notice(&self) -> Option<Notice> {
        None
    }
}
