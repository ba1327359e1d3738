//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of an operation.
///
/// Commands, queries, storage backends and catalog clients are all
/// expressed as [`Handler`]s of the operation type they accept.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided operation.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
