//! [`Store`] picked by the configuration.

use common::operations::{Delete, Put, Select};
use service::infra::{
    storage::{self, Record},
    JsonFile, Memory, Storage,
};
use tracerr::Traced;

use crate::config;

/// [`Storage`] backend picked at start.
#[derive(Clone, Debug)]
pub enum Store {
    /// Records are kept as JSON files in a directory.
    File(JsonFile),

    /// Records are kept in memory only.
    Memory(Memory),
}

impl From<config::Storage> for Store {
    fn from(config: config::Storage) -> Self {
        match config.dir {
            Some(dir) => Self::File(JsonFile::new(dir)),
            None => Self::Memory(Memory::new()),
        }
    }
}

impl<R: Record> Storage<Select<R>> for Store {
    type Ok = Option<R::Value>;
    type Err = Traced<storage::Error>;

    async fn execute(&self, op: Select<R>) -> Result<Self::Ok, Self::Err> {
        match self {
            Self::File(s) => s.execute(op).await,
            Self::Memory(s) => s.execute(op).await,
        }
    }
}

impl<R: Record> Storage<Put<R, R::Value>> for Store {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        op: Put<R, R::Value>,
    ) -> Result<Self::Ok, Self::Err> {
        match self {
            Self::File(s) => s.execute(op).await,
            Self::Memory(s) => s.execute(op).await,
        }
    }
}

impl<R: Record> Storage<Delete<R>> for Store {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, op: Delete<R>) -> Result<Self::Ok, Self::Err> {
        match self {
            Self::File(s) => s.execute(op).await,
            Self::Memory(s) => s.execute(op).await,
        }
    }
}
