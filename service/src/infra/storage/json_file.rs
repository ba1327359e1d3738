//! [`Storage`] implementation keeping each [`Record`] in its own JSON file.

use std::{io, path::PathBuf};

use common::operations::{Delete, Put, Select};
use tokio::fs;
use tracerr::Traced;

use crate::infra::{
    storage::{self, decode, encode, Record},
    Storage,
};

/// [`Storage`] keeping each [`Record`] in a `{dir}/{key}.json` file.
#[derive(Clone, Debug)]
pub struct JsonFile {
    /// Directory the files are kept in.
    dir: PathBuf,
}

impl JsonFile {
    /// Creates a new [`JsonFile`] storage in the provided `dir`ectory.
    ///
    /// The directory is created lazily, on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns path of the file keeping the `R`ecord.
    fn path_of<R: Record>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", R::KEY))
    }
}

/// Wraps the provided [`io::Error`] of accessing the `R`ecord.
fn io_error<R: Record>(source: io::Error) -> storage::Error {
    storage::Error::Io {
        key: R::KEY,
        source,
    }
}

impl<R: Record> Storage<Select<R>> for JsonFile {
    type Ok = Option<R::Value>;
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Select<R>) -> Result<Self::Ok, Self::Err> {
        let raw = match fs::read_to_string(self.path_of::<R>()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(tracerr::new!(io_error::<R>(e))),
        };
        decode::<R>(&raw).map(Some).map_err(tracerr::wrap!())
    }
}

impl<R: Record> Storage<Put<R, R::Value>> for JsonFile {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Put(_, value): Put<R, R::Value>,
    ) -> Result<Self::Ok, Self::Err> {
        let raw = encode::<R>(&value).map_err(tracerr::wrap!())?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| tracerr::new!(io_error::<R>(e)))?;
        fs::write(self.path_of::<R>(), raw)
            .await
            .map_err(|e| tracerr::new!(io_error::<R>(e)))
    }
}

impl<R: Record> Storage<Delete<R>> for JsonFile {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Delete<R>) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(self.path_of::<R>()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(tracerr::new!(io_error::<R>(e))),
        }
    }
}
