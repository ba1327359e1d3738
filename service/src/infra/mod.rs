//! Infrastructure layer.

pub mod catalog;
pub mod storage;

#[cfg(feature = "http")]
pub use self::catalog::Http;
#[cfg(feature = "fs")]
pub use self::storage::JsonFile;
pub use self::{
    catalog::Catalog,
    storage::{Memory, Storage},
};
