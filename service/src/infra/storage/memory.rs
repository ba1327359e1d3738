//! In-memory [`Storage`] implementation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use common::operations::{Delete, Put, Select};
use tracerr::Traced;

use crate::infra::{
    storage::{self, decode, encode, Record},
    Storage,
};

/// [`Storage`] keeping serialized [`Record`]s in memory.
///
/// Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Serialized values by their keys.
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl Memory {
    /// Creates a new empty [`Memory`] storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts the `raw` serialized value under the `key` as is.
    pub fn put_raw(&self, key: impl Into<String>, raw: impl Into<String>) {
        drop(self.lock().insert(key.into(), raw.into()));
    }

    /// Returns the raw serialized value kept under the `key`, if any.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Locks the entries, recovering them from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Record> Storage<Select<R>> for Memory {
    type Ok = Option<R::Value>;
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Select<R>) -> Result<Self::Ok, Self::Err> {
        self.raw(R::KEY)
            .map(|raw| decode::<R>(&raw))
            .transpose()
            .map_err(tracerr::wrap!())
    }
}

impl<R: Record> Storage<Put<R, R::Value>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Put(_, value): Put<R, R::Value>,
    ) -> Result<Self::Ok, Self::Err> {
        let raw = encode::<R>(&value).map_err(tracerr::wrap!())?;
        self.put_raw(R::KEY, raw);
        Ok(())
    }
}

impl<R: Record> Storage<Delete<R>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Delete<R>) -> Result<Self::Ok, Self::Err> {
        drop(self.lock().remove(R::KEY));
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{Delete, Put, Select};

    use crate::{
        domain::{user, Session},
        infra::{
            storage::{record, Record as _},
            Storage as _,
        },
    };

    use super::Memory;

    fn session() -> Session {
        Session {
            email: user::Email::new("a@x.com").unwrap(),
            name: user::Name::from_email(&user::Email::new("a@x.com").unwrap()),
        }
    }

    #[tokio::test]
    async fn puts_selects_and_deletes() {
        let storage = Memory::new();

        let none = storage.execute(Select(record::CurrentUser)).await.unwrap();
        assert_eq!(none, None);

        storage
            .execute(Put(record::CurrentUser, session()))
            .await
            .unwrap();
        let some = storage.execute(Select(record::CurrentUser)).await.unwrap();
        assert_eq!(some, Some(session()));
        assert_eq!(
            storage.raw(record::CurrentUser::KEY).unwrap(),
            r#"{"email":"a@x.com","name":"a"}"#,
        );

        storage.execute(Delete(record::CurrentUser)).await.unwrap();
        storage.execute(Delete(record::CurrentUser)).await.unwrap();
        let none = storage.execute(Select(record::CurrentUser)).await.unwrap();
        assert_eq!(none, None);
    }

    #[tokio::test]
    async fn reports_malformed_records() {
        let storage = Memory::new();
        storage.put_raw(record::UserAds::KEY, "{not json");

        let err = storage
            .execute(Select(record::UserAds))
            .await
            .unwrap_err();
        assert!(err.as_ref().is_malformed());
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let storage = Memory::new();
        let clone = storage.clone();

        clone.put_raw("k", "v");

        assert_eq!(storage.raw("k").as_deref(), Some("v"));
    }
}
