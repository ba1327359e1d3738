//! [`Aggregator`] of [`Listing`]s.

use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{PoisonError, RwLock},
};

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{listing, Listing},
    infra::{
        catalog::{self, Page},
        storage::{self, record},
        Catalog, Storage,
    },
};

/// Merged collection of local and remote [`Listing`]s, addressable by their
/// [`listing::Id`]s.
///
/// Reflects only the most recent [`Aggregator::refresh()`].
#[derive(Debug, Default)]
pub struct Aggregator {
    /// [`Index`] built by the most recent refresh.
    index: RwLock<Index>,
}

/// Ordered [`Listing`]s along with their positions by [`listing::Id`].
#[derive(Debug, Default)]
struct Index {
    /// [`Listing`]s in their display order.
    listings: Vec<Listing>,

    /// Positions of [`Index::listings`] by their [`listing::Id`]s.
    positions: HashMap<listing::Id, usize>,
}

impl Index {
    /// Builds a new [`Index`] out of the provided `listings`.
    ///
    /// A later [`Listing`] with an already seen [`listing::Id`] replaces the
    /// earlier one in place.
    fn build(listings: impl IntoIterator<Item = Listing>) -> Self {
        let mut index = Self::default();
        for listing in listings {
            match index.positions.entry(listing.id.clone()) {
                Entry::Occupied(pos) => index.listings[*pos.get()] = listing,
                Entry::Vacant(pos) => {
                    _ = pos.insert(index.listings.len());
                    index.listings.push(listing);
                }
            }
        }
        index
    }
}

impl Aggregator {
    /// Creates a new empty [`Aggregator`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the local [`Listing`]s from the `storage`, fetches the first
    /// [`Page`] of the `catalog` and rebuilds the index out of them, local
    /// ones first.
    ///
    /// Never fails: an unreadable local record or a failed fetch contributes
    /// no [`Listing`]s.
    pub async fn refresh<S, C>(
        &self,
        storage: &S,
        catalog: &C,
        page: Page,
    ) -> Vec<Listing>
    where
        S: Storage<
            Select<record::UserAds>,
            Ok = Option<Vec<Listing>>,
            Err = Traced<storage::Error>,
        >,
        C: Catalog<
            Select<By<Vec<Listing>, Page>>,
            Ok = Vec<Listing>,
            Err = Traced<catalog::Error>,
        >,
    {
        let local = storage
            .execute(Select(record::UserAds))
            .await
            .unwrap_or_else(|e| {
                log::warn!("ignoring unreadable user ads: {e}");
                None
            })
            .unwrap_or_default();

        let remote = catalog
            .execute(Select(By::new(page)))
            .await
            .unwrap_or_else(|e| {
                log::warn!("failed to fetch catalog listings: {e}");
                vec![]
            });

        log::debug!(
            local = local.len(),
            remote = remote.len(),
            "aggregating listings",
        );
        self.rebuild(local, remote)
    }

    /// Replaces the index with the provided `local` and `remote`
    /// [`Listing`]s, returning the resulting ordered sequence.
    pub fn rebuild(
        &self,
        local: Vec<Listing>,
        remote: Vec<Listing>,
    ) -> Vec<Listing> {
        let index = Index::build(local.into_iter().chain(remote));
        let listings = index.listings.clone();
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = index;
        listings
    }

    /// Looks up a [`Listing`] by its [`listing::Id`] in the most recently
    /// built index.
    #[must_use]
    pub fn lookup(&self, id: &listing::Id) -> Option<Listing> {
        let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
        index
            .positions
            .get(id)
            .and_then(|&pos| index.listings.get(pos))
            .cloned()
    }

    /// Returns all the [`Listing`]s of the most recently built index, in their
    /// display order.
    #[must_use]
    pub fn listings(&self) -> Vec<Listing> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listings
            .clone()
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::sync::{Arc, Mutex};

    use common::operations::{By, Put, Select};
    use tracerr::Traced;

    use crate::{
        domain::{listing, Listing},
        infra::{
            catalog::{self, Page},
            storage::{record, Record as _},
            Catalog, Memory, Storage as _,
        },
    };

    use super::Aggregator;

    /// [`Catalog`] serving canned responses.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct FakeCatalog {
        /// Response to serve, or [`None`] to fail.
        pub(crate) listings: Arc<Mutex<Option<Vec<Listing>>>>,

        /// [`Page`]s requested so far.
        pub(crate) requested: Arc<Mutex<Vec<Page>>>,
    }

    impl FakeCatalog {
        pub(crate) fn serving(listings: Vec<Listing>) -> Self {
            let this = Self::default();
            this.serve(Some(listings));
            this
        }

        pub(crate) fn failing() -> Self {
            Self::default()
        }

        pub(crate) fn serve(&self, listings: Option<Vec<Listing>>) {
            *self.listings.lock().unwrap() = listings;
        }
    }

    impl Catalog<Select<By<Vec<Listing>, Page>>> for FakeCatalog {
        type Ok = Vec<Listing>;
        type Err = Traced<catalog::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Vec<Listing>, Page>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.requested.lock().unwrap().push(by.into_inner());
            self.listings
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| tracerr::new!(catalog::Error::Status(500)))
        }
    }

    pub(crate) fn local(id: &str, title: &str) -> Listing {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "description": format!("{title} description"),
            "price": 50,
            "thumbnail": "https://img/local.png",
            "images": ["https://img/local.png"],
            "isUserAd": true,
        }))
        .unwrap()
    }

    pub(crate) fn remote(id: u64, title: &str) -> Listing {
        let listing::Remote(listing) =
            serde_json::from_value(serde_json::json!({
                "id": id,
                "title": title,
                "description": format!("{title} description"),
                "price": 9.99,
                "thumbnail": "https://cdn/remote.png",
            }))
            .unwrap();
        listing
    }

    fn titles(listings: &[Listing]) -> Vec<String> {
        listings.iter().map(|l| l.title.to_string()).collect()
    }

    async fn storage_with(ads: Vec<Listing>) -> Memory {
        let storage = Memory::new();
        storage.execute(Put(record::UserAds, ads)).await.unwrap();
        storage
    }

    #[tokio::test]
    async fn puts_local_listings_first() {
        let storage = storage_with(vec![
            local("user-2", "Newer"),
            local("user-1", "Older"),
        ])
        .await;
        let catalog = FakeCatalog::serving(vec![
            remote(1, "Mascara"),
            remote(2, "Eyeshadow"),
        ]);
        let aggregator = Aggregator::new();

        let listings =
            aggregator.refresh(&storage, &catalog, Page::first(32)).await;

        assert_eq!(
            titles(&listings),
            ["Newer", "Older", "Mascara", "Eyeshadow"],
        );
        assert_eq!(titles(&aggregator.listings()), titles(&listings));
        assert_eq!(*catalog.requested.lock().unwrap(), [Page::first(32)]);
    }

    #[tokio::test]
    async fn indexes_every_listing() {
        let storage = storage_with(vec![local("user-1", "Bike")]).await;
        let catalog = FakeCatalog::serving(vec![remote(1, "Mascara")]);
        let aggregator = Aggregator::new();

        _ = aggregator.refresh(&storage, &catalog, Page::first(32)).await;

        let bike = aggregator.lookup(&"user-1".parse().unwrap()).unwrap();
        assert_eq!(bike.title.to_string(), "Bike");
        let mascara =
            aggregator.lookup(&"catalog-1".parse().unwrap()).unwrap();
        assert_eq!(mascara.title.to_string(), "Mascara");
        assert_eq!(aggregator.lookup(&"catalog-2".parse().unwrap()), None);
    }

    #[test]
    fn later_duplicate_wins_in_place() {
        let aggregator = Aggregator::new();

        let listings = aggregator.rebuild(
            vec![local("user-1", "First")],
            vec![
                remote(7, "Old"),
                remote(8, "Other"),
                remote(7, "New"),
            ],
        );

        assert_eq!(listings.len(), 3);
        assert_eq!(titles(&listings), ["First", "New", "Other"]);
        let id = listing::Id::Remote("7".to_owned());
        assert_eq!(aggregator.lookup(&id).unwrap().title.to_string(), "New");
    }

    #[test]
    fn local_and_remote_ids_never_collide() {
        let aggregator = Aggregator::new();

        let listings = aggregator.rebuild(
            vec![local("1", "Local")],
            vec![remote(1, "Remote")],
        );

        assert_eq!(listings.len(), 2);
        assert_eq!(
            aggregator
                .lookup(&"user-1".parse().unwrap())
                .unwrap()
                .title
                .to_string(),
            "Local",
        );
    }

    #[tokio::test]
    async fn lookup_reflects_only_latest_refresh() {
        let storage = Memory::new();
        let catalog = FakeCatalog::serving(vec![remote(1, "Mascara")]);
        let aggregator = Aggregator::new();

        _ = aggregator.refresh(&storage, &catalog, Page::first(32)).await;
        assert!(aggregator.lookup(&"catalog-1".parse().unwrap()).is_some());

        catalog.serve(Some(vec![remote(2, "Eyeshadow")]));
        _ = aggregator.refresh(&storage, &catalog, Page::first(32)).await;

        assert!(aggregator.lookup(&"catalog-1".parse().unwrap()).is_none());
        assert!(aggregator.lookup(&"catalog-2".parse().unwrap()).is_some());
    }

    #[tokio::test]
    async fn failed_fetch_yields_local_listings_only() {
        let storage = storage_with(vec![
            local("user-3", "C"),
            local("user-2", "B"),
            local("user-1", "A"),
        ])
        .await;
        let aggregator = Aggregator::new();

        let listings = aggregator
            .refresh(&storage, &FakeCatalog::failing(), Page::first(32))
            .await;

        assert_eq!(titles(&listings), ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn corrupt_local_record_is_treated_as_empty() {
        let storage = Memory::new();
        storage.put_raw(record::UserAds::KEY, "not json");
        let catalog = FakeCatalog::serving(vec![remote(1, "Mascara")]);
        let aggregator = Aggregator::new();

        let listings =
            aggregator.refresh(&storage, &catalog, Page::first(32)).await;

        assert_eq!(titles(&listings), ["Mascara"]);
    }

    #[tokio::test]
    async fn empty_everywhere_yields_nothing() {
        let aggregator = Aggregator::new();

        let listings = aggregator
            .refresh(&Memory::new(), &FakeCatalog::failing(), Page::first(32))
            .await;

        assert!(listings.is_empty());
        assert!(aggregator.listings().is_empty());
    }
}
