//! [`Storefront`] controller.

use common::{
    operations::{By, Delete, Put, Select},
    Currency,
};
use secrecy::SecretBox;
use service::{
    command,
    domain::{listing, user, Credential, Listing, Session},
    infra::{
        catalog::{self, Page},
        storage::{self, record},
        Catalog, Storage,
    },
    query, Command as _, Query as _, Service,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    define_notice,
    overlay::{AuthForm, AuthMode, AuthPanel, Overlay, SellForm},
    session::{self, SessionState},
    view::{self, AuthView, PageView, PanelView},
    AsNotice, Notice,
};

define_notice! {
    enum Info {
        #[code = "SIGNED_UP"]
        #[message = "Signup Successful! Please Sign In."]
        SignedUp,

        #[code = "SIGNED_IN"]
        #[message = "Sign In Successful!"]
        SignedIn,

        #[code = "LISTING_POSTED"]
        #[message = "Ad Posted Successfully!"]
        ListingPosted,

        #[code = "LISTING_NOT_FOUND"]
        #[message = "Product details not found."]
        ListingNotFound,

        #[code = "INVALID_EMAIL"]
        #[message = "Please enter a valid email address."]
        InvalidEmail,

        #[code = "INVALID_PASSWORD"]
        #[message = "Please enter a password."]
        InvalidPassword,
    }
}

/// UI event dispatched to a [`Storefront`].
#[derive(Clone, Debug)]
pub enum Event {
    /// Sign up control is activated.
    OpenSignUp,

    /// Sign in control is activated.
    OpenSignIn,

    /// Sell control is activated.
    OpenSell,

    /// Product card bound to the provided ID is clicked.
    OpenDetail(String),

    /// Close control of the overlay is activated.
    Close,

    /// Auth form is submitted.
    SubmitAuth(AuthForm),

    /// Sell form is submitted.
    SubmitSell(SellForm),

    /// Sign out control is activated.
    SignOut,
}

/// Outcome of handling an [`Event`].
#[derive(Clone, Debug, Default)]
pub struct Outcome {
    /// Blocking [`Notice`] to show, if any.
    pub notice: Option<Notice>,
}

impl Outcome {
    /// Creates an [`Outcome`] without any [`Notice`].
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Creates an [`Outcome`] showing the provided [`Notice`].
    #[must_use]
    pub fn notify(notice: impl Into<Notice>) -> Self {
        Self {
            notice: Some(notice.into()),
        }
    }
}

/// Storefront wiring the [`Service`] with the [`Overlay`] and the
/// [`SessionState`].
#[derive(Debug)]
pub struct Storefront<S, C> {
    /// [`Service`] performing the operations.
    service: Service<S, C>,

    /// [`Currency`] prices are displayed in.
    currency: Currency,

    /// Current [`SessionState`].
    session: SessionState,

    /// Current [`Overlay`].
    overlay: Overlay,
}

impl<S, C> Storefront<S, C>
where
    S: Storage<
            Select<record::RegisteredUser>,
            Ok = Option<Credential>,
            Err = Traced<storage::Error>,
        > + Storage<
            Put<record::RegisteredUser, Credential>,
            Ok = (),
            Err = Traced<storage::Error>,
        > + Storage<
            Select<record::CurrentUser>,
            Ok = Option<Session>,
            Err = Traced<storage::Error>,
        > + Storage<
            Put<record::CurrentUser, Session>,
            Ok = (),
            Err = Traced<storage::Error>,
        > + Storage<
            Delete<record::CurrentUser>,
            Ok = (),
            Err = Traced<storage::Error>,
        > + Storage<
            Select<record::UserAds>,
            Ok = Option<Vec<Listing>>,
            Err = Traced<storage::Error>,
        > + Storage<
            Put<record::UserAds, Vec<Listing>>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
    C: Catalog<
        Select<By<Vec<Listing>, Page>>,
        Ok = Vec<Listing>,
        Err = Traced<catalog::Error>,
    >,
{
    /// Loads a new [`Storefront`] page: hides the [`Overlay`], derives the
    /// [`SessionState`] and refreshes the [`Listing`]s.
    pub async fn load(service: Service<S, C>, currency: Currency) -> Self {
        let mut this = Self {
            service,
            currency,
            session: SessionState::Anonymous,
            overlay: Overlay::Hidden,
        };
        this.reload().await;
        this
    }

    /// Loads this [`Storefront`] page again, as [`Storefront::load()`] does.
    pub async fn reload(&mut self) {
        self.overlay = Overlay::Hidden;
        self.session = session::derive_state(&self.service).await;
        self.refresh().await;
    }

    /// Handles the provided [`Event`].
    pub async fn handle(&mut self, event: Event) -> Outcome {
        log::debug!(?event, "handling event");

        let outcome = match event {
            Event::OpenSignUp => {
                self.overlay.open_auth(AuthMode::SignUp);
                Outcome::silent()
            }
            Event::OpenSignIn => {
                self.overlay.open_auth(AuthMode::SignIn);
                Outcome::silent()
            }
            Event::OpenSell => {
                if self.overlay.open_sell(&self.session).is_err() {
                    log::debug!("sell is disabled without session");
                }
                Outcome::silent()
            }
            Event::OpenDetail(id) => self.open_detail(&id).await,
            Event::Close => {
                self.overlay.close();
                Outcome::silent()
            }
            Event::SubmitAuth(form) => self.submit_auth(form).await,
            Event::SubmitSell(form) => self.submit_sell(form).await,
            Event::SignOut => self.sign_out().await,
        };

        log::debug!(panels = ?self.overlay.visible_panels(), "event handled");
        outcome
    }

    /// Returns the [`Listing`]s of the latest refresh, in their display order.
    pub async fn listings(&self) -> Vec<Listing> {
        match self.service.execute(query::listing::All).await {
            Ok(listings) => listings,
            Err(never) => match never {},
        }
    }

    /// Projects the current state into a [`PageView`].
    pub async fn view(&self) -> PageView {
        let panel = match &self.overlay {
            Overlay::Hidden => None,
            Overlay::Auth(AuthPanel { mode, email }) => {
                Some(PanelView::Auth(AuthView::new(*mode, email)))
            }
            Overlay::Sell => Some(PanelView::Sell),
            Overlay::Detail(id) => self
                .find(id.clone())
                .await
                .map(|l| PanelView::Detail(view::detail(&l, self.currency))),
        };

        PageView {
            controls: session::controls(&self.session),
            grid: view::cards(&self.listings().await, self.currency),
            panel,
        }
    }

    /// Finds the [`Listing`] of the latest refresh by its [`listing::Id`].
    async fn find(&self, id: listing::Id) -> Option<Listing> {
        match self.service.execute(query::listing::ById(id)).await {
            Ok(found) => found,
            Err(never) => match never {},
        }
    }

    /// Opens details of the [`Listing`] bound to the provided raw `id`.
    async fn open_detail(&mut self, id: &str) -> Outcome {
        let Ok(id) = id.parse::<listing::Id>() else {
            return Outcome::notify(Info::ListingNotFound);
        };
        let found = self.find(id.clone()).await;
        match self.overlay.open_detail(id, |_| found) {
            Ok(_) => Outcome::silent(),
            Err(_) => Outcome::notify(Info::ListingNotFound),
        }
    }

    /// Submits the [`AuthForm`] in the mode of the opened [`AuthPanel`].
    async fn submit_auth(&mut self, form: AuthForm) -> Outcome {
        let Overlay::Auth(AuthPanel { mode, .. }) = &self.overlay else {
            log::debug!("auth form submitted without auth panel");
            return Outcome::silent();
        };
        let mode = *mode;
        let AuthForm { email, password } = form;
        let parsed = (user::Email::new(&email), user::Password::new(password));
        self.overlay = Overlay::Auth(AuthPanel { mode, email });

        match (mode, parsed) {
            (AuthMode::SignUp, (None, _)) => {
                Outcome::notify(Info::InvalidEmail)
            }
            (AuthMode::SignUp, (_, None)) => {
                Outcome::notify(Info::InvalidPassword)
            }
            (AuthMode::SignUp, (Some(email), Some(password))) => {
                let password = SecretBox::new(Box::new(password));
                match self
                    .service
                    .execute(command::SignUp { email, password })
                    .await
                {
                    Ok(_) => Outcome::notify(Info::SignedUp),
                    Err(e) => Outcome::notify(e.into_notice()),
                }
            }
            (AuthMode::SignIn, (Some(email), Some(password))) => {
                let password = SecretBox::new(Box::new(password));
                match self
                    .service
                    .execute(command::SignIn { email, password })
                    .await
                {
                    Ok(session) => {
                        self.session = Some(session).into();
                        self.overlay.close();
                        Outcome::notify(Info::SignedIn)
                    }
                    Err(e) => Outcome::notify(e.into_notice()),
                }
            }
            (AuthMode::SignIn, _) => Outcome::notify(
                command::sign_in::ExecutionError::InvalidCredentials
                    .into_notice(),
            ),
        }
    }

    /// Submits the [`SellForm`] of the opened sell panel and refreshes the
    /// [`Listing`]s on success.
    async fn submit_sell(&mut self, form: SellForm) -> Outcome {
        if !matches!(self.overlay, Overlay::Sell) {
            log::debug!("sell form submitted without sell panel");
            return Outcome::silent();
        }
        let SellForm {
            title,
            description,
            price,
            image_url,
        } = form;

        let posted = self
            .service
            .execute(command::PostListing {
                title,
                description,
                price,
                image_url,
            })
            .await;
        match posted {
            Ok(_) => {
                self.overlay.close();
                self.refresh().await;
                Outcome::notify(Info::ListingPosted)
            }
            Err(e) => Outcome::notify(e.into_notice()),
        }
    }

    /// Ends the current session.
    async fn sign_out(&mut self) -> Outcome {
        match self.service.execute(command::SignOut).await {
            Ok(()) => {
                self.session = SessionState::Anonymous;
                Outcome::silent()
            }
            Err(e) => Outcome::notify(e.into_notice()),
        }
    }

    /// Rebuilds the [`Listing`]s out of the stored and remote ones.
    async fn refresh(&self) {
        match self.service.execute(command::RefreshListings).await {
            Ok(listings) => log::debug!(count = listings.len(), "refreshed"),
            Err(never) => match never {},
        }
    }
}

impl<S, C> Storefront<S, C> {
    /// Returns the current [`SessionState`].
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the current [`Overlay`].
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }
}

impl AsNotice for command::sign_up::ExecutionError {
    fn try_as_notice(&self) -> Option<Notice> {
        match self {
            Self::Storage(e) => e.try_as_notice(),
        }
    }
}

impl AsNotice for command::sign_in::ExecutionError {
    fn try_as_notice(&self) -> Option<Notice> {
        define_notice! {
            enum Notice {
                #[code = "INVALID_CREDENTIALS"]
                #[message = "Invalid credentials or user not registered."]
                InvalidCredentials,
            }
        }

        match self {
            Self::Storage(e) => e.try_as_notice(),
            Self::InvalidCredentials => Some(Notice::InvalidCredentials.into()),
        }
    }
}

impl AsNotice for command::sign_out::ExecutionError {
    fn try_as_notice(&self) -> Option<Notice> {
        match self {
            Self::Storage(e) => e.try_as_notice(),
        }
    }
}

impl AsNotice for command::post_listing::ExecutionError {
    fn try_as_notice(&self) -> Option<Notice> {
        define_notice! {
            enum Notice {
                #[code = "UNAUTHENTICATED"]
                #[message = "Please sign in to post an ad."]
                Unauthenticated,

                #[code = "MISSING_REQUIRED_FIELD"]
                #[message = "All fields (Title, Description, Price, Image URL) \
                             are required!"]
                MissingRequiredField,

                #[code = "INVALID_PRICE"]
                #[message = "Price must be a non-negative number."]
                InvalidPrice,

                #[code = "INVALID_FIELD"]
                #[message = "Please check the entered ad details."]
                InvalidField,
            }
        }

        match self {
            Self::Storage(e) => e.try_as_notice(),
            Self::Unauthenticated => Some(Notice::Unauthenticated.into()),
            Self::MissingRequiredField => {
                Some(Notice::MissingRequiredField.into())
            }
            Self::InvalidPrice(_) => Some(Notice::InvalidPrice.into()),
            Self::InvalidField(_) => Some(Notice::InvalidField.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Currency,
    };
    use service::{
        domain::{listing, Listing},
        infra::{
            catalog::{self, Page},
            Catalog, Memory,
        },
        Config, Service,
    };
    use tracerr::Traced;

    use crate::{
        overlay::{AuthForm, Overlay, Panel, SellForm},
        session::SessionState,
        view::PanelView,
    };

    use super::{Event, Storefront};

    /// Catalog serving fixed listings, or failing if there are none.
    #[derive(Clone, Debug, Default)]
    struct StaticCatalog(Option<Vec<Listing>>);

    impl Catalog<Select<By<Vec<Listing>, Page>>> for StaticCatalog {
        type Ok = Vec<Listing>;
        type Err = Traced<catalog::Error>;

        async fn execute(
            &self,
            _: Select<By<Vec<Listing>, Page>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.0
                .clone()
                .ok_or_else(|| tracerr::new!(catalog::Error::Status(503)))
        }
    }

    fn mascara() -> Listing {
        let listing::Remote(listing) =
            serde_json::from_value(serde_json::json!({
                "id": 1,
                "title": "Mascara",
                "description": "Popular mascara.",
                "price": 9.99,
                "thumbnail": "https://cdn/thumb.png",
            }))
            .unwrap();
        listing
    }

    async fn load(
        storage: &Memory,
        catalog: StaticCatalog,
    ) -> Storefront<Memory, StaticCatalog> {
        let service =
            Service::new(Config { page_size: 32 }, storage.clone(), catalog);
        Storefront::load(service, Currency::Pkr).await
    }

    fn auth(email: &str, password: &str) -> Event {
        Event::SubmitAuth(AuthForm {
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }

    fn sell(title: &str, price: &str) -> Event {
        Event::SubmitSell(SellForm {
            title: title.to_owned(),
            description: "Barely used".to_owned(),
            price: price.to_owned(),
            image_url: "https://img/bike.png".to_owned(),
        })
    }

    fn code(outcome: &super::Outcome) -> Option<&'static str> {
        outcome.notice.as_ref().map(|n| n.code)
    }

    #[tokio::test]
    async fn signs_up_and_signs_in() {
        let storage = Memory::new();
        let mut page = load(&storage, StaticCatalog::default()).await;
        assert_eq!(page.session(), &SessionState::Anonymous);
        assert_eq!(page.overlay().panel(), None);

        _ = page.handle(Event::OpenSignUp).await;
        let out = page.handle(auth("a@x.com", "p1")).await;
        assert_eq!(code(&out), Some("SIGNED_UP"));
        assert_eq!(
            out.notice.unwrap().message,
            "Signup Successful! Please Sign In.",
        );
        assert_eq!(page.overlay().panel(), Some(Panel::Auth));
        assert_eq!(page.session(), &SessionState::Anonymous);

        _ = page.handle(Event::OpenSignIn).await;
        let out = page.handle(auth("a@x.com", "p1")).await;
        assert_eq!(code(&out), Some("SIGNED_IN"));
        assert_eq!(page.overlay().panel(), None);
        assert!(page.session().sell_enabled());

        let profile = page.view().await.controls.profile.unwrap();
        assert_eq!(profile.greeting, "Hello, a");
        assert_eq!(profile.email, "(a@x.com)");
        assert!(page.view().await.controls.sell_enabled);

        let reloaded = load(&storage, StaticCatalog::default()).await;
        assert!(reloaded.session().sell_enabled());
        assert_eq!(reloaded.overlay().panel(), None);
    }

    #[tokio::test]
    async fn rejects_invalid_sign_up_input() {
        let storage = Memory::new();
        let mut page = load(&storage, StaticCatalog::default()).await;

        _ = page.handle(Event::OpenSignUp).await;
        let out = page.handle(auth("not-an-email", "p1")).await;
        assert_eq!(code(&out), Some("INVALID_EMAIL"));

        let out = page.handle(auth("a@x.com", "")).await;
        assert_eq!(code(&out), Some("INVALID_PASSWORD"));

        assert_eq!(storage.raw("registeredUser"), None);
        assert_eq!(page.overlay().panel(), Some(Panel::Auth));
    }

    #[tokio::test]
    async fn failed_sign_in_changes_nothing() {
        let storage = Memory::new();
        let mut page = load(&storage, StaticCatalog::default()).await;
        _ = page.handle(Event::OpenSignUp).await;
        _ = page.handle(auth("a@x.com", "p1")).await;
        let registered = storage.raw("registeredUser");

        _ = page.handle(Event::OpenSignIn).await;
        for (email, password) in [("a@x.com", "wrong"), ("b@x.com", "p1")] {
            let out = page.handle(auth(email, password)).await;
            let notice = out.notice.unwrap();
            assert_eq!(notice.code, "INVALID_CREDENTIALS");
            assert_eq!(
                notice.message,
                "Invalid credentials or user not registered.",
            );
        }
        let out = page.handle(auth("bogus", "p1")).await;
        assert_eq!(code(&out), Some("INVALID_CREDENTIALS"));

        assert_eq!(storage.raw("currentUser"), None);
        assert_eq!(storage.raw("registeredUser"), registered);
        assert_eq!(page.session(), &SessionState::Anonymous);
        assert_eq!(page.overlay().panel(), Some(Panel::Auth));
    }

    #[tokio::test]
    async fn sell_is_gated_by_session() {
        let storage = Memory::new();
        let mut page = load(&storage, StaticCatalog::default()).await;

        let out = page.handle(Event::OpenSell).await;
        assert!(out.notice.is_none());
        assert_eq!(page.overlay().panel(), None);

        let out = page.handle(sell("Bike", "50")).await;
        assert!(out.notice.is_none());
        assert_eq!(storage.raw("userAds"), None);
        assert!(page.listings().await.is_empty());

        storage.put_raw("currentUser", r#"{"email":"a@x.com","name":"a"}"#);
        page.reload().await;
        _ = page.handle(Event::OpenSell).await;
        assert_eq!(page.overlay().panel(), Some(Panel::Sell));
        _ = page.handle(Event::SignOut).await;

        let out = page.handle(sell("Bike", "50")).await;
        assert_eq!(code(&out), Some("UNAUTHENTICATED"));
        assert_eq!(storage.raw("userAds"), None);
    }

    #[tokio::test]
    async fn sell_form_requires_sell_panel() {
        let storage = Memory::new();
        let mut page =
            load(&storage, StaticCatalog(Some(vec![mascara()]))).await;
        _ = page.handle(Event::OpenSignUp).await;
        _ = page.handle(auth("a@x.com", "p1")).await;
        _ = page.handle(Event::OpenSignIn).await;
        _ = page.handle(auth("a@x.com", "p1")).await;
        assert!(page.session().sell_enabled());

        let out = page.handle(sell("Bike", "50")).await;
        assert!(out.notice.is_none());
        assert_eq!(page.overlay().panel(), None);

        _ = page.handle(Event::OpenDetail("catalog-1".to_owned())).await;
        let out = page.handle(sell("Bike", "50")).await;
        assert!(out.notice.is_none());
        assert_eq!(storage.raw("userAds"), None);
        assert!(matches!(page.overlay(), Overlay::Detail(_)));
        assert_eq!(page.listings().await.len(), 1);
    }

    #[tokio::test]
    async fn posts_listing_and_refreshes() {
        let storage = Memory::new();
        storage.put_raw("currentUser", r#"{"email":"a@x.com","name":"a"}"#);
        let mut page =
            load(&storage, StaticCatalog(Some(vec![mascara()]))).await;
        assert_eq!(page.listings().await.len(), 1);

        _ = page.handle(Event::OpenSell).await;
        assert_eq!(page.overlay().panel(), Some(Panel::Sell));

        let out = page.handle(sell(" ", "50")).await;
        let notice = out.notice.unwrap();
        assert_eq!(notice.code, "MISSING_REQUIRED_FIELD");
        assert_eq!(
            notice.message,
            "All fields (Title, Description, Price, Image URL) are required!",
        );
        let out = page.handle(sell("Bike", "-3")).await;
        assert_eq!(code(&out), Some("INVALID_PRICE"));
        assert_eq!(storage.raw("userAds"), None);
        assert_eq!(page.overlay().panel(), Some(Panel::Sell));

        let out = page.handle(sell("Bike", "50")).await;
        assert_eq!(code(&out), Some("LISTING_POSTED"));
        assert_eq!(out.notice.unwrap().message, "Ad Posted Successfully!");
        assert_eq!(page.overlay().panel(), None);

        let listings = page.listings().await;
        let [posted, remote] = listings.as_slice() else {
            panic!("expected two listings");
        };
        assert!(posted.is_user_ad());
        assert_eq!(posted.title.to_string(), "Bike");
        assert_eq!(remote.title.to_string(), "Mascara");

        let cards = page.view().await.grid;
        assert!(cards.cards()[0].user_ad);
        assert_eq!(cards.cards()[0].price, "PKR 50");
    }

    #[tokio::test]
    async fn opens_details_of_known_listings_only() {
        let storage = Memory::new();
        let mut page =
            load(&storage, StaticCatalog(Some(vec![mascara()]))).await;

        let out = page.handle(Event::OpenDetail("catalog-1".to_owned())).await;
        assert!(out.notice.is_none());
        let Some(PanelView::Detail(detail)) = page.view().await.panel else {
            panic!("expected detail panel");
        };
        assert_eq!(detail.title, "Mascara");
        assert_eq!(detail.image, "https://cdn/thumb.png");

        for id in ["catalog-404", "garbage"] {
            let out = page.handle(Event::OpenDetail(id.to_owned())).await;
            let notice = out.notice.unwrap();
            assert_eq!(notice.code, "LISTING_NOT_FOUND");
            assert_eq!(notice.message, "Product details not found.");
            assert!(matches!(page.overlay(), Overlay::Detail(_)));
        }

        _ = page.handle(Event::Close).await;
        assert_eq!(page.overlay().panel(), None);
        assert!(page.view().await.panel.is_none());
    }

    #[tokio::test]
    async fn network_failure_shows_only_local_listings() {
        let storage = Memory::new();
        storage.put_raw(
            "userAds",
            &serde_json::json!([
                {
                    "id": "user-2",
                    "title": "Newer",
                    "description": "Newer description",
                    "price": 20,
                    "thumbnail": "https://img/2.png",
                    "isUserAd": true,
                },
                {
                    "id": "user-1",
                    "title": "Older",
                    "description": "Older description",
                    "price": 10,
                    "thumbnail": "https://img/1.png",
                    "isUserAd": true,
                },
            ])
            .to_string(),
        );

        let page = load(&storage, StaticCatalog(None)).await;

        let titles = page
            .listings()
            .await
            .iter()
            .map(|l| l.title.to_string())
            .collect::<Vec<_>>();
        assert_eq!(titles, ["Newer", "Older"]);
        assert_eq!(page.view().await.grid.cards().len(), 2);
    }

    #[tokio::test]
    async fn at_most_one_panel_after_every_event() {
        let storage = Memory::new();
        let mut page =
            load(&storage, StaticCatalog(Some(vec![mascara()]))).await;

        let events = [
            Event::OpenSignUp,
            auth("a@x.com", "p1"),
            Event::OpenDetail("catalog-1".to_owned()),
            Event::OpenSell,
            Event::OpenSignIn,
            auth("a@x.com", "p1"),
            Event::OpenSell,
            Event::OpenDetail("catalog-1".to_owned()),
            Event::OpenSignUp,
            Event::Close,
            Event::SignOut,
            Event::SignOut,
        ];
        for event in events {
            _ = page.handle(event).await;
            assert!(page.overlay().visible_panels().len() <= 1);
        }
        assert_eq!(page.session(), &SessionState::Anonymous);
        assert_eq!(storage.raw("currentUser"), None);
    }
}
