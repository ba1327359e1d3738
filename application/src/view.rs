//! View models of the storefront page.

use common::Currency;
use service::domain::Listing;

use crate::overlay::AuthMode;

/// Image shown when a [`Card`] thumbnail fails to load.
pub const PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/150?text=No+Image";

/// Number of description characters shown in a [`Card`].
pub const EXCERPT_CHARS: usize = 100;

/// Message shown instead of an empty [`Grid`].
pub const EMPTY_GRID: &str = "No products to display.";

/// Whole storefront page.
#[derive(Clone, Debug)]
pub struct PageView {
    /// [`AuthControls`] in the header.
    pub controls: AuthControls,

    /// [`Grid`] of products.
    pub grid: Grid,

    /// Visible overlay panel, if any.
    pub panel: Option<PanelView>,
}

/// Header controls depending on the session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthControls {
    /// [`Profile`] of the signed in user.
    ///
    /// Sign up and sign in controls are shown instead, if [`None`].
    pub profile: Option<Profile>,

    /// Indicator whether the sell control is enabled.
    pub sell_enabled: bool,
}

/// Profile details of the signed in user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    /// Greeting of the user, like `Hello, {name}`.
    pub greeting: String,

    /// Parenthesized email of the user.
    pub email: String,
}

/// Grid of product [`Card`]s.
#[derive(Clone, Debug)]
pub enum Grid {
    /// There are no products.
    Empty,

    /// Products to display, in order.
    Cards(Vec<Card>),
}

impl Grid {
    /// Returns the [`Card`]s of this [`Grid`].
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }
}

/// Product card of a [`Grid`].
#[derive(Clone, Debug)]
pub struct Card {
    /// ID of the [`Listing`] this [`Card`] is bound to.
    pub id: String,

    /// Title of the product.
    pub title: String,

    /// Formatted price of the product.
    pub price: String,

    /// Beginning of the product description.
    pub excerpt: String,

    /// Thumbnail URL of the product.
    pub thumbnail: String,

    /// Image URL to fall back to if the thumbnail fails to load.
    pub fallback_thumbnail: &'static str,

    /// Indicator whether the product was posted by the user.
    pub user_ad: bool,
}

impl Card {
    /// Projects the provided [`Listing`] into a [`Card`].
    #[must_use]
    pub fn new(listing: &Listing, currency: Currency) -> Self {
        Self {
            id: listing.id.to_string(),
            title: listing.title.to_string(),
            price: listing.price.in_currency(currency).to_string(),
            excerpt: format!(
                "{}...",
                listing.description.excerpt(EXCERPT_CHARS),
            ),
            thumbnail: listing.thumbnail.to_string(),
            fallback_thumbnail: PLACEHOLDER_IMAGE,
            user_ad: listing.is_user_ad(),
        }
    }
}

/// Projects the provided [`Listing`]s into a [`Grid`].
#[must_use]
pub fn cards(listings: &[Listing], currency: Currency) -> Grid {
    if listings.is_empty() {
        return Grid::Empty;
    }
    Grid::Cards(listings.iter().map(|l| Card::new(l, currency)).collect())
}

/// Details of a single [`Listing`].
#[derive(Clone, Debug)]
pub struct Detail {
    /// Title of the product.
    pub title: String,

    /// Main image URL of the product.
    pub image: String,

    /// Formatted price of the product.
    pub price: String,

    /// Full description of the product.
    pub description: String,

    /// Brand of the product, if known.
    pub brand: Option<String>,

    /// Category of the product, if known.
    pub category: Option<String>,
}

/// Projects the provided [`Listing`] into its [`Detail`].
#[must_use]
pub fn detail(listing: &Listing, currency: Currency) -> Detail {
    Detail {
        title: listing.title.to_string(),
        image: listing.primary_image().to_string(),
        price: listing.price.in_currency(currency).to_string(),
        description: listing.description.to_string(),
        brand: listing.brand.as_ref().map(ToString::to_string),
        category: listing.category.as_ref().map(ToString::to_string),
    }
}

/// Visible overlay panel.
#[derive(Clone, Debug)]
pub enum PanelView {
    /// Sign up or sign in panel.
    Auth(AuthView),

    /// Sell panel.
    Sell,

    /// Product details panel.
    Detail(Detail),
}

/// Sign up or sign in panel.
#[derive(Clone, Debug)]
pub struct AuthView {
    /// Tag of the auth form.
    pub tag: &'static str,

    /// Title of the panel.
    pub title: &'static str,

    /// Label of the submit control.
    pub submit_label: &'static str,

    /// Entered email.
    pub email: String,
}

impl AuthView {
    /// Creates a new [`AuthView`] in the provided [`AuthMode`].
    #[must_use]
    pub fn new(mode: AuthMode, email: impl Into<String>) -> Self {
        Self {
            tag: mode.tag(),
            title: mode.title(),
            submit_label: mode.submit_label(),
            email: email.into(),
        }
    }
}
