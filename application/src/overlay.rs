//! [`Overlay`] state machine.

use derive_more::{Debug, Display, Error};
use service::domain::{listing, Listing};

use crate::session::SessionState;

/// Modal overlay of the storefront.
///
/// At most one panel is ever visible: entering a state replaces the previous
/// one wholesale.
#[derive(Clone, Debug, Default)]
pub enum Overlay {
    /// No panel is shown.
    #[default]
    Hidden,

    /// Sign up or sign in panel is shown.
    Auth(AuthPanel),

    /// Sell panel is shown.
    Sell,

    /// Details of a [`Listing`] are shown.
    Detail(listing::Id),
}

impl Overlay {
    /// Opens the [`AuthPanel`] in the provided [`AuthMode`] with an empty
    /// form.
    pub fn open_auth(&mut self, mode: AuthMode) {
        *self = Self::Auth(AuthPanel {
            mode,
            email: String::new(),
        });
    }

    /// Opens the sell panel with an empty form.
    ///
    /// # Errors
    ///
    /// With [`Rejected`] if nobody is signed in, leaving this [`Overlay`]
    /// unchanged.
    pub fn open_sell(
        &mut self,
        session: &SessionState,
    ) -> Result<(), Rejected> {
        if !session.sell_enabled() {
            return Err(Rejected);
        }
        *self = Self::Sell;
        Ok(())
    }

    /// Opens details of the [`Listing`] with the provided [`listing::Id`], if
    /// the `lookup` finds it.
    ///
    /// # Errors
    ///
    /// With [`ListingNotFound`] if the `lookup` finds nothing, leaving this
    /// [`Overlay`] unchanged.
    pub fn open_detail(
        &mut self,
        id: listing::Id,
        lookup: impl FnOnce(&listing::Id) -> Option<Listing>,
    ) -> Result<Listing, ListingNotFound> {
        let listing = lookup(&id).ok_or(ListingNotFound)?;
        *self = Self::Detail(id);
        Ok(listing)
    }

    /// Hides any shown panel.
    pub fn close(&mut self) {
        *self = Self::Hidden;
    }

    /// Returns the currently visible [`Panel`], if any.
    #[must_use]
    pub fn panel(&self) -> Option<Panel> {
        match self {
            Self::Hidden => None,
            Self::Auth(_) => Some(Panel::Auth),
            Self::Sell => Some(Panel::Sell),
            Self::Detail(_) => Some(Panel::Detail),
        }
    }

    /// Returns all the currently visible [`Panel`]s.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<Panel> {
        self.panel().into_iter().collect()
    }
}

/// Panel of an [`Overlay`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Panel {
    /// Sign up or sign in panel.
    Auth,

    /// Sell panel.
    Sell,

    /// Listing details panel.
    Detail,
}

/// Mode of an [`AuthPanel`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthMode {
    /// Registering a new account.
    SignUp,

    /// Signing in to the registered account.
    SignIn,
}

impl AuthMode {
    /// Returns the tag the auth form is marked with.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SignUp => "signup",
            Self::SignIn => "signin",
        }
    }

    /// Returns the title of the [`AuthPanel`].
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SignUp => "Sign Up (New Account)",
            Self::SignIn => "Sign In (Existing User)",
        }
    }

    /// Returns the label of the [`AuthPanel`] submit control.
    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::SignUp => "Sign Up",
            Self::SignIn => "Sign In",
        }
    }
}

/// Sign up or sign in panel.
#[derive(Clone, Debug)]
pub struct AuthPanel {
    /// [`AuthMode`] of this panel.
    pub mode: AuthMode,

    /// Email kept in the form between submissions.
    pub email: String,
}

/// Submitted credentials.
#[derive(Clone, Debug, Default)]
pub struct AuthForm {
    /// Entered email.
    pub email: String,

    /// Entered password.
    #[debug(skip)]
    pub password: String,
}

/// Submitted details of a new listing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SellForm {
    /// Entered title.
    pub title: String,

    /// Entered description.
    pub description: String,

    /// Entered price.
    pub price: String,

    /// Entered image URL.
    pub image_url: String,
}

/// Sell panel cannot be opened without a session.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("Sign in to sell")]
pub struct Rejected;

/// [`Listing`] to show the details of doesn't exist.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("Product details not found.")]
pub struct ListingNotFound;
