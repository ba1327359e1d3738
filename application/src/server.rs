//! HTTP [`Router`] serving the [`Storefront`] page.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse as _, Response},
    routing::get,
    Form, Router,
};
use derive_more::Debug;
use serde::Deserialize;
use service::infra::Http;
use tokio::sync::Mutex;
use tracing as log;

use crate::{
    overlay::{AuthForm, SellForm},
    page,
    store::Store,
    view::PageView,
    Event, Notice, Storefront,
};

/// [`Storefront`] served over HTTP.
pub type App = Storefront<Store, Http>;

/// [`App`] shared between requests.
pub type Shared = Arc<Mutex<App>>;

/// Creates a new [`Router`] serving the provided [`App`].
///
/// `GET /` loads the page again. `POST /` dispatches the submitted
/// [`Action`] and renders its outcome.
pub fn router(app: App) -> Router {
    Router::new()
        .route("/", get(show).post(submit))
        .with_state(Arc::new(Mutex::new(app)))
}

/// Form submitted by a control of the page.
///
/// The `action` names the [`Event`], the other fields carry its payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Name of the [`Event`].
    pub action: String,

    /// ID of the product card.
    pub id: String,

    /// Email of the auth form.
    pub email: String,

    /// Password of the auth form.
    #[debug(skip)]
    pub password: String,

    /// Title of the sell form.
    pub title: String,

    /// Description of the sell form.
    pub description: String,

    /// Price of the sell form.
    pub price: String,

    /// Image URL of the sell form.
    pub image_url: String,
}

impl Action {
    /// Converts this [`Action`] into the [`Event`] it names, if any.
    #[must_use]
    pub fn into_event(self) -> Option<Event> {
        let Self {
            action,
            id,
            email,
            password,
            title,
            description,
            price,
            image_url,
        } = self;

        Some(match action.as_str() {
            "open-sign-up" => Event::OpenSignUp,
            "open-sign-in" => Event::OpenSignIn,
            "open-sell" => Event::OpenSell,
            "open-detail" => Event::OpenDetail(id),
            "close" => Event::Close,
            "submit-auth" => Event::SubmitAuth(AuthForm { email, password }),
            "submit-sell" => Event::SubmitSell(SellForm {
                title,
                description,
                price,
                image_url,
            }),
            "sign-out" => Event::SignOut,
            _ => return None,
        })
    }
}

/// Loads the page again and renders it.
pub async fn show(State(app): State<Shared>) -> Response {
    let mut app = app.lock().await;
    app.reload().await;
    respond(&app.view().await, None)
}

/// Dispatches the submitted [`Action`] and renders the page with the
/// [`Notice`] of its outcome.
pub async fn submit(
    State(app): State<Shared>,
    Form(action): Form<Action>,
) -> Response {
    let name = action.action.clone();
    let Some(event) = action.into_event() else {
        log::debug!("unknown action `{name}`");
        return (StatusCode::BAD_REQUEST, "unknown action").into_response();
    };

    let mut app = app.lock().await;
    let outcome = app.handle(event).await;
    respond(&app.view().await, outcome.notice.as_ref())
}

/// Renders the [`PageView`] with the [`Notice`], if any.
fn respond(view: &PageView, notice: Option<&Notice>) -> Response {
    if let Some(notice) = notice {
        log::info!(code = notice.code, "{}", notice.message);
    }
    match page::render(view, notice.map(|n| n.message.as_str())) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::error!("failed to render page: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
