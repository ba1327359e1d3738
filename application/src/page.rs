//! HTML rendering of a [`PageView`].

use askama::Template;

use crate::view::{Grid, PageView, PanelView, EMPTY_GRID};

/// Title of the storefront page.
const TITLE: &str = "Storefront";

/// [`Template`] of the whole storefront page.
#[derive(Debug, Template)]
#[template(path = "page.html")]
struct Page<'v> {
    /// Title of the page.
    title: &'static str,

    /// Message shown instead of an empty [`Grid`].
    empty_grid: &'static str,

    /// Rendered [`PageView`].
    view: &'v PageView,

    /// Message of the blocking notice to show, if any.
    notice: Option<&'v str>,
}

/// Renders the provided [`PageView`] into an HTML document, showing the
/// `notice` message on top of it.
///
/// # Errors
///
/// If the template fails to render.
pub fn render(
    view: &PageView,
    notice: Option<&str>,
) -> Result<String, askama::Error> {
    Page {
        title: TITLE,
        empty_grid: EMPTY_GRID,
        view,
        notice,
    }
    .render()
}
