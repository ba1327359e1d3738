//! HTTP [`Catalog`] implementation.

use common::operations::{By, Select};
use serde::Deserialize;
use tracerr::Traced;
use url::Url;

use crate::{
    domain::{listing, Listing},
    infra::{
        catalog::{self, Page},
        Catalog,
    },
};

/// [`Catalog`] fetching products over HTTP.
///
/// Requests `GET {base_url}/products?limit={limit}&skip={skip}` and expects a
/// `{"products": [..]}` JSON body.
#[derive(Clone, Debug)]
pub struct Http {
    /// Client performing requests.
    client: reqwest::Client,

    /// Base [`Url`] of the remote catalog.
    base_url: Url,
}

impl Http {
    /// Creates a new [`Http`] catalog with the provided `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Builds the products [`Url`] of the provided [`Page`].
    ///
    /// # Errors
    ///
    /// With [`catalog::Error::InvalidUrl`] if the base [`Url`] cannot have
    /// path segments.
    fn products_url(&self, page: Page) -> Result<Url, catalog::Error> {
        let mut url = self.base_url.clone();
        _ = url
            .path_segments_mut()
            .map_err(|()| catalog::Error::InvalidUrl)?
            .pop_if_empty()
            .push("products");
        _ = url
            .query_pairs_mut()
            .append_pair("limit", &page.limit.to_string())
            .append_pair("skip", &page.skip.to_string());
        Ok(url)
    }
}

/// Body of a products response.
#[derive(Debug, Deserialize)]
struct Products {
    /// Returned products.
    products: Vec<listing::Remote>,
}

impl Catalog<Select<By<Vec<Listing>, Page>>> for Http {
    type Ok = Vec<Listing>;
    type Err = Traced<catalog::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Page>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self
            .products_url(by.into_inner())
            .map_err(tracerr::wrap!())?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> catalog::Error))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(tracerr::new!(catalog::Error::Status(
                status.as_u16()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(tracerr::from_and_wrap!(=> catalog::Error))?;
        let Products { products } = serde_json::from_str(&body)
            .map_err(tracerr::from_and_wrap!(=> catalog::Error))?;

        Ok(products.into_iter().map(|listing::Remote(l)| l).collect())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use url::Url;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{
        domain::listing,
        infra::{
            catalog::{self, Page},
            Catalog as _,
        },
    };

    use super::Http;

    fn catalog(server: &MockServer) -> Http {
        Http::new(Url::parse(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn fetches_first_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("limit", "2"))
            .and(query_param("skip", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "products": [{
                        "id": 1,
                        "title": "Mascara",
                        "description": "Popular mascara.",
                        "price": 9.99,
                        "thumbnail": "https://cdn/1.png",
                        "images": ["https://cdn/1-1.png"],
                        "brand": "Essence",
                    }, {
                        "id": 2,
                        "title": "Eyeshadow",
                        "description": "Palette.",
                        "price": 19.99,
                        "thumbnail": "https://cdn/2.png",
                        "isUserAd": true,
                    }],
                    "total": 194,
                    "skip": 0,
                    "limit": 2,
                }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let listings = catalog(&server)
            .execute(Select(By::new(Page::first(2))))
            .await
            .unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, listing::Id::Remote("1".to_owned()));
        assert_eq!(listings[0].price.to_string(), "9.99");
        assert_eq!(listings[1].id.to_string(), "catalog-2");
        assert!(listings.iter().all(|l| !l.is_user_ad()));
    }

    #[tokio::test]
    async fn keeps_base_url_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"products": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = Http::new(
            Url::parse(&format!("{}/api/", server.uri())).unwrap(),
        );
        let listings = catalog
            .execute(Select(By::new(Page::first(32))))
            .await
            .unwrap();

        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn errors_on_failed_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = catalog(&server)
            .execute(Select(By::new(Page::first(32))))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), catalog::Error::Status(503)));
    }

    #[tokio::test]
    async fn errors_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html></html>"),
            )
            .mount(&server)
            .await;

        let err = catalog(&server)
            .execute(Select(By::new(Page::first(32))))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            catalog::Error::MalformedResponse(_),
        ));
    }

    #[tokio::test]
    async fn errors_when_unreachable() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let url = Url::parse(&format!("http://{addr}")).unwrap();

        let err = Http::new(url)
            .execute(Select(By::new(Page::first(32))))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), catalog::Error::Network(_)));
    }
}
