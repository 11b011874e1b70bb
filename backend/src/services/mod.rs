pub mod relay;
pub mod submissions;

use actix_web::{web, HttpRequest, Scope};
use crm_common::client::API_PREFIX;
use crm_common::model::entity::EntityKind;

/// The CRM API the console talks to through this server.
#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Upstream URL for a path below the API prefix, keeping the query string.
    pub fn url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    /// Starts an upstream request carrying the caller's credentials.
    pub fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        req: &HttpRequest,
    ) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.url(path, req.query_string()));
        for name in ["authorization", "accept"] {
            if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
                builder = builder.header(name, value);
            }
        }
        builder
    }
}

/// Path of an incoming request below the API prefix.
pub fn api_path(req: &HttpRequest) -> &str {
    req.path().strip_prefix(API_PREFIX).unwrap_or_else(|| req.path())
}

/// Every route under `/api`. Lead and dealer submissions are checked locally
/// before they are relayed; everything else goes straight through.
pub fn configure_routes() -> Scope {
    web::scope(API_PREFIX)
        .service(
            web::resource(EntityKind::Lead.submit_path())
                .route(web::post().to(submissions::lead))
                .default_service(web::to(relay::forward)),
        )
        .service(
            web::resource(EntityKind::Dealer.submit_path())
                .route(web::post().to(submissions::dealer))
                .default_service(web::to(relay::forward)),
        )
        .default_service(web::to(relay::forward))
}
