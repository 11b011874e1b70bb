//! Same-origin relay for the CRM API.
//!
//! The console only ever calls `/api/...` on this server. Requests are replayed
//! against the upstream with their body, content type and credentials; the
//! upstream status and body are returned unchanged.

use super::{api_path, Upstream};
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use log::{info, warn};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Unsupported method {0}")]
    Method(String),
    #[error("CRM API unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Method(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

pub async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    upstream: web::Data<Upstream>,
) -> Result<HttpResponse, RelayError> {
    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|_| RelayError::Method(req.method().to_string()))?;

    let mut request = upstream.request(method, api_path(&req), &req);
    if let Some(content_type) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        request = request.header("content-type", content_type);
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    respond(&req, request).await
}

/// Sends an upstream request and mirrors its reply.
pub async fn respond(
    req: &HttpRequest,
    request: reqwest::RequestBuilder,
) -> Result<HttpResponse, RelayError> {
    let reply = match request.send().await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("{} {} failed: {}", req.method(), req.path(), e);
            return Err(e.into());
        }
    };

    let status = StatusCode::from_u16(reply.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = reply
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = reply.bytes().await?;

    info!("{} {} -> {}", req.method(), req.path(), status.as_u16());

    let mut response = HttpResponse::build(status);
    if let Some(content_type) = content_type {
        response.content_type(content_type);
    }
    Ok(response.body(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn errors_render_as_json_messages() {
        let err = RelayError::Method("BREW".into());
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.to_string(), "Unsupported method BREW");
    }

    #[actix_web::test]
    async fn unreachable_upstream_is_a_bad_gateway() {
        use actix_web::{test, App};

        // Nothing listens on the discard port.
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Upstream::new("http://127.0.0.1:9")))
                .service(crate::services::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"email":"a@b.co","password":"x"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().starts_with("CRM API unreachable"));
    }
}
