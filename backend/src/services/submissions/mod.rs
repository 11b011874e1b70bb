//! Lead and dealer submissions.
//!
//! The multipart body is read into a `MultipartForm`, checked, and rebuilt for
//! the upstream in the same part order. The upstream pairs the Nth
//! `documents` file with `documentsMeta[N]`, so a body whose counts disagree
//! is rejected here instead of creating a record with mislabelled documents.

use super::relay::respond;
use super::Upstream;
use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use crm_common::model::document::DocumentMeta;
use crm_common::model::entity::EntityKind;
use crm_common::model::file::FileHandle;
use crm_common::model::multipart::{MultipartForm, Part};
use crm_common::onboarding::assembler::{DOCUMENTS_FIELD, PAYLOAD_FIELD};
use futures_util::StreamExt;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Part {0} is not valid text")]
    NotText(String),
    #[error("Missing payload part")]
    MissingPayload,
    #[error("Invalid payload part: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("documentsMeta lists {meta} documents but {files} were attached")]
    DocumentCountMismatch { meta: usize, files: usize },
    #[error("Submission exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
    #[error("Part {name} has an invalid content type: {content_type}")]
    BadContentType { name: String, content_type: String },
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

/// Cap on the total bytes read from one submission body.
///
/// `PayloadConfig` does not apply to the multipart extractor, so `read_form`
/// enforces this one itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionLimit(pub usize);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadDocuments {
    #[serde(default)]
    documents_meta: Vec<DocumentMeta>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub parts: usize,
    pub documents: usize,
}

/// Checks that the body carries a JSON payload whose `documentsMeta` has one
/// entry per `documents` part.
pub fn check_submission(form: &MultipartForm) -> Result<SubmissionSummary, SubmissionError> {
    let payload = form.text(PAYLOAD_FIELD).ok_or(SubmissionError::MissingPayload)?;
    let payload: PayloadDocuments = serde_json::from_str(payload)?;

    let files = form
        .parts()
        .iter()
        .filter(|part| part.name() == DOCUMENTS_FIELD)
        .count();
    let meta = payload.documents_meta.len();
    if meta != files {
        return Err(SubmissionError::DocumentCountMismatch { meta, files });
    }

    Ok(SubmissionSummary {
        parts: form.len(),
        documents: files,
    })
}

/// Reads every part. Parts with a filename become files, the rest text.
///
/// Stops with `TooLarge` as soon as the part bodies together pass `limit`.
pub async fn read_form(
    mut payload: Multipart,
    limit: SubmissionLimit,
) -> Result<MultipartForm, SubmissionError> {
    let mut form = MultipartForm::new();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => (String::new(), None),
        };
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            total = total.saturating_add(chunk.len());
            if total > limit.0 {
                return Err(SubmissionError::TooLarge { limit: limit.0 });
            }
            bytes.extend_from_slice(&chunk);
        }

        match filename {
            Some(filename) => form.push_file(name, FileHandle::new(filename, content_type, bytes)),
            None => {
                let value = String::from_utf8(bytes).map_err(|_| SubmissionError::NotText(name.clone()))?;
                form.push_text(name, value);
            }
        }
    }
    Ok(form)
}

/// Rebuilds the body for the upstream, part for part.
fn upstream_form(form: &MultipartForm) -> Result<reqwest::multipart::Form, SubmissionError> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.parts() {
        out = match part {
            Part::Text { name, value } => out.text(name.clone(), value.clone()),
            Part::File { name, file } => {
                let body = reqwest::multipart::Part::bytes(file.bytes().to_vec())
                    .file_name(file.name().to_string())
                    .mime_str(file.content_type())
                    .map_err(|_| SubmissionError::BadContentType {
                        name: name.clone(),
                        content_type: file.content_type().to_string(),
                    })?;
                out.part(name.clone(), body)
            }
        };
    }
    Ok(out)
}

async fn submit(
    entity: EntityKind,
    req: HttpRequest,
    payload: Multipart,
    upstream: web::Data<Upstream>,
    limit: web::Data<SubmissionLimit>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = match read_form(payload, *limit.get_ref()).await {
        Ok(form) => form,
        Err(e) => {
            warn!("unreadable {} submission: {}", entity.label(), e);
            return Err(e.into());
        }
    };
    let summary = match check_submission(&form) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("rejected {} submission: {}", entity.label(), e);
            return Err(e.into());
        }
    };
    info!(
        "relaying {} submission: {} parts, {} documents",
        entity.label(),
        summary.parts,
        summary.documents
    );

    let body = upstream_form(&form)?;
    let request = upstream
        .request(reqwest::Method::POST, entity.submit_path(), &req)
        .multipart(body);
    Ok(respond(&req, request).await?)
}

pub async fn lead(
    req: HttpRequest,
    payload: Multipart,
    upstream: web::Data<Upstream>,
    limit: web::Data<SubmissionLimit>,
) -> Result<HttpResponse, actix_web::Error> {
    submit(EntityKind::Lead, req, payload, upstream, limit).await
}

pub async fn dealer(
    req: HttpRequest,
    payload: Multipart,
    upstream: web::Data<Upstream>,
    limit: web::Data<SubmissionLimit>,
) -> Result<HttpResponse, actix_web::Error> {
    submit(EntityKind::Dealer, req, payload, upstream, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{test, App};
    use pretty_assertions::assert_eq;

    const BOUNDARY: &str = "crm-test-boundary";

    fn form_with(meta: &[&str], documents: usize) -> MultipartForm {
        let metas: Vec<_> = meta
            .iter()
            .map(|t| json!({ "type": t, "filename": format!("{t}.pdf") }))
            .collect();
        let mut form = MultipartForm::new();
        form.push_text(
            PAYLOAD_FIELD,
            json!({ "basicInfo": {}, "kycInfo": {}, "documentsMeta": metas }).to_string(),
        );
        form.push_file("pan", FileHandle::new("pan.jpg", "image/jpeg", b"jpg".to_vec()));
        for i in 0..documents {
            form.push_file(
                DOCUMENTS_FIELD,
                FileHandle::new(format!("doc{i}.pdf"), "application/pdf", b"pdf".to_vec()),
            );
        }
        form
    }

    #[::core::prelude::v1::test]
    fn matching_counts_pass() {
        let summary = check_submission(&form_with(&["bank_statement", "itr"], 2)).unwrap();
        assert_eq!(summary, SubmissionSummary { parts: 4, documents: 2 });

        let summary = check_submission(&form_with(&[], 0)).unwrap();
        assert_eq!(summary.documents, 0);
    }

    #[::core::prelude::v1::test]
    fn count_mismatch_is_rejected() {
        let err = check_submission(&form_with(&["bank_statement"], 2)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "documentsMeta lists 1 documents but 2 were attached"
        );
    }

    #[::core::prelude::v1::test]
    fn payload_must_be_present_and_json() {
        let mut form = MultipartForm::new();
        form.push_file(DOCUMENTS_FIELD, FileHandle::new("a.pdf", "application/pdf", b"x".to_vec()));
        assert!(matches!(check_submission(&form), Err(SubmissionError::MissingPayload)));

        let mut form = MultipartForm::new();
        form.push_text(PAYLOAD_FIELD, "{not json");
        assert!(matches!(check_submission(&form), Err(SubmissionError::InvalidPayload(_))));
    }

    #[::core::prelude::v1::test]
    fn bad_part_content_type_is_a_client_error() {
        let mut form = MultipartForm::new();
        form.push_file("pan", FileHandle::new("pan.jpg", "not a mime", b"x".to_vec()));
        let err = upstream_form(&form).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Part pan has an invalid content type: not a mime"
        );
        assert!(upstream_form(&form_with(&["itr"], 1)).is_ok());
    }

    fn multipart_body(meta_count: usize, documents: usize) -> String {
        let metas: Vec<_> = (0..meta_count)
            .map(|i| json!({ "type": "itr", "filename": format!("itr{i}.pdf") }))
            .collect();
        let payload = json!({ "basicInfo": {"name": "Ravi"}, "kycInfo": {}, "documentsMeta": metas });

        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"payload\"\r\n\r\n{payload}\r\n"
        );
        for i in 0..documents {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"documents\"; filename=\"itr{i}.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn submission(uri: &str, body: String) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn mismatched_dealer_submission_never_reaches_upstream() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Upstream::new("http://127.0.0.1:9")))
                .app_data(web::Data::new(SubmissionLimit(1024 * 1024)))
                .service(crate::services::configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, submission("/api/dealers", multipart_body(1, 2)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "documentsMeta lists 1 documents but 2 were attached"
        );
    }

    #[actix_web::test]
    async fn body_over_the_limit_is_refused() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Upstream::new("http://127.0.0.1:9")))
                .app_data(web::Data::new(SubmissionLimit(32)))
                .service(crate::services::configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, submission("/api/leads", multipart_body(1, 1)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Submission exceeds the 32 byte limit");
    }
}
