//! Submission assembler.
//!
//! Layout of the multipart body:
//! - `payload`: JSON `{ basicInfo, kycInfo, documentsMeta }`
//! - one part per filled single-file slot, under the slot's field name
//! - one `documents` part per supporting document, in the same order as
//!   `documentsMeta`. The server pairs them by position, never by filename.

use crate::model::document::DocumentMeta;
use crate::model::multipart::MultipartForm;
use crate::onboarding::registry;
use crate::onboarding::state::{FieldMap, OnboardingState};
use serde::Serialize;

pub const PAYLOAD_FIELD: &str = "payload";
pub const DOCUMENTS_FIELD: &str = "documents";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload<'a> {
    pub basic_info: &'a FieldMap,
    pub kyc_info: &'a FieldMap,
    pub documents_meta: Vec<DocumentMeta>,
}

impl<'a> SubmissionPayload<'a> {
    pub fn from_state(state: &'a OnboardingState) -> Self {
        Self {
            basic_info: state.basic(),
            kyc_info: state.kyc().fields(),
            documents_meta: state.documents().metas(),
        }
    }
}

/// JSON text of the `payload` part.
pub fn payload_json(state: &OnboardingState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SubmissionPayload::from_state(state))
}

pub fn assemble(state: &OnboardingState) -> Result<MultipartForm, serde_json::Error> {
    let mut form = MultipartForm::new();
    form.push_text(PAYLOAD_FIELD, payload_json(state)?);

    for slot in registry::file_slots(state.entity()) {
        if let Some(file) = state.file(*slot) {
            form.push_file(slot.field_name(), file.clone());
        }
    }

    for record in state.documents().records() {
        form.push_file(DOCUMENTS_FIELD, record.file.clone());
    }
    Ok(form)
}
