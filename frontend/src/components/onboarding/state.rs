//! Component state for the onboarding form.
//!
//! The form data itself lives in `OnboardingState` from the shared crate;
//! this struct only adds what the documents tab needs before a record exists
//! and the fingerprint used for dirty tracking.

use crm_common::model::document::{DocumentType, OTHER_DOCUMENT};
use crm_common::model::entity::EntityKind;
use crm_common::model::file::FileHandle;
use crm_common::onboarding::registry;
use crm_common::onboarding::OnboardingState;

use super::helpers::fingerprint;

pub struct OnboardingComponent {
    pub form: OnboardingState,

    /// Catalog value picked in the documents tab, empty until one is chosen.
    pub document_type: String,

    /// Free-text name used when the "other" type is picked.
    pub custom_document_name: String,

    /// File picked for the next document, not yet added.
    pub document_file: Option<FileHandle>,

    /// MD5 of the form fingerprint right after creation or the last successful submission.
    pub original_md5: String,
}

impl OnboardingComponent {
    pub fn new(entity: EntityKind) -> Self {
        let form = OnboardingState::new(entity);
        let original_md5 = fingerprint(&form);
        Self {
            form,
            document_type: String::new(),
            custom_document_name: String::new(),
            document_file: None,
            original_md5,
        }
    }

    pub fn is_dirty(&self) -> bool {
        fingerprint(&self.form) != self.original_md5
    }

    /// The documents-tab selection as a document type, if one is picked.
    pub fn selected_document_type(&self) -> Option<DocumentType> {
        if self.document_type.is_empty() {
            return None;
        }
        if self.document_type == OTHER_DOCUMENT {
            return Some(DocumentType::custom(&self.custom_document_name));
        }
        registry::document_options(self.form.entity())
            .iter()
            .find(|choice| choice.value == self.document_type)
            .map(|choice| DocumentType::new(choice.value, choice.label))
    }

    pub fn clear_document_picker(&mut self) {
        self.document_type.clear();
        self.custom_document_name.clear();
        self.document_file = None;
    }
}
