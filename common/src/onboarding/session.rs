//! Onboarding orchestrator.
//!
//! The UI sends `Action`s; `OnboardingState::apply` returns the next snapshot
//! together with the side effects to run. Effects are executed by `perform`
//! and their results come back as further actions, which are always applied
//! to whatever snapshot is current at that moment.

use crate::client::{decode, ApiClient, ClientError};
use crate::model::document::DocumentType;
use crate::model::entity::EntityKind;
use crate::model::file::{FileHandle, FileSlot};
use crate::model::kyc::{OcrKind, VerificationKind};
use crate::model::multipart::MultipartForm;
use crate::model::notice::Notice;
use crate::model::ocr::OcrResponse;
use crate::onboarding::assembler;
use crate::onboarding::reconcile::{self, should_trigger};
use crate::onboarding::state::{Bucket, OnboardingState, Tab, VerificationStatus};
use crate::onboarding::verify::{self, VerificationRequest};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum Action {
    SelectTab(Tab),
    SetField {
        bucket: Bucket,
        name: String,
        value: String,
    },
    SetFile {
        slot: FileSlot,
        file: Option<FileHandle>,
    },
    SetOcrEnabled {
        kind: OcrKind,
        enabled: bool,
    },
    AddDocument {
        selection: Option<DocumentType>,
        file: Option<FileHandle>,
    },
    RetypeDocument {
        id: Uuid,
        doc_type: DocumentType,
    },
    RemoveDocument(Uuid),
    ExtractionFinished {
        kind: OcrKind,
        ticket: Uuid,
        result: Result<OcrResponse, ClientError>,
    },
    Verify(VerificationKind),
    VerificationFinished {
        kind: VerificationKind,
        ticket: Uuid,
        result: Result<Value, ClientError>,
    },
    Submit,
    SubmissionFinished(Result<Value, ClientError>),
}

#[derive(Debug, Clone)]
pub enum Effect {
    /// `ticket` comes back in `ExtractionFinished` and must still be the
    /// latest one issued for `kind` when it does.
    Extract {
        kind: OcrKind,
        ticket: Uuid,
        path: &'static str,
        form: MultipartForm,
    },
    Verify {
        ticket: Uuid,
        request: VerificationRequest,
    },
    Submit {
        path: &'static str,
        form: MultipartForm,
    },
    Notify(Notice),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: OnboardingState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(state: OnboardingState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn notify(state: OnboardingState, notice: Notice) -> Self {
        Self {
            state,
            effects: vec![Effect::Notify(notice)],
        }
    }
}

impl OnboardingState {
    /// Applies one action, then starts any extraction the transition made due.
    pub fn apply(&self, action: Action) -> Transition {
        let Transition {
            mut state,
            mut effects,
        } = self.reduce(action);

        for kind in should_trigger(self, &state) {
            let Some(form) = reconcile::extraction_request(&state, kind) else {
                continue;
            };
            let ticket = Uuid::new_v4();
            state.extracting.insert(kind, ticket);
            effects.push(Effect::Extract {
                kind,
                ticket,
                path: reconcile::extraction_path(state.entity, kind),
                form,
            });
        }
        Transition { state, effects }
    }

    fn reduce(&self, action: Action) -> Transition {
        match action {
            Action::SelectTab(tab) => Transition::quiet(self.with_tab(tab)),
            Action::SetField {
                bucket,
                name,
                value,
            } => Transition::quiet(self.set_field(bucket, &name, value)),
            Action::SetFile { slot, file } => Transition::quiet(self.set_file(slot, file)),
            Action::SetOcrEnabled { kind, enabled } => {
                Transition::quiet(self.set_ocr_enabled(kind, enabled))
            }
            Action::AddDocument { selection, file } => {
                let mut next = self.clone();
                next.documents.add(selection, file);
                Transition::quiet(next)
            }
            Action::RetypeDocument { id, doc_type } => {
                let mut next = self.clone();
                next.documents.retype(id, doc_type);
                Transition::quiet(next)
            }
            Action::RemoveDocument(id) => {
                let mut next = self.clone();
                next.documents.remove(id);
                Transition::quiet(next)
            }
            Action::ExtractionFinished {
                kind,
                ticket,
                result,
            } => self.finish_extraction(kind, ticket, result),
            Action::Verify(kind) => self.start_verification(kind),
            Action::VerificationFinished {
                kind,
                ticket,
                result,
            } => self.finish_verification(kind, ticket, result),
            Action::Submit => self.start_submission(),
            Action::SubmissionFinished(result) => self.finish_submission(result),
        }
    }

    fn finish_extraction(
        &self,
        kind: OcrKind,
        ticket: Uuid,
        result: Result<OcrResponse, ClientError>,
    ) -> Transition {
        if self.extracting.get(&kind) != Some(&ticket) {
            return Transition::quiet(self.clone());
        }
        let mut next = self.clone();
        next.extracting.remove(&kind);
        match result {
            Ok(response) => {
                let (kyc, _) =
                    reconcile::merge_extraction(&next.kyc, next.entity, kind, &response);
                next.kyc = kyc;
                let notice = Notice::success(format!("{kind} extracted successfully!"));
                Transition::notify(next, notice)
            }
            Err(_) => {
                let notice = Notice::error(format!("Failed to extract {kind} data"));
                Transition::notify(next, notice)
            }
        }
    }

    fn start_verification(&self, kind: VerificationKind) -> Transition {
        if self.verification(kind) == Some(&VerificationStatus::Pending) {
            return Transition::quiet(self.clone());
        }
        match verify::build_request(self.entity, kind, &self.kyc) {
            Ok(Some(request)) => {
                let ticket = Uuid::new_v4();
                let mut next = self.clone();
                next.verifications.insert(kind, VerificationStatus::Pending);
                next.verifying.insert(kind, ticket);
                Transition {
                    state: next,
                    effects: vec![Effect::Verify { ticket, request }],
                }
            }
            Ok(None) => Transition::quiet(self.clone()),
            Err(e) => Transition::notify(
                self.clone(),
                Notice::error(format!("Error verifying {kind}: {e}")),
            ),
        }
    }

    fn finish_verification(
        &self,
        kind: VerificationKind,
        ticket: Uuid,
        result: Result<Value, ClientError>,
    ) -> Transition {
        if self.verifying.get(&kind) != Some(&ticket) {
            return Transition::quiet(self.clone());
        }
        let mut next = self.clone();
        next.verifying.remove(&kind);
        match verify::interpret(kind, result) {
            Ok(outcome) => {
                if !outcome.updates.is_empty() {
                    next.kyc = next.kyc.overwrite(kind, outcome.updates);
                }
                next.verifications
                    .insert(kind, VerificationStatus::Verified(outcome.message.clone()));
                Transition::notify(next, Notice::success(outcome.message))
            }
            Err(e) => {
                let message = e.to_string();
                next.verifications
                    .insert(kind, VerificationStatus::Failed(message.clone()));
                Transition::notify(next, Notice::error(message))
            }
        }
    }

    fn start_submission(&self) -> Transition {
        if self.submitting {
            return Transition::quiet(self.clone());
        }

        let missing = self.missing_required();
        if !missing.is_empty() {
            let mut next = self.clone();
            for spec in missing {
                next.errors
                    .insert(spec.name.to_string(), format!("{} is required", spec.label));
            }
            next.active_tab = Tab::Basic;
            return Transition::notify(next, Notice::error("Please fill in all required fields"));
        }

        match assembler::assemble(self) {
            Ok(form) => {
                let mut next = self.clone();
                next.submitting = true;
                Transition {
                    effects: vec![Effect::Submit {
                        path: next.entity.submit_path(),
                        form,
                    }],
                    state: next,
                }
            }
            Err(e) => Transition::notify(
                self.clone(),
                Notice::error(format!("Could not prepare submission: {e}")),
            ),
        }
    }

    fn finish_submission(&self, result: Result<Value, ClientError>) -> Transition {
        match result {
            Ok(_) => {
                let message = match self.entity {
                    EntityKind::Lead => "Successfully uploaded lead!",
                    EntityKind::Dealer => "Dealer onboarded successfully!",
                };
                Transition::notify(OnboardingState::new(self.entity), Notice::success(message))
            }
            Err(e) => {
                let mut next = self.clone();
                next.submitting = false;
                let reason = match e {
                    ClientError::Status { message, .. } if !message.is_empty() => message,
                    other => other.to_string(),
                };
                let label = self.entity.label().to_lowercase();
                Transition::notify(
                    next,
                    Notice::error(format!("Failed to submit {label}: {reason}")),
                )
            }
        }
    }
}

/// Runs one effect against the API and returns the action carrying its result.
/// Notices are for the UI to display and produce no follow-up action.
pub async fn perform<C: ApiClient + ?Sized>(client: &C, effect: Effect) -> Option<Action> {
    match effect {
        Effect::Extract {
            kind,
            ticket,
            path,
            form,
        } => {
            let result = client.post_multipart(path, form).await.and_then(decode);
            Some(Action::ExtractionFinished {
                kind,
                ticket,
                result,
            })
        }
        Effect::Verify { ticket, request } => {
            let result = client.post_json(request.path, request.body).await;
            Some(Action::VerificationFinished {
                kind: request.kind,
                ticket,
                result,
            })
        }
        Effect::Submit { path, form } => {
            Some(Action::SubmissionFinished(client.post_multipart(path, form).await))
        }
        Effect::Notify(_) => None,
    }
}
