//! OCR reconciliation rule.
//!
//! After every state transition `should_trigger(prev, next)` decides which
//! document kinds need an extraction: the kind's OCR switch is on, all of its
//! slots hold a file, and either a slot changed or the switch was just turned
//! on. Results are merged fill-if-empty so user corrections always survive.

use crate::client::paths;
use crate::model::entity::EntityKind;
use crate::model::file::FileSlot;
use crate::model::kyc::OcrKind;
use crate::model::multipart::MultipartForm;
use crate::model::ocr::OcrResponse;
use crate::onboarding::dates::to_input_date;
use crate::onboarding::registry;
use crate::onboarding::state::{KycInfo, OnboardingState};

pub fn required_slots(kind: OcrKind) -> &'static [FileSlot] {
    match kind {
        OcrKind::Aadhaar => &[FileSlot::AadhaarFront, FileSlot::AadhaarBack],
        OcrKind::Pan => &[FileSlot::Pan],
    }
}

pub fn extraction_path(entity: EntityKind, kind: OcrKind) -> &'static str {
    match (entity, kind) {
        (EntityKind::Dealer, OcrKind::Aadhaar) => paths::DEALER_AADHAAR_OCR,
        _ => paths::OCR_EXTRACT,
    }
}

fn is_complete(state: &OnboardingState, kind: OcrKind) -> bool {
    required_slots(kind).iter().all(|slot| state.file(*slot).is_some())
}

fn slots_changed(prev: &OnboardingState, next: &OnboardingState, kind: OcrKind) -> bool {
    required_slots(kind)
        .iter()
        .any(|slot| prev.file(*slot) != next.file(*slot))
}

/// Kinds whose extraction must start because of the `prev -> next` transition.
pub fn should_trigger(prev: &OnboardingState, next: &OnboardingState) -> Vec<OcrKind> {
    OcrKind::ALL
        .into_iter()
        .filter(|kind| {
            let switched_on = next.ocr_enabled(*kind) && !prev.ocr_enabled(*kind);
            next.ocr_enabled(*kind)
                && is_complete(next, *kind)
                && (switched_on || slots_changed(prev, next, *kind))
        })
        .collect()
}

/// Multipart body carrying exactly the slots the kind needs.
pub fn extraction_request(state: &OnboardingState, kind: OcrKind) -> Option<MultipartForm> {
    let mut form = MultipartForm::new();
    for slot in required_slots(kind) {
        form.push_file(slot.field_name(), state.file(*slot)?.clone());
    }
    Some(form)
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn date(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(to_input_date)
}

/// KYC key/value pairs carried by the response section for `kind`.
pub fn extracted_values(
    entity: EntityKind,
    kind: OcrKind,
    response: &OcrResponse,
) -> Vec<(&'static str, String)> {
    let keys = registry::kyc_keys(entity);
    let pairs = match kind {
        OcrKind::Aadhaar => match &response.aadhaar_data {
            Some(data) => vec![
                (keys.aadhaar_name, present(&data.name)),
                (keys.aadhaar_gender, present(&data.gender)),
                (keys.aadhaar_dob, date(&data.dob)),
                (keys.aadhaar_number, present(&data.aadhaar_number)),
                (keys.aadhaar_address, present(&data.address)),
            ],
            None => Vec::new(),
        },
        OcrKind::Pan => match &response.pan_data {
            Some(data) => vec![
                (keys.pan_number, present(&data.pan_number)),
                (keys.pan_dob, date(&data.dob)),
                (keys.pan_name, present(&data.name)),
                (keys.pan_father_name, present(&data.father_name)),
            ],
            None => Vec::new(),
        },
    };
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}

/// Fill-if-empty merge of an extraction into KYC info.
pub fn merge_extraction(
    kyc: &KycInfo,
    entity: EntityKind,
    kind: OcrKind,
    response: &OcrResponse,
) -> (KycInfo, usize) {
    kyc.fill_if_empty(kind, extracted_values(entity, kind, response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file::FileHandle;
    use crate::model::ocr::{AadhaarData, PanData};
    use crate::onboarding::state::Bucket;

    fn image(name: &str) -> FileHandle {
        FileHandle::new(name, "image/jpeg", name.as_bytes().to_vec())
    }

    fn aadhaar_pair(state: &OnboardingState) -> OnboardingState {
        state
            .set_file(FileSlot::AadhaarFront, Some(image("front.jpg")))
            .set_file(FileSlot::AadhaarBack, Some(image("back.jpg")))
    }

    #[test]
    fn fires_only_once_pair_is_complete() {
        let empty = OnboardingState::new(EntityKind::Lead);
        let front = empty.set_file(FileSlot::AadhaarFront, Some(image("front.jpg")));
        assert!(should_trigger(&empty, &front).is_empty());

        let both = front.set_file(FileSlot::AadhaarBack, Some(image("back.jpg")));
        assert_eq!(should_trigger(&front, &both), vec![OcrKind::Aadhaar]);
    }

    #[test]
    fn respects_the_switch() {
        let off = OnboardingState::new(EntityKind::Lead).set_ocr_enabled(OcrKind::Pan, false);
        let with_pan = off.set_file(FileSlot::Pan, Some(image("pan.jpg")));
        assert!(should_trigger(&off, &with_pan).is_empty());

        let on = with_pan.set_ocr_enabled(OcrKind::Pan, true);
        assert_eq!(should_trigger(&with_pan, &on), vec![OcrKind::Pan]);
    }

    #[test]
    fn unrelated_edits_do_not_refire() {
        let ready = aadhaar_pair(&OnboardingState::new(EntityKind::Lead));
        let edited = ready.set_field(Bucket::Kyc, "name", "Asha");
        assert!(should_trigger(&ready, &edited).is_empty());
    }

    #[test]
    fn replacing_a_slot_refires() {
        let ready = aadhaar_pair(&OnboardingState::new(EntityKind::Lead));
        let replaced = ready.set_file(FileSlot::AadhaarFront, Some(image("front-retake.jpg")));
        assert_eq!(should_trigger(&ready, &replaced), vec![OcrKind::Aadhaar]);
    }

    #[test]
    fn clearing_a_slot_never_fires() {
        let ready = aadhaar_pair(&OnboardingState::new(EntityKind::Lead));
        let cleared = ready.set_file(FileSlot::AadhaarBack, None);
        assert!(should_trigger(&ready, &cleared).is_empty());
    }

    #[test]
    fn both_kinds_can_fire_together() {
        let empty = OnboardingState::new(EntityKind::Lead);
        let all = aadhaar_pair(&empty).set_file(FileSlot::Pan, Some(image("pan.jpg")));
        assert_eq!(should_trigger(&empty, &all), vec![OcrKind::Aadhaar, OcrKind::Pan]);
    }

    #[test]
    fn request_carries_exactly_the_required_slots() {
        let state = aadhaar_pair(&OnboardingState::new(EntityKind::Lead))
            .set_file(FileSlot::Pan, Some(image("pan.jpg")))
            .set_file(FileSlot::LeadImage, Some(image("me.jpg")));

        let form = extraction_request(&state, OcrKind::Aadhaar).unwrap();
        let names: Vec<_> = form.parts().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["aadhaarFront", "aadhaarBack"]);

        let pan = extraction_request(&state, OcrKind::Pan).unwrap();
        assert_eq!(pan.len(), 1);

        let incomplete = OnboardingState::new(EntityKind::Lead);
        assert!(extraction_request(&incomplete, OcrKind::Pan).is_none());
    }

    #[test]
    fn maps_sections_to_entity_keys() {
        let response = OcrResponse {
            aadhaar_data: Some(AadhaarData {
                name: Some("A".into()),
                dob: Some("01/01/1990".into()),
                gender: Some("  ".into()),
                ..Default::default()
            }),
            pan_data: Some(PanData {
                name: Some("A".into()),
                father_name: Some("F".into()),
                dob: Some("not a date".into()),
                ..Default::default()
            }),
        };

        assert_eq!(
            extracted_values(EntityKind::Lead, OcrKind::Aadhaar, &response),
            vec![("name", "A".to_string()), ("dob", "1990-01-01".to_string())]
        );
        assert_eq!(
            extracted_values(EntityKind::Dealer, OcrKind::Aadhaar, &response),
            vec![("aadhaarName", "A".to_string()), ("aadhaarDob", "1990-01-01".to_string())]
        );
        assert_eq!(
            extracted_values(EntityKind::Dealer, OcrKind::Pan, &response),
            vec![("panName", "A".to_string()), ("panFatherName", "F".to_string())]
        );
        assert!(extracted_values(EntityKind::Lead, OcrKind::Pan, &OcrResponse::default()).is_empty());
    }

    #[test]
    fn merge_keeps_user_typed_name() {
        let response = OcrResponse {
            aadhaar_data: Some(AadhaarData {
                name: Some("A".into()),
                dob: Some("1990-01-01".into()),
                ..Default::default()
            }),
            pan_data: None,
        };

        let blank = OnboardingState::new(EntityKind::Lead);
        let (merged, _) = merge_extraction(blank.kyc(), EntityKind::Lead, OcrKind::Aadhaar, &response);
        assert_eq!(merged.get("name"), "A");

        let typed = blank.set_field(Bucket::Kyc, "name", "B");
        let (merged, filled) =
            merge_extraction(typed.kyc(), EntityKind::Lead, OcrKind::Aadhaar, &response);
        assert_eq!(merged.get("name"), "B");
        assert_eq!(merged.get("dob"), "1990-01-01");
        assert_eq!(filled, 1);
    }

    #[test]
    fn dealer_aadhaar_uses_dealer_endpoint() {
        assert_eq!(extraction_path(EntityKind::Dealer, OcrKind::Aadhaar), paths::DEALER_AADHAAR_OCR);
        assert_eq!(extraction_path(EntityKind::Dealer, OcrKind::Pan), paths::OCR_EXTRACT);
        assert_eq!(extraction_path(EntityKind::Lead, OcrKind::Aadhaar), paths::OCR_EXTRACT);
    }
}
