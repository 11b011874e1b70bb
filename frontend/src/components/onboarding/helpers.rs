use crm_common::model::file::FileSlot;
use crm_common::onboarding::assembler::payload_json;
use crm_common::onboarding::registry;
use crm_common::onboarding::OnboardingState;

use crate::helpers::compute_md5;

/// Fingerprint of the form for dirty tracking.
///
/// Hashes the JSON payload the assembler would send, plus the id of the file
/// in each slot. Slot files are not part of the payload, so without their ids
/// picking a file would not count as a change. Compared against
/// `OnboardingComponent::original_md5` in `state.rs`.
///
/// # Arguments
/// * `form` - The current onboarding snapshot.
///
/// # Returns
/// The MD5 hex digest of the fingerprint text.
pub fn fingerprint(form: &OnboardingState) -> String {
    let mut input = payload_json(form).unwrap_or_default();
    for slot in registry::file_slots(form.entity()) {
        if let Some(file) = form.file(*slot) {
            input.push_str(&format!("|{}={}", slot.field_name(), file.id()));
        }
    }
    compute_md5(&input)
}

/// Slots shown on the basic tab: those no KYC section claims.
pub fn basic_slots(form: &OnboardingState) -> Vec<FileSlot> {
    let sections = registry::kyc_sections(form.entity());
    registry::file_slots(form.entity())
        .iter()
        .copied()
        .filter(|slot| !sections.iter().any(|section| section.slots.contains(slot)))
        .collect()
}

/// Human-readable file size for the slot and document lists in `view.rs`.
pub fn format_size(bytes: usize) -> String {
    match bytes {
        0..=1023 => format!("{bytes} B"),
        1024..=1_048_575 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}
