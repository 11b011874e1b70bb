//! Session snapshot for one onboarding form.
//!
//! Every update returns a new `OnboardingState`. Buckets sit behind `Arc`s and
//! are only copied when touched, so unrelated structure is shared between
//! snapshots. No validation happens here; required checks run at submit time.

use crate::model::entity::EntityKind;
use crate::model::file::{FileHandle, FileSlot};
use crate::model::kyc::{OcrKind, Provenance, VerificationKind};
use crate::onboarding::accumulator::DocumentList;
use crate::onboarding::registry;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tab {
    Basic,
    Kyc,
    Documents,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Basic, Tab::Kyc, Tab::Documents];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Basic => "Basic Info",
            Tab::Kyc => "KYC",
            Tab::Documents => "Documents",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Basic,
    Kyc,
}

/// String-keyed scalar values. Missing keys read as the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    values: Arc<BTreeMap<String, String>>,
}

impl FieldMap {
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).trim().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy with one key replaced; every other key is untouched.
    pub fn with(&self, name: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.values).insert(name.to_string(), value.into());
        next
    }

    pub fn shares_storage_with(&self, other: &FieldMap) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.as_ref().serialize(serializer)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: Arc::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }
}

/// KYC values plus where each one came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KycInfo {
    fields: FieldMap,
    provenance: Arc<BTreeMap<String, Provenance>>,
}

impl KycInfo {
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn provenance(&self, name: &str) -> Option<Provenance> {
        self.provenance.get(name).copied()
    }

    fn with(&self, name: &str, value: String, source: Provenance) -> Self {
        let mut provenance = Arc::clone(&self.provenance);
        Arc::make_mut(&mut provenance).insert(name.to_string(), source);
        Self {
            fields: self.fields.with(name, value),
            provenance,
        }
    }

    pub fn with_user_value(&self, name: &str, value: impl Into<String>) -> Self {
        self.with(name, value.into(), Provenance::User)
    }

    /// Writes each value only where the field is currently empty.
    /// Empty incoming values are skipped. Returns the merged info and the
    /// number of fields that were filled.
    pub fn fill_if_empty<'a>(
        &self,
        kind: OcrKind,
        values: impl IntoIterator<Item = (&'a str, String)>,
    ) -> (Self, usize) {
        let mut next = self.clone();
        let mut filled = 0;
        for (name, value) in values {
            if value.is_empty() || !next.get(name).is_empty() {
                continue;
            }
            next = next.with(name, value, Provenance::Extracted(kind));
            filled += 1;
        }
        (next, filled)
    }

    /// Writes every value unconditionally.
    pub fn overwrite<'a>(
        &self,
        kind: VerificationKind,
        values: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Self {
        values.into_iter().fold(self.clone(), |info, (name, value)| {
            info.with(name, value, Provenance::Verified(kind))
        })
    }
}

/// Progress of a user-triggered verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingState {
    pub(crate) entity: EntityKind,
    pub(crate) active_tab: Tab,
    pub(crate) basic: FieldMap,
    pub(crate) kyc: KycInfo,
    pub(crate) slots: Arc<BTreeMap<FileSlot, FileHandle>>,
    pub(crate) documents: DocumentList,
    pub(crate) ocr_enabled: BTreeMap<OcrKind, bool>,
    /// Ticket of the latest extraction in flight per kind. Replies carrying any
    /// other ticket belong to superseded files or to a form since reset.
    pub(crate) extracting: BTreeMap<OcrKind, Uuid>,
    pub(crate) verifications: BTreeMap<VerificationKind, VerificationStatus>,
    /// Ticket of the pending lookup per kind, same rule as `extracting`.
    pub(crate) verifying: BTreeMap<VerificationKind, Uuid>,
    pub(crate) errors: BTreeMap<String, String>,
    pub(crate) submitting: bool,
}

impl OnboardingState {
    /// Fresh session: basic tab active, OCR enabled for every document kind.
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            active_tab: Tab::Basic,
            basic: FieldMap::default(),
            kyc: KycInfo::default(),
            slots: Arc::default(),
            documents: DocumentList::default(),
            ocr_enabled: OcrKind::ALL.iter().map(|kind| (*kind, true)).collect(),
            extracting: BTreeMap::new(),
            verifications: BTreeMap::new(),
            verifying: BTreeMap::new(),
            errors: BTreeMap::new(),
            submitting: false,
        }
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn basic(&self) -> &FieldMap {
        &self.basic
    }

    pub fn kyc(&self) -> &KycInfo {
        &self.kyc
    }

    pub fn documents(&self) -> &DocumentList {
        &self.documents
    }

    pub fn file(&self, slot: FileSlot) -> Option<&FileHandle> {
        self.slots.get(&slot)
    }

    pub fn ocr_enabled(&self, kind: OcrKind) -> bool {
        self.ocr_enabled.get(&kind).copied().unwrap_or(false)
    }

    pub fn is_extracting(&self, kind: OcrKind) -> bool {
        self.extracting.contains_key(&kind)
    }

    pub fn verification(&self, kind: VerificationKind) -> Option<&VerificationStatus> {
        self.verifications.get(&kind)
    }

    /// Inline validation message for a basic-info field.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn with_tab(&self, tab: Tab) -> Self {
        Self {
            active_tab: tab,
            ..self.clone()
        }
    }

    /// Replaces one key of one bucket. KYC edits are recorded as user-entered.
    pub fn set_field(&self, bucket: Bucket, name: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        match bucket {
            Bucket::Basic => {
                next.basic = self.basic.with(name, value);
                next.errors.remove(name);
            }
            Bucket::Kyc => next.kyc = self.kyc.with_user_value(name, value),
        }
        next
    }

    /// Replaces (or clears, with `None`) a single-file slot.
    pub fn set_file(&self, slot: FileSlot, file: Option<FileHandle>) -> Self {
        let mut next = self.clone();
        let slots = Arc::make_mut(&mut next.slots);
        match file {
            Some(file) => slots.insert(slot, file),
            None => slots.remove(&slot),
        };
        next
    }

    pub fn set_ocr_enabled(&self, kind: OcrKind, enabled: bool) -> Self {
        let mut next = self.clone();
        next.ocr_enabled.insert(kind, enabled);
        next
    }

    /// Required basic-info fields that are blank, in registry order.
    pub fn missing_required(&self) -> Vec<&'static crate::model::field::FieldSpec> {
        registry::fields(self.entity)
            .iter()
            .filter(|spec| spec.required && self.basic.is_blank(spec.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_touches_one_key_and_one_bucket() {
        let state = OnboardingState::new(EntityKind::Lead)
            .set_field(Bucket::Basic, "firstName", "Asha")
            .set_field(Bucket::Kyc, "panNumber", "ABCDE1234F");

        let next = state.set_field(Bucket::Basic, "lastName", "Rao");

        assert_eq!(next.basic().get("firstName"), "Asha");
        assert_eq!(next.basic().get("lastName"), "Rao");
        assert_eq!(state.basic().get("lastName"), "");
        assert!(next.kyc().fields().shares_storage_with(state.kyc().fields()));
    }

    #[test]
    fn kyc_edits_are_user_provenance() {
        let state = OnboardingState::new(EntityKind::Dealer).set_field(Bucket::Kyc, "ifsc", "HDFC0001");
        assert_eq!(state.kyc().provenance("ifsc"), Some(Provenance::User));
        assert_eq!(state.kyc().provenance("accountNumber"), None);
    }

    #[test]
    fn fill_if_empty_never_replaces_values() {
        let info = KycInfo::default().with_user_value("name", "B");
        let (merged, filled) = info.fill_if_empty(
            OcrKind::Aadhaar,
            [("name", "A".to_string()), ("dob", "1990-01-01".to_string()), ("gender", String::new())],
        );
        assert_eq!(merged.get("name"), "B");
        assert_eq!(merged.get("dob"), "1990-01-01");
        assert_eq!(merged.get("gender"), "");
        assert_eq!(filled, 1);
        assert_eq!(merged.provenance("dob"), Some(Provenance::Extracted(OcrKind::Aadhaar)));
        assert_eq!(merged.provenance("name"), Some(Provenance::User));
    }

    #[test]
    fn whitespace_counts_as_a_value_for_merges() {
        let info = KycInfo::default().with_user_value("address", " ");
        let (merged, filled) =
            info.fill_if_empty(OcrKind::Aadhaar, [("address", "12 Main Rd".to_string())]);
        assert_eq!(merged.get("address"), " ");
        assert_eq!(filled, 0);
    }

    #[test]
    fn overwrite_replaces_regardless_of_prior_value() {
        let info = KycInfo::default().with_user_value("accountHolder", "typed by hand");
        let merged = info.overwrite(VerificationKind::Bank, [("accountHolder", "ASHA RAO".to_string())]);
        assert_eq!(merged.get("accountHolder"), "ASHA RAO");
        assert_eq!(
            merged.provenance("accountHolder"),
            Some(Provenance::Verified(VerificationKind::Bank))
        );
    }

    #[test]
    fn set_file_replaces_and_clears() {
        let first = FileHandle::new("front.jpg", "image/jpeg", b"1".to_vec());
        let second = FileHandle::new("front2.jpg", "image/jpeg", b"2".to_vec());
        let state = OnboardingState::new(EntityKind::Lead)
            .set_file(FileSlot::AadhaarFront, Some(first))
            .set_file(FileSlot::AadhaarFront, Some(second.clone()));
        assert_eq!(state.file(FileSlot::AadhaarFront), Some(&second));

        let cleared = state.set_file(FileSlot::AadhaarFront, None);
        assert_eq!(cleared.file(FileSlot::AadhaarFront), None);
        assert_eq!(state.file(FileSlot::AadhaarFront), Some(&second));
    }

    #[test]
    fn missing_required_follows_registry_order() {
        let state = OnboardingState::new(EntityKind::Lead)
            .set_field(Bucket::Basic, "firstName", "Asha")
            .set_field(Bucket::Basic, "email", "   ");
        let missing: Vec<_> = state.missing_required().iter().map(|f| f.name).collect();
        assert_eq!(missing, vec!["lastName", "email", "mobile"]);
    }

    #[test]
    fn field_map_serializes_as_object() {
        let map: FieldMap = [("firstName", "Asha"), ("city", "Pune")].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            serde_json::json!({"city": "Pune", "firstName": "Asha"})
        );
    }
}
