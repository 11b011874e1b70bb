use serde::{Deserialize, Serialize};

/// The kind of record an onboarding session creates.
///
/// Leads and dealers share the same pipeline but differ in their field
/// registry, KYC key names, verification endpoints and submission path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Lead,
    Dealer,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Lead => "Lead",
            EntityKind::Dealer => "Dealer",
        }
    }

    /// Path (relative to the API prefix) that creates the record.
    pub fn submit_path(self) -> &'static str {
        match self {
            EntityKind::Lead => "/leads",
            EntityKind::Dealer => "/dealers",
        }
    }
}
