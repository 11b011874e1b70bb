use crate::model::file::FileHandle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label given to a free-text document type when the user leaves it blank.
pub const DEFAULT_CUSTOM_DOCUMENT: &str = "Additional Document";

/// Value of the catalog entry that asks for a free-text document name.
pub const OTHER_DOCUMENT: &str = "other";

/// Selected type of a supporting document: a catalog entry or a free-text name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub value: String,
    pub label: String,
}

impl DocumentType {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Free-text type. The name doubles as value and label.
    pub fn custom(name: &str) -> Self {
        let name = match name.trim() {
            "" => DEFAULT_CUSTOM_DOCUMENT,
            trimmed => trimmed,
        };
        Self::new(name, name)
    }
}

/// A supporting document added through the documents tab. Only its type may change later.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub file: FileHandle,
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            doc_type: self.doc_type.value.clone(),
            filename: self.file.name().to_string(),
        }
    }
}

/// Entry of `documentsMeta` in the submission payload. Position N describes
/// the Nth repeated `documents` file; `filename` is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_type_defaults_when_blank() {
        assert_eq!(DocumentType::custom("   ").label, DEFAULT_CUSTOM_DOCUMENT);
        let named = DocumentType::custom(" Trade Licence ");
        assert_eq!(named.value, "Trade Licence");
        assert_eq!(named.label, "Trade Licence");
    }

    #[test]
    fn meta_serializes_type_key() {
        let meta = DocumentMeta {
            doc_type: "bank_statement".into(),
            filename: "march.pdf".into(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({"type": "bank_statement", "filename": "march.pdf"}));
    }
}
