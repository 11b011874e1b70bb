use serde::{Deserialize, Serialize};

/// Response of the OCR extraction endpoints. Either section may be absent,
/// and every field inside a section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    pub aadhaar_data: Option<AadhaarData>,
    pub pan_data: Option<PanData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarData {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub aadhaar_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanData {
    pub pan_number: Option<String>,
    pub dob: Option<String>,
    pub name: Option<String>,
    pub father_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_partial_sections() {
        let response: OcrResponse = serde_json::from_str(
            r#"{"aadhaarData": {"name": "A", "dob": null, "aadhaarNumber": "1234"}}"#,
        )
        .unwrap();
        let aadhaar = response.aadhaar_data.unwrap();
        assert_eq!(aadhaar.name.as_deref(), Some("A"));
        assert_eq!(aadhaar.dob, None);
        assert_eq!(aadhaar.aadhaar_number.as_deref(), Some("1234"));
        assert!(response.pan_data.is_none());
    }
}
