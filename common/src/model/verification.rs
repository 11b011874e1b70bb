//! Request and response bodies of the KYC verification endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanVerifyRequest {
    pub pan_number: String,
    pub full_name: String,
    pub dob: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanVerifyResponse {
    #[serde(default)]
    pub result: Option<PanVerifyResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanVerifyResult {
    #[serde(default)]
    pub profile_match: Vec<ProfileMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMatch {
    pub parameter: String,
    #[serde(default)]
    pub match_result: Value,
}

impl ProfileMatch {
    /// Providers report the match as a bool, a 0/1 number or a short word.
    pub fn is_positive(&self) -> bool {
        match &self.match_result {
            Value::Bool(matched) => *matched,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "match" | "matched"
            ),
            _ => false,
        }
    }
}

impl PanVerifyResponse {
    fn parameter(&self, parameter: &str) -> Option<&ProfileMatch> {
        self.result
            .as_ref()?
            .profile_match
            .iter()
            .find(|p| p.parameter.eq_ignore_ascii_case(parameter))
    }

    /// Both the `name` and `dob` parameters must be present and positive.
    pub fn name_and_dob_match(&self) -> bool {
        let positive = |parameter: &str| self.parameter(parameter).is_some_and(ProfileMatch::is_positive);
        positive("name") && positive("dob")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarVerifyRequest {
    pub aadhaar_number: String,
    pub name: String,
    pub dob: String,
}

/// Bare `{ "verified": bool }` reply used by the Aadhaar endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifiedFlag {
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstVerifyRequest {
    pub gst_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstVerifyResponse {
    #[serde(default)]
    pub gst_data: Option<GstData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstData {
    pub legal_name: Option<String>,
    pub trade_name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankVerifyRequest {
    pub account_number: String,
    pub ifsc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankVerifyResponse {
    #[serde(default)]
    pub verified: bool,
    pub account_holder: Option<String>,
}
