//! User-triggered verification lookups.
//!
//! Each action builds a JSON request from the current KYC info, and the reply
//! is interpreted into either a verified outcome (possibly carrying
//! authoritative values to overwrite into KYC) or a `VerifyError` that tells a
//! negative match apart from a transport or server failure.

use crate::client::{decode, encode, paths, ClientError};
use crate::model::entity::EntityKind;
use crate::model::kyc::VerificationKind;
use crate::model::verification::{
    AadhaarVerifyRequest, BankVerifyRequest, BankVerifyResponse, GstVerifyRequest,
    GstVerifyResponse, PanVerifyRequest, PanVerifyResponse, VerifiedFlag,
};
use crate::onboarding::registry::{
    self, ACCOUNT_HOLDER, ACCOUNT_NUMBER, GST_ADDRESS, GST_LEGAL_NAME, GST_NUMBER, GST_TRADE_NAME,
    IFSC,
};
use crate::onboarding::state::KycInfo;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    pub kind: VerificationKind,
    pub path: &'static str,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub message: String,
    /// Values to overwrite into KYC info.
    pub updates: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyError {
    /// The provider answered, and the details do not match.
    #[error("{0}")]
    Mismatch(String),
    /// The lookup itself failed.
    #[error("Error verifying {kind}: {source}")]
    Client {
        kind: VerificationKind,
        source: ClientError,
    },
}

pub fn verification_path(entity: EntityKind, kind: VerificationKind) -> &'static str {
    match (entity, kind) {
        (EntityKind::Lead, VerificationKind::Pan) => paths::LEAD_PAN_VERIFY,
        (EntityKind::Lead, _) => paths::LEAD_AADHAAR_VERIFY,
        (EntityKind::Dealer, VerificationKind::Aadhaar) => paths::DEALER_AADHAAR_VERIFY,
        (EntityKind::Dealer, VerificationKind::Pan) => paths::DEALER_PAN_VERIFY,
        (EntityKind::Dealer, VerificationKind::Gst) => paths::DEALER_GST_VERIFY,
        (EntityKind::Dealer, VerificationKind::Bank) => paths::DEALER_BANK_VERIFY,
    }
}

/// Request for `kind`, or `None` when the entity's form does not offer it.
pub fn build_request(
    entity: EntityKind,
    kind: VerificationKind,
    kyc: &KycInfo,
) -> Result<Option<VerificationRequest>, ClientError> {
    if !registry::offers_verification(entity, kind) {
        return Ok(None);
    }
    let keys = registry::kyc_keys(entity);
    let field = |name: &str| kyc.get(name).to_string();
    let body = match kind {
        VerificationKind::Pan => encode(&PanVerifyRequest {
            pan_number: field(keys.pan_number),
            full_name: field(keys.pan_name),
            dob: field(keys.pan_dob),
        })?,
        VerificationKind::Aadhaar => encode(&AadhaarVerifyRequest {
            aadhaar_number: field(keys.aadhaar_number),
            name: field(keys.aadhaar_name),
            dob: field(keys.aadhaar_dob),
        })?,
        VerificationKind::Gst => encode(&GstVerifyRequest {
            gst_number: field(GST_NUMBER),
        })?,
        VerificationKind::Bank => encode(&BankVerifyRequest {
            account_number: field(ACCOUNT_NUMBER),
            ifsc: field(IFSC),
        })?,
    };
    Ok(Some(VerificationRequest {
        kind,
        path: verification_path(entity, kind),
        body,
    }))
}

/// Interprets the reply of a verification call.
pub fn interpret(
    kind: VerificationKind,
    reply: Result<Value, ClientError>,
) -> Result<VerificationOutcome, VerifyError> {
    let client = |source| VerifyError::Client { kind, source };
    let reply = reply.map_err(client)?;
    match kind {
        VerificationKind::Pan => {
            let response: PanVerifyResponse = decode(reply).map_err(client)?;
            if response.name_and_dob_match() {
                Ok(verified("PAN verified successfully!", Vec::new()))
            } else {
                Err(VerifyError::Mismatch("PAN Name or DOB does not match".into()))
            }
        }
        VerificationKind::Aadhaar => {
            let response: VerifiedFlag = decode(reply).map_err(client)?;
            if response.verified {
                Ok(verified("Aadhaar verified successfully!", Vec::new()))
            } else {
                Err(VerifyError::Mismatch("Aadhaar verification failed!".into()))
            }
        }
        VerificationKind::Gst => {
            let response: GstVerifyResponse = decode(reply).map_err(client)?;
            let gst = response
                .gst_data
                .ok_or_else(|| VerifyError::Mismatch("No GST details found for this number".into()))?;
            Ok(verified(
                "GST verified successfully!",
                vec![
                    (GST_LEGAL_NAME, gst.legal_name.unwrap_or_default()),
                    (GST_TRADE_NAME, gst.trade_name.unwrap_or_default()),
                    (GST_ADDRESS, gst.address.unwrap_or_default()),
                ],
            ))
        }
        VerificationKind::Bank => {
            let response: BankVerifyResponse = decode(reply).map_err(client)?;
            if response.verified {
                Ok(verified(
                    "Bank account verified!",
                    vec![(ACCOUNT_HOLDER, response.account_holder.unwrap_or_default())],
                ))
            } else {
                Err(VerifyError::Mismatch("Bank verification failed!".into()))
            }
        }
    }
}

fn verified(message: &str, updates: Vec<(&'static str, String)>) -> VerificationOutcome {
    VerificationOutcome {
        message: message.to_string(),
        updates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn pan_request_reads_entity_keys() {
        let kyc = KycInfo::default()
            .with_user_value("panNumber", "ABCDE1234F")
            .with_user_value("panHolderName", "Asha Rao")
            .with_user_value("panName", "ignored for leads")
            .with_user_value("panDob", "1990-01-01");
        let request = build_request(EntityKind::Lead, VerificationKind::Pan, &kyc)
            .unwrap()
            .unwrap();
        assert_eq!(request.path, paths::LEAD_PAN_VERIFY);
        assert_eq!(
            request.body,
            json!({"panNumber": "ABCDE1234F", "fullName": "Asha Rao", "dob": "1990-01-01"})
        );
    }

    #[test]
    fn dealer_aadhaar_request_reads_prefixed_keys() {
        let kyc = KycInfo::default()
            .with_user_value("aadhaarNumber", "123412341234")
            .with_user_value("aadhaarName", "Ravi Kumar")
            .with_user_value("aadhaarDob", "1985-04-12")
            .with_user_value("name", "lead key, not used");
        let request = build_request(EntityKind::Dealer, VerificationKind::Aadhaar, &kyc)
            .unwrap()
            .unwrap();
        assert_eq!(request.path, paths::DEALER_AADHAAR_VERIFY);
        assert_eq!(
            request.body,
            json!({"aadhaarNumber": "123412341234", "name": "Ravi Kumar", "dob": "1985-04-12"})
        );
    }

    #[test]
    fn aadhaar_reply_is_a_plain_flag() {
        let outcome = interpret(VerificationKind::Aadhaar, Ok(json!({"verified": true}))).unwrap();
        assert_eq!(outcome.message, "Aadhaar verified successfully!");
        assert!(outcome.updates.is_empty());

        let err = interpret(VerificationKind::Aadhaar, Ok(json!({"verified": false}))).unwrap_err();
        assert_eq!(err, VerifyError::Mismatch("Aadhaar verification failed!".into()));
    }

    #[test]
    fn lead_form_has_no_bank_lookup() {
        let request = build_request(EntityKind::Lead, VerificationKind::Bank, &KycInfo::default());
        assert_eq!(request, Ok(None));
    }

    #[test]
    fn pan_partial_match_is_a_mismatch_not_a_transport_error() {
        let reply = json!({"result": {"profileMatch": [
            {"parameter": "name", "matchResult": true},
            {"parameter": "dob", "matchResult": false}
        ]}});
        let err = interpret(VerificationKind::Pan, Ok(reply)).unwrap_err();
        assert_eq!(err, VerifyError::Mismatch("PAN Name or DOB does not match".into()));

        let err = interpret(
            VerificationKind::Pan,
            Err(ClientError::Status {
                status: 502,
                message: "upstream down".into(),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, VerifyError::Client { kind: VerificationKind::Pan, .. }));
        assert!(err.to_string().starts_with("Error verifying PAN"));
    }

    #[test]
    fn pan_full_match_verifies() {
        let reply = json!({"result": {"profileMatch": [
            {"parameter": "dob", "matchResult": true},
            {"parameter": "name", "matchResult": true}
        ]}});
        let outcome = interpret(VerificationKind::Pan, Ok(reply)).unwrap();
        assert!(outcome.updates.is_empty());
    }

    #[test]
    fn gst_returns_all_three_fields() {
        let reply = json!({"gstData": {"legalName": "Rao Traders Pvt Ltd", "tradeName": "Rao Traders"}});
        let outcome = interpret(VerificationKind::Gst, Ok(reply)).unwrap();
        assert_eq!(
            outcome.updates,
            vec![
                (GST_LEGAL_NAME, "Rao Traders Pvt Ltd".to_string()),
                (GST_TRADE_NAME, "Rao Traders".to_string()),
                (GST_ADDRESS, String::new()),
            ]
        );
    }

    #[test]
    fn bank_only_updates_holder_when_verified() {
        let ok = interpret(
            VerificationKind::Bank,
            Ok(json!({"verified": true, "accountHolder": "ASHA RAO"})),
        )
        .unwrap();
        assert_eq!(ok.updates, vec![(ACCOUNT_HOLDER, "ASHA RAO".to_string())]);

        let rejected = interpret(
            VerificationKind::Bank,
            Ok(json!({"verified": false, "accountHolder": "SOMEONE"})),
        );
        assert!(matches!(rejected, Err(VerifyError::Mismatch(_))));
    }

    #[test]
    fn malformed_reply_is_a_client_error() {
        let err = interpret(VerificationKind::Aadhaar, Ok(json!(["unexpected"]))).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Client { source: ClientError::Decode(_), .. }
        ));
    }
}
