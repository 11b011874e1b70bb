//! Static field registry.
//!
//! Pure tables: which basic-info inputs a form shows, how the KYC tab is split
//! into sections, which single-file slots exist and which document types the
//! documents tab offers. Lead and dealer forms name some KYC keys differently
//! (`name` vs `aadhaarName`), so the KYC key names live here too.

use crate::model::entity::EntityKind;
use crate::model::field::{Choice, FieldKind, FieldSpec};
use crate::model::file::FileSlot;
use crate::model::kyc::{OcrKind, VerificationKind};

/// One card of the KYC tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KycSection {
    pub title: &'static str,
    pub slots: &'static [FileSlot],
    pub fields: &'static [FieldSpec],
    pub ocr: Option<OcrKind>,
    pub verification: Option<VerificationKind>,
}

/// KYC keys targeted by OCR merges and read by verification requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KycKeys {
    pub aadhaar_name: &'static str,
    pub aadhaar_gender: &'static str,
    pub aadhaar_dob: &'static str,
    pub aadhaar_number: &'static str,
    pub aadhaar_address: &'static str,
    pub pan_number: &'static str,
    pub pan_name: &'static str,
    pub pan_father_name: &'static str,
    pub pan_dob: &'static str,
}

pub const GST_NUMBER: &str = "gstNumber";
pub const GST_LEGAL_NAME: &str = "gstLegalName";
pub const GST_TRADE_NAME: &str = "gstTradeName";
pub const GST_ADDRESS: &str = "gstAddress";
pub const BANK_NAME: &str = "bankName";
pub const ACCOUNT_NUMBER: &str = "accountNumber";
pub const IFSC: &str = "ifsc";
pub const ACCOUNT_HOLDER: &str = "accountHolder";

const LEAD_KEYS: KycKeys = KycKeys {
    aadhaar_name: "name",
    aadhaar_gender: "gender",
    aadhaar_dob: "dob",
    aadhaar_number: "aadhaarNumber",
    aadhaar_address: "address",
    pan_number: "panNumber",
    pan_name: "panHolderName",
    pan_father_name: "panFatherName",
    pan_dob: "panDob",
};

const DEALER_KEYS: KycKeys = KycKeys {
    aadhaar_name: "aadhaarName",
    aadhaar_gender: "aadhaarGender",
    aadhaar_dob: "aadhaarDob",
    aadhaar_number: "aadhaarNumber",
    aadhaar_address: "aadhaarAddress",
    pan_number: "panNumber",
    pan_name: "panName",
    pan_father_name: "panFatherName",
    pan_dob: "panDob",
};

const GENDERS: &[Choice] = &[
    Choice::new("Male", "Male"),
    Choice::new("Female", "Female"),
    Choice::new("Other", "Other"),
];

const LEAD_BASIC: &[FieldSpec] = &[
    FieldSpec::text("leadOwner", "Lead Owner"),
    FieldSpec::text("firstName", "First Name").required(),
    FieldSpec::text("lastName", "Last Name").required(),
    FieldSpec::text("email", "Email").of(FieldKind::Email).required(),
    FieldSpec::text("mobile", "Mobile").of(FieldKind::Tel).required(),
    FieldSpec::text("company", "Company"),
    FieldSpec::text("description", "Description").of(FieldKind::Textarea),
];

const DEALER_BASIC: &[FieldSpec] = &[
    FieldSpec::text("dealerName", "Dealer Name").required(),
    FieldSpec::text("ownerName", "Owner Name").required(),
    FieldSpec::text("mobile", "Mobile").of(FieldKind::Tel).required(),
    FieldSpec::text("email", "Email").of(FieldKind::Email),
    FieldSpec::text("shopName", "Shop Name").required(),
    FieldSpec::text(GST_NUMBER, "GST Number"),
    FieldSpec::text("pincode", "Pincode").required(),
    FieldSpec::text("district", "District").required(),
    FieldSpec::text("state", "State").required(),
    FieldSpec::text("rmAssigned", "Assigned RM").required(),
];

const LEAD_KYC: &[KycSection] = &[
    KycSection {
        title: "Aadhaar Card",
        slots: &[FileSlot::AadhaarFront, FileSlot::AadhaarBack],
        fields: &[
            FieldSpec::text("name", "Full Name"),
            FieldSpec::text("gender", "Gender").select(GENDERS),
            FieldSpec::text("dob", "Date of Birth").of(FieldKind::Date),
            FieldSpec::text("aadhaarNumber", "Aadhaar Number"),
            FieldSpec::text("address", "Address"),
        ],
        ocr: Some(OcrKind::Aadhaar),
        verification: Some(VerificationKind::Aadhaar),
    },
    KycSection {
        title: "PAN Card",
        slots: &[FileSlot::Pan],
        fields: &[
            FieldSpec::text("panNumber", "PAN Number"),
            FieldSpec::text("panHolderName", "PAN Holder Name"),
            FieldSpec::text("panFatherName", "Father's Name"),
            FieldSpec::text("panDob", "Date of Birth").of(FieldKind::Date),
        ],
        ocr: Some(OcrKind::Pan),
        verification: Some(VerificationKind::Pan),
    },
];

const DEALER_KYC: &[KycSection] = &[
    KycSection {
        title: "Aadhaar KYC",
        slots: &[FileSlot::AadhaarFront, FileSlot::AadhaarBack],
        fields: &[
            FieldSpec::text("aadhaarNumber", "Aadhaar Number"),
            FieldSpec::text("aadhaarName", "Name"),
            FieldSpec::text("aadhaarDob", "DOB").of(FieldKind::Date),
            FieldSpec::text("aadhaarGender", "Gender"),
            FieldSpec::text("aadhaarAddress", "Address"),
        ],
        ocr: Some(OcrKind::Aadhaar),
        verification: Some(VerificationKind::Aadhaar),
    },
    KycSection {
        title: "PAN Verification",
        slots: &[FileSlot::Pan],
        fields: &[
            FieldSpec::text("panNumber", "PAN Number"),
            FieldSpec::text("panName", "Name on PAN"),
            FieldSpec::text("panFatherName", "Father's Name"),
            FieldSpec::text("panDob", "Date of Birth").of(FieldKind::Date),
        ],
        ocr: Some(OcrKind::Pan),
        verification: Some(VerificationKind::Pan),
    },
    KycSection {
        title: "GST Verification",
        slots: &[FileSlot::GstCertificate],
        fields: &[
            FieldSpec::text(GST_NUMBER, "GST Number"),
            FieldSpec::text(GST_LEGAL_NAME, "Legal Name"),
            FieldSpec::text(GST_TRADE_NAME, "Trade Name"),
            FieldSpec::text(GST_ADDRESS, "Address"),
        ],
        ocr: None,
        verification: Some(VerificationKind::Gst),
    },
    KycSection {
        title: "Bank Verification",
        slots: &[],
        fields: &[
            FieldSpec::text(BANK_NAME, "Bank Name"),
            FieldSpec::text(ACCOUNT_NUMBER, "Account Number"),
            FieldSpec::text(IFSC, "IFSC Code"),
            FieldSpec::text(ACCOUNT_HOLDER, "Account Holder"),
        ],
        ocr: None,
        verification: Some(VerificationKind::Bank),
    },
];

const LEAD_DOCUMENTS: &[Choice] = &[
    Choice::new("aadhar_card", "Aadhaar Card"),
    Choice::new("pan_card", "PAN Card"),
    Choice::new("bank_statement", "Bank Statement"),
    Choice::new("salary_slip", "Salary Slip"),
    Choice::new("property_documents", "Property Documents"),
];

const DEALER_DOCUMENTS: &[Choice] = &[
    Choice::new("shop_photo", "Shop Photograph"),
    Choice::new("rent_agreement", "Rent Agreement"),
    Choice::new("gst_certificate", "GST Certificate"),
    Choice::new("address_proof", "Address Proof"),
    Choice::new("cancelled_cheque", "Cancelled Cheque"),
    Choice::new(crate::model::document::OTHER_DOCUMENT, "Other / Additional Document"),
];

const LEAD_SLOTS: &[FileSlot] = &[
    FileSlot::LeadImage,
    FileSlot::AadhaarFront,
    FileSlot::AadhaarBack,
    FileSlot::Pan,
];

const DEALER_SLOTS: &[FileSlot] = &[
    FileSlot::AadhaarFront,
    FileSlot::AadhaarBack,
    FileSlot::Pan,
    FileSlot::GstCertificate,
];

/// Basic-info inputs, in display order. These are the keys of `BasicInfo`.
pub fn fields(entity: EntityKind) -> &'static [FieldSpec] {
    match entity {
        EntityKind::Lead => LEAD_BASIC,
        EntityKind::Dealer => DEALER_BASIC,
    }
}

pub fn kyc_sections(entity: EntityKind) -> &'static [KycSection] {
    match entity {
        EntityKind::Lead => LEAD_KYC,
        EntityKind::Dealer => DEALER_KYC,
    }
}

pub fn kyc_keys(entity: EntityKind) -> &'static KycKeys {
    match entity {
        EntityKind::Lead => &LEAD_KEYS,
        EntityKind::Dealer => &DEALER_KEYS,
    }
}

pub fn document_options(entity: EntityKind) -> &'static [Choice] {
    match entity {
        EntityKind::Lead => LEAD_DOCUMENTS,
        EntityKind::Dealer => DEALER_DOCUMENTS,
    }
}

/// Single-file slots the form offers, in submission order.
pub fn file_slots(entity: EntityKind) -> &'static [FileSlot] {
    match entity {
        EntityKind::Lead => LEAD_SLOTS,
        EntityKind::Dealer => DEALER_SLOTS,
    }
}

pub fn offers_verification(entity: EntityKind, kind: VerificationKind) -> bool {
    kyc_sections(entity)
        .iter()
        .any(|section| section.verification == Some(kind))
}
