use std::fmt;

/// Identity documents the OCR service can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OcrKind {
    Aadhaar,
    Pan,
}

impl OcrKind {
    pub const ALL: [OcrKind; 2] = [OcrKind::Aadhaar, OcrKind::Pan];
}

impl fmt::Display for OcrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OcrKind::Aadhaar => "Aadhaar",
            OcrKind::Pan => "PAN",
        })
    }
}

/// User-triggered verification lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerificationKind {
    Aadhaar,
    Pan,
    Gst,
    Bank,
}

impl fmt::Display for VerificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerificationKind::Aadhaar => "Aadhaar",
            VerificationKind::Pan => "PAN",
            VerificationKind::Gst => "GST",
            VerificationKind::Bank => "Bank",
        })
    }
}

/// Where the current value of a KYC field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    User,
    Extracted(OcrKind),
    Verified(VerificationKind),
}
