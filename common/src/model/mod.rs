pub mod document;
pub mod entity;
pub mod field;
pub mod file;
pub mod kyc;
pub mod multipart;
pub mod notice;
pub mod ocr;
pub mod verification;
