//! Multi-tab onboarding pipeline shared by the lead and dealer forms.
//!
//! - `registry`: static field, slot and document catalogs per entity kind.
//! - `state`: the immutable session snapshot and its single-key updates.
//! - `accumulator`: ordered list of supporting documents.
//! - `reconcile`: OCR trigger rule and fill-if-empty merge.
//! - `verify`: user-triggered Aadhaar/PAN/GST/Bank lookups.
//! - `assembler`: multipart submission body.
//! - `session`: ties the above together as `apply(action) -> (state, effects)`
//!   plus the async `perform` driver that runs effects against an `ApiClient`.

pub mod accumulator;
pub mod assembler;
pub mod dates;
pub mod reconcile;
pub mod registry;
pub mod session;
pub mod state;
pub mod verify;

pub use session::{perform, Action, Effect, Transition};
pub use state::{Bucket, OnboardingState, Tab};
