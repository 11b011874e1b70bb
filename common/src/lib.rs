//! Shared model and onboarding pipeline for the lending CRM console.
//!
//! Everything in this crate is free of browser and server dependencies so it
//! can be compiled into the wasm frontend and unit-tested natively.

pub mod auth;
pub mod client;
pub mod menus;
pub mod model;
pub mod onboarding;
pub mod users;
