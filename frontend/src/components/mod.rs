pub mod login;
pub mod onboarding;
pub mod users;
