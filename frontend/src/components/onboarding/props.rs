use crm_common::auth::Session;
use crm_common::model::entity::EntityKind;
use yew::prelude::*;

/// Properties for the `OnboardingComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct OnboardingProps {
    /// Lead or dealer. Switching it restarts the form.
    pub entity: EntityKind,

    /// Signed-in user; its bearer token authorizes every API call of the form.
    pub session: Session,
}
