//! Lead and dealer onboarding form.
//!
//! One component serves both entities; the `entity` prop selects the field
//! registry, KYC sections and endpoints. All form logic lives in the shared
//! `OnboardingState`: this component forwards user input as `Action`s, runs
//! the returned effects, and feeds their results back as further actions.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::OnboardingProps;
pub use state::OnboardingComponent;

impl Component for OnboardingComponent {
    type Message = Msg;
    type Properties = OnboardingProps;

    fn create(ctx: &Context<Self>) -> Self {
        OnboardingComponent::new(ctx.props().entity)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().entity != old_props.entity {
            *self = OnboardingComponent::new(ctx.props().entity);
            update::publish_dirty(self);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        crate::helpers::set_window_dirty_flag(false);
    }
}
