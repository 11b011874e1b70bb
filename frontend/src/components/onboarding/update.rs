//! Update function for the onboarding form.
//!
//! Elm-style: every `Msg` either becomes an `Action` on the shared
//! `OnboardingState`, or prepares one (reading a picked file first). Effects
//! returned by a transition are run here: notices become toasts, API calls
//! are spawned and their results come back as `Msg::Apply`, so they are
//! always applied to the form as it is when the response arrives.

use crm_common::model::notice::NoticeLevel;
use crm_common::onboarding::{perform, Action, Effect, Transition};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::GlooClient;
use crate::helpers::{read_file, set_window_dirty_flag, show_notice, show_toast};

use super::helpers::fingerprint;
use super::messages::Msg;
use super::state::OnboardingComponent;

pub fn update(
    component: &mut OnboardingComponent,
    ctx: &Context<OnboardingComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Apply(action) => {
            apply(component, ctx, action);
            true
        }
        Msg::PickSlotFile(slot, file) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(match read_file(file).await {
                    Ok(handle) => Msg::Apply(Action::SetFile {
                        slot,
                        file: Some(handle),
                    }),
                    Err(message) => Msg::ReadFailed(message),
                });
            });
            false
        }
        Msg::SelectDocumentType(value) => {
            component.document_type = value;
            true
        }
        Msg::SetCustomDocumentName(name) => {
            component.custom_document_name = name;
            true
        }
        Msg::PickDocumentFile(file) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(match read_file(file).await {
                    Ok(handle) => Msg::DocumentFileRead(handle),
                    Err(message) => Msg::ReadFailed(message),
                });
            });
            false
        }
        Msg::DocumentFileRead(handle) => {
            component.document_file = Some(handle);
            true
        }
        Msg::AddDocument => {
            let selection = component.selected_document_type();
            let file = component.document_file.clone();
            if selection.is_none() || file.is_none() {
                return false;
            }
            apply(component, ctx, Action::AddDocument { selection, file });
            component.clear_document_picker();
            true
        }
        Msg::ReadFailed(message) => {
            show_toast(&message, NoticeLevel::Error);
            false
        }
    }
}

/// Applies `action` to the current snapshot and runs the resulting effects.
///
/// After a successful submission the form has been reset, so the dirty
/// baseline is reset too.
fn apply(component: &mut OnboardingComponent, ctx: &Context<OnboardingComponent>, action: Action) {
    let submitted = matches!(action, Action::SubmissionFinished(Ok(_)));

    let Transition { state, effects } = component.form.apply(action);
    component.form = state;
    if submitted {
        component.original_md5 = fingerprint(&component.form);
        component.clear_document_picker();
    }

    for effect in effects {
        run(ctx, effect);
    }
    publish_dirty(component);
}

/// Runs one effect. Notices are shown right away; API calls are spawned and
/// their result is sent back as `Msg::Apply`, so it lands on whatever
/// snapshot is current when the reply arrives.
fn run(ctx: &Context<OnboardingComponent>, effect: Effect) {
    if let Effect::Notify(notice) = &effect {
        show_notice(notice);
        return;
    }

    let client = GlooClient::for_session(&ctx.props().session);
    let link = ctx.link().clone();
    spawn_local(async move {
        if let Some(action) = perform(&client, effect).await {
            link.send_message(Msg::Apply(action));
        }
    });
}

/// Sets the global `app_dirty` flag from the current form fingerprint.
pub fn publish_dirty(component: &OnboardingComponent) {
    set_window_dirty_flag(component.is_dirty());
}
