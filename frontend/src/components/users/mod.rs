//! Create-user page for administrators.

use crate::api::GlooClient;
use crate::helpers::{event_value, show_toast};
use crm_common::auth::Session;
use crm_common::client::ClientError;
use crm_common::model::notice::NoticeLevel;
use crm_common::users::{create_user, created_email, CreateUserForm, UserField, ROLE_OPTIONS};
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CreateUserProps {
    pub session: Session,
}

pub enum Msg {
    Set(UserField, String),
    Submit,
    Finished(Result<Value, ClientError>),
}

pub struct CreateUserComponent {
    form: CreateUserForm,
    error: Option<String>,
    loading: bool,
}

impl Component for CreateUserComponent {
    type Message = Msg;
    type Properties = CreateUserProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: CreateUserForm::default(),
            error: None,
            loading: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Set(field, value) => self.form.set(field, &value),
            Msg::Submit => {
                self.error = None;
                if let Err(err) = self.form.validate() {
                    self.error = Some(err.to_string());
                    return true;
                }
                self.loading = true;
                let form = self.form.clone();
                let client = GlooClient::for_session(&ctx.props().session);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = create_user(&client, &form).await;
                    link.send_message(Msg::Finished(result));
                });
            }
            Msg::Finished(Ok(reply)) => {
                self.loading = false;
                let email = created_email(&reply, &self.form);
                show_toast(
                    &format!("User created successfully!\nEmail: {email}"),
                    NoticeLevel::Success,
                );
                self.form = CreateUserForm::default();
            }
            Msg::Finished(Err(err)) => {
                self.loading = false;
                let message = match err {
                    ClientError::Status { message, .. } if !message.is_empty() => message,
                    _ => "Failed to create user".to_string(),
                };
                show_toast(&message, NoticeLevel::Error);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let input = |field: UserField| link.callback(move |e: InputEvent| Msg::Set(field, event_value(&e)));
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <form class="card narrow" {onsubmit}>
                <h1>{"Create User"}</h1>
                {
                    match &self.error {
                        Some(error) => html! { <pre class="error" role="alert">{error.clone()}</pre> },
                        None => html! {},
                    }
                }
                <label>{"Full Name"}
                    <input value={self.form.full_name.clone()} oninput={input(UserField::FullName)} />
                </label>
                <label>{"Email"}
                    <input type="email" value={self.form.email.clone()} oninput={input(UserField::Email)} />
                </label>
                <label>{"Password"}
                    <input type="password" value={self.form.password.clone()} oninput={input(UserField::Password)} />
                </label>
                <label>{"Role"}
                    <select onchange={link.callback(|e: Event| Msg::Set(UserField::Role, event_value(&e)))}>
                        { for ROLE_OPTIONS.iter().map(|role| html! {
                            <option value={*role} selected={self.form.role == *role}>{*role}</option>
                        }) }
                    </select>
                </label>
                <button type="submit" class="primary" disabled={self.loading}>
                    { if self.loading { "Creating..." } else { "Create User" } }
                </button>
            </form>
        }
    }
}
