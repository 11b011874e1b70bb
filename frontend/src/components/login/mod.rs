use crate::api::GlooClient;
use crate::helpers::{event_value, show_toast};
use crm_common::auth::{login, LoginRequest, Session};
use crm_common::model::notice::NoticeLevel;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub on_login: Callback<Session>,
}

pub enum Msg {
    SetEmail(String),
    SetPassword(String),
    Submit,
    Failed(String),
}

pub struct LoginComponent {
    email: String,
    password: String,
    loading: bool,
}

impl Component for LoginComponent {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            loading: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetEmail(email) => self.email = email.trim().to_string(),
            Msg::SetPassword(password) => self.password = password,
            Msg::Submit => {
                if self.loading {
                    return false;
                }
                self.loading = true;
                let request = LoginRequest {
                    email: self.email.clone(),
                    password: self.password.clone(),
                };
                let on_login = ctx.props().on_login.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match login(&GlooClient::anonymous(), &request).await {
                        Ok(session) => on_login.emit(session),
                        Err(err) => link.send_message(Msg::Failed(err.to_string())),
                    }
                });
            }
            Msg::Failed(message) => {
                self.loading = false;
                show_toast(&message, NoticeLevel::Error);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <form class="card login" {onsubmit}>
                <h1>{"Sign in"}</h1>
                <label>{"Email"}
                    <input type="email" required=true value={self.email.clone()}
                        oninput={link.callback(|e: InputEvent| Msg::SetEmail(event_value(&e)))} />
                </label>
                <label>{"Password"}
                    <input type="password" required=true value={self.password.clone()}
                        oninput={link.callback(|e: InputEvent| Msg::SetPassword(event_value(&e)))} />
                </label>
                <button type="submit" class="primary" disabled={self.loading}>
                    { if self.loading { "Signing in..." } else { "Sign in" } }
                </button>
            </form>
        }
    }
}
