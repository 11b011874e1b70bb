use crate::components::login::LoginComponent;
use crate::components::onboarding::OnboardingComponent;
use crate::components::users::CreateUserComponent;
use crate::helpers::set_window_dirty_flag;
use crm_common::auth::Session;
use crm_common::menus::{self, Menu, MenuTarget, DASHBOARD, DEALER_ADD, LEAD_CREATE, USER_CREATE};
use crm_common::model::entity::EntityKind;
use yew::html::Scope;
use yew::prelude::*;

pub enum Msg {
    LoggedIn(Session),
    Logout,
    Navigate(&'static str),
}

/// Root component. Owns the login session; nothing below it outlives a logout.
pub struct App {
    session: Option<Session>,
    path: &'static str,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: None,
            path: DASHBOARD,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::LoggedIn(session) => {
                gloo_console::log!(format!("signed in as {} ({})", session.username(), session.role()));
                self.session = Some(session);
                self.path = DASHBOARD;
            }
            Msg::Logout => {
                self.session = None;
                self.path = DASHBOARD;
                set_window_dirty_flag(false);
            }
            Msg::Navigate(path) => self.path = path,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(session) = &self.session else {
            return html! { <LoginComponent on_login={link.callback(Msg::LoggedIn)} /> };
        };

        html! {
            <div class="layout">
                <header class="app-header">
                    <span class="brand">{"Lending CRM"}</span>
                    <span class="user">{format!("{} · {}", session.username(), session.role())}</span>
                </header>
                <div class="layout-body">
                    <nav class="sidebar">
                        { for menus::visible_menus(session.role()).map(|menu| self.menu_entry(menu, link)) }
                    </nav>
                    <main class="page">
                        { self.page(session) }
                    </main>
                </div>
            </div>
        }
    }
}

impl App {
    fn menu_entry(&self, menu: &'static Menu, link: &Scope<Self>) -> Html {
        let item = |label: &'static str, path: &'static str| {
            let active = self.path == path;
            html! {
                <button
                    class={classes!("menu-item", active.then_some("active"))}
                    onclick={link.callback(move |_| Msg::Navigate(path))}
                >
                    {label}
                </button>
            }
        };

        match menu.target {
            MenuTarget::Page(path) => item(menu.label, path),
            MenuTarget::Group(links) => html! {
                <div class="menu-group">
                    <div class="menu-group-title">{menu.label}</div>
                    { for links.iter().map(|l| item(l.label, l.path)) }
                </div>
            },
            MenuTarget::Logout => html! {
                <button class="menu-item logout" onclick={link.callback(|_| Msg::Logout)}>
                    {menu.label}
                </button>
            },
        }
    }

    fn page(&self, session: &Session) -> Html {
        if !menus::allows(session.role(), self.path) {
            return html! { <p class="muted">{"You do not have access to this page."}</p> };
        }
        match self.path {
            LEAD_CREATE => html! {
                <OnboardingComponent entity={EntityKind::Lead} session={session.clone()} />
            },
            DEALER_ADD => html! {
                <OnboardingComponent entity={EntityKind::Dealer} session={session.clone()} />
            },
            USER_CREATE => html! { <CreateUserComponent session={session.clone()} /> },
            DASHBOARD => html! {
                <div class="card">
                    <h2>{format!("Welcome, {}", session.username())}</h2>
                    <p class="muted">{"Pick a section from the menu to get started."}</p>
                </div>
            },
            _ => html! { <p class="muted">{"This section is not part of the console yet."}</p> },
        }
    }
}
