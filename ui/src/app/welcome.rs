use dioxus::prelude::*;

use crate::components::forms::LoginForm;
use crate::services::client::AuthHandle;
use crate::services::navigation::{AppRoute, NavHandle, NavigationBridge};
use crate::console_warn;

const ONBOARDING_CSS: Asset = asset!("/assets/styling/onboarding.css");

#[derive(Props, PartialEq, Clone)]
pub struct ScreenFrameProps {
    pub title: String,
    pub children: Element,
}

/// Page chrome shared by every screen
#[component]
pub fn ScreenFrame(props: ScreenFrameProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ONBOARDING_CSS }

        div {
            class: "onboarding-container",
            div {
                class: "title-container",
                h1 {
                    class: "onboarding-title",
                    "{props.title}"
                }
            }
            {props.children}
        }
    }
}

#[component]
pub fn Welcome() -> Element {
    let nav = use_context::<NavHandle>();
    let login_nav = nav.clone();

    rsx! {
        ScreenFrame {
            title: "Welcome".to_string(),
            p {
                class: "instruction-text",
                "Create an account in a few steps, or log in if you already have one."
            }
            div {
                class: "button-section",
                button {
                    class: "primary-button",
                    onclick: move |_| nav.push(AppRoute::Registration { step: 0 }),
                    "Create account"
                }
                button {
                    class: "secondary-button",
                    onclick: move |_| login_nav.push(AppRoute::Login),
                    "Log in"
                }
            }
        }
    }
}

#[component]
pub fn LoginScreen() -> Element {
    let auth = use_context::<AuthHandle>();
    let nav = use_context::<NavHandle>();
    let signup_nav = nav.clone();

    rsx! {
        ScreenFrame {
            title: "Welcome back".to_string(),
            LoginForm { auth, nav }
            p {
                class: "instruction-text",
                "No account yet? "
                a {
                    class: "text-link",
                    href: "#",
                    onclick: move |event| {
                        event.prevent_default();
                        signup_nav.push(AppRoute::Registration { step: 0 });
                    },
                    "Sign up"
                }
            }
        }
    }
}

/// Shown when registration finished and the user is signed in
#[component]
pub fn RegistrationComplete() -> Element {
    let nav = use_context::<NavHandle>();
    let later_nav = nav.clone();

    rsx! {
        ScreenFrame {
            title: "Your account is ready".to_string(),
            p {
                class: "instruction-text",
                "Add a photo, a bio and a few links so people can find you. Every step can be skipped."
            }
            div {
                class: "button-section",
                button {
                    class: "primary-button",
                    onclick: move |_| nav.push(AppRoute::ProfileCreation { step: 0 }),
                    "Set up profile"
                }
                button {
                    class: "secondary-button",
                    onclick: move |_| later_nav.push(AppRoute::Home),
                    "Maybe later"
                }
            }
        }
    }
}

#[component]
pub fn ProfileComplete() -> Element {
    let nav = use_context::<NavHandle>();

    rsx! {
        ScreenFrame {
            title: "You're all set".to_string(),
            p {
                class: "instruction-text",
                "✓ Your profile has been created."
            }
            div {
                class: "button-section",
                button {
                    class: "primary-button",
                    onclick: move |_| nav.push(AppRoute::Home),
                    "Continue"
                }
            }
        }
    }
}

#[component]
pub fn Home() -> Element {
    let auth = use_context::<AuthHandle>();
    let nav = use_context::<NavHandle>();
    let profile_nav = nav.clone();

    rsx! {
        ScreenFrame {
            title: "Home".to_string(),
            div {
                class: "button-section",
                button {
                    class: "secondary-button",
                    onclick: move |_| profile_nav.push(AppRoute::ProfileCreation { step: 0 }),
                    "Set up profile"
                }
                button {
                    class: "danger-button",
                    onclick: move |_| {
                        let auth = auth.clone();
                        let nav = nav.clone();
                        spawn(async move {
                            if let Err(e) = auth.logout().await {
                                console_warn!("[Session] Logout left tokens behind: {}", e);
                            }
                            nav.push(AppRoute::Welcome);
                        });
                    },
                    "Log out"
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct StartupErrorProps {
    pub message: String,
}

#[component]
pub fn StartupError(props: StartupErrorProps) -> Element {
    rsx! {
        div {
            class: "validation-feedback error",
            style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
            "⚠ The app could not start: {props.message}"
        }
    }
}
