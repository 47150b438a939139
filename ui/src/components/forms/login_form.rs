use dioxus::prelude::*;

use crate::components::display::LoadingIndicator;
use crate::components::input::{InputType, ValidatedInput};
use crate::services::client::{AuthHandle, ClientError};
use crate::services::navigation::{AppRoute, NavHandle, NavigationBridge};
use crate::{console_error, console_info};

#[derive(Props, PartialEq, Clone)]
pub struct LoginFormProps {
    pub auth: AuthHandle,
    pub nav: NavHandle,
}

#[component]
pub fn LoginForm(props: LoginFormProps) -> Element {
    let mut identifier = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut is_authenticating = use_signal(|| false);
    let mut login_error = use_signal(|| None::<String>);

    let auth = props.auth.clone();
    let nav = props.nav.clone();

    rsx! {
        div {
            class: "onboarding-form login-form",

            h2 {
                class: "form-title",
                "Log in"
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Username, email or phone:"
                }
                ValidatedInput {
                    value: identifier(),
                    placeholder: "you@example.com".to_string(),
                    input_type: InputType::Text,
                    disabled: is_authenticating(),
                    on_change: move |data: String| identifier.set(data),
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Password:"
                }
                ValidatedInput {
                    value: password(),
                    placeholder: "Enter your password".to_string(),
                    input_type: InputType::Password,
                    disabled: is_authenticating(),
                    on_change: move |data: String| password.set(data),
                }
            }

            div {
                class: "button-section",
                button {
                    class: "login-button",
                    disabled: is_authenticating() || identifier().trim().is_empty() || password().is_empty(),
                    onclick: move |_| {
                        let auth = auth.clone();
                        let nav = nav.clone();
                        let identifier_value = identifier();
                        let password_value = password();

                        is_authenticating.set(true);
                        login_error.set(None);

                        spawn(async move {
                            match auth.login(&identifier_value, &password_value).await {
                                Ok(()) => {
                                    console_info!("[Login] Signed in");
                                    password.set(String::new());
                                    nav.push(AppRoute::Home);
                                }
                                Err(e) => {
                                    console_error!("[Login] {}", e);
                                    let message = match e {
                                        ClientError::Unauthorized => {
                                            "Those details don't match an account.".to_string()
                                        }
                                        other => other.user_message(),
                                    };
                                    login_error.set(Some(message));
                                }
                            }
                            is_authenticating.set(false);
                        });
                    },
                    if is_authenticating() {
                        "Logging in..."
                    } else {
                        "Log in"
                    }
                }
            }

            if is_authenticating() {
                LoadingIndicator { message: "Checking your details...".to_string() }
            }

            if let Some(message) = login_error() {
                div {
                    class: "validation-feedback error",
                    style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
                    "⚠ {message}"
                }
            }
        }
    }
}
