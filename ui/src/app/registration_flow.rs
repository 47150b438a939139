use dioxus::prelude::*;

use super::welcome::{ScreenFrame, StartupError};
use super::wizard_scope::use_wizard;
use crate::components::display::StepProgress;
use crate::components::forms::{
    ConfirmationForm, ContactForm, DateOfBirthForm, NameForm, PasswordForm, UsernameForm,
};
use crate::features::registration::{registration_wizard, RegistrationStep};
use crate::features::wizard::{Wizard, WizardError};
use crate::services::client::AuthHandle;
use crate::services::config::AppConfig;
use crate::services::navigation::{NavHandle, NavigationBridge};
use crate::utils::timing::today;

/// Build the registration wizard once for the lifetime of the flow group
pub fn use_registration_wizard() -> Result<Signal<Wizard>, WizardError> {
    let config = use_context::<AppConfig>();
    use_hook(|| registration_wizard(&config.wizard, today()).map(Signal::new))
}

#[derive(Props, PartialEq, Clone)]
pub struct RegistrationScreenProps {
    /// Step index from the URL
    pub step: usize,
}

#[component]
pub fn RegistrationScreen(props: RegistrationScreenProps) -> Element {
    let mut wizard = use_wizard();
    let nav = use_context::<NavHandle>();
    let auth = use_context::<AuthHandle>();
    let config = use_context::<AppConfig>().wizard;

    let sync_nav = nav.clone();
    use_effect(use_reactive((&props.step,), move |(step,)| {
        if wizard.peek().current_step_index() == step {
            return;
        }
        let redirect = wizard.write().sync_to_step(step);
        if let Some(route) = redirect {
            sync_nav.push(route);
        }
    }));

    let index = wizard.read().current_step_index();
    let total = wizard.read().sequencer().len();
    let label = wizard.read().sequencer().progress_label();
    let Some(current) = RegistrationStep::from_index(index) else {
        return rsx! { StartupError { message: format!("unknown registration step {}", index) } };
    };

    rsx! {
        ScreenFrame {
            title: "Create your account".to_string(),
            div {
                class: "onboarding-form registration-form",
                StepProgress { current: index, total, label, title: current.title().to_string() }
                match current {
                    RegistrationStep::Name => rsx! {
                        NameForm { wizard, nav: nav.clone(), auth: auth.clone(), config: config.clone() }
                    },
                    RegistrationStep::Username => rsx! {
                        UsernameForm { wizard, nav: nav.clone(), auth: auth.clone(), config: config.clone() }
                    },
                    RegistrationStep::DateOfBirth => rsx! {
                        DateOfBirthForm { wizard, nav: nav.clone(), auth: auth.clone(), config: config.clone() }
                    },
                    RegistrationStep::Password => rsx! {
                        PasswordForm { wizard, nav: nav.clone(), auth: auth.clone(), config: config.clone() }
                    },
                    RegistrationStep::Contact => rsx! {
                        ContactForm { wizard, nav: nav.clone(), auth: auth.clone(), config: config.clone() }
                    },
                    RegistrationStep::Confirmation => rsx! {
                        ConfirmationForm { wizard, nav: nav.clone(), auth: auth.clone(), config: config.clone() }
                    },
                }
            }
        }
    }
}
