use dioxus::prelude::*;

use super::session::use_session_status;
use super::welcome::{ScreenFrame, StartupError};
use super::wizard_scope::use_wizard;
use crate::components::display::StepProgress;
use crate::components::forms::{BioForm, ImageStepForm, LocationForm, PrivacyForm, SocialLinksForm};
use crate::features::profile::{profile_wizard, ProfileStep};
use crate::features::wizard::{Wizard, WizardError};
use crate::services::client::{AuthHandle, AuthStatus};
use crate::services::config::AppConfig;
use crate::services::navigation::{AppRoute, NavHandle, NavigationBridge};
use crate::console_info;

pub fn use_profile_wizard() -> Result<Signal<Wizard>, WizardError> {
    let config = use_context::<AppConfig>();
    use_hook(|| profile_wizard(&config.wizard).map(Signal::new))
}

#[derive(Props, PartialEq, Clone)]
pub struct ProfileScreenProps {
    pub step: usize,
}

#[component]
pub fn ProfileScreen(props: ProfileScreenProps) -> Element {
    let mut wizard = use_wizard();
    let nav = use_context::<NavHandle>();
    let auth = use_context::<AuthHandle>();
    let status = use_session_status();

    // Profile creation needs a session; an expired one sends the user to log in
    let guard_nav = nav.clone();
    use_effect(move || {
        if status() == Some(AuthStatus::SignedOut) {
            console_info!("[Profile] No session; redirecting to login");
            guard_nav.push(AppRoute::Login);
        }
    });

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
    let Some(current) = ProfileStep::from_index(index) else {
        return rsx! { StartupError { message: format!("unknown profile step {}", index) } };
    };

    rsx! {
        ScreenFrame {
            title: "Set up your profile".to_string(),
            div {
                class: "onboarding-form profile-form",
                StepProgress { current: index, total, label, title: current.title().to_string() }
                match current {
                    ProfileStep::ProfilePicture | ProfileStep::CoverPhoto => rsx! {
                        ImageStepForm { key: "{index}", wizard, nav: nav.clone(), step: current }
                    },
                    ProfileStep::Bio => rsx! {
                        BioForm { wizard, nav: nav.clone(), auth: auth.clone() }
                    },
                    ProfileStep::SocialLinks => rsx! {
                        SocialLinksForm { wizard, nav: nav.clone(), auth: auth.clone() }
                    },
                    ProfileStep::Location => rsx! {
                        LocationForm { wizard, nav: nav.clone(), auth: auth.clone() }
                    },
                    ProfileStep::Privacy => rsx! {
                        PrivacyForm { wizard, nav: nav.clone(), auth: auth.clone() }
                    },
                }
            }
        }
    }
}
