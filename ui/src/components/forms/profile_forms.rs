use dioxus::prelude::*;

use super::wizard_controls::{skip_remote, submit_local, submit_remote, WizardControls};
use crate::components::display::PermissionPrompt;
use crate::components::input::{CharacterCounter, FieldError, InputType, ValidatedInput};
use crate::features::profile::{
    fields, submit_profile, ProfileStep, SocialLinks, SocialPlatform, Visibility, BIO_MAX,
    LOCATION_MAX, MAX_SOCIAL_LINKS,
};
use crate::features::wizard::{FormData, FormValue, Wizard};
use crate::services::client::AuthHandle;
use crate::services::media::{pick_image, FileInputPicker, PickOutcome};
use crate::services::navigation::NavHandle;

#[derive(Props, PartialEq, Clone)]
pub struct ProfileStepProps {
    pub wizard: Signal<Wizard>,
    pub nav: NavHandle,
    pub auth: AuthHandle,
}

fn error_for(wizard: Signal<Wizard>, field: &str) -> Option<String> {
    wizard.read().errors().get(field).cloned()
}

#[derive(Props, PartialEq, Clone)]
pub struct ImageStepFormProps {
    pub wizard: Signal<Wizard>,
    pub nav: NavHandle,
    pub step: ProfileStep,
}

/// Profile picture and cover photo share one form
#[component]
pub fn ImageStepForm(props: ImageStepFormProps) -> Element {
    let wizard = props.wizard;
    let step = props.step;
    let field = match step {
        ProfileStep::CoverPhoto => fields::COVER_PHOTO,
        _ => fields::PROFILE_PICTURE,
    };
    let mut image = use_signal(|| wizard.peek().form_data().text_or_empty(field));
    let mut prompt = use_signal(|| None::<(String, bool)>);
    let nav = props.nav.clone();

    let preview_class = match step {
        ProfileStep::CoverPhoto => "image-preview cover",
        _ => "image-preview avatar",
    };

    rsx! {
        div {
            class: "input-section",
            if !image().is_empty() {
                img {
                    class: "{preview_class}",
                    src: "{image}",
                    alt: "{step.name()} preview",
                }
            }
            label {
                class: "file-picker",
                "Choose an image"
                input {
                    r#type: "file",
                    accept: "image/*",
                    style: "display: none;",
                    onchange: move |event: FormEvent| {
                        let picker = FileInputPicker::new(event.files());
                        spawn(async move {
                            match pick_image(&picker).await {
                                PickOutcome::Selected(picked) => image.set(picked.data_url()),
                                PickOutcome::NoSelection => {}
                                PickOutcome::PermissionPrompt { message, can_open_settings } => {
                                    prompt.set(Some((message, can_open_settings)))
                                }
                            }
                        });
                    },
                }
            }
            if let Some(message) = error_for(wizard, field) {
                FieldError { message }
            }
            if let Some((message, can_open_settings)) = prompt() {
                PermissionPrompt {
                    message,
                    can_open_settings,
                    on_dismiss: move |_| prompt.set(None),
                }
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            on_continue: move |_| {
                let candidate = FormData::new().with(field, image());
                submit_local(wizard, &nav, step.fields(), candidate);
            },
        }
    }
}

#[component]
pub fn BioForm(props: ProfileStepProps) -> Element {
    let wizard = props.wizard;
    let mut bio = use_signal(|| wizard.peek().form_data().text_or_empty(fields::BIO));
    let nav = props.nav.clone();
    let error = error_for(wizard, fields::BIO);

    rsx! {
        div {
            class: "input-section",
            textarea {
                class: if error.is_some() { "input-field input-invalid" } else { "input-field" },
                rows: "4",
                placeholder: "A few words about you",
                value: "{bio}",
                oninput: move |event| bio.set(event.value()),
            }
            CharacterCounter { count: bio().chars().count(), max: BIO_MAX }
            if let Some(message) = error.clone() {
                FieldError { message }
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            on_continue: move |_| {
                let candidate = FormData::new().with(fields::BIO, bio().trim());
                submit_local(wizard, &nav, ProfileStep::Bio.fields(), candidate);
            },
        }
    }
}

#[component]
pub fn SocialLinksForm(props: ProfileStepProps) -> Element {
    let wizard = props.wizard;
    let mut links =
        use_signal(|| SocialLinks::from_value(wizard.peek().form_data().get(fields::SOCIAL_LINKS)));
    let mut platform = use_signal(|| SocialPlatform::Instagram);
    let mut entry = use_signal(String::new);
    let mut entry_error = use_signal(|| None::<String>);
    let nav = props.nav.clone();

    let available = links.read().available_platforms();
    let chosen = if available.contains(&platform()) {
        platform()
    } else {
        available.first().copied().unwrap_or(SocialPlatform::Website)
    };
    let full = links.read().len() >= MAX_SOCIAL_LINKS;
    let chips: Vec<(SocialPlatform, String)> = links
        .read()
        .iter()
        .map(|(platform, url)| (platform, url.to_string()))
        .collect();

    rsx! {
        div {
            class: "chip-list",
            for (linked, url) in chips {
                span {
                    key: "{linked.key()}",
                    class: "chip",
                    "{linked.label()}: {url} "
                    button {
                        class: "chip-remove",
                        aria_label: "Remove {linked.label()}",
                        onclick: move |_| {
                            links.write().remove(linked);
                        },
                        "×"
                    }
                }
            }
        }
        if !full {
            div {
                class: "input-section social-entry",
                select {
                    class: "input-field",
                    value: "{chosen.key()}",
                    onchange: move |event| {
                        if let Some(selected) = SocialPlatform::from_key(&event.value()) {
                            platform.set(selected);
                        }
                    },
                    for candidate in available {
                        option {
                            key: "{candidate.key()}",
                            value: "{candidate.key()}",
                            selected: candidate == chosen,
                            "{candidate.label()}"
                        }
                    }
                }
                ValidatedInput {
                    value: entry(),
                    placeholder: "@handle or link".to_string(),
                    input_type: InputType::Text,
                    error: entry_error(),
                    disabled: false,
                    on_change: move |value: String| entry.set(value),
                }
                button {
                    class: "secondary-button",
                    disabled: entry().trim().is_empty(),
                    onclick: move |_| {
                        let added = links.write().add(chosen, &entry()).map(|_| ());
                        match added {
                            Ok(()) => {
                                entry.set(String::new());
                                entry_error.set(None);
                            }
                            Err(e) => entry_error.set(Some(e.to_string())),
                        }
                    },
                    "Add"
                }
            }
        } else {
            p {
                class: "instruction-text",
                "You've added the maximum of {MAX_SOCIAL_LINKS} links."
            }
        }
        if let Some(message) = error_for(wizard, fields::SOCIAL_LINKS) {
            FieldError { message }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            on_continue: move |_| {
                let candidate =
                    FormData::new().with(fields::SOCIAL_LINKS, FormValue::from(&*links.read()));
                submit_local(wizard, &nav, ProfileStep::SocialLinks.fields(), candidate);
            },
        }
    }
}

#[component]
pub fn LocationForm(props: ProfileStepProps) -> Element {
    let wizard = props.wizard;
    let mut location = use_signal(|| wizard.peek().form_data().text_or_empty(fields::LOCATION));
    let nav = props.nav.clone();

    rsx! {
        div {
            class: "input-section",
            ValidatedInput {
                value: location(),
                placeholder: "City, country".to_string(),
                input_type: InputType::Text,
                error: error_for(wizard, fields::LOCATION),
                max_length: LOCATION_MAX,
                disabled: false,
                on_change: move |value: String| location.set(value),
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            on_continue: move |_| {
                let candidate = FormData::new().with(fields::LOCATION, location().trim());
                submit_local(wizard, &nav, ProfileStep::Location.fields(), candidate);
            },
        }
    }
}

/// Last step: choosing or skipping both submit the whole profile
#[component]
pub fn PrivacyForm(props: ProfileStepProps) -> Element {
    let wizard = props.wizard;
    let mut visibility = use_signal(|| {
        wizard
            .peek()
            .form_data()
            .text(fields::PROFILE_VISIBILITY)
            .and_then(Visibility::parse)
            .unwrap_or(Visibility::Public)
    });
    let mut allow_messages = use_signal(|| {
        wizard
            .peek()
            .form_data()
            .get(fields::ALLOW_MESSAGES)
            .and_then(FormValue::as_flag)
            .unwrap_or(true)
    });

    let auth = props.auth.clone();
    let nav = props.nav.clone();
    let submit_choice = {
        let auth = auth.clone();
        let nav = nav.clone();
        move |candidate: FormData| {
            let auth = auth.clone();
            submit_remote(
                wizard,
                nav.clone(),
                ProfileStep::Privacy.fields(),
                candidate,
                move |payload| async move { submit_profile(auth.service(), payload).await },
                |_| {},
            );
        }
    };
    let submit_defaults = move || {
        let auth = auth.clone();
        skip_remote(
            wizard,
            nav.clone(),
            move |payload| async move { submit_profile(auth.service(), payload).await },
            |_| {},
        );
    };
    let submitting = wizard.read().is_submitting();

    rsx! {
        div {
            class: "input-section visibility-options",
            for choice in Visibility::ALL {
                label {
                    key: "{choice.as_str()}",
                    class: "radio-option",
                    input {
                        r#type: "radio",
                        name: "profile-visibility",
                        value: "{choice.as_str()}",
                        checked: visibility() == choice,
                        disabled: submitting,
                        onchange: move |_| visibility.set(choice),
                    }
                    " {choice.label()}"
                }
            }
            if let Some(message) = error_for(wizard, fields::PROFILE_VISIBILITY) {
                FieldError { message }
            }
        }
        div {
            class: "input-section",
            label {
                class: "checkbox-option",
                input {
                    r#type: "checkbox",
                    checked: allow_messages(),
                    disabled: submitting,
                    onchange: move |_| allow_messages.set(!allow_messages()),
                }
                " Allow direct messages"
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            continue_label: "Finish".to_string(),
            busy_message: "Creating your profile...".to_string(),
            on_continue: move |_| {
                submit_choice(
                    FormData::new()
                        .with(fields::PROFILE_VISIBILITY, visibility().as_str())
                        .with(fields::ALLOW_MESSAGES, allow_messages()),
                );
            },
            on_skip: move |_| submit_defaults(),
        }
    }
}
