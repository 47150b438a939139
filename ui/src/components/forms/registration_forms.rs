//! One form per registration step. Each keeps its answers locally, seeded
//! from what the wizard already holds, and hands them to the wizard on
//! continue.

use dioxus::prelude::*;
use std::rc::Rc;
use std::time::Duration;

use super::wizard_controls::{submit_local, submit_remote, WizardControls};
use crate::components::input::{
    AvailabilityFeedback, FieldError, InputType, SegmentedInputView, ValidatedInput,
};
use crate::features::registration::{
    contact_candidate, fields, submit_confirmation_step, submit_contact_step, AvailabilityStatus, RegistrationStep,
    UsernameAvailability,
};
use crate::features::segmented::{DateEvent, DateOfBirthInput, OtpInput};
use crate::features::wizard::{FormData, FormValue, StepOutcome, Wizard};
use crate::services::client::{AuthHandle, ContactMethod};
use crate::services::config::WizardConfig;
use crate::services::navigation::NavHandle;
use crate::utils::{availability_class, availability_style, field_class, field_style};

#[derive(Props, PartialEq, Clone)]
pub struct RegistrationStepProps {
    pub wizard: Signal<Wizard>,
    pub nav: NavHandle,
    pub auth: AuthHandle,
    pub config: WizardConfig,
}

fn error_for(wizard: Signal<Wizard>, field: &str) -> Option<String> {
    wizard.read().errors().get(field).cloned()
}

#[component]
pub fn NameForm(props: RegistrationStepProps) -> Element {
    let wizard = props.wizard;
    let mut name = use_signal(|| wizard.peek().form_data().text_or_empty(fields::NAME));
    let nav = props.nav.clone();

    rsx! {
        div {
            class: "input-section",
            label { class: "input-label", "Full name:" }
            ValidatedInput {
                value: name(),
                placeholder: "Your name".to_string(),
                input_type: InputType::Text,
                error: error_for(wizard, fields::NAME),
                max_length: 50,
                disabled: false,
                on_change: move |value: String| name.set(value),
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            on_continue: move |_| {
                let candidate = FormData::new().with(fields::NAME, name());
                submit_local(wizard, &nav, RegistrationStep::Name.fields(), candidate);
            },
        }
    }
}

#[component]
pub fn UsernameForm(props: RegistrationStepProps) -> Element {
    let wizard = props.wizard;
    let mut username = use_signal(|| wizard.peek().form_data().text_or_empty(fields::USERNAME));
    let mut status = use_signal(AvailabilityStatus::default);

    let debounce = Duration::from_millis(props.config.username_debounce_ms);
    let auth = props.auth.clone();
    let checker = use_hook(|| Rc::new(UsernameAvailability::new(auth.api(), debounce)));

    // Mirror the checker's status channel into the view
    let watched = checker.clone();
    use_future(move || {
        let checker = watched.clone();
        async move {
            let mut updates = checker.subscribe();
            while updates.changed().await.is_ok() {
                let latest = updates.borrow_and_update().clone();
                status.set(latest);
            }
        }
    });

    let dropped = checker.clone();
    use_drop(move || dropped.cancel());

    let nav = props.nav.clone();
    let current = status();
    let error = error_for(wizard, fields::USERNAME);
    let (class, style) = match &error {
        Some(message) => (field_class(Some(message)), field_style(Some(message))),
        None => (availability_class(&current), availability_style(&current)),
    };

    rsx! {
        div {
            class: "input-section",
            label { class: "input-label", "Username:" }
            ValidatedInput {
                value: username(),
                placeholder: "letters, numbers, _ and .".to_string(),
                input_type: InputType::Text,
                input_class: class.to_string(),
                input_style: style.to_string(),
                error,
                max_length: 30,
                disabled: false,
                on_change: move |value: String| {
                    username.set(value.clone());
                    let checker = checker.clone();
                    spawn(async move {
                        checker.check(&value).await;
                    });
                },
            }
            AvailabilityFeedback { status: current.clone() }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            continue_disabled: !current.allows_continue(),
            on_continue: move |_| {
                let candidate = FormData::new().with(fields::USERNAME, username().trim());
                submit_local(wizard, &nav, RegistrationStep::Username.fields(), candidate);
            },
        }
    }
}

#[component]
pub fn DateOfBirthForm(props: RegistrationStepProps) -> Element {
    let wizard = props.wizard;
    let order = props.config.date_field_order;
    let mut input = use_signal(|| {
        match wizard
            .peek()
            .form_data()
            .get(fields::DATE_OF_BIRTH)
            .and_then(FormValue::as_date)
        {
            Some(date) => DateOfBirthInput::with_date(order, date),
            None => DateOfBirthInput::new(order),
        }
    });
    let mut local_error = use_signal(|| None::<String>);

    let submit_nav = props.nav.clone();
    let auto_nav = props.nav.clone();

    let submit = move |nav: &NavHandle| {
        let value = match input.read().date() {
            Some(date) => FormValue::Date(date),
            None => FormValue::from(""),
        };
        let candidate = FormData::new().with(fields::DATE_OF_BIRTH, value);
        submit_local(wizard, nav, RegistrationStep::DateOfBirth.fields(), candidate);
    };

    let (values, widths, placeholders, focus) = {
        let current = input.read();
        let segments = current.segments();
        (
            segments.values().to_vec(),
            (0..segments.len()).map(|index| segments.width(index)).collect::<Vec<_>>(),
            current.placeholders().map(str::to_string).to_vec(),
            segments.focus(),
        )
    };
    let error = local_error().or_else(|| error_for(wizard, fields::DATE_OF_BIRTH));

    rsx! {
        div {
            class: "input-section",
            label { class: "input-label", "Date of birth:" }
            SegmentedInputView {
                values,
                widths,
                placeholders,
                focus,
                label: "date of birth".to_string(),
                invalid: error.is_some(),
                disabled: wizard.read().is_submitting(),
                on_input: move |(index, text): (usize, String)| {
                    let event = input.write().set_segment(index, &text);
                    match event {
                        DateEvent::Pending => local_error.set(None),
                        DateEvent::Invalid => {
                            local_error.set(Some("Enter a real date".to_string()))
                        }
                        DateEvent::Completed(_) => {
                            local_error.set(None);
                            submit(&auto_nav);
                        }
                    }
                },
                on_backspace: move |index: usize| input.write().backspace_at(index),
            }
            if let Some(message) = error {
                FieldError { message }
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            on_continue: move |_| submit(&submit_nav),
        }
    }
}

#[component]
pub fn PasswordForm(props: RegistrationStepProps) -> Element {
    let wizard = props.wizard;
    let mut password = use_signal(|| wizard.peek().form_data().text_or_empty(fields::PASSWORD));
    let mut confirm =
        use_signal(|| wizard.peek().form_data().text_or_empty(fields::CONFIRM_PASSWORD));
    let nav = props.nav.clone();

    rsx! {
        div {
            class: "input-section",
            label { class: "input-label", "Password:" }
            ValidatedInput {
                value: password(),
                placeholder: "At least 8 characters, with a letter and a number".to_string(),
                input_type: InputType::Password,
                error: error_for(wizard, fields::PASSWORD),
                disabled: false,
                on_change: move |value: String| password.set(value),
            }
        }
        div {
            class: "input-section",
            label { class: "input-label", "Confirm password:" }
            ValidatedInput {
                value: confirm(),
                placeholder: "Type it again".to_string(),
                input_type: InputType::Password,
                error: error_for(wizard, fields::CONFIRM_PASSWORD),
                disabled: false,
                on_change: move |value: String| confirm.set(value),
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            on_continue: move |_| {
                let candidate = FormData::new()
                    .with(fields::PASSWORD, password())
                    .with(fields::CONFIRM_PASSWORD, confirm());
                submit_local(wizard, &nav, RegistrationStep::Password.fields(), candidate);
            },
        }
    }
}

fn contact_label(method: ContactMethod) -> &'static str {
    match method {
        ContactMethod::Email => "Use email",
        ContactMethod::Phone => "Use phone",
    }
}

#[component]
pub fn ContactForm(props: RegistrationStepProps) -> Element {
    let wizard = props.wizard;
    let mut method = use_signal(|| {
        wizard
            .peek()
            .form_data()
            .text(fields::CONTACT_METHOD)
            .and_then(ContactMethod::parse)
            .unwrap_or(ContactMethod::Email)
    });
    let mut email = use_signal(|| wizard.peek().form_data().text_or_empty(fields::EMAIL));
    let mut phone = use_signal(|| wizard.peek().form_data().text_or_empty(fields::PHONE));

    let nav = props.nav.clone();
    let auth = props.auth.clone();
    let submitting = wizard.read().is_submitting();

    rsx! {
        div {
            class: "input-section contact-method",
            for option in [ContactMethod::Email, ContactMethod::Phone] {
                button {
                    key: "{option.as_str()}",
                    class: if method() == option { "toggle-button selected" } else { "toggle-button" },
                    disabled: submitting,
                    onclick: move |_| method.set(option),
                    "{contact_label(option)}"
                }
            }
        }
        div {
            class: "input-section",
            match method() {
                ContactMethod::Email => rsx! {
                    label { class: "input-label", "Email address:" }
                    ValidatedInput {
                        value: email(),
                        placeholder: "you@example.com".to_string(),
                        input_type: InputType::Email,
                        error: error_for(wizard, fields::EMAIL),
                        disabled: submitting,
                        on_change: move |value: String| email.set(value),
                    }
                },
                ContactMethod::Phone => rsx! {
                    label { class: "input-label", "Phone number:" }
                    ValidatedInput {
                        value: phone(),
                        placeholder: "+1 555 010 9999".to_string(),
                        input_type: InputType::Tel,
                        error: error_for(wizard, fields::PHONE),
                        disabled: submitting,
                        on_change: move |value: String| phone.set(value),
                    }
                },
            }
            p {
                class: "instruction-text",
                "We'll send a verification code there."
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            busy_message: "Creating your account...".to_string(),
            on_continue: move |_| {
                let candidate = contact_candidate(method(), &email(), &phone());
                let auth = auth.clone();
                submit_remote(
                    wizard,
                    nav.clone(),
                    RegistrationStep::Contact.fields(),
                    candidate,
                    move |payload| async move { submit_contact_step(auth.service(), payload).await },
                    |_| {},
                );
            },
        }
    }
}

#[component]
pub fn ConfirmationForm(props: RegistrationStepProps) -> Element {
    let wizard = props.wizard;
    let otp_length = props.config.otp_length;
    let mut otp = use_signal(|| OtpInput::new(otp_length));

    let destination = {
        let read = wizard.read();
        let data = read.form_data();
        match data.text(fields::CONTACT_METHOD).and_then(ContactMethod::parse) {
            Some(ContactMethod::Phone) => data.text_or_empty(fields::PHONE),
            _ => data.text_or_empty(fields::EMAIL),
        }
    };

    let auth = props.auth.clone();
    let nav = props.nav.clone();
    let confirm = move |code: String| {
        let auth = auth.clone();
        submit_remote(
            wizard,
            nav.clone(),
            RegistrationStep::Confirmation.fields(),
            FormData::new().with(fields::OTP, code),
            move |payload| async move { submit_confirmation_step(auth.service(), payload).await },
            move |outcome| {
                // A rejected code is cleared so the next one can be typed straight in
                if matches!(outcome, StepOutcome::Invalid(_)) {
                    otp.write().clear();
                }
            },
        );
    };
    let auto_confirm = confirm.clone();
    let manual_confirm = confirm;

    let (values, focus) = {
        let current = otp.read();
        (current.segments().values().to_vec(), current.segments().focus())
    };
    let error = error_for(wizard, fields::OTP);
    let submitting = wizard.read().is_submitting();

    rsx! {
        div {
            class: "instruction-section",
            p {
                class: "instruction-text",
                "Enter the {otp_length}-digit code we sent to "
                strong { "{destination}" }
            }
        }
        div {
            class: "input-section",
            SegmentedInputView {
                values,
                widths: vec![1; otp_length],
                focus,
                label: "code digit".to_string(),
                invalid: error.is_some(),
                disabled: submitting,
                on_input: move |(index, text): (usize, String)| {
                    let completed = otp.write().set_digit(index, &text);
                    if let Some(code) = completed {
                        auto_confirm(code);
                    }
                },
                on_backspace: move |index: usize| otp.write().backspace_at(index),
            }
            if let Some(message) = error {
                FieldError { message }
            }
        }
        WizardControls {
            wizard,
            nav: props.nav.clone(),
            continue_label: "Verify".to_string(),
            busy_message: "Checking your code...".to_string(),
            on_continue: move |_| manual_confirm(otp.read().code()),
        }
    }
}
