//! Continue / Back / Skip row shared by every wizard step, plus the glue that
//! runs a step submission against a `Signal<Wizard>`.

use dioxus::prelude::*;
use std::future::Future;

use crate::components::display::{ExitConfirmation, LoadingIndicator};
use crate::features::wizard::{
    follow, BackOutcome, FormData, PendingStep, StepFailure, StepOutcome, Wizard,
};
use crate::services::navigation::NavHandle;
use crate::{console_debug, console_error};

/// Validate and commit a step that needs no server round trip
pub fn submit_local(
    mut wizard: Signal<Wizard>,
    nav: &NavHandle,
    fields: &[&str],
    candidate: FormData,
) -> Option<StepOutcome> {
    let result = wizard.write().submit_step(fields, candidate, false);
    match result {
        Ok(outcome) => {
            follow(&outcome, nav);
            Some(outcome)
        }
        Err(e) => {
            console_error!("[Wizard] {}", e);
            None
        }
    }
}

/// Skip the current step with its defaults
pub fn skip_local(mut wizard: Signal<Wizard>, nav: &NavHandle) {
    let result = wizard.write().skip_step();
    match result {
        Ok(outcome) => follow(&outcome, nav),
        Err(e) => console_error!("[Wizard] {}", e),
    }
}

/// Validate, then run `call` in the background and apply its result.
///
/// The wizard reports `Busy` to any other submission until the call
/// resolves. `on_done` sees the final outcome after navigation.
pub fn submit_remote<F, Fut>(
    mut wizard: Signal<Wizard>,
    nav: NavHandle,
    fields: &[&str],
    candidate: FormData,
    call: F,
    on_done: impl FnOnce(&StepOutcome) + 'static,
) where
    F: FnOnce(FormData) -> Fut + 'static,
    Fut: Future<Output = Result<(), StepFailure>> + 'static,
{
    let pending = wizard.write().begin_remote_step(fields, candidate);
    run_pending(wizard, nav, pending, call, on_done);
}

/// Skip a remote step: its defaults go to `call` without validation
pub fn skip_remote<F, Fut>(
    mut wizard: Signal<Wizard>,
    nav: NavHandle,
    call: F,
    on_done: impl FnOnce(&StepOutcome) + 'static,
) where
    F: FnOnce(FormData) -> Fut + 'static,
    Fut: Future<Output = Result<(), StepFailure>> + 'static,
{
    let pending = wizard.write().begin_remote_skip();
    run_pending(wizard, nav, pending, call, on_done);
}

fn run_pending<F, Fut>(
    mut wizard: Signal<Wizard>,
    nav: NavHandle,
    pending: Result<PendingStep, StepOutcome>,
    call: F,
    on_done: impl FnOnce(&StepOutcome) + 'static,
) where
    F: FnOnce(FormData) -> Fut + 'static,
    Fut: Future<Output = Result<(), StepFailure>> + 'static,
{
    let pending = match pending {
        Ok(pending) => pending,
        Err(outcome) => {
            console_debug!("[Wizard] Remote step not started: {:?}", outcome);
            on_done(&outcome);
            return;
        }
    };

    spawn(async move {
        let result = call(pending.payload.clone()).await;
        let outcome = wizard.write().finish_remote_step(pending, result);
        follow(&outcome, &nav);
        on_done(&outcome);
    });
}

#[derive(Props, PartialEq, Clone)]
pub struct WizardControlsProps {
    pub wizard: Signal<Wizard>,
    pub nav: NavHandle,
    pub on_continue: EventHandler<()>,
    /// Replaces the default skip, e.g. for a final step that still submits
    #[props(default)]
    pub on_skip: Option<EventHandler<()>>,
    #[props(default)]
    pub continue_disabled: bool,
    #[props(default = "Continue".to_string())]
    pub continue_label: String,
    #[props(default = "Submitting...".to_string())]
    pub busy_message: String,
}

#[component]
pub fn WizardControls(props: WizardControlsProps) -> Element {
    let mut wizard = props.wizard;
    let mut confirming_exit = use_signal(|| false);

    let submitting = wizard.read().is_submitting();
    let can_skip = wizard.read().can_skip_current();
    let form_error = wizard.read().state().form_error.clone();

    let back_nav = props.nav.clone();
    let skip_nav = props.nav.clone();
    let exit_nav = props.nav.clone();

    rsx! {
        if let Some(message) = form_error {
            div {
                class: "form-error",
                style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 8px;",
                "⚠ {message}"
            }
        }

        if submitting {
            LoadingIndicator { message: props.busy_message.clone() }
        }

        div {
            class: "button-section wizard-controls",
            button {
                class: "secondary-button",
                disabled: submitting,
                onclick: move |_| {
                    let outcome = wizard.write().go_back(&back_nav);
                    if outcome == BackOutcome::ConfirmExit {
                        confirming_exit.set(true);
                    }
                },
                "Back"
            }
            if can_skip {
                button {
                    class: "skip-button",
                    disabled: submitting,
                    onclick: move |_| match props.on_skip {
                        Some(handler) => handler.call(()),
                        None => skip_local(wizard, &skip_nav),
                    },
                    "Skip"
                }
            }
            button {
                class: "primary-button",
                disabled: submitting || props.continue_disabled,
                onclick: move |_| props.on_continue.call(()),
                "{props.continue_label}"
            }
        }

        if confirming_exit() {
            ExitConfirmation {
                message: "Leave now? Your answers so far will be discarded.".to_string(),
                on_cancel: move |_| {
                    wizard.read().cancel_exit();
                    confirming_exit.set(false);
                },
                on_confirm: move |_| {
                    confirming_exit.set(false);
                    wizard.write().confirm_exit(&exit_nav);
                },
            }
        }
    }
}
