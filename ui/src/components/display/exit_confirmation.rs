use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct ExitConfirmationProps {
    pub message: String,
    pub on_confirm: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
}

/// Shown when the user backs out of the first step of a flow
#[component]
pub fn ExitConfirmation(props: ExitConfirmationProps) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal exit-confirmation",
                role: "dialog",
                p {
                    class: "instruction-text",
                    "{props.message}"
                }
                div {
                    class: "button-section",
                    button {
                        class: "secondary-button",
                        onclick: move |_| props.on_cancel.call(()),
                        "Stay"
                    }
                    button {
                        class: "danger-button",
                        onclick: move |_| props.on_confirm.call(()),
                        "Leave"
                    }
                }
            }
        }
    }
}
