use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct PermissionPromptProps {
    pub message: String,
    pub can_open_settings: bool,
    pub on_dismiss: EventHandler<()>,
}

#[component]
pub fn PermissionPrompt(props: PermissionPromptProps) -> Element {
    rsx! {
        div {
            class: "permission-prompt",
            style: "color: #92400e; background-color: #fffbeb; border: 1px solid #f59e0b; padding: 12px; border-radius: 4px; margin-top: 8px;",
            p { "🔒 {props.message}" }
            if props.can_open_settings {
                p {
                    class: "instruction-text",
                    "Open your browser's site settings to change photo access."
                }
            }
            button {
                class: "secondary-button",
                onclick: move |_| props.on_dismiss.call(()),
                "OK"
            }
        }
    }
}
