use dioxus::prelude::*;

use crate::utils::{field_class, field_style};

#[derive(PartialEq, Clone, Debug)]
pub enum InputType {
    Text,
    Password,
    Email,
    Tel,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Email => "email",
            InputType::Tel => "tel",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ValidatedInputProps {
    pub value: String,
    pub placeholder: String,
    pub input_type: InputType,
    /// Overrides the class derived from `error`
    #[props(default)]
    pub input_class: Option<String>,
    #[props(default)]
    pub input_style: Option<String>,
    #[props(default)]
    pub error: Option<String>,
    #[props(default)]
    pub max_length: Option<usize>,
    pub disabled: bool,
    pub on_change: EventHandler<String>,
}

#[component]
pub fn ValidatedInput(props: ValidatedInputProps) -> Element {
    let class = props
        .input_class
        .clone()
        .unwrap_or_else(|| field_class(props.error.as_ref()).to_string());
    let style = props
        .input_style
        .clone()
        .unwrap_or_else(|| field_style(props.error.as_ref()).to_string());

    rsx! {
        input {
            class: "{class}",
            style: "{style}",
            r#type: "{props.input_type.as_str()}",
            value: "{props.value}",
            placeholder: "{props.placeholder}",
            maxlength: props.max_length.map(|max| max.to_string()),
            disabled: props.disabled,
            oninput: move |event| props.on_change.call(event.value())
        }
        if let Some(message) = &props.error {
            FieldError { message: message.clone() }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct FieldErrorProps {
    pub message: String,
}

#[component]
pub fn FieldError(props: FieldErrorProps) -> Element {
    rsx! {
        div {
            class: "validation-feedback invalid",
            style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
            "⚠ {props.message}"
        }
    }
}
