use dioxus::prelude::*;

use crate::features::registration::AvailabilityStatus;

#[derive(Props, PartialEq, Clone)]
pub struct AvailabilityFeedbackProps {
    pub status: AvailabilityStatus,
}

#[component]
pub fn AvailabilityFeedback(props: AvailabilityFeedbackProps) -> Element {
    let Some(message) = props.status.message() else {
        return rsx! { div {} };
    };

    match props.status {
        AvailabilityStatus::Checking => rsx! {
            div {
                class: "validation-feedback checking",
                "⏳ {message}"
            }
        },
        AvailabilityStatus::Available => rsx! {
            div {
                class: "validation-feedback available",
                style: "color: #10b981; background-color: #d1fae5; border: 1px solid #10b981; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "✓ {message}"
            }
        },
        AvailabilityStatus::Unavailable => rsx! {
            div {
                class: "validation-feedback unavailable",
                style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "⚠ {message} - please choose a different one"
            }
        },
        _ => rsx! {
            div {
                class: "validation-feedback error",
                style: "color: #f59e0b; background-color: #fffbeb; border: 1px solid #f59e0b; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "⚠ {message}"
            }
        },
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct CharacterCounterProps {
    pub count: usize,
    pub max: usize,
}

#[component]
pub fn CharacterCounter(props: CharacterCounterProps) -> Element {
    let class = if props.count > props.max {
        "character-counter over"
    } else {
        "character-counter"
    };

    rsx! {
        div {
            class: "{class}",
            "{props.count}/{props.max}"
        }
    }
}
