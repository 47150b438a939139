use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct StepProgressProps {
    /// Zero-based index of the current step
    pub current: usize,
    pub total: usize,
    /// e.g. "Step 2 of 6"
    pub label: String,
    pub title: String,
}

#[component]
pub fn StepProgress(props: StepProgressProps) -> Element {
    let percent = if props.total == 0 {
        0
    } else {
        (props.current + 1) * 100 / props.total
    };

    rsx! {
        div {
            class: "step-progress",
            div {
                class: "step-counter",
                "{props.label}"
            }
            div {
                class: "progress-track",
                style: "background-color: #e5e7eb; height: 6px; border-radius: 3px;",
                div {
                    class: "progress-fill",
                    style: "background-color: #8b5cf6; height: 6px; border-radius: 3px; width: {percent}%;",
                }
            }
            h2 {
                class: "form-title",
                "{props.title}"
            }
        }
    }
}
