//! Row of boxes for segmented entry (date of birth, one-time code).
//!
//! The view only renders and forwards keystrokes; the owning form keeps a
//! [`SegmentedInput`](crate::features::segmented::SegmentedInput) and passes
//! back its values and focus.

use dioxus::prelude::*;
use std::rc::Rc;

use crate::console_debug;

#[derive(Props, PartialEq, Clone)]
pub struct SegmentedInputViewProps {
    pub values: Vec<String>,
    pub widths: Vec<usize>,
    #[props(default)]
    pub placeholders: Vec<String>,
    /// Box that should hold keyboard focus
    pub focus: usize,
    #[props(default = "segment".to_string())]
    pub label: String,
    #[props(default)]
    pub invalid: bool,
    pub disabled: bool,
    /// `(index, text)` after the box's text changed
    pub on_input: EventHandler<(usize, String)>,
    /// Backspace pressed on an empty box
    pub on_backspace: EventHandler<usize>,
}

#[component]
pub fn SegmentedInputView(props: SegmentedInputViewProps) -> Element {
    let mut mounted = use_signal(Vec::<Option<Rc<MountedData>>>::new);

    use_effect(use_reactive((&props.focus,), move |(focus,)| {
        let target = mounted.peek().get(focus).cloned().flatten();
        if let Some(element) = target {
            spawn(async move {
                if let Err(e) = element.set_focus(true).await {
                    console_debug!("[Segmented] focus failed: {:?}", e);
                }
            });
        }
    }));

    let row_class = if props.invalid {
        "segmented-input invalid"
    } else {
        "segmented-input"
    };

    rsx! {
        div {
            class: "{row_class}",
            style: "display: flex; gap: 8px;",
            for (index, value) in props.values.iter().enumerate() {
                input {
                    key: "{index}",
                    class: "segment",
                    style: "width: {props.widths.get(index).copied().unwrap_or(1) + 2}ch; text-align: center;",
                    r#type: "text",
                    inputmode: "numeric",
                    autocomplete: "one-time-code",
                    aria_label: "{props.label} {index + 1}",
                    value: "{value}",
                    placeholder: props.placeholders.get(index).cloned().unwrap_or_default(),
                    disabled: props.disabled,
                    onmounted: move |event: MountedEvent| {
                        let mut slots = mounted.write();
                        if slots.len() <= index {
                            slots.resize(index + 1, None);
                        }
                        slots[index] = Some(event.data());
                    },
                    oninput: move |event| props.on_input.call((index, event.value())),
                    onkeydown: {
                        let empty = value.is_empty();
                        move |event: KeyboardEvent| {
                            if event.key() == Key::Backspace && empty {
                                event.prevent_default();
                                props.on_backspace.call(index);
                            }
                        }
                    },
                }
            }
        }
    }
}
