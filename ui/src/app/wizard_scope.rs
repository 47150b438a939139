use dioxus::prelude::*;

use crate::features::wizard::Wizard;

#[derive(Props, PartialEq, Clone)]
pub struct WizardScopeProps {
    pub wizard: Signal<Wizard>,
    pub children: Element,
}

/// Shares one flow's wizard with every screen of the flow group.
///
/// Leaving the group resets the wizard; results of calls still in flight
/// are then recognised as stale.
#[component]
pub fn WizardScope(props: WizardScopeProps) -> Element {
    let mut wizard = use_context_provider(|| props.wizard);

    use_drop(move || {
        if let Ok(mut state) = wizard.try_write() {
            state.invalidate();
        }
    });

    rsx! { {props.children} }
}

/// The wizard of the enclosing flow group
pub fn use_wizard() -> Signal<Wizard> {
    use_context()
}
