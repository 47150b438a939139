use dioxus::prelude::*;

use crate::services::client::{AuthHandle, AuthStatus};
use crate::console_warn;

/// Sign-in state as seen by the screens; `None` until stored tokens have
/// been checked on startup
pub type SessionStatus = Signal<Option<AuthStatus>>;

#[derive(Props, PartialEq, Clone)]
pub struct AuthScopeProps {
    pub auth: AuthHandle,
    pub children: Element,
}

/// Provides the auth service and a live [`SessionStatus`] to everything below
#[component]
pub fn AuthScope(props: AuthScopeProps) -> Element {
    let auth = use_context_provider(|| props.auth.clone());
    let mut status: SessionStatus = use_context_provider(|| Signal::new(None));

    use_future(move || {
        let auth = auth.clone();
        async move {
            if let Err(e) = auth.session().restore().await {
                console_warn!("[Session] Could not read stored tokens: {}", e);
            }
            let mut updates = auth.session().subscribe();
            status.set(Some(*updates.borrow_and_update()));
            while updates.changed().await.is_ok() {
                let latest = *updates.borrow_and_update();
                status.set(Some(latest));
            }
        }
    });

    rsx! { {props.children} }
}

pub fn use_session_status() -> SessionStatus {
    use_context()
}
