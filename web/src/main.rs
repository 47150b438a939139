use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use ui::app::{
    use_profile_wizard, use_registration_wizard, AuthScope, LoginScreen, ProfileComplete,
    ProfileScreen, RegistrationComplete, RegistrationScreen, StartupError, WizardScope,
};
use ui::services::client::AuthHandle;
use ui::services::config::AppConfig;
use ui::services::navigation::{AppRoute, NavHandle, NavigationBridge};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context_provider(AppConfig::load);
    let auth = use_hook(|| AuthHandle::from_config(&config).map_err(|e| e.to_string()));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match auth {
            Ok(auth) => rsx! {
                AuthScope { auth, Router::<Route> {} }
            },
            Err(message) => rsx! {
                StartupError { message }
            },
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Welcome {},
        #[route("/login")]
        Login {},
        #[layout(RegistrationGroup)]
            #[route("/register/:step")]
            Register { step: usize },
        #[end_layout]
        #[route("/registered")]
        Registered {},
        #[layout(ProfileGroup)]
            #[route("/profile/create/:step")]
            CreateProfile { step: usize },
        #[end_layout]
        #[route("/profile/complete")]
        ProfileDone {},
        #[route("/home")]
        Home {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl From<AppRoute> for Route {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::Welcome => Route::Welcome {},
            AppRoute::Login => Route::Login {},
            AppRoute::Registration { step } => Route::Register { step },
            AppRoute::RegistrationComplete => Route::Registered {},
            AppRoute::ProfileCreation { step } => Route::CreateProfile { step },
            AppRoute::ProfileComplete => Route::ProfileDone {},
            AppRoute::Home => Route::Home {},
        }
    }
}

/// Wizard navigation over the Dioxus router
struct RouterBridge {
    navigator: Navigator,
}

impl NavigationBridge for RouterBridge {
    fn push(&self, route: AppRoute) {
        if let Some(failure) = self.navigator.push(Route::from(route)) {
            warn!("[NAV] push failed: {:?}", failure);
        }
    }

    fn back(&self) {
        self.navigator.go_back();
    }

    fn can_go_back(&self) -> bool {
        self.navigator.can_go_back()
    }
}

#[component]
fn Shell() -> Element {
    use_context_provider(|| NavHandle::new(RouterBridge { navigator: navigator() }));

    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn RegistrationGroup() -> Element {
    match use_registration_wizard() {
        Ok(wizard) => rsx! {
            WizardScope { wizard, Outlet::<Route> {} }
        },
        Err(e) => rsx! {
            StartupError { message: e.to_string() }
        },
    }
}

#[component]
fn ProfileGroup() -> Element {
    match use_profile_wizard() {
        Ok(wizard) => rsx! {
            WizardScope { wizard, Outlet::<Route> {} }
        },
        Err(e) => rsx! {
            StartupError { message: e.to_string() }
        },
    }
}

#[component]
fn Welcome() -> Element {
    rsx! { ui::app::Welcome {} }
}

#[component]
fn Login() -> Element {
    rsx! { LoginScreen {} }
}

#[component]
fn Register(step: usize) -> Element {
    rsx! { RegistrationScreen { step } }
}

#[component]
fn Registered() -> Element {
    rsx! { RegistrationComplete {} }
}

#[component]
fn CreateProfile(step: usize) -> Element {
    rsx! { ProfileScreen { step } }
}

#[component]
fn ProfileDone() -> Element {
    rsx! { ProfileComplete {} }
}

#[component]
fn Home() -> Element {
    rsx! { ui::app::Home {} }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_context::<NavHandle>();
    let path = segments.join("/");

    rsx! {
        div {
            class: "onboarding-container",
            p { "Nothing lives at /{path}." }
            button {
                class: "primary-button",
                onclick: move |_| nav.push(AppRoute::Welcome),
                "Start over"
            }
        }
    }
}
