//! Navigation bridge between the wizard engine and the host router.
//!
//! The wizard never manipulates screen stacks itself. It computes an
//! [`AppRoute`] and asks a [`NavigationBridge`] to push it, go back, or tell
//! whether there is anything to go back to. The web binary implements the
//! bridge over the Dioxus router; tests use a recording double.

use std::fmt;
use std::rc::Rc;

/// Every destination the onboarding screens can request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Welcome,
    Login,
    Registration { step: usize },
    RegistrationComplete,
    ProfileCreation { step: usize },
    ProfileComplete,
    Home,
}

impl AppRoute {
    /// URL path for this route; must agree with the web `Routable` enum
    pub fn path(&self) -> String {
        match self {
            AppRoute::Welcome => "/".to_string(),
            AppRoute::Login => "/login".to_string(),
            AppRoute::Registration { step } => format!("/register/{}", step),
            AppRoute::RegistrationComplete => "/registered".to_string(),
            AppRoute::ProfileCreation { step } => format!("/profile/create/{}", step),
            AppRoute::ProfileComplete => "/profile/complete".to_string(),
            AppRoute::Home => "/home".to_string(),
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Screen transitions requested by the wizard
pub trait NavigationBridge {
    fn push(&self, route: AppRoute);
    fn back(&self);
    fn can_go_back(&self) -> bool;
}

/// Shared, comparable handle to a navigation bridge.
///
/// Dioxus props must be `Clone + PartialEq`; handles compare by identity.
#[derive(Clone)]
pub struct NavHandle(Rc<dyn NavigationBridge>);

impl NavHandle {
    pub fn new(bridge: impl NavigationBridge + 'static) -> Self {
        Self(Rc::new(bridge))
    }
}

impl PartialEq for NavHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl NavigationBridge for NavHandle {
    fn push(&self, route: AppRoute) {
        crate::console_info!("[NAV] push {}", route);
        self.0.push(route);
    }

    fn back(&self) {
        crate::console_info!("[NAV] back");
        self.0.back();
    }

    fn can_go_back(&self) -> bool {
        self.0.can_go_back()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(AppRoute::Welcome.path(), "/");
        assert_eq!(AppRoute::Registration { step: 2 }.path(), "/register/2");
        assert_eq!(
            AppRoute::ProfileCreation { step: 0 }.path(),
            "/profile/create/0"
        );
        assert_eq!(AppRoute::RegistrationComplete.to_string(), "/registered");
    }

    #[test]
    fn test_nav_handle_compares_by_identity() {
        let first = NavHandle::new(testing::RecordingNavigator::default());
        let second = NavHandle::new(testing::RecordingNavigator::default());
        assert!(first == first.clone());
        assert!(first != second);
    }
}
