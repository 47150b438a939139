//! Debounced username availability check.
//!
//! Every call to [`UsernameAvailability::check`] takes a new generation
//! number. A check waits out the debounce window and only queries the server
//! if no newer check started meanwhile; a reply that arrives after a newer
//! check started is dropped. Rapid typing therefore produces one request for
//! the final value, and a slow reply can never overwrite a newer status.

use std::cell::Cell;
use std::time::Duration;
use tokio::sync::watch;

use super::steps::username_is_well_formed;
use crate::services::client::UsernameLookup;
use crate::utils::timing::sleep;
use crate::{console_debug, console_warn};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AvailabilityStatus {
    /// Nothing worth checking has been typed
    #[default]
    Unknown,
    Checking,
    Available,
    Unavailable,
    /// The lookup failed; the user may still continue
    Error,
}

impl AvailabilityStatus {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AvailabilityStatus::Unknown => None,
            AvailabilityStatus::Checking => Some("Checking availability..."),
            AvailabilityStatus::Available => Some("Username is available"),
            AvailabilityStatus::Unavailable => Some("Username is already taken"),
            AvailabilityStatus::Error => Some("Couldn't check availability right now"),
        }
    }

    /// Whether the Username step may continue with this status
    pub fn allows_continue(&self) -> bool {
        !matches!(
            self,
            AvailabilityStatus::Checking | AvailabilityStatus::Unavailable
        )
    }
}

pub struct UsernameAvailability<L> {
    lookup: L,
    debounce: Duration,
    generation: Cell<u64>,
    status: watch::Sender<AvailabilityStatus>,
}

impl<L: UsernameLookup> UsernameAvailability<L> {
    pub fn new(lookup: L, debounce: Duration) -> Self {
        let (status, _) = watch::channel(AvailabilityStatus::Unknown);
        Self {
            lookup,
            debounce,
            generation: Cell::new(0),
            status,
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn status(&self) -> AvailabilityStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AvailabilityStatus> {
        self.status.subscribe()
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    fn publish(&self, status: AvailabilityStatus) {
        self.status.send_replace(status);
    }

    /// Check `candidate` after the debounce window.
    ///
    /// Returns the published status, or `None` when a newer check or
    /// [`cancel`](Self::cancel) superseded this one.
    pub async fn check(&self, candidate: &str) -> Option<AvailabilityStatus> {
        let generation = self.next_generation();
        let candidate = candidate.trim();

        if !username_is_well_formed(candidate) {
            self.publish(AvailabilityStatus::Unknown);
            return Some(AvailabilityStatus::Unknown);
        }

        self.publish(AvailabilityStatus::Checking);
        sleep(self.debounce).await;
        if !self.is_current(generation) {
            return None;
        }

        console_debug!("[Availability] Checking '{}'", candidate);
        let result = self.lookup.is_username_available(candidate).await;
        if !self.is_current(generation) {
            console_debug!("[Availability] Dropping stale reply for '{}'", candidate);
            return None;
        }

        let status = match result {
            Ok(true) => AvailabilityStatus::Available,
            Ok(false) => AvailabilityStatus::Unavailable,
            Err(e) => {
                console_warn!("[Availability] Lookup failed: {}", e);
                AvailabilityStatus::Error
            }
        };
        self.publish(status.clone());
        Some(status)
    }

    /// Abandon any pending check, e.g. when the screen goes away
    pub fn cancel(&self) {
        self.next_generation();
        self.publish(AvailabilityStatus::Unknown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client::testing::FakeApi;
    use crate::services::client::ClientResult;
    use async_trait::async_trait;
    use std::cell::RefCell;

    const WINDOW: Duration = Duration::from_millis(500);

    fn checker(api: FakeApi) -> UsernameAvailability<FakeApi> {
        UsernameAvailability::new(api, WINDOW)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_sends_one_request() {
        let checker = checker(FakeApi::default());

        let (a, b, c) = futures::join!(
            checker.check("ali"),
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                checker.check("alic").await
            },
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                checker.check("alice").await
            },
        );

        assert_eq!(a, None);
        assert_eq!(b, None);
        assert_eq!(c, Some(AvailabilityStatus::Available));
        assert_eq!(checker.lookup().lookups.borrow().as_slice(), ["alice"]);
        assert_eq!(checker.status(), AvailabilityStatus::Available);
    }

    #[tokio::test(start_paused = true)]
    async fn test_taken_username() {
        let checker = checker(FakeApi {
            taken_usernames: vec!["alice".to_string()],
            ..FakeApi::default()
        });
        assert_eq!(
            checker.check(" alice ").await,
            Some(AvailabilityStatus::Unavailable)
        );
        assert!(!checker.status().allows_continue());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_input_resets_without_request() {
        let checker = checker(FakeApi::default());
        assert_eq!(checker.check("a!").await, Some(AvailabilityStatus::Unknown));
        assert_eq!(checker.check("").await, Some(AvailabilityStatus::Unknown));
        assert!(checker.lookup().lookups.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_failure_is_reported() {
        let checker = checker(FakeApi {
            lookup_fails: true,
            ..FakeApi::default()
        });
        assert_eq!(checker.check("alice").await, Some(AvailabilityStatus::Error));
        assert!(checker.status().allows_continue());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_check() {
        let checker = checker(FakeApi::default());
        let (result, _) = futures::join!(checker.check("alice"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            checker.cancel();
        });

        assert_eq!(result, None);
        assert_eq!(checker.status(), AvailabilityStatus::Unknown);
        assert!(checker.lookup().lookups.borrow().is_empty());
    }

    /// Answers after a delay, so a newer check can start mid-request
    struct SlowLookup {
        calls: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl UsernameLookup for SlowLookup {
        async fn is_username_available(&self, username: &str) -> ClientResult<bool> {
            self.calls.borrow_mut().push(username.to_string());
            tokio::time::sleep(Duration::from_millis(1_000)).await;
            Ok(username != "taken_name")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_reply_cannot_overwrite_newer_status() {
        let checker = UsernameAvailability::new(
            SlowLookup {
                calls: RefCell::new(Vec::new()),
            },
            WINDOW,
        );

        let (first, second) = futures::join!(checker.check("alice"), async {
            // After the first debounce, while its request is in flight
            tokio::time::sleep(Duration::from_millis(700)).await;
            checker.check("taken_name").await
        });

        assert_eq!(first, None);
        assert_eq!(second, Some(AvailabilityStatus::Unavailable));
        assert_eq!(checker.status(), AvailabilityStatus::Unavailable);
        assert_eq!(checker.lookup().calls.borrow().len(), 2);
    }
}
