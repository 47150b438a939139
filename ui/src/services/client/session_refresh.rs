//! Authorised request execution with single-flight token refresh
//!
//! [`SessionState`] owns the token store and the refresher. Requests are
//! signed with the stored access token; a 401 triggers one refresh shared
//! by every request that failed with the same stale token, after which all
//! of them replay with the new token. When the refresh fails, tokens are
//! cleared, the status flips to [`AuthStatus::SignedOut`] and every waiting
//! request is rejected with [`ClientError::SessionExpired`].

use std::future::Future;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, instrument, warn};

use super::errors::{ClientError, ClientResult};
use super::session::TokenStore;
use super::traits::TokenRefresher;
use super::types::TokenPair;
use crate::{console_info, console_warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    SignedIn,
    SignedOut,
}

pub struct SessionState<S, R> {
    store: S,
    refresher: R,
    refresh_lock: Mutex<()>,
    status: watch::Sender<AuthStatus>,
}

impl<S: TokenStore, R: TokenRefresher> SessionState<S, R> {
    pub fn new(store: S, refresher: R) -> Self {
        let (status, _) = watch::channel(AuthStatus::SignedOut);
        Self {
            store,
            refresher,
            refresh_lock: Mutex::new(()),
            status,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    fn set_status(&self, status: AuthStatus) {
        self.status.send_replace(status);
    }

    /// Pick up tokens left by an earlier page load
    pub async fn restore(&self) -> ClientResult<AuthStatus> {
        let status = match self.store.get_auth_token().await? {
            Some(_) => AuthStatus::SignedIn,
            None => AuthStatus::SignedOut,
        };
        self.set_status(status);
        Ok(status)
    }

    pub async fn sign_in(&self, pair: &TokenPair) -> ClientResult<()> {
        self.store.store_pair(pair).await?;
        self.set_status(AuthStatus::SignedIn);
        Ok(())
    }

    pub async fn sign_out(&self) -> ClientResult<()> {
        let result = self.store.clear_all_tokens().await;
        self.set_status(AuthStatus::SignedOut);
        result
    }

    /// Run `request` with the current access token, refreshing once on 401
    pub async fn execute<T, F, Fut>(&self, mut request: F) -> ClientResult<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let Some(token) = self.store.get_auth_token().await? else {
            self.set_status(AuthStatus::SignedOut);
            return Err(ClientError::SessionExpired);
        };

        match request(token.clone()).await {
            Err(ClientError::Unauthorized) => {
                let fresh = self.refresh_after(&token).await?;
                request(fresh).await
            }
            other => other,
        }
    }

    /// Obtain a token newer than `stale`, refreshing at most once per stale token
    #[instrument(skip(self, stale), err)]
    async fn refresh_after(&self, stale: &str) -> ClientResult<String> {
        let _guard = self.refresh_lock.lock().await;

        match self.store.get_auth_token().await? {
            Some(current) if current != stale => {
                console_info!("[SessionState] Reusing token refreshed by another request");
                return Ok(current);
            }
            // An earlier refresh failed and cleared everything
            None => return Err(ClientError::SessionExpired),
            Some(_) => {}
        }

        let Some(refresh_token) = self.store.get_refresh_token().await? else {
            warn!("No refresh token stored; signing out");
            self.expire().await;
            return Err(ClientError::SessionExpired);
        };

        match self.refresher.refresh_token(&refresh_token).await {
            Ok(pair) => {
                self.store.store_pair(&pair).await?;
                self.set_status(AuthStatus::SignedIn);
                info!("Access token refreshed");
                Ok(pair.access_token)
            }
            Err(e) => {
                error!("Token refresh failed: {}", e);
                self.expire().await;
                Err(ClientError::SessionExpired)
            }
        }
    }

    async fn expire(&self) {
        if let Err(e) = self.store.clear_all_tokens().await {
            console_warn!("[SessionState] Failed to clear tokens: {}", e);
        }
        self.set_status(AuthStatus::SignedOut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client::session::MemoryTokenStore;
    use async_trait::async_trait;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingRefresher {
        calls: Cell<usize>,
        succeed: bool,
    }

    impl CountingRefresher {
        fn new(succeed: bool) -> Rc<Self> {
            Rc::new(Self {
                calls: Cell::new(0),
                succeed,
            })
        }
    }

    #[async_trait(?Send)]
    impl TokenRefresher for CountingRefresher {
        async fn refresh_token(&self, refresh_token: &str) -> ClientResult<TokenPair> {
            assert_eq!(refresh_token, "refresh-1");
            self.calls.set(self.calls.get() + 1);
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            if self.succeed {
                Ok(TokenPair {
                    access_token: "fresh".to_string(),
                    refresh_token: "refresh-2".to_string(),
                })
            } else {
                Err(ClientError::Unauthorized)
            }
        }
    }

    /// Rejects the stale token, accepts anything else
    async fn protected_call(token: String) -> ClientResult<String> {
        tokio::task::yield_now().await;
        if token == "stale" {
            Err(ClientError::Unauthorized)
        } else {
            Ok(token)
        }
    }

    fn session(
        refresher: &Rc<CountingRefresher>,
    ) -> SessionState<MemoryTokenStore, Rc<CountingRefresher>> {
        SessionState::new(
            MemoryTokenStore::with_tokens("stale", "refresh-1"),
            Rc::clone(refresher),
        )
    }

    #[tokio::test]
    async fn test_valid_token_skips_refresh() {
        let refresher = CountingRefresher::new(true);
        let session = SessionState::new(
            MemoryTokenStore::with_tokens("good", "refresh-1"),
            Rc::clone(&refresher),
        );

        assert_eq!(session.execute(protected_call).await, Ok("good".to_string()));
        assert_eq!(refresher.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_share_one_refresh() {
        let refresher = CountingRefresher::new(true);
        let session = session(&refresher);

        let (a, b, c) = futures::join!(
            session.execute(protected_call),
            session.execute(protected_call),
            session.execute(protected_call),
        );

        assert_eq!(a, Ok("fresh".to_string()));
        assert_eq!(b, Ok("fresh".to_string()));
        assert_eq!(c, Ok("fresh".to_string()));
        assert_eq!(refresher.calls.get(), 1);
        assert_eq!(
            session.store().get_refresh_token().await.unwrap().as_deref(),
            Some("refresh-2")
        );
        assert_eq!(session.status(), AuthStatus::SignedIn);
    }

    #[tokio::test]
    async fn test_failed_refresh_rejects_everyone_and_signs_out() {
        let refresher = CountingRefresher::new(false);
        let session = session(&refresher);
        session.restore().await.unwrap();
        let mut status = session.subscribe();
        assert_eq!(*status.borrow_and_update(), AuthStatus::SignedIn);

        let (a, b) = futures::join!(
            session.execute(protected_call),
            session.execute(protected_call),
        );

        assert_eq!(a, Err(ClientError::SessionExpired));
        assert_eq!(b, Err(ClientError::SessionExpired));
        assert_eq!(refresher.calls.get(), 1);
        assert_eq!(session.store().get_auth_token().await.unwrap(), None);
        assert_eq!(session.store().get_refresh_token().await.unwrap(), None);
        assert!(status.has_changed().unwrap());
        assert_eq!(*status.borrow(), AuthStatus::SignedOut);
    }

    #[tokio::test]
    async fn test_missing_token_is_session_expired() {
        let refresher = CountingRefresher::new(true);
        let session = SessionState::new(MemoryTokenStore::new(), Rc::clone(&refresher));

        assert_eq!(
            session.execute(protected_call).await,
            Err(ClientError::SessionExpired)
        );
        assert_eq!(refresher.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_and_out_publish_status() {
        let session = SessionState::new(MemoryTokenStore::new(), CountingRefresher::new(true));
        assert_eq!(session.status(), AuthStatus::SignedOut);

        session
            .sign_in(&TokenPair {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.status(), AuthStatus::SignedIn);

        session.sign_out().await.unwrap();
        assert_eq!(session.status(), AuthStatus::SignedOut);
        assert_eq!(session.store().get_auth_token().await.unwrap(), None);
    }
}
