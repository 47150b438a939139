use std::rc::Rc;
use tracing::{info, instrument};

use super::api_client::ApiClient;
use super::errors::ClientResult;
use super::session::{BrowserTokenStore, TokenStore};
use super::session_refresh::{AuthStatus, SessionState};
use super::traits::{AccountApi, ProfileApi, TokenRefresher};
use super::types::*;
use crate::services::config::AppConfig;

/// Account operations plus the session they establish
pub struct AuthService<A, S> {
    api: Rc<A>,
    session: SessionState<S, Rc<A>>,
}

impl<A, S> AuthService<A, S>
where
    A: AccountApi + ProfileApi + TokenRefresher,
    S: TokenStore,
{
    pub fn new(api: A, store: S) -> Self {
        let api = Rc::new(api);
        Self {
            session: SessionState::new(store, Rc::clone(&api)),
            api,
        }
    }

    pub fn api(&self) -> Rc<A> {
        Rc::clone(&self.api)
    }

    pub fn session(&self) -> &SessionState<S, Rc<A>> {
        &self.session
    }

    pub fn status(&self) -> AuthStatus {
        self.session.status()
    }

    #[instrument(skip(self, password), err)]
    pub async fn login(&self, identifier: &str, password: &str) -> ClientResult<()> {
        let request = LoginRequest {
            identifier: identifier.trim().to_string(),
            password: password.to_string(),
        };
        let tokens = self.api.login(&request).await?;
        self.session.sign_in(&tokens).await
    }

    pub async fn logout(&self) -> ClientResult<()> {
        info!("Signing out");
        self.session.sign_out().await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        self.api.register(request).await
    }

    /// Confirm the one-time code and keep the issued tokens
    pub async fn confirm(&self, request: &ConfirmRequest) -> ClientResult<()> {
        let tokens = self.api.confirm(request).await?;
        self.session.sign_in(&tokens).await
    }

    pub async fn create_profile(&self, request: &ProfileRequest) -> ClientResult<()> {
        let api = Rc::clone(&self.api);
        self.session
            .execute(move |token| {
                let api = Rc::clone(&api);
                async move { api.create_profile(&token, request).await }
            })
            .await
    }
}

pub type BrowserAuthService = AuthService<ApiClient, BrowserTokenStore>;

/// Shared handle to the browser auth service; compares by identity
#[derive(Clone)]
pub struct AuthHandle(Rc<BrowserAuthService>);

impl AuthHandle {
    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let api = ApiClient::new(&config.api)?;
        let store = BrowserTokenStore::new(&config.storage);
        Ok(Self(Rc::new(AuthService::new(api, store))))
    }

    pub fn service(&self) -> &BrowserAuthService {
        &self.0
    }
}

impl PartialEq for AuthHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for AuthHandle {
    type Target = BrowserAuthService;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client::errors::ClientError;
    use crate::services::client::session::MemoryTokenStore;
    use crate::services::client::testing::FakeApi;

    #[tokio::test]
    async fn test_login_stores_tokens() {
        let auth = AuthService::new(FakeApi::default(), MemoryTokenStore::new());
        auth.login(" alice ", "hunter22").await.unwrap();

        assert_eq!(auth.status(), AuthStatus::SignedIn);
        assert_eq!(
            auth.session().store().get_auth_token().await.unwrap().as_deref(),
            Some("access-login")
        );
        assert_eq!(auth.api().logins.borrow().as_slice(), ["alice"]);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_empty() {
        let api = FakeApi {
            login_result: Err(ClientError::Unauthorized),
            ..FakeApi::default()
        };
        let auth = AuthService::new(api, MemoryTokenStore::new());

        assert_eq!(
            auth.login("alice", "wrong").await,
            Err(ClientError::Unauthorized)
        );
        assert_eq!(auth.status(), AuthStatus::SignedOut);
        assert_eq!(auth.session().store().get_auth_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_profile_refreshes_expired_token() {
        let api = FakeApi {
            valid_access_token: "fresh".to_string(),
            ..FakeApi::default()
        };
        let auth = AuthService::new(api, MemoryTokenStore::with_tokens("stale", "refresh"));

        auth.create_profile(&ProfileRequest::default()).await.unwrap();

        assert_eq!(auth.api().refreshes.get(), 1);
        assert_eq!(auth.api().profiles.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let auth = AuthService::new(FakeApi::default(), MemoryTokenStore::with_tokens("a", "r"));
        auth.session().restore().await.unwrap();
        assert_eq!(auth.status(), AuthStatus::SignedIn);

        auth.logout().await.unwrap();
        assert_eq!(auth.status(), AuthStatus::SignedOut);
    }
}
