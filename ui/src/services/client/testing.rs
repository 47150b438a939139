//! In-memory API double shared by the client, registration and profile tests

use async_trait::async_trait;
use std::cell::{Cell, RefCell};

use super::errors::{ClientError, ClientResult};
use super::traits::{AccountApi, ProfileApi, TokenRefresher, UsernameLookup};
use super::types::*;

pub struct FakeApi {
    pub register_result: ClientResult<RegisterResponse>,
    pub confirm_result: ClientResult<TokenPair>,
    pub login_result: ClientResult<TokenPair>,
    pub profile_error: Option<ClientError>,
    pub refresh_fails: bool,
    /// Token accepted by authorised endpoints; refresh hands this one out
    pub valid_access_token: String,
    pub taken_usernames: Vec<String>,
    pub lookup_fails: bool,

    pub registrations: RefCell<Vec<RegisterRequest>>,
    pub confirmations: RefCell<Vec<ConfirmRequest>>,
    pub logins: RefCell<Vec<String>>,
    pub profiles: RefCell<Vec<ProfileRequest>>,
    pub lookups: RefCell<Vec<String>>,
    pub refreshes: Cell<usize>,
}

pub fn token_pair(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            register_result: Ok(RegisterResponse::default()),
            confirm_result: Ok(token_pair("access-confirm", "refresh-confirm")),
            login_result: Ok(token_pair("access-login", "refresh-login")),
            profile_error: None,
            refresh_fails: false,
            valid_access_token: "access-login".to_string(),
            taken_usernames: Vec::new(),
            lookup_fails: false,
            registrations: RefCell::new(Vec::new()),
            confirmations: RefCell::new(Vec::new()),
            logins: RefCell::new(Vec::new()),
            profiles: RefCell::new(Vec::new()),
            lookups: RefCell::new(Vec::new()),
            refreshes: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl AccountApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        self.registrations.borrow_mut().push(request.clone());
        self.register_result.clone()
    }

    async fn confirm(&self, request: &ConfirmRequest) -> ClientResult<TokenPair> {
        self.confirmations.borrow_mut().push(request.clone());
        self.confirm_result.clone()
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<TokenPair> {
        self.logins.borrow_mut().push(request.identifier.clone());
        self.login_result.clone()
    }
}

#[async_trait(?Send)]
impl TokenRefresher for FakeApi {
    async fn refresh_token(&self, _refresh_token: &str) -> ClientResult<TokenPair> {
        self.refreshes.set(self.refreshes.get() + 1);
        if self.refresh_fails {
            return Err(ClientError::Unauthorized);
        }
        Ok(token_pair(&self.valid_access_token, "refresh-rotated"))
    }
}

#[async_trait(?Send)]
impl ProfileApi for FakeApi {
    async fn create_profile(
        &self,
        access_token: &str,
        request: &ProfileRequest,
    ) -> ClientResult<()> {
        if access_token != self.valid_access_token {
            return Err(ClientError::Unauthorized);
        }
        if let Some(error) = &self.profile_error {
            return Err(error.clone());
        }
        self.profiles.borrow_mut().push(request.clone());
        Ok(())
    }
}

#[async_trait(?Send)]
impl UsernameLookup for FakeApi {
    async fn is_username_available(&self, username: &str) -> ClientResult<bool> {
        self.lookups.borrow_mut().push(username.to_string());
        if self.lookup_fails {
            return Err(ClientError::Network {
                message: "offline".to_string(),
            });
        }
        Ok(!self.taken_usernames.iter().any(|taken| taken == username))
    }
}
