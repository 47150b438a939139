//! Seams between the onboarding logic and the remote API.
//!
//! Everything is `?Send` because the client runs on the browser's single
//! thread; native tests drive the same traits with in-memory doubles.

use async_trait::async_trait;
use std::rc::Rc;

use super::errors::ClientResult;
use super::types::{
    ConfirmRequest, LoginRequest, ProfileRequest, RegisterRequest, RegisterResponse, TokenPair,
};

/// Unauthenticated account endpoints
#[async_trait(?Send)]
pub trait AccountApi {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse>;
    async fn confirm(&self, request: &ConfirmRequest) -> ClientResult<TokenPair>;
    async fn login(&self, request: &LoginRequest) -> ClientResult<TokenPair>;
}

#[async_trait(?Send)]
pub trait UsernameLookup {
    /// `Ok(true)` when nobody holds `username` yet
    async fn is_username_available(&self, username: &str) -> ClientResult<bool>;
}

#[async_trait(?Send)]
pub trait TokenRefresher {
    async fn refresh_token(&self, refresh_token: &str) -> ClientResult<TokenPair>;
}

/// Endpoints that need a signed-in user
#[async_trait(?Send)]
pub trait ProfileApi {
    async fn create_profile(&self, access_token: &str, request: &ProfileRequest)
        -> ClientResult<()>;
}

#[async_trait(?Send)]
impl<T: UsernameLookup + ?Sized> UsernameLookup for Rc<T> {
    async fn is_username_available(&self, username: &str) -> ClientResult<bool> {
        (**self).is_username_available(username).await
    }
}

#[async_trait(?Send)]
impl<T: TokenRefresher + ?Sized> TokenRefresher for Rc<T> {
    async fn refresh_token(&self, refresh_token: &str) -> ClientResult<TokenPair> {
        (**self).refresh_token(refresh_token).await
    }
}
