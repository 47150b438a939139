use async_trait::async_trait;
use gloo_storage::{LocalStorage, SessionStorage, Storage};
use std::cell::RefCell;
use tracing::info;

use super::errors::{ClientError, ClientResult};
use super::types::TokenPair;
use crate::services::config::StorageConfig;

/// Where the access and refresh tokens live between requests
#[async_trait(?Send)]
pub trait TokenStore {
    async fn get_auth_token(&self) -> ClientResult<Option<String>>;
    async fn get_refresh_token(&self) -> ClientResult<Option<String>>;
    async fn set_auth_token(&self, token: &str) -> ClientResult<()>;
    async fn set_refresh_token(&self, token: &str) -> ClientResult<()>;
    async fn clear_all_tokens(&self) -> ClientResult<()>;

    /// Store both halves of a freshly issued pair
    async fn store_pair(&self, pair: &TokenPair) -> ClientResult<()> {
        self.set_auth_token(&pair.access_token).await?;
        self.set_refresh_token(&pair.refresh_token).await
    }
}

/// Process-local store; tokens disappear with the page
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    access: RefCell<Option<String>>,
    refresh: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        Self {
            access: RefCell::new(Some(access.to_string())),
            refresh: RefCell::new(Some(refresh.to_string())),
        }
    }
}

#[async_trait(?Send)]
impl TokenStore for MemoryTokenStore {
    async fn get_auth_token(&self) -> ClientResult<Option<String>> {
        Ok(self.access.borrow().clone())
    }

    async fn get_refresh_token(&self) -> ClientResult<Option<String>> {
        Ok(self.refresh.borrow().clone())
    }

    async fn set_auth_token(&self, token: &str) -> ClientResult<()> {
        *self.access.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    async fn set_refresh_token(&self, token: &str) -> ClientResult<()> {
        *self.refresh.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    async fn clear_all_tokens(&self) -> ClientResult<()> {
        self.access.borrow_mut().take();
        self.refresh.borrow_mut().take();
        Ok(())
    }
}

/// Browser-backed store using sessionStorage (default) or localStorage
#[derive(Debug, Clone)]
pub struct BrowserTokenStore {
    key_prefix: String,
    use_session_storage: bool,
}

impl BrowserTokenStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            key_prefix: config.key_prefix.clone(),
            use_session_storage: !config.persistent_tokens,
        }
    }

    fn access_key(&self) -> String {
        format!("{}access_token", self.key_prefix)
    }

    fn refresh_key(&self) -> String {
        format!("{}refresh_token", self.key_prefix)
    }

    fn read(&self, key: &str) -> Option<String> {
        let stored = if self.use_session_storage {
            SessionStorage::get::<String>(key)
        } else {
            LocalStorage::get::<String>(key)
        };
        stored.ok()
    }

    fn write(&self, key: &str, value: &str) -> ClientResult<()> {
        let result = if self.use_session_storage {
            SessionStorage::set(key, value)
        } else {
            LocalStorage::set(key, value)
        };
        result.map_err(|e| ClientError::Storage {
            message: format!("Failed to store {}: {:?}", key, e),
        })
    }

    fn delete(&self, key: &str) {
        if self.use_session_storage {
            SessionStorage::delete(key);
        } else {
            LocalStorage::delete(key);
        }
    }
}

#[async_trait(?Send)]
impl TokenStore for BrowserTokenStore {
    async fn get_auth_token(&self) -> ClientResult<Option<String>> {
        Ok(self.read(&self.access_key()))
    }

    async fn get_refresh_token(&self) -> ClientResult<Option<String>> {
        Ok(self.read(&self.refresh_key()))
    }

    async fn set_auth_token(&self, token: &str) -> ClientResult<()> {
        self.write(&self.access_key(), token)
    }

    async fn set_refresh_token(&self, token: &str) -> ClientResult<()> {
        self.write(&self.refresh_key(), token)
    }

    async fn clear_all_tokens(&self) -> ClientResult<()> {
        self.delete(&self.access_key());
        self.delete(&self.refresh_key());
        info!("Stored tokens cleared");
        Ok(())
    }
}
