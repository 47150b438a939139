use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, instrument};

use super::errors::{ClientError, ClientResult};
use super::traits::{AccountApi, ProfileApi, TokenRefresher, UsernameLookup};
use super::types::*;
use crate::services::config::ApiConfig;

/// HTTP client for the onboarding backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| ClientError::Network {
                message: format!("Invalid user agent '{}': {}", config.user_agent, e),
            })?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);

        let http_client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Network {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> ClientResult<Response> {
        let mut request = self
            .http_client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| ClientError::Network {
            message: format!("Failed to call {}: {}", path, e),
        })?;
        Self::check_status(path, response).await
    }

    /// Turn a non-success status into the matching `ClientError`
    async fn check_status(path: &str, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
        error!("{} failed with status {}: {}", path, status, body);
        Err(ClientError::from_status(status.as_u16(), &body))
    }

    async fn parse<T: DeserializeOwned>(path: &str, response: Response) -> ClientResult<T> {
        let text = response.text().await.map_err(|e| ClientError::Network {
            message: format!("Failed to read {} response: {}", path, e),
        })?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse {
            expected: std::any::type_name::<T>().to_string(),
            got: format!("{} ({})", text, e),
        })
    }

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        let path = "/auth/register";
        let response = self.post(path, request, None).await?;
        // Some deployments answer 201 with an empty body
        let text = response.text().await.map_err(|e| ClientError::Network {
            message: format!("Failed to read {} response: {}", path, e),
        })?;
        if text.trim().is_empty() {
            info!("Registration accepted for {}", request.username);
            return Ok(RegisterResponse::default());
        }
        let parsed = serde_json::from_str(&text)?;
        info!("Registration accepted for {}", request.username);
        Ok(parsed)
    }

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    pub async fn confirm(&self, request: &ConfirmRequest) -> ClientResult<TokenPair> {
        let path = "/auth/confirm";
        let response = self.post(path, request, None).await?;
        let tokens = Self::parse(path, response).await?;
        info!("Account confirmed for {}", request.username);
        Ok(tokens)
    }

    #[instrument(skip(self, request), fields(identifier = %request.identifier), err)]
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<TokenPair> {
        let path = "/auth/login";
        let response = self.post(path, request, None).await?;
        let tokens = Self::parse(path, response).await?;
        info!("Login successful for {}", request.identifier);
        Ok(tokens)
    }

    #[instrument(skip(self, refresh_token), err)]
    pub async fn refresh_token(&self, refresh_token: &str) -> ClientResult<TokenPair> {
        let path = "/auth/refresh-token";
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self.post(path, &body, None).await?;
        Self::parse(path, response).await
    }

    #[instrument(skip(self), err)]
    pub async fn check_username(&self, username: &str) -> ClientResult<bool> {
        let path = format!("/auth/username-available/{}", username);
        let response = self
            .http_client
            .get(self.url(&path))
            .send()
            .await
            .map_err(|e| ClientError::Network {
                message: format!("Failed to call {}: {}", path, e),
            })?;
        let response = Self::check_status(&path, response).await?;
        let body: UsernameAvailabilityResponse = Self::parse(&path, response).await?;
        Ok(body.available)
    }

    #[instrument(skip(self, access_token, request), err)]
    pub async fn create_profile(
        &self,
        access_token: &str,
        request: &ProfileRequest,
    ) -> ClientResult<()> {
        self.post("/profile", request, Some(access_token)).await?;
        info!("Profile created");
        Ok(())
    }
}

#[async_trait(?Send)]
impl AccountApi for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        ApiClient::register(self, request).await
    }

    async fn confirm(&self, request: &ConfirmRequest) -> ClientResult<TokenPair> {
        ApiClient::confirm(self, request).await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<TokenPair> {
        ApiClient::login(self, request).await
    }
}

#[async_trait(?Send)]
impl UsernameLookup for ApiClient {
    async fn is_username_available(&self, username: &str) -> ClientResult<bool> {
        self.check_username(username).await
    }
}

#[async_trait(?Send)]
impl TokenRefresher for ApiClient {
    async fn refresh_token(&self, refresh_token: &str) -> ClientResult<TokenPair> {
        ApiClient::refresh_token(self, refresh_token).await
    }
}

#[async_trait(?Send)]
impl ProfileApi for ApiClient {
    async fn create_profile(
        &self,
        access_token: &str,
        request: &ProfileRequest,
    ) -> ClientResult<()> {
        ApiClient::create_profile(self, access_token, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let config = ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(
            client.url("/auth/login"),
            "https://api.example.com/auth/login"
        );
    }
}
