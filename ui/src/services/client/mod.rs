// Client-side access to the onboarding backend
//
// - HTTP API client (registration, confirmation, login, refresh, profile)
// - Token storage in memory or browser storage
// - Session state with single-flight token refresh

pub mod api_client;
pub mod auth;
pub mod errors;
pub mod session;
pub mod session_refresh;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api_client::ApiClient;
pub use auth::{AuthHandle, AuthService, BrowserAuthService};
pub use errors::{ClientError, ClientResult};
pub use session::{BrowserTokenStore, MemoryTokenStore, TokenStore};
pub use session_refresh::{AuthStatus, SessionState};
pub use traits::{AccountApi, ProfileApi, TokenRefresher, UsernameLookup};
pub use types::*;
