use tracing::{info, warn};

use super::social_links::SocialLinks;
use super::steps::{fields, Visibility};
use crate::features::wizard::{FormData, StepFailure};
use crate::services::client::{
    AccountApi, AuthService, ProfileApi, ProfileRequest, TokenRefresher, TokenStore,
};

fn optional_text(data: &FormData, field: &str) -> Option<String> {
    data.text(field)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Request body for everything the profile wizard collected; skipped steps
/// contribute their defaults
pub fn profile_request(data: &FormData) -> ProfileRequest {
    let visibility = data
        .text(fields::PROFILE_VISIBILITY)
        .and_then(Visibility::parse)
        .unwrap_or(Visibility::Public);

    ProfileRequest {
        profile_picture: optional_text(data, fields::PROFILE_PICTURE),
        cover_photo: optional_text(data, fields::COVER_PHOTO),
        bio: optional_text(data, fields::BIO).unwrap_or_default(),
        social_links: SocialLinks::from_value(data.get(fields::SOCIAL_LINKS)).to_map(),
        location: optional_text(data, fields::LOCATION).unwrap_or_default(),
        profile_visibility: visibility.as_str().to_string(),
        allow_messages: data
            .get(fields::ALLOW_MESSAGES)
            .and_then(|value| value.as_flag())
            .unwrap_or(true),
    }
}

/// Final profile step: create the profile through the signed-in session
pub async fn submit_profile<A, S>(
    auth: &AuthService<A, S>,
    payload: FormData,
) -> Result<(), StepFailure>
where
    A: AccountApi + ProfileApi + TokenRefresher,
    S: TokenStore,
{
    let request = profile_request(&payload);
    match auth.create_profile(&request).await {
        Ok(()) => {
            info!("Profile created ({} links)", request.social_links.len());
            Ok(())
        }
        Err(e) => {
            warn!("Profile creation failed: {}", e);
            Err(StepFailure::Form(e.user_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profile::steps::profile_defaults;
    use crate::services::client::testing::FakeApi;
    use crate::services::client::{AuthStatus, ClientError, MemoryTokenStore};
    use std::collections::BTreeMap;

    #[test]
    fn test_defaults_become_empty_profile() {
        let request = profile_request(&profile_defaults());
        assert_eq!(request.profile_picture, None);
        assert_eq!(request.bio, "");
        assert!(request.social_links.is_empty());
        assert_eq!(request.profile_visibility, "public");
        assert!(request.allow_messages);
    }

    #[test]
    fn test_collected_answers_are_carried() {
        let mut links = BTreeMap::new();
        links.insert("x".to_string(), "https://x.com/alice".to_string());
        links.insert("myspace".to_string(), "https://myspace.com/alice".to_string());
        let data = profile_defaults()
            .with(fields::BIO, " Hello ")
            .with(fields::SOCIAL_LINKS, links)
            .with(fields::PROFILE_VISIBILITY, "followers")
            .with(fields::ALLOW_MESSAGES, false);

        let request = profile_request(&data);
        assert_eq!(request.bio, "Hello");
        assert_eq!(request.social_links.len(), 1);
        assert_eq!(request.profile_visibility, "followers");
        assert!(!request.allow_messages);
    }

    #[tokio::test]
    async fn test_submit_uses_signed_in_session() {
        let auth = AuthService::new(
            FakeApi::default(),
            MemoryTokenStore::with_tokens("access-login", "refresh"),
        );
        submit_profile(&auth, profile_defaults()).await.unwrap();
        assert_eq!(auth.api().profiles.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_expired_session_is_a_form_error() {
        let api = FakeApi {
            refresh_fails: true,
            ..FakeApi::default()
        };
        let auth = AuthService::new(api, MemoryTokenStore::with_tokens("stale", "refresh"));

        let result = submit_profile(&auth, profile_defaults()).await;
        assert_eq!(
            result,
            Err(StepFailure::Form(ClientError::SessionExpired.user_message()))
        );
        assert_eq!(auth.status(), AuthStatus::SignedOut);
    }
}
