use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by login, confirmation and refresh
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenPair {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Error payload returned by the API on non-success statuses
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub field: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub date_of_birth: String,
    pub password: String,
    pub contact_method: ContactMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email" => Some(ContactMethod::Email),
            "phone" => Some(ContactMethod::Phone),
            _ => None,
        }
    }

    /// Form field carrying the address for this method
    pub fn field(&self) -> &'static str {
        self.as_str()
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub username: String,
    pub code: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UsernameAvailabilityResponse {
    pub available: bool,
}

/// Profile created at the end of the profile-creation wizard
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    pub bio: String,
    pub social_links: std::collections::BTreeMap<String, String>,
    pub location: String,
    pub profile_visibility: String,
    pub allow_messages: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_shape() {
        let request = RegisterRequest {
            name: "Alice".to_string(),
            username: "alice".to_string(),
            date_of_birth: "2000-01-01".to_string(),
            password: "hunter22".to_string(),
            contact_method: ContactMethod::Email,
            email: Some("alice@example.com".to_string()),
            phone: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["dateOfBirth"], "2000-01-01");
        assert_eq!(json["contactMethod"], "email");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_token_pair_parses() {
        let pair: TokenPair =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#).unwrap();
        assert_eq!(pair.access_token, "a");
        assert_eq!(pair.refresh_token, "r");
    }
}
