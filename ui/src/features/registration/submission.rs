//! Remote registration steps: building requests from collected answers and
//! mapping API failures back onto the wizard.

use tracing::{info, warn};

use super::steps::{fields, normalize_phone, RegistrationStep};
use crate::features::wizard::{FormData, StepFailure, WizardError};
use crate::services::client::{
    AccountApi, AuthService, ClientError, ConfirmRequest, ContactMethod, ProfileApi,
    RegisterRequest, TokenRefresher, TokenStore,
};

fn required_text(data: &FormData, field: &str) -> Result<String, WizardError> {
    data.text(field)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| WizardError::MissingField {
            field: field.to_string(),
        })
}

pub fn register_request(data: &FormData) -> Result<RegisterRequest, WizardError> {
    let method = data
        .text(fields::CONTACT_METHOD)
        .and_then(ContactMethod::parse)
        .ok_or_else(|| WizardError::MissingField {
            field: fields::CONTACT_METHOD.to_string(),
        })?;
    let date_of_birth = data
        .get(fields::DATE_OF_BIRTH)
        .and_then(|value| value.as_date())
        .ok_or_else(|| WizardError::MissingField {
            field: fields::DATE_OF_BIRTH.to_string(),
        })?;

    let (email, phone) = match method {
        ContactMethod::Email => (Some(required_text(data, fields::EMAIL)?), None),
        ContactMethod::Phone => (
            None,
            Some(normalize_phone(&required_text(data, fields::PHONE)?)),
        ),
    };

    Ok(RegisterRequest {
        name: required_text(data, fields::NAME)?,
        username: required_text(data, fields::USERNAME)?,
        date_of_birth: date_of_birth.format("%Y-%m-%d").to_string(),
        // Passwords are sent exactly as typed
        password: data
            .text(fields::PASSWORD)
            .filter(|password| !password.is_empty())
            .map(str::to_string)
            .ok_or_else(|| WizardError::MissingField {
                field: fields::PASSWORD.to_string(),
            })?,
        contact_method: method,
        email,
        phone,
    })
}

pub fn confirm_request(data: &FormData) -> Result<ConfirmRequest, WizardError> {
    Ok(ConfirmRequest {
        username: required_text(data, fields::USERNAME)?,
        code: required_text(data, fields::OTP)?,
    })
}

fn field_label(field: &str) -> &str {
    match field {
        fields::EMAIL => "email address",
        fields::PHONE => "phone number",
        fields::USERNAME => "username",
        other => other,
    }
}

/// Map an API error onto the step that triggered it.
///
/// Conflicts on one of `step_fields` become an inline error on that field
/// (`fallback_field` when the server does not say which). Everything else,
/// including conflicts on fields of earlier steps, is a form-level message.
pub fn step_failure(error: &ClientError, step_fields: &[&str], fallback_field: &str) -> StepFailure {
    match error {
        ClientError::Conflict { field, .. } => {
            let field = field.as_deref().unwrap_or(fallback_field);
            let message = format!("That {} is already in use", field_label(field));
            if step_fields.contains(&field) {
                StepFailure::Field {
                    field: field.to_string(),
                    message,
                }
            } else {
                StepFailure::Form(message)
            }
        }
        other => StepFailure::Form(other.user_message()),
    }
}

/// Contact step: create the account, which also sends the one-time code
pub async fn submit_contact_step<A, S>(
    auth: &AuthService<A, S>,
    payload: FormData,
) -> Result<(), StepFailure>
where
    A: AccountApi + ProfileApi + TokenRefresher,
    S: TokenStore,
{
    let request = register_request(&payload).map_err(|e| StepFailure::Form(e.to_string()))?;
    let fallback = request.contact_method.field();

    match auth.register(&request).await {
        Ok(_) => {
            info!("Verification code sent via {}", request.contact_method.as_str());
            Ok(())
        }
        Err(e) => {
            warn!("Registration rejected: {}", e);
            Err(step_failure(&e, RegistrationStep::Contact.fields(), fallback))
        }
    }
}

/// Confirmation step: verify the code and sign the new user in
pub async fn submit_confirmation_step<A, S>(
    auth: &AuthService<A, S>,
    payload: FormData,
) -> Result<(), StepFailure>
where
    A: AccountApi + ProfileApi + TokenRefresher,
    S: TokenStore,
{
    let request = confirm_request(&payload).map_err(|e| StepFailure::Form(e.to_string()))?;

    match auth.confirm(&request).await {
        Ok(()) => Ok(()),
        Err(ClientError::Unauthorized) | Err(ClientError::Api { status: 400, .. }) => {
            Err(StepFailure::Field {
                field: fields::OTP.to_string(),
                message: "That code is not valid. Check it and try again.".to_string(),
            })
        }
        Err(e) => {
            warn!("Confirmation failed: {}", e);
            Err(step_failure(&e, RegistrationStep::Confirmation.fields(), fields::OTP))
        }
    }
}
