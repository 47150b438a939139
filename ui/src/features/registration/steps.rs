use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::features::wizard::{
    FieldRules, Flow, FormData, Schema, StepDefinition, StepSequencer, Wizard, WizardError,
};
use crate::services::client::ContactMethod;
use crate::services::config::WizardConfig;

pub mod fields {
    pub const NAME: &str = "name";
    pub const USERNAME: &str = "username";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const CONTACT_METHOD: &str = "contactMethod";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const OTP: &str = "otp";
}

/// Registration screens in order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationStep {
    Name,
    Username,
    DateOfBirth,
    Password,
    Contact,
    Confirmation,
}

impl RegistrationStep {
    pub const ALL: [RegistrationStep; 6] = [
        RegistrationStep::Name,
        RegistrationStep::Username,
        RegistrationStep::DateOfBirth,
        RegistrationStep::Password,
        RegistrationStep::Contact,
        RegistrationStep::Confirmation,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|step| step == self)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegistrationStep::Name => "Name",
            RegistrationStep::Username => "Username",
            RegistrationStep::DateOfBirth => "Date of birth",
            RegistrationStep::Password => "Password",
            RegistrationStep::Contact => "Contact",
            RegistrationStep::Confirmation => "Confirmation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RegistrationStep::Name => "What's your name?",
            RegistrationStep::Username => "Pick a username",
            RegistrationStep::DateOfBirth => "When's your birthday?",
            RegistrationStep::Password => "Create a password",
            RegistrationStep::Contact => "How can we reach you?",
            RegistrationStep::Confirmation => "Enter your code",
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            RegistrationStep::Name => &[fields::NAME],
            RegistrationStep::Username => &[fields::USERNAME],
            RegistrationStep::DateOfBirth => &[fields::DATE_OF_BIRTH],
            RegistrationStep::Password => &[fields::PASSWORD, fields::CONFIRM_PASSWORD],
            RegistrationStep::Contact => &[fields::CONTACT_METHOD, fields::EMAIL, fields::PHONE],
            RegistrationStep::Confirmation => &[fields::OTP],
        }
    }

    /// Steps whose "continue" talks to the server
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            RegistrationStep::Contact | RegistrationStep::Confirmation
        )
    }

    fn definition(&self) -> StepDefinition {
        self.fields()
            .iter()
            .fold(StepDefinition::new(self.name()), |step, field| {
                step.field(*field)
            })
    }
}

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("valid username pattern"));
static HAS_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("valid letter pattern"));
static HAS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("valid digit pattern"));
static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid digits pattern"));
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern")
});
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone pattern"));

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;

/// Static username check; only well-formed names are worth asking the server about
pub fn username_is_well_formed(username: &str) -> bool {
    let len = username.chars().count();
    (USERNAME_MIN..=USERNAME_MAX).contains(&len) && USERNAME_PATTERN.is_match(username)
}

/// Strip the separators people type into phone numbers
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect()
}

/// Contact step answers; only the chosen channel is kept, phones without separators
pub fn contact_candidate(method: ContactMethod, email: &str, phone: &str) -> FormData {
    let (email, phone) = match method {
        ContactMethod::Email => (email.trim().to_string(), String::new()),
        ContactMethod::Phone => (String::new(), normalize_phone(phone.trim())),
    };
    FormData::new()
        .with(fields::CONTACT_METHOD, method.as_str())
        .with(fields::EMAIL, email)
        .with(fields::PHONE, phone)
}

pub fn registration_schema(config: &WizardConfig, today: NaiveDate) -> Schema {
    let otp_message = format!("The code has {} digits", config.otp_length);

    Schema::new()
        .field(
            FieldRules::new(fields::NAME)
                .required("Name is required")
                .max_length(50, "Name must be 50 characters or fewer"),
        )
        .field(
            FieldRules::new(fields::USERNAME)
                .required("Username is required")
                .min_length(USERNAME_MIN, "Username must be at least 3 characters")
                .max_length(USERNAME_MAX, "Username must be 30 characters or fewer")
                .pattern(
                    USERNAME_PATTERN.clone(),
                    "Use only letters, numbers, underscores and periods",
                ),
        )
        .field(
            FieldRules::new(fields::DATE_OF_BIRTH)
                .required("Date of birth is required")
                .minimum_age(
                    config.minimum_age_years,
                    today,
                    format!(
                        "You must be at least {} years old",
                        config.minimum_age_years
                    ),
                ),
        )
        .field(
            FieldRules::new(fields::PASSWORD)
                .required("Password is required")
                .min_length(8, "Password must be at least 8 characters")
                .pattern(HAS_LETTER.clone(), "Password must contain a letter")
                .pattern(HAS_DIGIT.clone(), "Password must contain a number"),
        )
        .field(
            FieldRules::new(fields::CONFIRM_PASSWORD)
                .required("Please confirm your password")
                .matches_field(fields::PASSWORD, "Passwords do not match"),
        )
        .field(
            FieldRules::new(fields::CONTACT_METHOD)
                .required("Choose email or phone")
                .one_of(["email", "phone"], "Choose email or phone"),
        )
        .field(
            FieldRules::new(fields::EMAIL)
                .required_when(fields::CONTACT_METHOD, "email", "Email is required")
                .pattern(EMAIL_PATTERN.clone(), "Enter a valid email address"),
        )
        .field(
            FieldRules::new(fields::PHONE)
                .required_when(fields::CONTACT_METHOD, "phone", "Phone number is required")
                .pattern(PHONE_PATTERN.clone(), "Enter a valid phone number"),
        )
        .field(
            FieldRules::new(fields::OTP)
                .required("Enter the code we sent you")
                .pattern(DIGITS_ONLY.clone(), otp_message.clone())
                .min_length(config.otp_length, otp_message.clone())
                .max_length(config.otp_length, otp_message),
        )
}

pub fn registration_wizard(config: &WizardConfig, today: NaiveDate) -> Result<Wizard, WizardError> {
    let steps = RegistrationStep::ALL
        .iter()
        .map(RegistrationStep::definition)
        .collect();
    let sequencer = StepSequencer::linear(Flow::Registration, steps)?;
    Ok(Wizard::new(sequencer, registration_schema(config, today)))
}
