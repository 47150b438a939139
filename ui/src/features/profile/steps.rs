use std::collections::BTreeMap;

use super::social_links::MAX_SOCIAL_LINKS;
use crate::features::wizard::{
    FieldRules, Flow, FormData, FormValue, Schema, StepDefinition, StepSequencer, Wizard, WizardError,
};
use crate::services::config::WizardConfig;

pub mod fields {
    pub const PROFILE_PICTURE: &str = "profilePicture";
    pub const COVER_PHOTO: &str = "coverPhoto";
    pub const BIO: &str = "bio";
    pub const SOCIAL_LINKS: &str = "socialLinks";
    pub const LOCATION: &str = "location";
    pub const PROFILE_VISIBILITY: &str = "profileVisibility";
    pub const ALLOW_MESSAGES: &str = "allowMessages";
}

pub const BIO_MAX: usize = 160;
pub const LOCATION_MAX: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Followers,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Followers, Visibility::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Followers => "followers",
            Visibility::Private => "private",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Everyone",
            Visibility::Followers => "Followers only",
            Visibility::Private => "Only me",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileStep {
    ProfilePicture,
    CoverPhoto,
    Bio,
    SocialLinks,
    Location,
    Privacy,
}

impl ProfileStep {
    pub const ALL: [ProfileStep; 6] = [
        ProfileStep::ProfilePicture,
        ProfileStep::CoverPhoto,
        ProfileStep::Bio,
        ProfileStep::SocialLinks,
        ProfileStep::Location,
        ProfileStep::Privacy,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProfileStep::ProfilePicture => "Profile picture",
            ProfileStep::CoverPhoto => "Cover photo",
            ProfileStep::Bio => "Bio",
            ProfileStep::SocialLinks => "Social links",
            ProfileStep::Location => "Location",
            ProfileStep::Privacy => "Privacy",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProfileStep::ProfilePicture => "Add a profile picture",
            ProfileStep::CoverPhoto => "Add a cover photo",
            ProfileStep::Bio => "Tell people about yourself",
            ProfileStep::SocialLinks => "Link your other profiles",
            ProfileStep::Location => "Where are you based?",
            ProfileStep::Privacy => "Who can see your profile?",
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ProfileStep::ProfilePicture => &[fields::PROFILE_PICTURE],
            ProfileStep::CoverPhoto => &[fields::COVER_PHOTO],
            ProfileStep::Bio => &[fields::BIO],
            ProfileStep::SocialLinks => &[fields::SOCIAL_LINKS],
            ProfileStep::Location => &[fields::LOCATION],
            ProfileStep::Privacy => &[fields::PROFILE_VISIBILITY, fields::ALLOW_MESSAGES],
        }
    }

    fn definition(&self) -> StepDefinition {
        let step = StepDefinition::new(self.name());
        match self {
            ProfileStep::ProfilePicture => step.field_with_default(fields::PROFILE_PICTURE, ""),
            ProfileStep::CoverPhoto => step.field_with_default(fields::COVER_PHOTO, ""),
            ProfileStep::Bio => step.field_with_default(fields::BIO, ""),
            ProfileStep::SocialLinks => step.field_with_default(
                fields::SOCIAL_LINKS,
                FormValue::Map(BTreeMap::new()),
            ),
            ProfileStep::Location => step.field_with_default(fields::LOCATION, ""),
            ProfileStep::Privacy => step
                .field_with_default(fields::PROFILE_VISIBILITY, Visibility::Public.as_str())
                .field_with_default(fields::ALLOW_MESSAGES, true),
        }
    }
}

pub fn profile_schema() -> Schema {
    Schema::new()
        .field(
            FieldRules::new(fields::PROFILE_PICTURE)
                .required("Choose a picture or skip this step"),
        )
        .field(FieldRules::new(fields::COVER_PHOTO).required("Choose a photo or skip this step"))
        .field(
            FieldRules::new(fields::BIO)
                .required("Write something or skip this step")
                .max_length(BIO_MAX, "Bio must be 160 characters or fewer"),
        )
        .field(
            FieldRules::new(fields::SOCIAL_LINKS)
                .required("Add a link or skip this step")
                .max_entries(MAX_SOCIAL_LINKS, "You can add up to 5 links"),
        )
        .field(
            FieldRules::new(fields::LOCATION)
                .required("Enter a location or skip this step")
                .max_length(LOCATION_MAX, "Location must be 100 characters or fewer"),
        )
        .field(
            FieldRules::new(fields::PROFILE_VISIBILITY)
                .required("Choose who can see your profile")
                .one_of(
                    Visibility::ALL.map(|v| v.as_str()),
                    "Choose who can see your profile",
                ),
        )
}

/// The profile defaults, as written when every step is skipped
pub fn profile_defaults() -> FormData {
    ProfileStep::ALL
        .iter()
        .map(ProfileStep::definition)
        .fold(FormData::new(), |data, step| {
            data.merged(&step.skip_candidate())
        })
}

pub fn profile_wizard(config: &WizardConfig) -> Result<Wizard, WizardError> {
    let steps = ProfileStep::ALL.iter().map(ProfileStep::definition).collect();
    let sequencer = StepSequencer::skippable(
        Flow::ProfileCreation,
        steps,
        config.profile_mandatory_steps,
    )?;
    Ok(Wizard::new(sequencer, profile_schema()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::wizard::{FormData, StepOutcome};

    #[test]
    fn test_every_step_skippable_by_default() {
        let wizard = profile_wizard(&WizardConfig::default()).unwrap();
        assert_eq!(wizard.sequencer().len(), 6);
        assert!((0..6).all(|index| wizard.sequencer().can_skip(index)));
    }

    #[test]
    fn test_mandatory_prefix_from_config() {
        let config = WizardConfig {
            profile_mandatory_steps: 1,
            ..WizardConfig::default()
        };
        let mut wizard = profile_wizard(&config).unwrap();
        assert!(wizard.skip_step().is_err());
    }

    #[test]
    fn test_first_three_mandatory_when_configured() {
        let config = WizardConfig {
            profile_mandatory_steps: 3,
            ..WizardConfig::default()
        };
        let wizard = profile_wizard(&config).unwrap();
        let sequencer = wizard.sequencer();
        assert!(!sequencer.can_skip(ProfileStep::Bio as usize));
        assert!(sequencer.can_skip(ProfileStep::SocialLinks as usize));
        assert!(sequencer.can_skip(ProfileStep::Privacy as usize));
    }

    #[test]
    fn test_defaults_shape() {
        let defaults = profile_defaults();
        assert_eq!(defaults.text(fields::PROFILE_PICTURE), Some(""));
        assert_eq!(defaults.text(fields::COVER_PHOTO), Some(""));
        assert_eq!(defaults.text(fields::BIO), Some(""));
        assert_eq!(defaults.text(fields::LOCATION), Some(""));
        assert_eq!(defaults.text(fields::PROFILE_VISIBILITY), Some("public"));
        assert_eq!(
            defaults.get(fields::ALLOW_MESSAGES),
            Some(&FormValue::Flag(true))
        );
        assert!(defaults
            .get(fields::SOCIAL_LINKS)
            .and_then(FormValue::as_map)
            .is_some_and(|map| map.is_empty()));
    }

    #[test]
    fn test_skipping_everything_completes_with_defaults() {
        let mut wizard = profile_wizard(&WizardConfig::default()).unwrap();
        for _ in 0..5 {
            assert!(matches!(
                wizard.skip_step().unwrap(),
                StepOutcome::Advanced { .. }
            ));
        }
        match wizard.skip_step().unwrap() {
            StepOutcome::Completed { data, .. } => assert_eq!(data, profile_defaults()),
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_bio_limit() {
        let wizard = profile_wizard(&WizardConfig::default()).unwrap();
        let long = FormData::new().with(fields::BIO, "x".repeat(161));
        assert_eq!(
            wizard.preview_errors(ProfileStep::Bio.fields(), &long)["bio"],
            "Bio must be 160 characters or fewer"
        );
    }

    #[test]
    fn test_visibility_must_be_known() {
        let wizard = profile_wizard(&WizardConfig::default()).unwrap();
        let data = FormData::new()
            .with(fields::PROFILE_VISIBILITY, "friends")
            .with(fields::ALLOW_MESSAGES, false);
        assert!(wizard
            .preview_errors(ProfileStep::Privacy.fields(), &data)
            .contains_key("profileVisibility"));
        assert_eq!(Visibility::parse("followers"), Some(Visibility::Followers));
    }
}
