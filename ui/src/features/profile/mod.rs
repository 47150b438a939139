//! Profile creation: six skippable steps submitted together at the end.

pub mod social_links;
pub mod steps;
pub mod submission;

pub use social_links::{SocialLinkError, SocialLinks, SocialPlatform, MAX_SOCIAL_LINKS};
pub use steps::{
    fields, profile_defaults, profile_schema, profile_wizard, ProfileStep, Visibility, BIO_MAX,
    LOCATION_MAX,
};
pub use submission::{profile_request, submit_profile};
