use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

use crate::features::wizard::FormValue;

pub const MAX_SOCIAL_LINKS: usize = 5;

static HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{1,50}$").expect("valid handle pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SocialPlatform {
    Instagram,
    X,
    TikTok,
    YouTube,
    LinkedIn,
    Facebook,
    Website,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 7] = [
        SocialPlatform::Instagram,
        SocialPlatform::X,
        SocialPlatform::TikTok,
        SocialPlatform::YouTube,
        SocialPlatform::LinkedIn,
        SocialPlatform::Facebook,
        SocialPlatform::Website,
    ];

    /// Key stored in the `socialLinks` map
    pub fn key(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::X => "x",
            SocialPlatform::TikTok => "tiktok",
            SocialPlatform::YouTube => "youtube",
            SocialPlatform::LinkedIn => "linkedin",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Website => "website",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::X => "X",
            SocialPlatform::TikTok => "TikTok",
            SocialPlatform::YouTube => "YouTube",
            SocialPlatform::LinkedIn => "LinkedIn",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Website => "Website",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|platform| platform.key() == key)
    }

    /// Profile URL prefix for bare handles; `None` for free-form websites
    fn profile_prefix(&self) -> Option<&'static str> {
        match self {
            SocialPlatform::Instagram => Some("https://instagram.com/"),
            SocialPlatform::X => Some("https://x.com/"),
            SocialPlatform::TikTok => Some("https://www.tiktok.com/@"),
            SocialPlatform::YouTube => Some("https://www.youtube.com/@"),
            SocialPlatform::LinkedIn => Some("https://www.linkedin.com/in/"),
            SocialPlatform::Facebook => Some("https://www.facebook.com/"),
            SocialPlatform::Website => None,
        }
    }

    fn hosts(&self) -> &'static [&'static str] {
        match self {
            SocialPlatform::Instagram => &["instagram.com"],
            SocialPlatform::X => &["x.com", "twitter.com"],
            SocialPlatform::TikTok => &["tiktok.com"],
            SocialPlatform::YouTube => &["youtube.com", "youtu.be"],
            SocialPlatform::LinkedIn => &["linkedin.com"],
            SocialPlatform::Facebook => &["facebook.com", "fb.com"],
            SocialPlatform::Website => &[],
        }
    }

    /// Turn a handle or URL into the canonical link for this platform
    pub fn normalize(&self, input: &str) -> Result<String, SocialLinkError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SocialLinkError::Empty);
        }

        if let Some(rest) = strip_scheme(input) {
            let host = rest
                .split(['/', '?', '#'])
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            let host = host.strip_prefix("www.").unwrap_or(&host);
            if host.is_empty() || !host.contains('.') {
                return Err(SocialLinkError::InvalidUrl);
            }
            let hosts = self.hosts();
            let on_platform = hosts
                .iter()
                .any(|allowed| host == *allowed || host.ends_with(&format!(".{}", allowed)));
            if !hosts.is_empty() && !on_platform {
                return Err(SocialLinkError::WrongSite {
                    platform: self.label().to_string(),
                });
            }
            return Ok(format!("https://{}", rest.trim_end_matches('/')));
        }

        match self.profile_prefix() {
            Some(prefix) => {
                let handle = input.trim_start_matches('@');
                if !HANDLE_PATTERN.is_match(handle) {
                    return Err(SocialLinkError::InvalidHandle);
                }
                Ok(format!("{}{}", prefix, handle))
            }
            // Bare domains such as "example.com"
            None if input.contains('.') && !input.contains(char::is_whitespace) => {
                Ok(format!("https://{}", input.trim_end_matches('/')))
            }
            None => Err(SocialLinkError::InvalidUrl),
        }
    }
}

fn strip_scheme(input: &str) -> Option<&str> {
    let lower = input.to_ascii_lowercase();
    if lower.starts_with("https://") {
        Some(&input["https://".len()..])
    } else if lower.starts_with("http://") {
        Some(&input["http://".len()..])
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SocialLinkError {
    #[error("Enter a handle or link")]
    Empty,
    #[error("Handles may only contain letters, numbers, periods, dashes and underscores")]
    InvalidHandle,
    #[error("Enter a valid link")]
    InvalidUrl,
    #[error("That link isn't a {platform} profile")]
    WrongSite { platform: String },
    #[error("You can add up to {max} links")]
    LimitReached { max: usize },
}

/// Chips shown on the social links step, keyed by platform
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SocialLinks(BTreeMap<SocialPlatform, String>);

impl SocialLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored `socialLinks` value, dropping unknown platforms
    pub fn from_value(value: Option<&FormValue>) -> Self {
        let links = value
            .and_then(FormValue::as_map)
            .map(|map| {
                map.iter()
                    .filter_map(|(key, url)| {
                        SocialPlatform::from_key(key).map(|platform| (platform, url.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self(links)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, platform: SocialPlatform) -> Option<&str> {
        self.0.get(&platform).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SocialPlatform, &str)> {
        self.0.iter().map(|(platform, url)| (*platform, url.as_str()))
    }

    /// Platforms that have no chip yet
    pub fn available_platforms(&self) -> Vec<SocialPlatform> {
        SocialPlatform::ALL
            .iter()
            .copied()
            .filter(|platform| !self.0.contains_key(platform))
            .collect()
    }

    /// Add or replace the link for `platform`
    pub fn add(&mut self, platform: SocialPlatform, input: &str) -> Result<&str, SocialLinkError> {
        if !self.0.contains_key(&platform) && self.0.len() >= MAX_SOCIAL_LINKS {
            return Err(SocialLinkError::LimitReached {
                max: MAX_SOCIAL_LINKS,
            });
        }
        let url = platform.normalize(input)?;
        self.0.insert(platform, url);
        Ok(self.get(platform).unwrap_or_default())
    }

    pub fn remove(&mut self, platform: SocialPlatform) -> Option<String> {
        self.0.remove(&platform)
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(platform, url)| (platform.key().to_string(), url.clone()))
            .collect()
    }
}

impl From<&SocialLinks> for FormValue {
    fn from(links: &SocialLinks) -> Self {
        FormValue::Map(links.to_map())
    }
}
