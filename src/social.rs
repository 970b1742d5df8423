use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Social link feature switch plus the per-platform URLs, read once at
/// startup from a JSON document shaped `{"socialMedia": {...}}`.
///
/// Loading never fails: a missing, unreadable or malformed document leaves
/// the feature disabled with no links, which suppresses every navigation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SocialConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub links: HashMap<String, String>,
}

/// Top-level shape of the document; everything outside `socialMedia` is
/// ignored.
#[derive(Deserialize)]
struct SocialDocument {
    #[serde(rename = "socialMedia")]
    social_media: Option<SocialConfig>,
}

impl SocialConfig {
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::warn!(
                    document = %path.display(),
                    "no socialMedia section in document, social links disabled"
                );
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    e.cause_chain=?e,
                    document = %path.display(),
                    "could not load social config, social links disabled"
                );
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Option<Self>, anyhow::Error> {
        let raw = std::fs::read_to_string(path)?;
        let document: SocialDocument = serde_json::from_str(&raw)?;
        Ok(document.social_media)
    }

    /// The URL a click on `platform`'s icon should navigate to, or `None`
    /// when navigation is suppressed (feature disabled, or no URL
    /// configured for that platform).
    pub fn link_for(
        &self,
        platform: &str,
    ) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        let url = self.links.get(platform).map(String::as_str);
        if url.is_none() {
            tracing::warn!("no URL configured for {platform}");
        }
        url
    }

    /// Every platform that currently navigates somewhere, sorted by name so
    /// output is stable.
    pub fn active_links(&self) -> Vec<(&str, &str)> {
        if !self.enabled {
            return Vec::new();
        }
        let mut links: Vec<_> = self
            .links
            .iter()
            .map(|(platform, url)| (platform.as_str(), url.as_str()))
            .collect();
        links.sort();
        links
    }
}
