use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::FetchError;

pub const DEFAULT_SETTINGS_FILE: &str = "artbase.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the API. May be relative, in which case it is resolved
    /// against `origin`.
    pub api_base: String,
    pub origin: String,
    pub artworks_path: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "/api".into(),
            origin: "http://127.0.0.1:8000".into(),
            artworks_path: "/artworks".into(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Absolute API base. A trailing slash after a non-root path is dropped.
    pub fn api_base_url(&self) -> Result<Url, FetchError> {
        let raw = self.api_base.trim();
        let resolved = match Url::parse(raw) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = Url::parse(self.origin.trim()).map_err(|source| {
                    FetchError::InvalidUrl {
                        value: self.origin.clone(),
                        source,
                    }
                })?;
                origin.join(raw).map_err(|source| FetchError::InvalidUrl {
                    value: raw.to_string(),
                    source,
                })?
            }
            Err(source) => {
                return Err(FetchError::InvalidUrl {
                    value: raw.to_string(),
                    source,
                })
            }
        };

        let trimmed = resolved.as_str().trim_end_matches('/').to_string();
        Url::parse(&trimmed).map_err(|source| FetchError::InvalidUrl {
            value: trimmed,
            source,
        })
    }

    pub fn artworks_path(&self) -> String {
        normalize_path(&self.artworks_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Defaults, then the TOML file at `path` if it exists, then the process
/// environment.
pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => settings = with_blank_values_defaulted(file_cfg),
            Err(err) => warn!("ignoring unreadable settings file {}: {err}", path.display()),
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

/// Empty values count as unset, so `ARTBASE_API_URL=` still falls back to
/// the default base.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = read("ARTBASE_API_URL") {
        settings.api_base = v;
    }
    if let Some(v) = read("APP__API_URL") {
        settings.api_base = v;
    }

    if let Some(v) = read("ARTBASE_ORIGIN") {
        settings.origin = v;
    }

    if let Some(v) = read("ARTBASE_ARTWORKS_PATH") {
        settings.artworks_path = v;
    }

    if let Some(v) = read("ARTBASE_REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(err) => warn!("ignoring ARTBASE_REQUEST_TIMEOUT_SECS={v:?}: {err}"),
        }
    }
}

/// Blank strings in the settings file count as unset, like empty env values.
fn with_blank_values_defaulted(mut settings: Settings) -> Settings {
    let defaults = Settings::default();
    if settings.api_base.trim().is_empty() {
        settings.api_base = defaults.api_base;
    }
    if settings.origin.trim().is_empty() {
        settings.origin = defaults.origin;
    }
    if settings.artworks_path.trim().is_empty() {
        settings.artworks_path = defaults.artworks_path;
    }
    settings
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Settings::default().artworks_path;
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
