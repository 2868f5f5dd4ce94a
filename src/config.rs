use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::UserId;
use crate::client::DEFAULT_BASE_URL;
use crate::error::{HelpdeskError, Result};

const BASE_URL_ENV: &str = "HELPDESK_API_URL";
const USER_ID_ENV: &str = "HELPDESK_USER_ID";

#[derive(Deserialize, Serialize, Default, Debug, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    /// Acting user for comment mutations and as the default ticket owner.
    pub user_id: Option<UserId>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| HelpdeskError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| HelpdeskError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "helpdesk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(HelpdeskError::NoConfigDir)
    }

    /// Base URL with env var taking precedence over config file.
    pub fn base_url(&self) -> Result<Url> {
        let raw = std::env::var(BASE_URL_ENV)
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        parse_base_url(&raw)
    }

    /// Acting user, preferring an explicit argument, then env var, then config.
    pub fn acting_user(&self, explicit: Option<UserId>) -> Result<UserId> {
        resolve_user(explicit, std::env::var(USER_ID_ENV).ok(), self.user_id)
    }

    /// Like [`Config::acting_user`], but having no user configured is not an
    /// error. A malformed `HELPDESK_USER_ID` still is.
    pub fn default_owner(&self, explicit: Option<UserId>) -> Result<Option<UserId>> {
        unless_missing(self.acting_user(explicit))
    }
}

fn resolve_user(
    explicit: Option<UserId>,
    from_env: Option<String>,
    from_file: Option<UserId>,
) -> Result<UserId> {
    if let Some(id) = explicit {
        return Ok(id);
    }

    if let Some(raw) = from_env {
        return raw.trim().parse().map_err(|_| HelpdeskError::InvalidInput {
            field: USER_ID_ENV,
            value: raw,
        });
    }

    from_file.ok_or(HelpdeskError::MissingUser)
}

fn unless_missing(user: Result<UserId>) -> Result<Option<UserId>> {
    match user {
        Ok(id) => Ok(Some(id)),
        Err(HelpdeskError::MissingUser) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| HelpdeskError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(HelpdeskError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "expected an http(s) URL".to_string(),
        });
    }

    Ok(url)
}
