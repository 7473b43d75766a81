use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::use_cases::{auth_service::AuthConfig, ownership::OwnershipPolicy};

/// Process configuration, read from the environment (and `.env`).
#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(alias = "secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default)]
    pub strict_ownership: bool,
}

/// Longest token lifetime accepted: one year.
const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("environment error: {0}")]
    Env(#[from] envy::Error),
    #[error("TOKEN_TTL_SECS must be between 1 and {MAX_TOKEN_TTL_SECS}, got {0}")]
    TokenTtl(i64),
    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    BcryptCost(u32),
}

fn default_port() -> u16 {
    3003
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_ttl_secs() -> i64 {
    3600
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        envy::from_env::<Settings>()?.validated()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Settings>(vars)?.validated()
    }

    fn validated(self) -> Result<Self, SettingsError> {
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(SettingsError::TokenTtl(self.token_ttl_secs));
        }
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            return Err(SettingsError::BcryptCost(self.bcrypt_cost));
        }
        Ok(self)
    }

    /// Empty `DATABASE_URL` counts as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl: Duration::seconds(self.token_ttl_secs),
            bcrypt_cost: self.bcrypt_cost,
        }
    }

    pub fn ownership_policy(&self) -> OwnershipPolicy {
        OwnershipPolicy::from_strict(self.strict_ownership)
    }
}
