use anyhow::Result;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use service::{Store, TokenIssuer};
use tracing::{debug, warn};

use crate::schemas::AppState;

/// Signing key used when none is configured. Only fit for local development.
pub const DEVELOPMENT_JWT_KEY: &str = "realty-development-signing-key-change-me";

/// Bearer token settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// HMAC secret for HS256
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

/// Application settings.
///
/// Sources, later ones winning: built-in defaults, an optional `realty.{toml,yaml,json}`
/// file, `REALTY__*` environment variables (after `.env` is loaded). CLI flags override
/// the result.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub request_timeout_secs: u64,
    pub jwt: JwtSettings,
}

impl Settings {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("database_url", "sqlite://realty.db?mode=rwc")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("request_timeout_secs", 30)?
            .set_default("jwt.key", DEVELOPMENT_JWT_KEY)?
            .set_default("jwt.issuer", "realty")?
            .set_default("jwt.audience", "realty-clients")?
            .set_default("jwt.expiry_minutes", 120)?)
    }

    /// Load settings from every configured source.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings: Settings = Self::defaults()?
            .add_source(File::with_name("realty").required(false))
            .add_source(Environment::with_prefix("REALTY").separator("__"))
            .build()?
            .try_deserialize()?;

        debug!("Settings loaded: database_url={}, bind_address={}", settings.database_url, settings.bind_address);
        if settings.jwt.key == DEVELOPMENT_JWT_KEY {
            warn!("Using the development JWT signing key; set REALTY__JWT__KEY in production");
        }
        Ok(settings)
    }

    /// Apply values given on the command line.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            &self.jwt.key,
            &self.jwt.issuer,
            &self.jwt.audience,
            self.jwt.expiry_minutes,
        )
    }
}

/// Connect to the configured database and build the shared handler state.
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    let store = Store::connect(&settings.database_url).await?;
    Ok(AppState {
        store,
        tokens: settings.token_issuer(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.database_url, "sqlite://realty.db?mode=rwc");
        assert_eq!(settings.bind_address, "0.0.0.0:3000");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.jwt.expiry_minutes, 120);
        assert_eq!(settings.jwt.key, DEVELOPMENT_JWT_KEY);
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .set_override("jwt.issuer", "elsewhere")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.jwt.issuer, "elsewhere");

        let settings = settings.with_overrides(Some("sqlite::memory:".to_string()), None);
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_token_issuer_uses_jwt_settings() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let tokens = settings.token_issuer();
        let claims = tokens.verify(&tokens.issue(3, "john").unwrap()).unwrap();
        assert_eq!(claims.iss, "realty");
        assert_eq!(claims.aud, "realty-clients");
    }
}
