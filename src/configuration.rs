use std::env;

use config::{Config, ConfigError, Environment, File};

/// Default name of the cookie carrying the session identifier
pub const DEFAULT_SESSION_COOKIE: &str = "SessionID";

/// Settings
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

impl Settings {
    /// Get settings from configuration files
    pub fn get_config() -> Result<Self, ConfigError> {
        let path = env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        let config_dir = path.join("config");

        // Detect the running environment (default: `dev`)
        let env: Env = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "dev".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        // Read the configuration from files and environment variables
        let settings: Self = Config::builder()
            // Base configuration file
            .add_source(File::from(config_dir.join("base.yaml")).required(true))
            // Environment-specific configuration file
            .add_source(File::from(config_dir.join(env.as_str())).required(true))
            // Environment variables (e.g., `SESSION_TERMINATOR__APPLICATION__APP_PORT=8888`
            // would set Settings.application.app_port to 8888)
            .add_source(Environment::with_prefix("SESSION_TERMINATOR").separator("__"))
            .build()?
            .try_deserialize()?;

        settings
            .session
            .validate(&env)
            .map_err(ConfigError::Message)?;
        Ok(settings)
    }
}

/// Application settings
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApplicationSettings {
    pub app_host: String,
    pub app_port: u16,
}

/// Session cookie settings
#[derive(Clone, Debug, serde::Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: default_cookie_secure(),
        }
    }
}

impl SessionSettings {
    /// Reject cookie settings that would weaken the session cookie in `env`
    pub fn validate(&self, env: &Env) -> Result<(), String> {
        if self.cookie_name.trim().is_empty() {
            return Err("`session.cookie_name` must not be empty".into());
        }
        if matches!(env, Env::Production) && !self.cookie_secure {
            return Err("`session.cookie_secure` cannot be disabled in `prd`".into());
        }
        Ok(())
    }
}

fn default_cookie_name() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

const fn default_cookie_secure() -> bool {
    true
}

/// Available runtime environments
#[derive(Debug)]
pub enum Env {
    Development,
    Production,
}

impl Env {
    /// Represent environment as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prd",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Self::Development),
            "prd" => Ok(Self::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `dev` or `prd`"
            )),
        }
    }
}
