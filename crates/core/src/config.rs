use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::AccessPolicy;

/// Resolved configuration: defaults, then an optional TOML file, then
/// `ROLLCALL_*` environment overrides, then programmatic overrides, then
/// validation.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub discord: DiscordConfig,
    pub access: AccessConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DiscordConfig {
    /// Empty token means the gateway runs on the noop transport (offline
    /// mode); a real deployment supplies it via file or env.
    pub bot_token: SecretString,
}

#[derive(Clone, Debug)]
pub struct AccessConfig {
    pub policy: PolicyKind,
    pub role: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    AdminOnly,
    AdminOrRole,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub bot_token: Option<String>,
    pub policy: Option<PolicyKind>,
    pub role: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            discord: DiscordConfig { bot_token: String::new().into() },
            access: AccessConfig { policy: PolicyKind::AdminOnly, role: None },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin_only" => Ok(Self::AdminOnly),
            "admin_or_role" => Ok(Self::AdminOrRole),
            other => Err(ConfigError::Validation(format!(
                "unsupported access policy `{other}` (expected admin_only|admin_or_role)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("rollcall.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// The privileged-action policy this deployment runs under. Only valid
    /// after `validate`, which guarantees the role is present for the
    /// role-based variant.
    pub fn access_policy(&self) -> AccessPolicy {
        match (&self.access.policy, &self.access.role) {
            (PolicyKind::AdminOrRole, Some(role)) => {
                AccessPolicy::AdminOrRole { role: role.clone() }
            }
            _ => AccessPolicy::AdminOnly,
        }
    }

    /// Whether a real gateway connection can be attempted.
    pub fn has_bot_token(&self) -> bool {
        !self.discord.bot_token.expose_secret().trim().is_empty()
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(discord) = patch.discord {
            if let Some(bot_token_value) = discord.bot_token {
                self.discord.bot_token = bot_token_value.into();
            }
        }

        if let Some(access) = patch.access {
            if let Some(policy) = access.policy {
                self.access.policy = policy;
            }
            if let Some(role) = access.role {
                self.access.role = Some(role);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("ROLLCALL_DISCORD_BOT_TOKEN") {
            self.discord.bot_token = value.into();
        }
        if let Some(value) = read_env("ROLLCALL_ACCESS_POLICY") {
            self.access.policy = value.parse()?;
        }
        if let Some(value) = read_env("ROLLCALL_ACCESS_ROLE") {
            self.access.role = Some(value);
        }

        let log_level =
            read_env("ROLLCALL_LOGGING_LEVEL").or_else(|| read_env("ROLLCALL_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("ROLLCALL_LOGGING_FORMAT").or_else(|| read_env("ROLLCALL_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(bot_token) = overrides.bot_token {
            self.discord.bot_token = bot_token.into();
        }
        if let Some(policy) = overrides.policy {
            self.access.policy = policy;
        }
        if let Some(role) = overrides.role {
            self.access.role = Some(role);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_access(&self.access)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("rollcall.toml"), PathBuf::from("config/rollcall.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_access(access: &AccessConfig) -> Result<(), ConfigError> {
    if access.policy == PolicyKind::AdminOrRole {
        let missing = access.role.as_ref().map(|role| role.trim().is_empty()).unwrap_or(true);
        if missing {
            return Err(ConfigError::Validation(
                "access.role is required when access.policy is `admin_or_role`".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    discord: Option<DiscordPatch>,
    access: Option<AccessPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DiscordPatch {
    bot_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AccessPatch {
    policy: Option<PolicyKind>,
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
